use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use provider_docs::{cmark::Metadata, contents::Document, contents::Sections};

use crate::cli::InspectArgs;

#[derive(Debug, Serialize)]
struct Inspection<'a> {
    path: &'a Path,
    resource_name: &'a str,
    metadata: &'a Metadata,
    sections: &'a Sections,
}

pub fn run(args: &InspectArgs) -> Result<()> {
    let mut document = Document::new(&args.path, args.provider_name.as_str());
    document.parse()?;

    let inspection = Inspection {
        path: document.path(),
        resource_name: &document.resource_name,
        metadata: &document.metadata,
        sections: &document.sections,
    };

    println!("{}", serde_json::to_string_pretty(&inspection)?);

    Ok(())
}
