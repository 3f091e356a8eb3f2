//! Useful utilities for parsing and working with CommonMark files.

mod front_matter;
mod parser;
mod tree;

pub use front_matter::*;
pub use parser::*;
pub use tree::*;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A parsed Markdown document: its front matter metadata and its block tree.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Markdown {
    pub metadata: Metadata,
    pub blocks: Vec<Block>,
}

/// Parse raw document bytes. A missing front matter block yields empty metadata.
pub fn parse(source: &[u8]) -> Result<Markdown> {
    let source = std::str::from_utf8(source).with_context(|| "source is not valid UTF-8")?;
    let front_matter = FrontMatter::split(source);
    let metadata = front_matter.metadata()?;

    let parser = CMarkParser::new(front_matter.body).with_line_offset(front_matter.lines);
    let blocks = TreeParser::new(parser).parse()?;

    Ok(Markdown { metadata, blocks })
}
