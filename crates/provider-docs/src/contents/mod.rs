//! Section structure and content checks for resource and data source documentation files.

mod check;
mod schema;
mod sections;

pub use check::*;
pub use schema::*;
pub use sections::*;

use anyhow::Context;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    cmark::{self, Metadata},
    error::Result,
};

/// A single documentation file, checked against the expected section layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The provider name, empty for provider function documentation.
    pub provider_name: String,
    /// The name expected in the title and code examples, e.g. `test_thing` for `docs/r/thing.md`.
    pub resource_name: String,
    /// Front matter of the document.
    pub metadata: Metadata,
    /// The sections found while parsing.
    pub sections: Sections,
    path: PathBuf,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, provider_name: impl Into<String>) -> Document {
        let path = path.into();
        let provider_name = provider_name.into();
        let resource_name = resource_name(&provider_name, &path);

        Document {
            provider_name,
            resource_name,
            metadata: Metadata::default(),
            sections: Sections::default(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file from disk and parse its sections.
    pub fn parse(&mut self) -> Result<()> {
        let source = fs::read(&self.path)
            .with_context(|| format!("error reading file ({})", self.path.display()))?;

        self.parse_source(&source)
            .with_context(|| format!("error parsing file ({}) sections", self.path.display()))
    }

    /// Parse already loaded file contents.
    pub fn parse_source(&mut self, source: &[u8]) -> Result<()> {
        let markdown = cmark::parse(source)?;

        self.sections = Sections::from_blocks(&markdown.blocks, &self.resource_name);
        self.metadata = markdown.metadata;

        Ok(())
    }
}

/// Derive the resource name from the provider name and the file name up to its first period.
pub fn resource_name(provider_name: &str, path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let base_name = file_name.split('.').next().unwrap_or_default();

    if provider_name.is_empty() {
        String::from(base_name)
    } else {
        format!("{}_{}", provider_name, base_name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn derives_resource_name() {
        let document = Document::new("docs/r/thing.html.markdown", "test");

        assert_eq!("test", document.provider_name);
        assert_eq!("test_thing", document.resource_name);
        assert_eq!(Path::new("docs/r/thing.html.markdown"), document.path());
    }

    #[test]
    fn derives_resource_name_without_provider() {
        let document = Document::new("docs/functions/parse_arn.md", "");

        assert_eq!("parse_arn", document.resource_name);
    }

    #[test]
    fn derives_resource_name_without_extension() {
        assert_eq!("test_thing", resource_name("test", Path::new("thing")));
    }

    #[test]
    fn fails_to_parse_missing_file() {
        let mut document = Document::new("does/not/exist.md", "test");
        let error = document.parse().expect_err("should fail");

        assert!(error.to_string().contains("error reading file"));
    }

    #[test]
    fn parses_empty_source() {
        let mut document = Document::new("docs/r/thing.md", "test");
        document.parse_source(b"").expect("should parse");

        assert_eq!(Sections::default(), document.sections);
        assert!(document.metadata.is_empty());
    }

    #[test]
    fn parses_metadata() {
        let mut document = Document::new("docs/r/thing.md", "test");
        document
            .parse_source(b"---\nsubcategory: \"Things\"\n---\n\n# Resource: test_thing\n")
            .expect("should parse");

        assert_eq!(
            Some(String::from("Things")),
            document.metadata.get_str("subcategory")
        );
        assert!(document.sections.title.is_some());
    }

    #[test]
    fn parses_title_after_byte_order_mark() {
        let mut document = Document::new("docs/r/thing.md", "test");
        document
            .parse_source("\u{feff}# Resource: test_thing\n".as_bytes())
            .expect("should parse");

        let title = document.sections.title.expect("should have a title");
        assert_eq!("Resource: test_thing", title.heading.text);
    }
}
