mod arguments;
mod attributes;
mod example;
mod import;
mod timeouts;
mod title;

pub use arguments::*;
pub use attributes::*;
pub use example::*;

use serde::{Deserialize, Serialize};

use super::Document;
use crate::error::Result;

/// Options for the content checks, grouped by section.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CheckOptions {
    pub arguments_section: ArgumentsSectionOptions,
    pub attributes_section: AttributesSectionOptions,
    pub example_section: ExampleSectionOptions,
}

impl CheckOptions {
    /// Require sorted argument and attribute lists.
    pub fn with_schema_ordering(mut self, require_schema_ordering: bool) -> Self {
        self.arguments_section.require_schema_ordering = require_schema_ordering;
        self.attributes_section.require_schema_ordering = require_schema_ordering;
        self
    }

    /// Set the language expected for example code blocks.
    pub fn with_example_language(mut self, language: impl Into<String>) -> Self {
        self.example_section.code_block_language = language.into();
        self
    }
}

impl Document {
    /// Check all sections in order (title, example, arguments, attributes, timeouts, import)
    /// and return the first failure.
    pub fn check(&self, options: &CheckOptions) -> Result<()> {
        self.check_title_section()?;
        self.check_example_section(&options.example_section)?;
        self.check_arguments_section(&options.arguments_section)?;
        self.check_attributes_section(&options.attributes_section)?;
        self.check_timeouts_section()?;
        self.check_import_section()?;

        Ok(())
    }
}
