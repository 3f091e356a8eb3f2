use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::{
    cmark::{FencedCodeBlock, SectionLevel},
    contents::Document,
    error::Result,
};

const EXPECTED_HEADING_TEXT: &str = "Example Usage";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExampleSectionOptions {
    /// The language every example code block must declare. Generated bindings for other
    /// languages may keep untranslated blocks, so any language other than `terraform` turns
    /// the code block checks off.
    pub code_block_language: String,
}

impl Default for ExampleSectionOptions {
    fn default() -> Self {
        Self {
            code_block_language: String::from(FencedCodeBlock::LANGUAGE_TERRAFORM),
        }
    }
}

impl Document {
    pub(super) fn check_example_section(&self, options: &ExampleSectionOptions) -> Result<()> {
        let Some(ref section) = self.sections.example else {
            bail!("missing example section: ## {}", EXPECTED_HEADING_TEXT)
        };

        let heading = &section.heading;

        if heading.level != SectionLevel::H2 {
            bail!(
                "example section heading level ({}) should be: {}",
                heading.level,
                SectionLevel::H2
            )
        }

        if heading.text != EXPECTED_HEADING_TEXT {
            bail!(
                "example section heading ({}) should be: {}",
                heading.text,
                EXPECTED_HEADING_TEXT
            )
        }

        let expected_language = options.code_block_language.as_str();

        if expected_language != FencedCodeBlock::LANGUAGE_TERRAFORM {
            return Ok(());
        }

        for code_block in &section.fenced_code_blocks {
            let language = code_block.language_or_missing();

            if language != expected_language {
                bail!(
                    "example section code block language ({}) should be: ```{}",
                    language,
                    expected_language
                )
            }

            if !code_block.trimmed_text().contains(&self.resource_name) {
                bail!(
                    "example section code block text should contain resource name: {}",
                    self.resource_name
                )
            }
        }

        Ok(())
    }
}
