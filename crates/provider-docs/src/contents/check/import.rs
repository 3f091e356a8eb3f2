use anyhow::bail;

use crate::{cmark::SectionLevel, contents::Document, error::Result};

const EXPECTED_HEADING_TEXT: &str = "Import";

impl Document {
    /// The import section is optional.
    pub(super) fn check_import_section(&self) -> Result<()> {
        let Some(ref section) = self.sections.import else {
            return Ok(());
        };

        let heading = &section.heading;

        if heading.level != SectionLevel::H2 {
            bail!(
                "import section heading level ({}) should be: {}",
                heading.level,
                SectionLevel::H2
            )
        }

        if heading.text != EXPECTED_HEADING_TEXT {
            bail!(
                "import section heading ({}) should be: {}",
                heading.text,
                EXPECTED_HEADING_TEXT
            )
        }

        for code_block in &section.fenced_code_blocks {
            if !code_block.trimmed_text().contains(&self.resource_name) {
                bail!(
                    "import section code block text should contain resource name: {}",
                    self.resource_name
                )
            }
        }

        Ok(())
    }
}
