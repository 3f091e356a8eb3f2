use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::{cmark::SectionLevel, contents::Document, error::Result};

const EXPECTED_HEADING_TEXT: &str = "Attribute Reference";
const ALTERNATE_HEADING_TEXT: &str = "Attributes Reference";

/// Accepted bylines of the attributes section, the first paragraph after its heading.
pub const DEFAULT_BYLINES: [&str; 3] = [
    "This resource exports the following attributes in addition to the arguments above:",
    "In addition to all arguments above, the following attributes are exported:",
    "No additional attributes are exported.",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AttributesSectionOptions {
    /// Require every attribute list, at any nesting depth, to be sorted by name.
    pub require_schema_ordering: bool,
    pub bylines: Vec<String>,
}

impl Default for AttributesSectionOptions {
    fn default() -> Self {
        Self {
            require_schema_ordering: false,
            bylines: DEFAULT_BYLINES.iter().map(|s| String::from(*s)).collect(),
        }
    }
}

impl AttributesSectionOptions {
    /// The accepted bylines for messages, the first one preferred.
    fn bylines_message(&self) -> String {
        let quoted: Vec<_> = self
            .bylines
            .iter()
            .map(|byline| format!("{:?}", byline))
            .collect();

        match quoted.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [preferred, others @ .., last] => {
                let mut message = format!("{} (preferred)", preferred);

                for byline in others {
                    message.push_str(", ");
                    message.push_str(byline);
                }

                message.push_str(" or ");
                message.push_str(last);
                message
            }
        }
    }
}

impl Document {
    pub(super) fn check_attributes_section(
        &self,
        options: &AttributesSectionOptions,
    ) -> Result<()> {
        let Some(ref section) = self.sections.attributes else {
            bail!("missing attribute section: ## {}", EXPECTED_HEADING_TEXT)
        };

        let heading = &section.heading;

        if heading.level != SectionLevel::H2 {
            bail!(
                "attribute section heading level ({}) should be: {}",
                heading.level,
                SectionLevel::H2
            )
        }

        if heading.text != EXPECTED_HEADING_TEXT && heading.text != ALTERNATE_HEADING_TEXT {
            bail!(
                "attribute section heading ({}) should be: {:?} (preferred) or {:?}",
                heading.text,
                EXPECTED_HEADING_TEXT,
                ALTERNATE_HEADING_TEXT
            )
        }

        match section.paragraphs.as_slice() {
            [] => bail!(
                "attribute section byline should be: {}",
                options.bylines_message()
            ),
            [byline] if !options.bylines.iter().any(|b| *b == byline.text) => bail!(
                "attribute section byline ({}) should be: {}",
                byline.text,
                options.bylines_message()
            ),
            _ => (),
        }

        if options.require_schema_ordering
            && !section
                .schema_attribute_lists
                .iter()
                .all(|list| list.is_sorted_by_name())
        {
            bail!("attribute section is not sorted by name")
        }

        Ok(())
    }
}
