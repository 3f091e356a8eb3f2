use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::{cmark::SectionLevel, contents::Document, error::Result};

const EXPECTED_HEADING_TEXT: &str = "Argument Reference";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ArgumentsSectionOptions {
    /// Require every argument list, at any nesting depth, to be sorted by name.
    pub require_schema_ordering: bool,
}

impl Document {
    pub(super) fn check_arguments_section(&self, options: &ArgumentsSectionOptions) -> Result<()> {
        let Some(ref section) = self.sections.arguments else {
            bail!("missing arguments section: ## {}", EXPECTED_HEADING_TEXT)
        };

        let heading = &section.heading;

        if heading.level != SectionLevel::H2 {
            bail!(
                "arguments section heading level ({}) should be: {}",
                heading.level,
                SectionLevel::H2
            )
        }

        if heading.text != EXPECTED_HEADING_TEXT {
            bail!(
                "arguments section heading ({}) should be: {}",
                heading.text,
                EXPECTED_HEADING_TEXT
            )
        }

        if options.require_schema_ordering
            && !section
                .schema_attribute_lists
                .iter()
                .all(|list| list.is_sorted_by_name())
        {
            bail!("arguments section is not sorted by name")
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::contents::check::test::document;

    const UNSORTED: &str = "## Argument Reference

The following arguments are supported:

* `name` - (Required) The name.
* `description` - (Optional) The description.
";

    const UNSORTED_NESTED: &str = "## Argument Reference

* `config` - (Optional) Configuration.
    * `zone` - (Optional) Zone.
    * `region` - (Required) Region.
* `name` - (Required) The name.
";

    #[test]
    fn passes_valid_section() {
        document("## Argument Reference\n\n* `a` - (Required) A.\n* `b` - (Optional) B.\n")
            .check_arguments_section(&ArgumentsSectionOptions {
                require_schema_ordering: true,
            })
            .expect("should pass");
    }

    #[test]
    fn fails_missing_heading() {
        let error = document("# Resource: test_thing\n")
            .check_arguments_section(&ArgumentsSectionOptions::default())
            .expect_err("should fail");

        assert_eq!(
            "missing arguments section: ## Argument Reference",
            error.to_string()
        );
    }

    #[test]
    fn fails_wrong_heading_level() {
        let error = document("### Argument Reference\n")
            .check_arguments_section(&ArgumentsSectionOptions::default())
            .expect_err("should fail");

        assert_eq!(
            "arguments section heading level (3) should be: 2",
            error.to_string()
        );
    }

    #[test]
    fn fails_wrong_heading_text() {
        let error = document("## Arguments Reference\n")
            .check_arguments_section(&ArgumentsSectionOptions::default())
            .expect_err("should fail");

        assert_eq!(
            "arguments section heading (Arguments Reference) should be: Argument Reference",
            error.to_string()
        );
    }

    #[test]
    fn ignores_ordering_unless_required() {
        document(UNSORTED)
            .check_arguments_section(&ArgumentsSectionOptions::default())
            .expect("should pass");
    }

    #[test]
    fn fails_unsorted_list() {
        let error = document(UNSORTED)
            .check_arguments_section(&ArgumentsSectionOptions {
                require_schema_ordering: true,
            })
            .expect_err("should fail");

        assert_eq!("arguments section is not sorted by name", error.to_string());
    }

    #[test]
    fn fails_unsorted_nested_list() {
        let error = document(UNSORTED_NESTED)
            .check_arguments_section(&ArgumentsSectionOptions {
                require_schema_ordering: true,
            })
            .expect_err("should fail");

        assert_eq!("arguments section is not sorted by name", error.to_string());
    }
}
