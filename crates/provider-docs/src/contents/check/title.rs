use anyhow::bail;

use crate::{cmark::SectionLevel, contents::Document, error::Result};

const TITLE_PREFIXES: [&str; 2] = ["Data Source: ", "Resource: "];

impl Document {
    pub(super) fn check_title_section(&self) -> Result<()> {
        let Some(ref section) = self.sections.title else {
            bail!("missing title section: # Resource: {}", self.resource_name)
        };

        let heading = &section.heading;

        if heading.level != SectionLevel::H1 {
            bail!(
                "title section heading level ({}) should be: {}",
                heading.level,
                SectionLevel::H1
            )
        }

        if !TITLE_PREFIXES
            .iter()
            .any(|prefix| heading.text.starts_with(prefix))
        {
            bail!(
                "title section heading ({}) should have prefix: {:?} or {:?}",
                heading.text,
                TITLE_PREFIXES[0],
                TITLE_PREFIXES[1]
            )
        }

        if !section.fenced_code_blocks.is_empty() {
            bail!("title section code examples should be in Example Usage section")
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::contents::check::test::document;

    #[test]
    fn passes_resource_title() {
        document("# Resource: test_thing\n\nManages a thing.\n")
            .check_title_section()
            .expect("should pass");
    }

    #[test]
    fn passes_data_source_title() {
        document("# Data Source: test_thing\n")
            .check_title_section()
            .expect("should pass");
    }

    #[test]
    fn fails_missing_heading() {
        let error = document("Manages a thing.\n\n## Example Usage\n")
            .check_title_section()
            .expect_err("should fail");

        assert_eq!(
            "missing title section: # Resource: test_thing",
            error.to_string()
        );
    }

    #[test]
    fn fails_missing_heading_resource_type() {
        let error = document("# test_thing\n")
            .check_title_section()
            .expect_err("should fail");

        assert_eq!(
            "title section heading (test_thing) should have prefix: \
             \"Data Source: \" or \"Resource: \"",
            error.to_string()
        );
    }

    #[test]
    fn fails_wrong_heading_level() {
        let error = document("## Resource: test_thing\n")
            .check_title_section()
            .expect_err("should fail");

        assert_eq!(
            "title section heading level (2) should be: 1",
            error.to_string()
        );
    }

    #[test]
    fn fails_wrong_resource_in_heading() {
        let error = document("# Resource: test_other\n")
            .check_title_section()
            .expect_err("should fail");

        assert!(error.to_string().starts_with("missing title section"));
    }

    #[test]
    fn fails_code_block_in_title_section() {
        let source = concat!(
            "# Resource: test_thing\n\n",
            "```terraform\nresource \"test_thing\" \"x\" {}\n```\n",
        );
        let error = document(source)
            .check_title_section()
            .expect_err("should fail");

        assert_eq!(
            "title section code examples should be in Example Usage section",
            error.to_string()
        );
    }
}
