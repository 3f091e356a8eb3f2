use std::path::Path;

use crate::{
    contents::{CheckOptions as SectionCheckOptions, Document},
    error::Result,
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContentsOptions {
    pub enable: bool,
    pub provider_name: String,
    pub require_schema_ordering: bool,
}

impl ContentsOptions {
    /// Parse already loaded file contents as a resource or data source document and check
    /// its sections. Example code blocks are expected in `language`.
    pub fn check_source(&self, path: &Path, source: &[u8], language: &str) -> Result<()> {
        if !self.enable {
            return Ok(());
        }

        let options = SectionCheckOptions::default()
            .with_schema_ordering(self.require_schema_ordering)
            .with_example_language(language);

        let mut document = Document::new(path, self.provider_name.as_str());
        document.parse_source(source)?;
        document.check(&options)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const UNSORTED: &str = "# Resource: test_thing

## Example Usage

```terraform
resource \"test_thing\" \"example\" {}
```

## Argument Reference

* `b` - (Optional) B.
* `a` - (Required) A.

## Attribute Reference

No additional attributes are exported.
";

    fn options(enable: bool) -> ContentsOptions {
        ContentsOptions {
            enable,
            provider_name: String::from("test"),
            require_schema_ordering: true,
        }
    }

    #[test]
    fn skips_when_disabled() {
        options(false)
            .check_source(Path::new("docs/resources/thing.md"), b"", "terraform")
            .expect("should pass");
    }

    #[test]
    fn checks_when_enabled() {
        let error = options(true)
            .check_source(
                Path::new("docs/resources/thing.md"),
                UNSORTED.as_bytes(),
                "terraform",
            )
            .expect_err("should fail");

        assert_eq!("arguments section is not sorted by name", error.to_string());
    }

    #[test]
    fn uses_file_name_for_resource_name() {
        let error = options(true)
            .check_source(
                Path::new("docs/resources/other.md"),
                UNSORTED.as_bytes(),
                "terraform",
            )
            .expect_err("should fail");

        assert_eq!(
            "missing title section: # Resource: test_other",
            error.to_string()
        );
    }
}
