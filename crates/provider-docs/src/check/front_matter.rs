use anyhow::{bail, Context};

use crate::{
    cmark::{FrontMatter, Metadata},
    error::Result,
};

use super::{FileKind, Layout};

/// Rules for the YAML front matter of a documentation file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrontMatterOptions {
    pub no_layout: bool,
    pub no_page_title: bool,
    pub no_sidebar_current: bool,
    pub no_subcategory: bool,
    pub require_description: bool,
    pub require_layout: bool,
    pub require_page_title: bool,
    pub require_subcategory: bool,
    /// When not empty, a present subcategory must be one of these.
    pub allowed_subcategories: Vec<String>,
}

impl FrontMatterOptions {
    /// The fixed rules for a file kind in a layout. Subcategory rules for guides, data
    /// sources and resources come from configuration on top of these.
    pub fn for_file(layout: Layout, kind: FileKind) -> Self {
        let mut options = FrontMatterOptions {
            no_sidebar_current: true,
            ..Default::default()
        };

        match layout {
            Layout::Legacy => options.require_layout = true,
            Layout::Registry => options.no_layout = true,
        }

        match kind {
            FileKind::Index => {
                options.no_subcategory = true;
                options.require_page_title = layout == Layout::Legacy;
            }
            FileKind::Guide => options.require_page_title = true,
            FileKind::Function => options.no_subcategory = layout == Layout::Registry,
            FileKind::DataSource | FileKind::Resource => (),
        }

        options
    }

    /// Extract the front matter from file contents and check it.
    pub fn check_source(&self, source: &[u8]) -> Result<()> {
        let source = std::str::from_utf8(source).with_context(|| "file is not valid UTF-8")?;
        let metadata = FrontMatter::split(source).metadata()?;

        self.check(&metadata)
    }

    pub fn check(&self, metadata: &Metadata) -> Result<()> {
        let forbidden = [
            (self.no_layout, "layout"),
            (self.no_page_title, "page_title"),
            (self.no_sidebar_current, "sidebar_current"),
            (self.no_subcategory, "subcategory"),
        ];

        for (_, key) in forbidden.iter().filter(|(enabled, _)| *enabled) {
            if metadata.contains_key(key) {
                bail!("YAML frontmatter should not contain {}", key)
            }
        }

        let required = [
            (self.require_description, "description"),
            (self.require_layout, "layout"),
            (self.require_page_title, "page_title"),
            (self.require_subcategory, "subcategory"),
        ];

        for (_, key) in required.iter().filter(|(enabled, _)| *enabled) {
            if !metadata.contains_key(key) {
                bail!("YAML frontmatter missing required {}", key)
            }

            if metadata.get_str(key).is_none() {
                bail!("YAML frontmatter {} should be a string", key)
            }
        }

        if self.allowed_subcategories.is_empty() {
            return Ok(());
        }

        if let Some(subcategory) = metadata.get_str("subcategory") {
            if !self.allowed_subcategories.contains(&subcategory) {
                bail!(
                    "YAML frontmatter subcategory ({}) does not match allowed subcategories: {:?}",
                    subcategory,
                    self.allowed_subcategories
                )
            }
        }

        Ok(())
    }
}
