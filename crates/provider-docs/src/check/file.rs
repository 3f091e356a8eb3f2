use anyhow::{bail, Context};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::Result;

use super::{Layout, REGISTRY_MAXIMUM_SIZE_OF_FILE};

pub const FILE_EXTENSION_HTML_MARKDOWN: &str = ".html.markdown";
pub const FILE_EXTENSION_HTML_MD: &str = ".html.md";
pub const FILE_EXTENSION_MARKDOWN: &str = ".markdown";
pub const FILE_EXTENSION_MD: &str = ".md";

pub const LEGACY_FILE_EXTENSIONS: [&str; 4] = [
    FILE_EXTENSION_HTML_MARKDOWN,
    FILE_EXTENSION_HTML_MD,
    FILE_EXTENSION_MARKDOWN,
    FILE_EXTENSION_MD,
];

pub const REGISTRY_FILE_EXTENSIONS: [&str; 1] = [FILE_EXTENSION_MD];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileOptions {
    /// Provider root directory that documentation paths are relative to.
    pub base_path: PathBuf,
}

impl FileOptions {
    pub fn full_path(&self, path: &str) -> PathBuf {
        if self.base_path.as_os_str().is_empty() {
            PathBuf::from(path)
        } else {
            self.base_path.join(path)
        }
    }
}

impl Layout {
    pub fn file_extensions(self) -> &'static [&'static str] {
        match self {
            Layout::Legacy => &LEGACY_FILE_EXTENSIONS,
            Layout::Registry => &REGISTRY_FILE_EXTENSIONS,
        }
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// The extension of the file name from its first period, e.g. `.html.markdown`.
pub fn file_extension(path: &str) -> &str {
    let file_name = file_name(path);

    match file_name.find('.') {
        Some(index) if index > 0 => &file_name[index..],
        _ => "",
    }
}

pub fn file_extension_check(path: &str, layout: Layout) -> Result<()> {
    let valid_extensions = layout.file_extensions();

    if !valid_extensions
        .iter()
        .any(|extension| path.ends_with(extension))
    {
        bail!(
            "file does not end with a valid extension ({}), valid values: {:?}",
            file_extension(path),
            valid_extensions
        )
    }

    Ok(())
}

/// The Terraform Registry limits the size of each documentation file.
pub fn file_size_check(path: &Path) -> Result<()> {
    let size = fs::metadata(path)
        .with_context(|| format!("error reading file ({}) metadata", path.display()))?
        .len();

    if size >= REGISTRY_MAXIMUM_SIZE_OF_FILE {
        bail!(
            "exceeded maximum ({}) size of documentation file for Terraform Registry: {}",
            REGISTRY_MAXIMUM_SIZE_OF_FILE,
            size
        )
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn full_path() {
        let options = FileOptions::default();

        assert_eq!(
            PathBuf::from("docs/resources/thing.md"),
            options.full_path("docs/resources/thing.md")
        );

        let options = FileOptions {
            base_path: PathBuf::from("/full/path/to"),
        };

        assert_eq!(
            PathBuf::from("/full/path/to/docs/resources/thing.md"),
            options.full_path("docs/resources/thing.md")
        );
    }

    #[test]
    fn file_extensions() {
        assert_eq!(
            ".html.markdown",
            file_extension("website/docs/r/thing.html.markdown")
        );
        assert_eq!(".md", file_extension("docs/resources/thing.md"));
        assert_eq!("", file_extension("docs/resources/thing"));
        assert_eq!("", file_extension(".hidden"));
    }

    #[test]
    fn legacy_file_extensions() {
        for path in [
            "website/docs/r/thing.html.markdown",
            "website/docs/r/thing.html.md",
            "website/docs/r/thing.markdown",
            "website/docs/r/thing.md",
        ] {
            file_extension_check(path, Layout::Legacy).expect("should pass");
        }

        assert!(file_extension_check("website/docs/r/thing.txt", Layout::Legacy).is_err());
    }

    #[test]
    fn registry_file_extensions() {
        file_extension_check("docs/resources/thing.md", Layout::Registry).expect("should pass");

        let error = file_extension_check("docs/resources/thing.html.markdown", Layout::Registry)
            .expect_err("should fail");

        assert_eq!(
            r#"file does not end with a valid extension (.html.markdown), valid values: [".md"]"#,
            error.to_string()
        );
    }

    #[test]
    fn file_size_of_missing_file() {
        assert!(file_size_check(Path::new("does/not/exist.md")).is_err());
    }
}
