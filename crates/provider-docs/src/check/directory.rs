use anyhow::{bail, Context};
use std::{
    collections::BTreeMap,
    path::{Component, Path},
};

use crate::{cmark::FencedCodeBlock, error::Result};

use super::REGISTRY_MAXIMUM_NUMBER_OF_FILES;

pub const CDKTF_INDEX_DIRECTORY: &str = "cdktf";
pub const LEGACY_INDEX_DIRECTORY: &str = "website/docs";
pub const REGISTRY_INDEX_DIRECTORY: &str = "docs";

pub const CDKTF_LANGUAGES: [&str; 5] = ["csharp", "go", "java", "python", "typescript"];

const LEGACY_SUBDIRECTORIES: [(&str, FileKind); 4] = [
    ("d", FileKind::DataSource),
    ("functions", FileKind::Function),
    ("guides", FileKind::Guide),
    ("r", FileKind::Resource),
];

const REGISTRY_SUBDIRECTORIES: [(&str, FileKind); 4] = [
    ("data-sources", FileKind::DataSource),
    ("functions", FileKind::Function),
    ("guides", FileKind::Guide),
    ("resources", FileKind::Resource),
];

/// Documentation files grouped by their directory, relative to the provider root and
/// separated by `/`.
pub type Directories = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layout {
    /// `website/docs`, with `d` and `r` subdirectories.
    Legacy,
    /// `docs`, with `data-sources` and `resources` subdirectories.
    Registry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileKind {
    Index,
    DataSource,
    Function,
    Guide,
    Resource,
}

/// What a documentation directory contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryKind {
    pub layout: Layout,
    /// Set for directories below `cdktf/`.
    pub cdktf: bool,
    /// Language of the code examples, missing for `cdktf/` itself.
    pub language: Option<&'static str>,
    /// Kind of the files in the directory, missing for the CDKTF index directories.
    pub file_kind: Option<FileKind>,
}

impl Layout {
    pub fn index_directory(self) -> &'static str {
        match self {
            Layout::Legacy => LEGACY_INDEX_DIRECTORY,
            Layout::Registry => REGISTRY_INDEX_DIRECTORY,
        }
    }

    fn subdirectories(self) -> &'static [(&'static str, FileKind)] {
        match self {
            Layout::Legacy => &LEGACY_SUBDIRECTORIES,
            Layout::Registry => &REGISTRY_SUBDIRECTORIES,
        }
    }

    fn subdirectory_kind(self, subdirectory: &str) -> Option<FileKind> {
        self.subdirectories()
            .iter()
            .find(|(name, _)| *name == subdirectory)
            .map(|(_, kind)| *kind)
    }

    /// Classify a directory relative to this layout's index directory.
    fn classify(self, relative: &str) -> Option<DirectoryKind> {
        let mut kind = DirectoryKind {
            layout: self,
            cdktf: false,
            language: Some(FencedCodeBlock::LANGUAGE_TERRAFORM),
            file_kind: Some(FileKind::Index),
        };

        if relative.is_empty() {
            return Some(kind);
        }

        if let Some(file_kind) = self.subdirectory_kind(relative) {
            kind.file_kind = Some(file_kind);
            return Some(kind);
        }

        let cdktf = strip_directory(relative, CDKTF_INDEX_DIRECTORY)?;
        kind.cdktf = true;
        kind.language = None;
        kind.file_kind = None;

        if cdktf.is_empty() {
            return Some(kind);
        }

        let (language, subdirectory) = match cdktf.split_once('/') {
            Some((language, subdirectory)) => (language, Some(subdirectory)),
            None => (cdktf, None),
        };

        kind.language = Some(*CDKTF_LANGUAGES.iter().find(|l| **l == language)?);

        if let Some(subdirectory) = subdirectory {
            kind.file_kind = Some(self.subdirectory_kind(subdirectory)?);
        }

        Some(kind)
    }
}

impl DirectoryKind {
    /// The kind of files to check in this directory. Only data sources and resources are
    /// checked in CDKTF directories.
    pub fn checked_file_kind(&self) -> Option<FileKind> {
        match self.file_kind {
            Some(kind @ (FileKind::DataSource | FileKind::Resource)) => Some(kind),
            Some(kind) if !self.cdktf => Some(kind),
            _ => None,
        }
    }
}

/// Classify a documentation directory, returning `None` for directories outside the
/// known layouts.
pub fn classify_directory(directory: &str) -> Option<DirectoryKind> {
    [Layout::Legacy, Layout::Registry]
        .into_iter()
        .find_map(|layout| {
            let relative = strip_directory(directory, layout.index_directory())?;
            layout.classify(relative)
        })
}

/// Strip `prefix` and its trailing separator, returning an empty string when the path
/// equals the prefix.
fn strip_directory<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if path == prefix {
        return Some("");
    }

    path.strip_prefix(prefix)?.strip_prefix('/')
}

fn documentation_glob_patterns() -> Vec<String> {
    let mut patterns = vec![format!("{}/index.md", REGISTRY_INDEX_DIRECTORY)];

    for (subdirectory, _) in REGISTRY_SUBDIRECTORIES {
        patterns.push(format!("{}/{}/**/*", REGISTRY_INDEX_DIRECTORY, subdirectory));
        patterns.push(format!(
            "{}/{}/*/{}/**/*",
            REGISTRY_INDEX_DIRECTORY, CDKTF_INDEX_DIRECTORY, subdirectory
        ));
    }

    patterns.push(format!("{}/**/*", LEGACY_INDEX_DIRECTORY));
    patterns
}

/// Find all documentation files below `base_path`, grouped by directory.
pub fn get_directories(base_path: impl AsRef<Path>) -> Result<Directories> {
    let base_path = base_path.as_ref();
    let escaped_base_path = glob::Pattern::escape(&base_path.to_string_lossy());
    let mut directories = Directories::new();

    for pattern in documentation_glob_patterns() {
        let pattern = if escaped_base_path.is_empty() {
            pattern
        } else {
            format!("{}/{}", escaped_base_path.trim_end_matches('/'), pattern)
        };

        let paths = glob::glob(&pattern).with_context(|| {
            format!(
                "error globbing Terraform Provider documentation directories: {}",
                pattern
            )
        })?;

        for path in paths {
            let path = path.with_context(|| "error reading documentation path")?;

            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(base_path).unwrap_or(&path);
            let Some((directory, file)) = split_relative_path(relative) else {
                continue;
            };

            directories.entry(directory).or_default().push(file);
        }
    }

    for files in directories.values_mut() {
        files.sort();
        files.dedup();
    }

    Ok(directories)
}

/// Split a relative path into its `/` separated parent directory and full file path.
fn split_relative_path(path: &Path) -> Option<(String, String)> {
    let components: Vec<_> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    let (_, parents) = components.split_last()?;

    Some((parents.join("/"), components.join("/")))
}

pub fn invalid_directories_check(directories: &Directories) -> Result<()> {
    for directory in directories.keys() {
        if classify_directory(directory).is_none() {
            bail!(
                "invalid Terraform Provider documentation directory found: {}",
                directory
            )
        }
    }

    Ok(())
}

/// Legacy and registry directories must not be used together. Files directly in `docs/`
/// are allowed next to the legacy layout.
pub fn mixed_directories_check(directories: &Directories) -> Result<()> {
    let mut legacy_directory_found = false;
    let mut registry_directory_found = false;

    for directory in directories.keys() {
        let Some(kind) = classify_directory(directory) else {
            continue;
        };

        if kind.cdktf {
            continue;
        }

        match kind.layout {
            Layout::Legacy => legacy_directory_found = true,
            Layout::Registry if directory != REGISTRY_INDEX_DIRECTORY => {
                registry_directory_found = true
            }
            Layout::Registry => (),
        }

        if legacy_directory_found && registry_directory_found {
            bail!(
                "mixed Terraform Provider documentation directory layouts found, \
                 must use only legacy or registry layout"
            )
        }
    }

    Ok(())
}

/// The Terraform Registry limits the number of documentation files. CDKTF files are counted
/// per language and are left out.
pub fn number_of_files_check(directories: &Directories) -> Result<()> {
    let mut number_of_files = 0;

    for (directory, files) in directories {
        if matches!(classify_directory(directory), Some(kind) if kind.cdktf) {
            continue;
        }

        log::trace!(
            "Found {} documentation files in directory: {}",
            files.len(),
            directory
        );
        number_of_files += files.len();
    }

    log::debug!(
        "Found {} documentation files with limit of {}",
        number_of_files,
        REGISTRY_MAXIMUM_NUMBER_OF_FILES
    );

    if number_of_files >= REGISTRY_MAXIMUM_NUMBER_OF_FILES {
        bail!(
            "exceeded maximum ({}) number of documentation files for Terraform Registry: {}",
            REGISTRY_MAXIMUM_NUMBER_OF_FILES,
            number_of_files
        )
    }

    Ok(())
}
