//! Directory and file checks for a provider documentation tree.

mod contents;
mod directory;
mod file;
mod front_matter;

pub use contents::*;
pub use directory::*;
pub use file::*;
pub use front_matter::*;

use anyhow::Context;
use std::fs;

use crate::error::{Error, Result};

/// Terraform Registry storage limits.
pub const REGISTRY_MAXIMUM_NUMBER_OF_FILES: usize = 2000;
pub const REGISTRY_MAXIMUM_SIZE_OF_FILE: u64 = 500_000;

/// Subcategory rules for one group of files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubcategoryOptions {
    pub allowed_subcategories: Vec<String>,
    pub require_subcategory: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    pub file: FileOptions,
    pub contents: ContentsOptions,
    /// Rules for guides.
    pub guide_subcategories: SubcategoryOptions,
    /// Rules for data sources and resources.
    pub resource_subcategories: SubcategoryOptions,
}

/// All errors found in a documentation tree, sorted by message.
#[derive(Debug, thiserror::Error)]
#[error("{}", format_errors(.errors))]
pub struct CheckErrors {
    errors: Vec<Error>,
}

impl CheckErrors {
    fn new(mut errors: Vec<Error>) -> Self {
        errors.sort_by_cached_key(|error| format!("{:#}", error));
        Self { errors }
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<Error> for CheckErrors {
    fn from(error: Error) -> Self {
        Self::new(vec![error])
    }
}

fn format_errors(errors: &[Error]) -> String {
    errors
        .iter()
        .map(|error| format!("{:#}", error))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Default, Clone)]
pub struct Check {
    options: CheckOptions,
}

impl Check {
    pub fn new(options: CheckOptions) -> Self {
        Self { options }
    }

    /// Check the directory layout, then every file in it. Directory errors stop the run,
    /// file errors are collected.
    pub fn run(&self, directories: &Directories) -> Result<(), CheckErrors> {
        invalid_directories_check(directories)?;
        mixed_directories_check(directories)?;
        number_of_files_check(directories)?;

        let mut errors = Vec::new();
        let mut number_of_files = 0;

        for (directory, files) in directories {
            let Some(kind) = classify_directory(directory) else {
                continue;
            };

            let Some(file_kind) = kind.checked_file_kind() else {
                log::debug!("Skipping files in directory: {}", directory);
                continue;
            };

            for file in files {
                number_of_files += 1;

                if let Err(error) = self.check_file(file, &kind, file_kind) {
                    errors.push(error);
                }
            }
        }

        log::info!(
            "Checked {} documentation files, found {} errors",
            number_of_files,
            errors.len()
        );

        if errors.is_empty() {
            return Ok(());
        }

        Err(CheckErrors::new(errors))
    }

    fn check_file(&self, path: &str, directory: &DirectoryKind, file_kind: FileKind) -> Result<()> {
        let full_path = self.options.file.full_path(path);

        log::debug!("Checking file: {}", full_path.display());

        file_extension_check(path, directory.layout)
            .with_context(|| format!("{}: error checking file extension", path))?;

        file_size_check(&full_path)
            .with_context(|| format!("{}: error checking file size", path))?;

        let source =
            fs::read(&full_path).with_context(|| format!("{}: error reading file", path))?;

        self.front_matter_options(directory.layout, file_kind)
            .check_source(&source)
            .with_context(|| format!("{}: error checking file frontmatter", path))?;

        if let (FileKind::DataSource | FileKind::Resource, Some(language)) =
            (file_kind, directory.language)
        {
            self.options
                .contents
                .check_source(&full_path, &source, language)
                .with_context(|| format!("{}: error checking file contents", path))?;
        }

        Ok(())
    }

    fn front_matter_options(&self, layout: Layout, kind: FileKind) -> FrontMatterOptions {
        let mut options = FrontMatterOptions::for_file(layout, kind);

        let subcategories = match kind {
            FileKind::Guide => &self.options.guide_subcategories,
            FileKind::DataSource | FileKind::Resource => &self.options.resource_subcategories,
            FileKind::Index | FileKind::Function => return options,
        };

        options.allowed_subcategories = subcategories.allowed_subcategories.clone();
        options.require_subcategory = subcategories.require_subcategory;
        options
    }
}
