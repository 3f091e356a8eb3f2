use anyhow::{bail, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use provider_docs::{
    check::{
        get_directories, Check, CheckOptions, ContentsOptions, FileOptions, SubcategoryOptions,
    },
    config::Config,
};

use crate::cli::CheckArgs;

const PROVIDER_DIRECTORY_PREFIX: &str = "terraform-provider-";

pub fn run(args: &CheckArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("error loading config ({})", path.display()))?,
        None => Config::discover(&args.path)?,
    };

    let provider_name = match (&args.provider_name, &config.provider.name) {
        (Some(name), _) | (None, Some(name)) => name.clone(),
        (None, None) => provider_name_from_path(&args.path)?,
    };

    log::debug!("Checking documentation of provider: {}", provider_name);

    let directories = get_directories(&args.path)
        .with_context(|| "Error getting Terraform Provider documentation directories")?;

    if directories.is_empty() {
        bail!(
            "No Terraform Provider documentation directories found in path: {}",
            args.path.display()
        )
    }

    let front_matter = &config.front_matter;
    let options = CheckOptions {
        file: FileOptions {
            base_path: args.path.clone(),
        },
        contents: ContentsOptions {
            enable: args.enable_contents_check || config.contents.enable,
            provider_name,
            require_schema_ordering: args.require_schema_ordering
                || config.contents.require_schema_ordering,
        },
        guide_subcategories: SubcategoryOptions {
            allowed_subcategories: allowed_subcategories(
                &args.allowed_guide_subcategories,
                args.allowed_guide_subcategories_file.as_deref(),
                &front_matter.allowed_guide_subcategories,
            )?,
            require_subcategory: args.require_guide_subcategory
                || front_matter.require_guide_subcategory,
        },
        resource_subcategories: SubcategoryOptions {
            allowed_subcategories: allowed_subcategories(
                &args.allowed_resource_subcategories,
                args.allowed_resource_subcategories_file.as_deref(),
                &front_matter.allowed_resource_subcategories,
            )?,
            require_subcategory: args.require_resource_subcategory
                || front_matter.require_resource_subcategory,
        },
    };

    if let Err(errors) = Check::new(options).run(&directories) {
        bail!(
            "Error checking Terraform Provider documentation ({} errors):\n{}",
            errors.len(),
            errors
        )
    }

    Ok(())
}

/// Derive the provider name from the provider root directory, e.g. `aws` for
/// `terraform-provider-aws`.
fn provider_name_from_path(path: &Path) -> Result<String> {
    let path: PathBuf = fs::canonicalize(path)
        .with_context(|| format!("error resolving path ({})", path.display()))?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(provider_name_from_directory_name(&name))
}

fn provider_name_from_directory_name(name: &str) -> String {
    String::from(name.strip_prefix(PROVIDER_DIRECTORY_PREFIX).unwrap_or(name))
}

/// Command line values win over the file, which wins over the config.
fn allowed_subcategories(
    values: &[String],
    file: Option<&Path>,
    configured: &[String],
) -> Result<Vec<String>> {
    if !values.is_empty() {
        return Ok(values.to_vec());
    }

    if let Some(file) = file {
        let source = fs::read_to_string(file).with_context(|| {
            format!(
                "error reading allowed subcategories file ({})",
                file.display()
            )
        })?;

        return Ok(parse_allowed_subcategories(&source));
    }

    Ok(configured.to_vec())
}

/// One subcategory per line, blank lines are skipped.
fn parse_allowed_subcategories(source: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strips_provider_directory_prefix() {
        assert_eq!(
            "aws",
            provider_name_from_directory_name("terraform-provider-aws")
        );
        assert_eq!("docs", provider_name_from_directory_name("docs"));
    }

    #[test]
    fn parses_allowed_subcategories_file() {
        assert_eq!(
            vec![String::from("Compute"), String::from("Storage Gateway")],
            parse_allowed_subcategories("Compute\n\n  Storage Gateway  \n")
        );
    }

    #[test]
    fn allowed_subcategories_precedence() {
        let values = vec![String::from("A")];
        let configured = vec![String::from("C")];

        assert_eq!(
            values,
            allowed_subcategories(&values, None, &configured).expect("should resolve")
        );
        assert_eq!(
            configured,
            allowed_subcategories(&[], None, &configured).expect("should resolve")
        );
        assert!(
            allowed_subcategories(&[], Some(Path::new("does/not/exist")), &configured).is_err()
        );
    }
}
