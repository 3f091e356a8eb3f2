use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// tfdocs - Terraform provider documentation checks
#[derive(Debug, Parser)]
#[command(name = "tfdocs", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check the documentation directories and files of a provider.
    Check(CheckArgs),

    /// Print the front matter and sections of a documentation file as JSON.
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Provider root directory.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Provider name, e.g. `aws`. Defaults to the config file, then the directory name.
    #[arg(long)]
    pub provider_name: Option<String>,

    /// Config file to use instead of `tfdocs.toml` in the provider root.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Check the sections of data source and resource files.
    #[arg(long)]
    pub enable_contents_check: bool,

    /// Require argument and attribute lists to be sorted by name.
    #[arg(long)]
    pub require_schema_ordering: bool,

    /// Comma separated list of allowed guide frontmatter subcategories.
    #[arg(long, value_delimiter = ',')]
    pub allowed_guide_subcategories: Vec<String>,

    /// File with one allowed guide frontmatter subcategory per line.
    #[arg(long, value_name = "FILE")]
    pub allowed_guide_subcategories_file: Option<PathBuf>,

    /// Comma separated list of allowed data source and resource frontmatter subcategories.
    #[arg(long, value_delimiter = ',')]
    pub allowed_resource_subcategories: Vec<String>,

    /// File with one allowed data source and resource frontmatter subcategory per line.
    #[arg(long, value_name = "FILE")]
    pub allowed_resource_subcategories_file: Option<PathBuf>,

    /// Require guide frontmatter subcategory.
    #[arg(long)]
    pub require_guide_subcategory: bool,

    /// Require data source and resource frontmatter subcategory.
    #[arg(long)]
    pub require_resource_subcategory: bool,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Documentation file to inspect.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Provider name used to derive the resource name.
    #[arg(long, default_value = "")]
    pub provider_name: String,
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verifies_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_arguments() {
        let cli = Cli::try_parse_from([
            "tfdocs",
            "check",
            "-v",
            "--allowed-resource-subcategories",
            "Compute,Storage",
            "--enable-contents-check",
            "terraform-provider-test",
        ])
        .expect("should parse");

        assert!(cli.verbose);

        let Command::Check(args) = cli.command else {
            panic!("expected check command");
        };

        assert_eq!(PathBuf::from("terraform-provider-test"), args.path);
        assert_eq!(
            vec![String::from("Compute"), String::from("Storage")],
            args.allowed_resource_subcategories
        );
        assert!(args.enable_contents_check);
        assert!(!args.require_schema_ordering);
    }

    #[test]
    fn defaults_check_path() {
        let cli = Cli::try_parse_from(["tfdocs", "check"]).expect("should parse");

        let Command::Check(args) = cli.command else {
            panic!("expected check command");
        };

        assert_eq!(PathBuf::from("."), args.path);
        assert!(args.allowed_guide_subcategories.is_empty());
    }
}
