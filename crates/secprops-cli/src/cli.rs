use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "secprops",
    about = "Diff and apply security property sets",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show how the desired property set differs from the current one
    Diff(DiffArgs),
    /// Apply a desired property set over a baseline registry
    Apply(ApplyArgs),
    /// Check a property file for invalid names
    Validate(ValidateArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Currently applied properties (TOML)
    pub current: PathBuf,
    /// Desired properties (TOML)
    pub desired: PathBuf,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Desired properties (TOML)
    pub desired: PathBuf,
    /// Registry contents before the apply (TOML)
    #[arg(short, long)]
    pub baseline: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateArgs {
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_diff() {
        let cli = Cli::try_parse_from(["secprops", "diff", "old.toml", "new.toml"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.current, PathBuf::from("old.toml"));
            assert_eq!(args.desired, PathBuf::from("new.toml"));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_diff_requires_two_files() {
        assert!(Cli::try_parse_from(["secprops", "diff", "old.toml"]).is_err());
    }

    #[test]
    fn parse_apply_with_baseline() {
        let cli =
            Cli::try_parse_from(["secprops", "apply", "new.toml", "-b", "base.toml"]).unwrap();
        if let Command::Apply(args) = cli.command {
            assert_eq!(args.desired, PathBuf::from("new.toml"));
            assert_eq!(args.baseline, Some(PathBuf::from("base.toml")));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_apply_without_baseline() {
        let cli = Cli::try_parse_from(["secprops", "apply", "new.toml"]).unwrap();
        if let Command::Apply(args) = cli.command {
            assert!(args.baseline.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_validate() {
        let cli = Cli::try_parse_from(["secprops", "validate", "props.toml"]).unwrap();
        assert!(matches!(cli.command, Command::Validate(_)));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["secprops", "--verbose", "validate", "p.toml"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli =
            Cli::try_parse_from(["secprops", "--format", "json", "validate", "p.toml"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
