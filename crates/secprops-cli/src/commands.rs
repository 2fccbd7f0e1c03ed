use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;
use secprops_diff::{diff_properties, PropertyChange, PropertyDiff, PropertyMap};
use secprops_registry::{InMemoryRegistry, PropertyRegistry};
use secprops_service::{ApplyReport, PropertiesConfig, SecurityPropertyService};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args, &cli.format),
        Command::Apply(args) => cmd_apply(args, &cli.format),
        Command::Validate(args) => cmd_validate(args, &cli.format),
    }
}

fn load(path: &Path) -> anyhow::Result<PropertiesConfig> {
    PropertiesConfig::load(path).with_context(|| format!("loading {}", path.display()))
}

/// The per-key changes from `args.current` to `args.desired`.
fn compute_diff(args: &DiffArgs) -> anyhow::Result<(PropertyDiff, Vec<PropertyChange>)> {
    let current = load(&args.current)?.properties;
    let desired = load(&args.desired)?.properties;

    let diff = diff_properties(&desired, &current);
    let changes = diff.changes_against(&current);
    Ok((diff, changes))
}

fn cmd_diff(args: DiffArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let (diff, changes) = compute_diff(&args)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&changes)?),
        OutputFormat::Text => {
            if changes.is_empty() {
                println!("No changes.");
                return Ok(());
            }
            for change in &changes {
                println!("{}", paint(change));
            }
            println!(
                "\n{} added, {} updated, {} removed",
                diff.additions().to_string().green(),
                diff.updates().to_string().yellow(),
                diff.removals().to_string().red(),
            );
        }
    }
    Ok(())
}

struct ApplyOutcome {
    report: ApplyReport,
    baseline: PropertyMap,
    registry: PropertyMap,
}

/// Start a service over a registry seeded from the baseline and apply the
/// desired set.
fn run_apply(args: &ApplyArgs) -> anyhow::Result<ApplyOutcome> {
    let desired = load(&args.desired)?;
    let baseline = match &args.baseline {
        Some(path) => load(path)?.properties,
        None => PropertyMap::new(),
    };

    let registry = Arc::new(
        InMemoryRegistry::with_properties(&baseline).context("seeding baseline registry")?,
    );
    let mut service = SecurityPropertyService::new(registry.clone(), desired.service.clone());
    let report = service
        .start(&desired.properties)
        .context("applying desired properties")?;

    Ok(ApplyOutcome {
        report,
        baseline,
        registry: registry.snapshot()?,
    })
}

fn cmd_apply(args: ApplyArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let outcome = run_apply(&args)?;

    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "report": outcome.report,
                "registry": outcome.registry,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => print_report(&outcome.report, &outcome.baseline, &outcome.registry),
    }
    Ok(())
}

fn print_report(report: &ApplyReport, baseline: &PropertyMap, result: &PropertyMap) {
    if report.is_noop() {
        println!("{} Nothing to apply.", "✓".green().bold());
    } else {
        println!(
            "{} Applied {} properties at {}",
            "✓".green().bold(),
            report.diff.len().to_string().bold(),
            report.applied_at.to_rfc3339().dimmed(),
        );
        for change in diff_properties(result, baseline).changes_against(baseline) {
            println!("  {}", paint(&change));
        }
    }

    println!("\nRegistry:");
    for (name, value) in result {
        println!("  {} = {}", name.bold(), value);
    }
}

fn cmd_validate(args: ValidateArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = load(&args.file)?;
    let invalid: Vec<String> = config.invalid_names().iter().map(|e| e.to_string()).collect();

    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "properties": config.properties.len(),
                "errors": invalid,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            for error in &invalid {
                println!("  {} {}", "✗".red().bold(), error);
            }
        }
    }

    if !invalid.is_empty() {
        bail!("{} invalid property name(s) in {}", invalid.len(), args.file.display());
    }
    if matches!(format, OutputFormat::Text) {
        println!(
            "{} {} properties valid",
            "✓".green().bold(),
            config.properties.len()
        );
    }
    Ok(())
}

fn paint(change: &PropertyChange) -> String {
    let line = change.to_string();
    match change {
        PropertyChange::Added { .. } => line.green().to_string(),
        PropertyChange::Removed { .. } => line.red().to_string(),
        PropertyChange::Updated { .. } => line.yellow().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn diff_command_classifies_changes() {
        let dir = tempfile::tempdir().unwrap();
        let current = write_config(
            dir.path(),
            "current.toml",
            "[properties]\nkey1 = \"v1\"\nkey3 = \"v3\"\n",
        );
        let desired = write_config(
            dir.path(),
            "desired.toml",
            "[properties]\nkey1 = \"v\"\nkey2 = \"v\"\n",
        );
        let args = DiffArgs { current, desired };

        let (diff, changes) = compute_diff(&args).unwrap();
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.updates(), 1);
        assert_eq!(diff.removals(), 1);
        assert_eq!(
            changes,
            vec![
                PropertyChange::Updated {
                    key: "key1".into(),
                    old: "v1".into(),
                    new: "v".into(),
                },
                PropertyChange::Added {
                    key: "key2".into(),
                    value: "v".into(),
                },
                PropertyChange::Removed {
                    key: "key3".into(),
                    value: "v3".into(),
                },
            ]
        );

        cmd_diff(args, &OutputFormat::Text).unwrap();
    }

    #[test]
    fn diff_command_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let desired = write_config(dir.path(), "desired.toml", "");
        let err = cmd_diff(
            DiffArgs {
                current: dir.path().join("absent.toml"),
                desired,
            },
            &OutputFormat::Json,
        )
        .unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn apply_command_overrides_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let baseline = write_config(
            dir.path(),
            "base.toml",
            "[properties]\nkey1 = \"orig\"\nother = \"kept\"\n",
        );
        let desired = write_config(
            dir.path(),
            "desired.toml",
            "[properties]\nkey1 = \"new\"\nkey2 = \"added\"\n",
        );
        let args = ApplyArgs {
            desired,
            baseline: Some(baseline),
        };

        let outcome = run_apply(&args).unwrap();
        assert_eq!(outcome.report.diff.additions(), 2);
        assert_eq!(outcome.baseline["key1"], "orig");
        assert_eq!(outcome.registry["key1"], "new");
        assert_eq!(outcome.registry["key2"], "added");
        assert_eq!(outcome.registry["other"], "kept");
        assert_eq!(outcome.registry.len(), 3);

        cmd_apply(args, &OutputFormat::Json).unwrap();
    }

    #[test]
    fn validate_command_rejects_bad_names() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_config(dir.path(), "bad.toml", "[properties]\n\"bad name\" = \"v\"\n");

        assert!(cmd_validate(ValidateArgs { file }, &OutputFormat::Text).is_err());
    }

    #[test]
    fn validate_command_accepts_good_names() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_config(
            dir.path(),
            "good.toml",
            "[properties]\njdk.tls.disabledAlgorithms = \"SSLv3\"\n",
        );

        cmd_validate(ValidateArgs { file }, &OutputFormat::Text).unwrap();
    }
}
