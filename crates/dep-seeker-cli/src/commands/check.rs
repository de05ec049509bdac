//! Check command implementation.

use anyhow::{Context, Result};
use dep_seeker_core::{AggregateReport, Analyzer, ManifestGraph, ReportError, RuleBox};
use dep_seeker_rules::default_rules;
use std::path::{Path, PathBuf};

use crate::config_resolver;
use crate::OutputFormat;

/// Manifest location used when `--manifest` is not given, relative to the project root.
pub const DEFAULT_MANIFEST_PATH: &str = "build/dep-seeker/graph.json";

/// Arguments of the check command.
#[derive(Debug)]
pub struct CheckArgs {
    /// Project root.
    pub path: PathBuf,
    /// Build graph manifest.
    pub manifest: Option<PathBuf>,
    /// Report location override.
    pub report: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes.
    pub rules: Option<String>,
    /// Never fail, only warn.
    pub warn_only: bool,
    /// Explicit config file.
    pub config: Option<PathBuf>,
}

/// Runs the check command.
pub fn run(args: &CheckArgs) -> Result<()> {
    let (config, source) = config_resolver::load(&args.path, args.config.as_deref())?;
    tracing::debug!("Config source: {:?}", source);

    let manifest = args
        .manifest
        .clone()
        .unwrap_or_else(|| args.path.join(DEFAULT_MANIFEST_PATH));
    let provider = ManifestGraph::load(&manifest)
        .with_context(|| format!("Failed to load build graph: {}", manifest.display()))?;

    let mut rules = default_rules(&config, Vec::new()).context("Failed to build rules")?;
    if let Some(filter) = &args.rules {
        let names: Vec<&str> = filter.split(',').map(str::trim).collect();
        rules = select_rules(rules, &names);
    }

    let report_path = report_path(&args.path, args.report.as_deref(), &config.report);
    let fail_on_violations = config.fail_on_violations && !args.warn_only;

    let analyzer = Analyzer::builder().rules(rules).config(config).build();
    tracing::info!(
        "Analyzing {:?} with {} rules",
        args.path,
        analyzer.rule_count()
    );

    let result = analyzer.analyze(&provider).context("Analysis failed")?;

    super::output::print(&result, args.format)?;

    match AggregateReport::new(&result, report_path).publish(fail_on_violations) {
        Ok(()) => Ok(()),
        Err(ReportError::Failed(failure)) => {
            eprintln!("{:?}", miette::Report::new(failure));
            std::process::exit(1);
        }
        Err(other) => Err(other).context("Failed to publish report"),
    }
}

/// Keeps the rules whose name or code is listed. Every custom check answers
/// to `custom-check` / `DS100`.
fn select_rules(rules: Vec<RuleBox>, names: &[&str]) -> Vec<RuleBox> {
    for name in names {
        if !rules.iter().any(|r| r.name() == *name || r.code() == *name) {
            tracing::warn!("Unknown rule: {}", name);
        }
    }
    rules
        .into_iter()
        .filter(|r| names.iter().any(|n| *n == r.name() || *n == r.code()))
        .collect()
}

fn report_path(project: &Path, explicit: Option<&Path>, configured: &Path) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None if configured.is_absolute() => configured.to_path_buf(),
        None => project.join(configured),
    }
}
