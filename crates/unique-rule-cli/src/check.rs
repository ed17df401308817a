//! # Check Command
//!
//! Loads a JSON or YAML document, selects an array inside it, and runs
//! every configured uniqueness rule against that array.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;
use serde_json::Value;
use unique_rule::{unique, RuleSetConfig, UniqueRule};

/// Arguments for a uniqueness check.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// JSON or YAML document to check.
    pub document: PathBuf,

    /// Field that must be unique across records.
    #[arg(long, short)]
    pub field: Option<String>,

    /// Message reported when `--field` has duplicates.
    #[arg(long, short, default_value = "")]
    pub message: String,

    /// JSON or YAML file listing additional rules.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// JSON Pointer selecting the array within the document (default: root).
    #[arg(long, short, default_value = "")]
    pub pointer: String,
}

/// Outcome of a rule that found duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRule {
    /// Field the rule compared on.
    pub field: String,
    /// First and second colliding record indices.
    pub positions: (usize, usize),
    /// Configured failure message.
    pub message: String,
}

/// Build the rules requested by `args`.
///
/// `--field` comes first, followed by the config file's rules in order.
pub fn collect_rules(args: &CheckArgs) -> anyhow::Result<Vec<UniqueRule>> {
    let mut rules = Vec::new();
    if let Some(field) = args.field.as_deref() {
        rules.push(unique(field, args.message.as_str()).context("invalid --field")?);
    }
    if let Some(path) = &args.config {
        let config = RuleSetConfig::load(path)?;
        let configured = config
            .build()
            .with_context(|| format!("invalid rule in {}", path.display()))?;
        rules.extend(configured);
    }
    if rules.is_empty() {
        bail!("no rules given: pass --field or --config");
    }
    Ok(rules)
}

/// Load a document, choosing the parser by extension.
pub fn load_document(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    parse_document(&content, path)
}

fn parse_document(content: &str, path: &Path) -> anyhow::Result<Value> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let value: Value = match ext {
        "yaml" | "yml" => serde_yaml::from_str(content)
            .with_context(|| format!("invalid YAML in {}", path.display()))?,
        _ => serde_json::from_str(content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?,
    };
    Ok(value)
}

/// Resolve `pointer` inside `document` and require an array there.
pub fn select_records<'a>(document: &'a Value, pointer: &str) -> anyhow::Result<&'a [Value]> {
    let target = document
        .pointer(pointer)
        .with_context(|| format!("pointer '{pointer}' does not resolve"))?;
    match target {
        Value::Array(items) => Ok(items.as_slice()),
        _ => bail!("pointer '{pointer}' does not select an array"),
    }
}

/// Run every rule, returning the ones that found duplicates.
pub fn run_rules(rules: &[UniqueRule], records: &[Value]) -> Vec<FailedRule> {
    rules
        .iter()
        .filter_map(|rule| {
            let pair = rule.find_duplicate(records)?;
            Some(FailedRule {
                field: rule.field().to_string(),
                positions: (pair.first, pair.second),
                message: rule.message().to_string(),
            })
        })
        .collect()
}

/// Execute the check command.
///
/// # Errors
///
/// Fails on unreadable input, invalid rules, or any duplicate found.
pub fn run(args: &CheckArgs) -> anyhow::Result<()> {
    let rules = collect_rules(args)?;
    let document = load_document(&args.document)?;
    let records = select_records(&document, &args.pointer)?;

    tracing::info!(
        document = %args.document.display(),
        records = records.len(),
        rules = rules.len(),
        "checking uniqueness"
    );

    let failed = run_rules(&rules, records);
    if failed.is_empty() {
        tracing::info!("all rules passed");
        return Ok(());
    }

    for f in &failed {
        tracing::warn!(
            field = %f.field,
            first = f.positions.0,
            second = f.positions.1,
            "{}",
            f.message
        );
    }
    let summary: Vec<String> = failed
        .iter()
        .map(|f| {
            if f.message.is_empty() {
                format!("duplicate '{}' at records {} and {}", f.field, f.positions.0, f.positions.1)
            } else {
                f.message.clone()
            }
        })
        .collect();
    bail!("{} rule(s) failed:\n{}", failed.len(), summary.join("\n"))
}
