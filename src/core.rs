//! Check entry points shared by CLI front-ends and library callers.
//! No file parsing here; callers hand in an already-built `Symbol`.

use serde::Serialize;
use thiserror::Error;

use crate::rules::{Issue, RulesEngine, Severity};
use crate::symbol::Symbol;

#[derive(Debug, Error)]
pub enum KlcCheckError {
    #[error("Unknown pin electrical type: {0}")]
    UnknownPinType(String),
    #[error("Unknown fill mode: {0}")]
    UnknownFillMode(String),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

/// How chatty the checker's diagnostics are. Threaded through every check
/// call; there is no global verbosity state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    None,
    #[default]
    Normal,
    High,
}

/// Options for a check run.
#[derive(Clone, Debug, Default)]
pub struct CheckOptions {
    pub verbosity: Verbosity,
    /// Rule ids to run; empty means every registered rule.
    pub rules: Vec<String>,
}

/// Per-symbol check result with findings and counts.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub symbol: String,
    pub issues: Vec<Issue>,
    pub stats: CheckStats,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckStats {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

impl CheckResult {
    pub fn has_errors(&self) -> bool {
        self.stats.errors > 0
    }

    pub fn total_issues(&self) -> usize {
        self.stats.errors + self.stats.warnings + self.stats.info
    }

    /// JSON rendering for report tooling.
    pub fn to_json(&self) -> Result<String, KlcCheckError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn issues_to_stats(issues: &[Issue]) -> CheckStats {
    let mut stats = CheckStats::default();
    for issue in issues {
        match issue.severity {
            Severity::Error => stats.errors += 1,
            Severity::Warning => stats.warnings += 1,
            Severity::Info => stats.info += 1,
        }
    }
    stats
}

/// Core check API.
pub struct KlcCheckCore;

impl KlcCheckCore {
    /// Check a single symbol against the default rule set.
    pub fn check_symbol(symbol: &Symbol, options: &CheckOptions) -> CheckResult {
        if options.verbosity >= Verbosity::Normal {
            tracing::debug!("Checking symbol {}", symbol.name);
        }
        let engine = RulesEngine::with_default_rules();
        let issues = engine.analyze(symbol, options);
        let stats = issues_to_stats(&issues);
        CheckResult {
            symbol: symbol.name.clone(),
            issues,
            stats,
        }
    }

    /// Check a batch of symbols. Every check is self-contained: nothing is
    /// shared between invocations, so callers may parallelize freely.
    pub fn check_symbols(symbols: &[Symbol], options: &CheckOptions) -> Vec<CheckResult> {
        symbols
            .iter()
            .map(|symbol| Self::check_symbol(symbol, options))
            .collect()
    }
}
