//! Rule engine: each rule inspects one symbol and reports issues.
//!
//! Rules never mutate the symbol and never abort early; the fully-computed
//! issue list is the only output, and turning it into user-facing
//! diagnostics is the caller's business.

pub mod anchor;
pub mod hidden_pins;

use serde::{Deserialize, Serialize};

use crate::core::{CheckOptions, Verbosity};
use crate::symbol::{Pin, Point, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One finding reported by a rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Unique id for report tooling.
    pub id: String,
    /// Id of the rule that produced the finding, e.g. "S4.6".
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    /// "name (number)" of the offending pin, when the finding is pin-bound.
    pub pin: Option<String>,
    pub location: Option<Point>,
    pub suggestion: Option<String>,
}

impl Issue {
    pub fn new(rule_id: &str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            rule_id: rule_id.to_string(),
            severity,
            message: message.into(),
            pin: None,
            location: None,
            suggestion: None,
        }
    }

    pub fn with_pin(mut self, pin: &Pin) -> Self {
        self.pin = Some(format!("{} ({})", pin.name, pin.number));
        self.location = Some(pin.position);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// A single KLC rule over one symbol.
pub trait SymbolRule {
    /// Rule id as used in the convention, e.g. "S4.6".
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn check(&self, symbol: &Symbol, options: &CheckOptions) -> Vec<Issue>;
}

/// Runs a set of rules over a symbol.
pub struct RulesEngine {
    rules: Vec<Box<dyn SymbolRule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_default_rules() -> Self {
        let mut engine = Self::new();
        engine.register(Box::new(hidden_pins::HiddenPinsRule));
        engine.register(Box::new(anchor::AnchorRule));
        engine
    }

    pub fn register(&mut self, rule: Box<dyn SymbolRule>) {
        self.rules.push(rule);
    }

    /// Run every registered rule (or only those named in `options.rules`)
    /// and collect the findings.
    pub fn analyze(&self, symbol: &Symbol, options: &CheckOptions) -> Vec<Issue> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            if !options.rules.is_empty() && !options.rules.iter().any(|id| id == rule.id()) {
                continue;
            }
            if options.verbosity >= Verbosity::Normal {
                tracing::debug!(
                    "Running rule {} ({}) on symbol {}",
                    rule.id(),
                    rule.name(),
                    symbol.name
                );
            }
            issues.extend(rule.check(symbol, options));
        }
        issues
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}
