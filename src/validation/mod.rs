//! Rule engine
//!
//! Rules are stateless queries over a read-only context (for compatibility
//! checks, the difference of two schemas). Each rule returns findings without
//! severities; the validator resolves severities afterwards from a
//! [`SeverityMap`] and collects one result per rule, in registration order.

pub mod formatting;
pub mod severity;

use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use formatting::ValidationFormatter;
pub use severity::{Severity, SeverityMap};

/// A typed description of one detected issue
pub trait Finding: Debug + Clone {
    /// Names of every finding type, as accepted in severity overrides
    const NAMES: &'static [&'static str];

    /// Name of this finding's type
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn message(&self) -> String;
}

/// Identifying information for a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMetadata {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl RuleMetadata {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            description: None,
        }
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// A pure check over a context
pub trait Rule<C, F: Finding> {
    fn metadata(&self) -> RuleMetadata;

    /// Every finding for `context`; must not fail for a well-formed context
    fn validate(&self, context: &C) -> Vec<F>;
}

/// A finding paired with its resolved severity
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedFinding<F> {
    pub finding: F,
    pub severity: Severity,
}

impl<F: Finding> ResolvedFinding<F> {
    pub fn message(&self) -> String {
        self.finding.message()
    }
}

/// Findings of a single rule
#[derive(Debug, Clone, Serialize)]
pub struct RuleResult<F> {
    pub rule: RuleMetadata,
    pub findings: Vec<ResolvedFinding<F>>,
}

impl<F> RuleResult<F> {
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Per-rule findings of one validation run
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResults<F> {
    results: Vec<RuleResult<F>>,
}

impl<F> ValidationResults<F> {
    /// Results in rule registration order
    pub fn iter(&self) -> impl Iterator<Item = &RuleResult<F>> {
        self.results.iter()
    }

    pub fn get(&self, rule_name: &str) -> Option<&RuleResult<F>> {
        self.results.iter().find(|result| result.rule.name == rule_name)
    }

    pub fn findings(&self) -> impl Iterator<Item = &ResolvedFinding<F>> {
        self.results.iter().flat_map(|result| result.findings.iter())
    }

    pub fn count_severity(&self, severity: Severity) -> usize {
        self.findings().filter(|f| f.severity == severity).count()
    }

    pub fn total_findings(&self) -> usize {
        self.findings().count()
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.findings().map(|f| f.severity).max()
    }

    /// No finding at error or fatal severity
    pub fn is_compatible(&self) -> bool {
        !self.findings().any(|f| f.severity.is_breaking())
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Ordered collection of rules over a context type
pub struct Validator<C, F: Finding> {
    rules: Vec<Box<dyn Rule<C, F>>>,
}

impl<C, F: Finding> Default for Validator<C, F> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<C, F: Finding> Validator<C, F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule after those already present
    pub fn register(&mut self, rule: impl Rule<C, F> + 'static) -> &mut Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn with_rule(mut self, rule: impl Rule<C, F> + 'static) -> Self {
        self.register(rule);
        self
    }

    pub fn rules(&self) -> Vec<RuleMetadata> {
        self.rules.iter().map(|rule| rule.metadata()).collect()
    }

    /// Run every rule against `context` and resolve severities
    pub fn validate(&self, context: &C, severities: &SeverityMap) -> ValidationResults<F> {
        let results: Vec<RuleResult<F>> = self
            .rules
            .iter()
            .map(|rule| {
                let metadata = rule.metadata();
                let findings: Vec<ResolvedFinding<F>> = rule
                    .validate(context)
                    .into_iter()
                    .map(|finding| ResolvedFinding {
                        severity: severities.resolve(&finding),
                        finding,
                    })
                    .collect();
                debug!(rule = metadata.name, findings = findings.len(), "Rule finished");
                RuleResult {
                    rule: metadata,
                    findings,
                }
            })
            .collect();

        let validation = ValidationResults { results };
        info!(
            rules = validation.len(),
            findings = validation.total_findings(),
            compatible = validation.is_compatible(),
            "Validation complete"
        );
        validation
    }
}
