//! Text rendering of validation results

use colored::Colorize;

use super::{Finding, RuleResult, Severity, ValidationResults};

/// Renders results grouped by rule, one block per rule.
///
/// ```text
/// No removed records
/// ==================
///   [error] Event login (Login) was removed
///
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationFormatter {
    color: bool,
}

impl ValidationFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn colored() -> Self {
        Self::new(true)
    }

    pub fn format<F: Finding>(&self, results: &ValidationResults<F>) -> String {
        let mut out = String::new();
        for result in results.iter() {
            self.format_rule(result, &mut out);
        }
        out
    }

    /// Totals per severity, most severe first
    pub fn summary<F: Finding>(&self, results: &ValidationResults<F>) -> String {
        let counts: Vec<String> = Severity::ALL
            .iter()
            .rev()
            .map(|severity| format!("{} {}", results.count_severity(*severity), severity))
            .collect();
        let verdict = if results.is_compatible() {
            "compatible"
        } else {
            "incompatible"
        };

        let line = format!("{} ({})", verdict, counts.join(", "));
        if !self.color {
            return line;
        }
        if results.is_compatible() {
            line.green().bold().to_string()
        } else {
            line.red().bold().to_string()
        }
    }

    fn format_rule<F: Finding>(&self, result: &RuleResult<F>, out: &mut String) {
        let name = result.rule.name;
        let underline = "=".repeat(name.chars().count());
        if self.color {
            out.push_str(&format!("{}\n{}\n", name.bold(), underline.bold()));
        } else {
            out.push_str(&format!("{}\n{}\n", name, underline));
        }

        if result.findings.is_empty() {
            let line = if self.color {
                "no findings".green().to_string()
            } else {
                "no findings".to_string()
            };
            out.push_str(&format!("  {}\n", line));
        }

        for finding in &result.findings {
            out.push_str(&format!(
                "  {} {}\n",
                self.severity_tag(finding.severity),
                finding.message()
            ));
        }

        out.push('\n');
    }

    fn severity_tag(&self, severity: Severity) -> String {
        let tag = format!("[{}]", severity);
        if !self.color {
            return tag;
        }
        match severity {
            Severity::Info => tag.cyan().to_string(),
            Severity::Warning => tag.yellow().to_string(),
            Severity::Error => tag.red().to_string(),
            Severity::Fatal => tag.red().bold().to_string(),
        }
    }
}
