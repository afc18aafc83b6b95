//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use typesys_domain::{RelationshipDef, RelationshipEndDef};
use typesys_gatekeeper::ValidationResult;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format validation results.
    pub fn format_results(&self, results: &[ValidationResult]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_results_json(results),
            OutputFormat::Table => Ok(self.format_results_table(results)),
            OutputFormat::Quiet => Ok(self.format_results_quiet(results)),
        }
    }

    /// Format relationship defs.
    pub fn format_relationship_defs(&self, defs: &[RelationshipDef]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(defs)?),
            OutputFormat::Table => Ok(self.format_relationship_defs_table(defs)),
            OutputFormat::Quiet => Ok(defs
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_results_json(&self, results: &[ValidationResult]) -> Result<String> {
        let json_results: Vec<serde_json::Value> = results
            .iter()
            .map(|r| {
                serde_json::json!({
                    "name": r.type_name,
                    "accepted": r.is_accepted(),
                    "reasons": r.reasons.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    "warnings": r.warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_results)?)
    }

    fn format_results_table(&self, results: &[ValidationResult]) -> String {
        if results.is_empty() {
            return self.colorize("No relationship defs found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Name", "Status", "Findings"]);

        for result in results {
            let status = if result.is_accepted() {
                self.colorize("accepted", "green")
            } else {
                self.colorize("rejected", "red")
            };
            let findings = result
                .reasons
                .iter()
                .map(ToString::to_string)
                .chain(result.warnings.iter().map(|w| format!("warning: {}", w)))
                .collect::<Vec<_>>()
                .join("\n");
            builder.push_record([result.type_name.as_str(), status.as_str(), findings.as_str()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Names of rejected defs only.
    fn format_results_quiet(&self, results: &[ValidationResult]) -> String {
        results
            .iter()
            .filter(|r| !r.is_accepted())
            .map(|r| r.type_name.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_relationship_defs_table(&self, defs: &[RelationshipDef]) -> String {
        if defs.is_empty() {
            return self.colorize("No relationship defs found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Name", "Category", "Propagate", "End 1", "End 2", "Attributes"]);

        for def in defs {
            let category = def
                .relationship_category()
                .map_or_else(|| "-".to_string(), |c| c.to_string());
            let attributes = def
                .attribute_defs()
                .iter()
                .map(|a| format!("{}: {}", a.name, a.type_name))
                .collect::<Vec<_>>()
                .join("\n");
            let end1 = format_end(def.end_def1());
            let end2 = format_end(def.end_def2());
            builder.push_record([
                def.name(),
                category.as_str(),
                def.propagate_tags_or_default().as_str(),
                end1.as_str(),
                end2.as_str(),
                attributes.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// One-line summary of a check run.
    pub fn check_summary(&self, results: &[ValidationResult]) -> String {
        let rejected = results.iter().filter(|r| !r.is_accepted()).count();
        if rejected == 0 {
            self.success(&format!("{} relationship def(s) accepted", results.len()))
        } else {
            self.error(&format!(
                "{} of {} relationship def(s) rejected",
                rejected,
                results.len()
            ))
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Compact rendering of an end: `Table.columns [SET, container]`.
fn format_end(end: Option<&RelationshipEndDef>) -> String {
    match end {
        None => "-".to_string(),
        Some(end) => {
            let container = if end.is_container { ", container" } else { "" };
            format!(
                "{}.{} [{}{}]",
                end.type_name, end.name, end.cardinality, container
            )
        }
    }
}
