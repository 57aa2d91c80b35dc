use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::{
    compare::{CompareResult, Row},
    suggestions::{AnalysisResult, ComposedSections, ConfigurationItem, Impact, SuggestionItem}
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

/// Composed analysis for serialization
#[derive(Debug, Serialize)]
pub struct SectionsReport<'a> {
    pub query_id:        &'a str,
    pub summary:         &'a str,
    pub tables_analyzed: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain_plan:    Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain_error:   Option<&'a str>,
    pub sections:        &'a ComposedSections
}

impl<'a> SectionsReport<'a> {
    pub fn new(result: &'a AnalysisResult, sections: &'a ComposedSections) -> Self {
        Self {
            query_id: &result.query_id,
            summary: &result.summary,
            tables_analyzed: result.tables_analyzed.iter().map(|t| t.as_str()).collect(),
            explain_plan: result.explain_plan.as_deref(),
            explain_error: result.explain_error.as_deref(),
            sections
        }
    }
}

/// Format composed suggestion sections
pub fn format_sections(
    result: &AnalysisResult,
    sections: &ComposedSections,
    opts: &OutputOptions
) -> String {
    let report = SectionsReport::new(result, sections);
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(&report).unwrap_or_default(),
        OutputFormat::Text => format_text_sections(&report, opts)
    }
}

/// Format a comparison report
pub fn format_compare_result(result: &CompareResult, opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(result).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(result).unwrap_or_default(),
        OutputFormat::Text => format_text_compare(result, opts)
    }
}

fn paint(text: &str, opts: &OutputOptions, style: fn(&str) -> ColoredString) -> String {
    if opts.colored { style(text).to_string() } else { text.to_string() }
}

fn format_text_sections(report: &SectionsReport<'_>, opts: &OutputOptions) -> String {
    let mut output = paint("=== Optimization Suggestions ===", opts, |s| s.bold());
    output.push_str("\n\n");

    let summary = report.summary.trim();
    if !summary.is_empty() {
        let width = summary
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let border = format!("+{}+", "-".repeat(width + 2));
        output.push_str(&format!("{}\n", border));
        for line in summary.lines() {
            output.push_str(&format!("| {:<width$} |\n", line, width = width));
        }
        output.push_str(&format!("{}\n\n", border));
    }
    if !report.tables_analyzed.is_empty() {
        output.push_str(&format!(
            "Tables analyzed: {}\n\n",
            report.tables_analyzed.join(", ")
        ));
    }
    if opts.verbose
        && let Some(plan) = report.explain_plan
    {
        output.push_str(&paint("EXPLAIN plan:", opts, |s| s.cyan().bold()));
        output.push('\n');
        for line in plan.lines() {
            output.push_str(&format!("  {}\n", line));
        }
        output.push('\n');
    }
    if let Some(error) = report.explain_error {
        output.push_str(&paint(
            &format!("EXPLAIN failed: {}", error.trim()),
            opts,
            |s| s.yellow()
        ));
        output.push_str("\n\n");
    }

    let sections = report.sections;
    if sections.is_empty() {
        output.push_str("No optimization suggestions found.\n");
        return output;
    }

    for category in &sections.categories {
        output.push_str(&section_header(category.title, category.items.len(), opts));
        for item in &category.items {
            output.push_str(&format_item(item, opts));
        }
        output.push('\n');
    }
    if !sections.configuration.is_empty() {
        output.push_str(&section_header(
            "Configuration",
            sections.configuration.len(),
            opts
        ));
        for item in &sections.configuration {
            output.push_str(&format_configuration(item, opts));
        }
        output.push('\n');
    }
    output
}

fn section_header(title: &str, count: usize, opts: &OutputOptions) -> String {
    let plural = if count == 1 { "" } else { "s" };
    let header = format!("{} ({} suggestion{})", title, count, plural);
    format!("{}\n", paint(&header, opts, |s| s.cyan().bold()))
}

fn badge(impact: &Impact, opts: &OutputOptions) -> String {
    let text = format!("[{}]", impact.badge());
    match impact {
        Impact::High => paint(&text, opts, |s| s.red().bold()),
        Impact::Medium => paint(&text, opts, |s| s.yellow()),
        Impact::Low => paint(&text, opts, |s| s.green()),
        Impact::Unrecognized(_) => paint(&text, opts, |s| s.dimmed())
    }
}

fn format_item(item: &SuggestionItem, opts: &OutputOptions) -> String {
    let mut text = format!(
        "  {} {}\n",
        badge(&item.estimated_impact, opts),
        item.explanation.trim()
    );
    let mut tags = Vec::new();
    if let Some(node) = &item.plan_node {
        tags.push(format!("node: {}", node));
    }
    if let Some(cause) = &item.root_cause {
        tags.push(format!("cause: {}", cause.replace('_', " ")));
    }
    if let Some(index_type) = &item.index_type {
        tags.push(format!("type: {}", index_type.to_uppercase()));
    }
    if !tags.is_empty() {
        text.push_str(&format!("    {}\n", tags.join(" | ")));
    }
    if let Some(sql) = &item.sql {
        for line in sql.trim().lines() {
            text.push_str(&format!("    {}\n", paint(line, opts, |s| s.blue())));
        }
    }
    text
}

fn format_configuration(item: &ConfigurationItem, opts: &OutputOptions) -> String {
    let mut text = format!(
        "  {} {}: {} -> {}\n",
        badge(&item.estimated_impact, opts),
        item.parameter,
        item.current_value,
        item.recommended_value
    );
    if !item.explanation.trim().is_empty() {
        text.push_str(&format!("    {}\n", item.explanation.trim()));
    }
    text
}

fn format_text_compare(result: &CompareResult, opts: &OutputOptions) -> String {
    let mut output = paint("=== Result Comparison ===", opts, |s| s.bold());
    output.push_str("\n\n");

    if result.has_errors() {
        if let Some(error) = &result.original_error {
            output.push_str(&paint(
                &format!("Original query failed: {}", error),
                opts,
                |s| s.red()
            ));
            output.push('\n');
        }
        if let Some(error) = &result.rewritten_error {
            output.push_str(&paint(
                &format!("Rewritten query failed: {}", error),
                opts,
                |s| s.red()
            ));
            output.push('\n');
        }
        output.push_str("Results were not compared.\n");
        return output;
    }

    if result.results_match {
        output.push_str(&paint(
            &format!("Results match ({} rows compared)", result.rows_compared),
            opts,
            |s| s.green().bold()
        ));
        output.push('\n');
    } else if let Some(diff) = &result.first_diff {
        output.push_str(&paint(
            &format!("Results differ at row {}", diff.row_number),
            opts,
            |s| s.red().bold()
        ));
        output.push('\n');
        output.push_str(&format!("  original:  {}\n", format_row(&diff.original_row)));
        output.push_str(&format!("  rewritten: {}\n", format_row(&diff.rewritten_row)));
    } else {
        output.push_str(&paint(
            &format!(
                "Row count mismatch: original returned {}, rewritten returned {}",
                result.original_row_count, result.rewritten_row_count
            ),
            opts,
            |s| s.red().bold()
        ));
        output.push('\n');
    }
    output.push_str(&format!(
        "Rows: original {}, rewritten {}, compared {}\n",
        result.original_row_count, result.rewritten_row_count, result.rows_compared
    ));
    output
}

fn format_row(row: &Row) -> String {
    serde_json::to_string(row).unwrap_or_default()
}
