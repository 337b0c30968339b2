//! Text, Markdown and JSON report generation.
//!
//! Values are already rounded to one decimal place in the summary; the
//! `{:.1}` formatting here only pads them, it never rounds again.

use crate::cli::OutputFormat;
use crate::models::{DemographicSummary, Report, ReportMetadata};
use anyhow::{Context, Result};
use std::path::Path;

/// Render a report in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(generate_text_report(&report.summary)),
        OutputFormat::Markdown => Ok(generate_markdown_report(report)),
        OutputFormat::Json => generate_json_report(report),
    }
}

/// Generate the console report, one line per statistic.
pub fn generate_text_report(summary: &DemographicSummary) -> String {
    let mut output = String::new();

    output.push_str("Number of each race:\n");
    for race in &summary.race_count {
        output.push_str(&format!("  {}\n", race));
    }
    output.push_str(&format!("Average age of men: {:.1}\n", summary.average_age_men));
    output.push_str(&format!(
        "Percentage with Bachelors degrees: {:.1}%\n",
        summary.percentage_bachelors
    ));
    output.push_str(&format!(
        "Percentage with higher education that earn >50K: {:.1}%\n",
        summary.higher_education_rich
    ));
    output.push_str(&format!(
        "Percentage without higher education that earn >50K: {:.1}%\n",
        summary.lower_education_rich
    ));
    output.push_str(&format!(
        "Min work time: {} hours/week\n",
        summary.min_work_hours
    ));
    output.push_str(&format!(
        "Percentage of rich among those who work fewest hours: {:.1}%\n",
        summary.rich_percentage
    ));
    output.push_str(&format!(
        "Country with highest percentage of rich: {}\n",
        summary.highest_earning_country
    ));
    output.push_str(&format!(
        "Highest percentage of rich people in country: {:.1}%\n",
        summary.highest_earning_country_percentage
    ));
    output.push_str(&format!(
        "Top occupations in India: {}\n",
        summary.top_in_occupation
    ));

    output
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Demographic Data Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_race_section(&report.summary));
    output.push_str(&generate_statistics_section(&report.summary));

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Dataset:** `{}`\n", metadata.dataset_path));
    section.push_str(&format!("- **Records:** {}\n", metadata.record_count));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Duration:** {:.3}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

fn generate_race_section(summary: &DemographicSummary) -> String {
    let mut section = String::new();

    section.push_str("## Race Distribution\n\n");
    section.push_str("| Race | Count |\n");
    section.push_str("|------|------:|\n");
    for race in &summary.race_count {
        section.push_str(&format!("| {} | {} |\n", race.value, race.count));
    }
    section.push('\n');

    section
}

fn generate_statistics_section(summary: &DemographicSummary) -> String {
    let mut section = String::new();

    section.push_str("## Statistics\n\n");
    section.push_str("| Statistic | Value |\n");
    section.push_str("|-----------|------:|\n");
    section.push_str(&format!(
        "| average_age_men | {:.1} |\n",
        summary.average_age_men
    ));
    section.push_str(&format!(
        "| min_work_hours | {} |\n",
        summary.min_work_hours
    ));
    for (name, value) in summary.percentages() {
        section.push_str(&format!("| {} | {:.1}% |\n", name, value));
    }
    section.push_str(&format!(
        "| highest_earning_country | {} |\n",
        summary.highest_earning_country
    ));
    section.push_str(&format!(
        "| top_IN_occupation | {} |\n",
        summary.top_in_occupation
    ));
    section.push('\n');

    section
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
}

/// Write a rendered report to a file.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
