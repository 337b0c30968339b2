//! Data models for the demographic analyzer.
//!
//! This module contains the census record schema, the loaded dataset,
//! the computed summary and the report wrapper around it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Salary bracket value for people earning more than 50K.
pub const HIGH_SALARY: &str = ">50K";

/// Education levels counted as advanced education.
pub const ADVANCED_EDUCATION: [&str; 3] = ["Bachelors", "Masters", "Doctorate"];

/// Columns a dataset must provide for every record.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "race",
    "sex",
    "age",
    "education",
    "salary",
    "hours-per-week",
    "native-country",
    "occupation",
];

/// A single census record (one individual).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub race: String,
    /// "Male" or "Female".
    pub sex: String,
    pub age: u32,
    pub education: String,
    /// "<=50K" or ">50K".
    pub salary: String,
    #[serde(rename = "hours-per-week")]
    pub hours_per_week: u32,
    #[serde(rename = "native-country")]
    pub native_country: String,
    pub occupation: String,
}

impl Record {
    /// Returns true if this person earns more than 50K.
    pub fn is_high_earner(&self) -> bool {
        self.salary == HIGH_SALARY
    }

    /// Returns true if the education level is Bachelors, Masters or Doctorate.
    pub fn has_advanced_education(&self) -> bool {
        ADVANCED_EDUCATION.contains(&self.education.as_str())
    }
}

/// An immutable, fully loaded set of census records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

/// Number of records sharing one categorical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

impl fmt::Display for CategoryCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.value, self.count)
    }
}

/// The ten descriptive statistics computed over a dataset.
///
/// Percentages are already rounded to one decimal place; report
/// generators print them as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicSummary {
    /// Record count per race, most frequent first.
    pub race_count: Vec<CategoryCount>,
    pub average_age_men: f64,
    pub percentage_bachelors: f64,
    pub higher_education_rich: f64,
    pub lower_education_rich: f64,
    pub min_work_hours: u32,
    pub rich_percentage: f64,
    pub highest_earning_country: String,
    pub highest_earning_country_percentage: f64,
    #[serde(rename = "top_IN_occupation")]
    pub top_in_occupation: String,
}

impl DemographicSummary {
    /// All percentage fields, labelled.
    pub fn percentages(&self) -> [(&'static str, f64); 5] {
        [
            ("percentage_bachelors", self.percentage_bachelors),
            ("higher_education_rich", self.higher_education_rich),
            ("lower_education_rich", self.lower_education_rich),
            ("rich_percentage", self.rich_percentage),
            (
                "highest_earning_country_percentage",
                self.highest_earning_country_percentage,
            ),
        ]
    }
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the dataset that was analyzed.
    pub dataset_path: String,
    /// Number of records loaded.
    pub record_count: usize,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Load plus analysis time in seconds.
    pub duration_seconds: f64,
}

/// The complete demographic report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub summary: DemographicSummary,
}
