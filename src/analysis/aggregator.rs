//! Demographic aggregation and statistics.
//!
//! This module derives the ten summary statistics from a loaded
//! [`Dataset`]. Every statistic is an independent filter-then-reduce
//! over the same immutable records.

use crate::models::{CategoryCount, Dataset, DemographicSummary, Record};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors raised when a statistic cannot be computed from the data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A ratio had nothing to divide by.
    #[error("Cannot compute {statistic}: no records in the denominator")]
    ZeroDenominator { statistic: &'static str },

    /// A minimum or most-frequent value was requested from an empty selection.
    #[error("Cannot compute {statistic}: no matching records")]
    NoRecords { statistic: &'static str },
}

/// A selection of records for one category value, with its share of high earners.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRate {
    pub value: String,
    pub size: usize,
    pub high_earners: usize,
    /// Unrounded percentage of high earners in the group.
    pub percentage: f64,
}

/// Compute every summary statistic for the dataset.
///
/// Fails as a whole if any single statistic cannot be computed.
pub fn compute(dataset: &Dataset) -> Result<DemographicSummary, AnalysisError> {
    let records = dataset.records();
    debug!("Aggregating {} records", records.len());

    let race_count = value_counts(records.iter().map(|r| r.race.as_str()));

    let average_age_men = average_age(records, "Male", "average_age_men")?;

    let bachelors = records.iter().filter(|r| r.education == "Bachelors").count();
    let percentage_bachelors = percentage(bachelors, records.len(), "percentage_bachelors")?;

    let (higher_education, lower_education): (Vec<&Record>, Vec<&Record>) =
        records.iter().partition(|r| r.has_advanced_education());
    debug!(
        "Education partition: {} advanced, {} other",
        higher_education.len(),
        lower_education.len()
    );
    let higher_education_rich = rich_share(&higher_education, "higher_education_rich")?;
    let lower_education_rich = rich_share(&lower_education, "lower_education_rich")?;

    let min_work_hours = records
        .iter()
        .map(|r| r.hours_per_week)
        .min()
        .ok_or(AnalysisError::NoRecords {
            statistic: "min_work_hours",
        })?;
    let min_workers: Vec<&Record> = records
        .iter()
        .filter(|r| r.hours_per_week == min_work_hours)
        .collect();
    let rich_percentage = rich_share(&min_workers, "rich_percentage")?;

    let country_rates = rates_by(records, |r| r.native_country.as_str());
    let highest_country = highest_rate(&country_rates).ok_or(AnalysisError::NoRecords {
        statistic: "highest_earning_country",
    })?;
    debug!(
        "Highest earning country: {} ({}/{})",
        highest_country.value, highest_country.high_earners, highest_country.size
    );

    let top_in_occupation = value_counts(
        records
            .iter()
            .filter(|r| r.native_country == "India" && r.is_high_earner())
            .map(|r| r.occupation.as_str()),
    )
    .into_iter()
    .next()
    .map(|c| c.value)
    .ok_or(AnalysisError::NoRecords {
        statistic: "top_IN_occupation",
    })?;

    Ok(DemographicSummary {
        race_count,
        average_age_men,
        percentage_bachelors,
        higher_education_rich,
        lower_education_rich,
        min_work_hours,
        rich_percentage,
        highest_earning_country: highest_country.value.clone(),
        highest_earning_country_percentage: round_one_decimal(highest_country.percentage),
        top_in_occupation,
    })
}

/// Count occurrences of each value, most frequent first.
///
/// Values with equal counts keep the order in which they were first seen.
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(value, counts.len());
                counts.push(CategoryCount {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among ties.
    counts.sort_by_key(|c| std::cmp::Reverse(c.count));
    counts
}

/// Group records by a category and compute each group's high-earner rate.
///
/// Groups are returned in first-seen order.
pub fn rates_by<'a, F>(records: &'a [Record], key: F) -> Vec<GroupRate>
where
    F: Fn(&'a Record) -> &'a str,
{
    let mut groups: Vec<(&'a str, usize, usize)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for record in records {
        let value = key(record);
        let i = *index.entry(value).or_insert_with(|| {
            groups.push((value, 0, 0));
            groups.len() - 1
        });
        groups[i].1 += 1;
        if record.is_high_earner() {
            groups[i].2 += 1;
        }
    }

    groups
        .into_iter()
        .map(|(value, size, high_earners)| GroupRate {
            value: value.to_string(),
            size,
            high_earners,
            // Groups are never empty, so the ratio is always defined.
            percentage: 100.0 * high_earners as f64 / size as f64,
        })
        .collect()
}

/// Pick the group with the highest rate; the first one wins on exact ties.
pub fn highest_rate(rates: &[GroupRate]) -> Option<&GroupRate> {
    rates.iter().fold(None, |best: Option<&GroupRate>, rate| match best {
        Some(b) if b.percentage >= rate.percentage => Some(b),
        _ => Some(rate),
    })
}

/// `100 * numerator / denominator`, rounded to one decimal place.
pub fn percentage(
    numerator: usize,
    denominator: usize,
    statistic: &'static str,
) -> Result<f64, AnalysisError> {
    if denominator == 0 {
        return Err(AnalysisError::ZeroDenominator { statistic });
    }
    Ok(round_one_decimal(
        100.0 * numerator as f64 / denominator as f64,
    ))
}

/// Round to one decimal place, ties to even.
///
/// Rounds the exact stored value, not the value scaled by 10.
pub fn round_one_decimal(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Share of high earners within a selection of records.
fn rich_share(selection: &[&Record], statistic: &'static str) -> Result<f64, AnalysisError> {
    let rich = selection.iter().filter(|r| r.is_high_earner()).count();
    percentage(rich, selection.len(), statistic)
}

/// Mean age of records with the given sex, rounded to one decimal place.
fn average_age(
    records: &[Record],
    sex: &str,
    statistic: &'static str,
) -> Result<f64, AnalysisError> {
    let (total, count) = records
        .iter()
        .filter(|r| r.sex == sex)
        .fold((0u64, 0usize), |(total, count), r| {
            (total + u64::from(r.age), count + 1)
        });

    if count == 0 {
        return Err(AnalysisError::ZeroDenominator { statistic });
    }
    Ok(round_one_decimal(total as f64 / count as f64))
}
