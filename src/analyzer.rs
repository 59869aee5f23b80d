use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::config::AnalyzerConfig;
use crate::csv_reader::Record;
use crate::dataset::{value_counts, CensusDataset};
use crate::error::{ReportError, Result};

/// Category labels with their row counts, largest first. Serializes as a
/// JSON object whose keys keep this order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCounts(Vec<(String, u64)>);

impl CategoryCounts {
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(label, count)| (label.as_str(), *count))
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, count) in &self.0 {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

/// The ten statistics of the demographic report.
///
/// Fields are `None` when the subset they are computed over is empty, e.g.
/// `average_age_men` for a dataset without male rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicReport {
    pub race_count: CategoryCounts,
    pub average_age_men: Option<f64>,
    pub percentage_bachelors: f64,
    pub higher_education_rich: Option<f64>,
    pub lower_education_rich: Option<f64>,
    pub min_work_hours: u8,
    pub rich_percentage: f64,
    pub highest_earning_country: Option<String>,
    pub highest_earning_country_percentage: Option<f64>,
    #[serde(rename = "top_IN_occupation")]
    pub top_in_occupation: Option<String>,
}

/// Round to one decimal place, ties to even.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

fn ratio(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(part as f64 / whole as f64 * 100.0)
    }
}

fn percentage(part: usize, whole: usize) -> Option<f64> {
    ratio(part, whole).map(round1)
}

fn count_rich(rows: &[&Record], rich_label: &str) -> usize {
    rows.iter().filter(|r| r.salary == rich_label).count()
}

/// First entry holding the maximum value; later ties lose.
fn first_max<T, V: PartialOrd + Copy>(items: impl IntoIterator<Item = (T, V)>) -> Option<(T, V)> {
    let mut best: Option<(T, V)> = None;
    for (item, value) in items {
        let replace = match &best {
            Some((_, current)) => value > *current,
            None => true,
        };
        if replace {
            best = Some((item, value));
        }
    }
    best
}

pub fn compute_demographics(
    dataset: &CensusDataset,
    config: &AnalyzerConfig,
) -> Result<DemographicReport> {
    if dataset.is_empty() {
        return Err(ReportError::EmptyDataset {
            path: dataset.source().to_path_buf(),
        });
    }
    let total = dataset.len();

    // Stable sort: equal counts stay in first-appearance order.
    let mut races = value_counts(dataset.records(), |r| r.race.as_str());
    races.sort_by(|a, b| b.1.cmp(&a.1));
    let race_count = CategoryCounts(
        races
            .into_iter()
            .map(|(race, count)| (race.to_string(), count as u64))
            .collect(),
    );
    tracing::debug!(races = race_count.len(), "race distribution");

    let men = dataset.filter(|r| r.sex == config.male_label);
    let average_age_men = if men.is_empty() {
        None
    } else {
        let age_sum: u64 = men.iter().map(|r| u64::from(r.age)).sum();
        Some(round1(age_sum as f64 / men.len() as f64))
    };
    tracing::debug!(men = men.len(), ?average_age_men, "average age of men");

    let bachelors = dataset.count_where(|r| r.education == config.bachelors_label);
    let percentage_bachelors = round1(bachelors as f64 / total as f64 * 100.0);

    let higher_education = dataset.filter(|r| config.is_higher_education(&r.education));
    let lower_education = dataset.filter(|r| !config.is_higher_education(&r.education));
    let higher_education_rich = percentage(
        count_rich(&higher_education, &config.rich_label),
        higher_education.len(),
    );
    let lower_education_rich = percentage(
        count_rich(&lower_education, &config.rich_label),
        lower_education.len(),
    );
    tracing::debug!(
        higher = higher_education.len(),
        lower = lower_education.len(),
        ?higher_education_rich,
        ?lower_education_rich,
        "education partitions"
    );

    let min_work_hours = dataset
        .records()
        .iter()
        .map(|r| r.hours_per_week)
        .min()
        .ok_or_else(|| ReportError::EmptyDataset {
            path: dataset.source().to_path_buf(),
        })?;
    let min_workers = dataset.filter(|r| r.hours_per_week == min_work_hours);
    let min_workers_rich = count_rich(&min_workers, &config.rich_label);
    let rich_percentage = round1(min_workers_rich as f64 / min_workers.len() as f64 * 100.0);
    tracing::debug!(min_work_hours, workers = min_workers.len(), rich_percentage, "fewest hours");

    let rich_workers = dataset.filter(|r| r.salary == config.rich_label);
    let workers_by_country = value_counts(dataset.records(), |r| r.native_country.as_str());
    let rich_by_country = value_counts(rich_workers.iter().copied(), |r| r.native_country.as_str());
    let best_country = first_max(rich_by_country.into_iter().filter_map(|(country, rich)| {
        workers_by_country
            .iter()
            .find(|(c, _)| *c == country)
            .and_then(|(_, workers)| ratio(rich, *workers))
            .map(|pct| (country, pct))
    }));
    let (highest_earning_country, highest_earning_country_percentage) = match best_country {
        Some((country, pct)) => (Some(country.to_string()), Some(round1(pct))),
        None => (None, None),
    };
    tracing::debug!(?highest_earning_country, ?highest_earning_country_percentage, "highest earning country");

    let focus_rich = rich_workers
        .iter()
        .copied()
        .filter(|r| r.native_country == config.focus_country);
    let top_in_occupation = first_max(value_counts(focus_rich, |r| r.occupation.as_str()))
        .map(|(occupation, _)| occupation.to_string());
    tracing::debug!(country = %config.focus_country, ?top_in_occupation, "top occupation");

    Ok(DemographicReport {
        race_count,
        average_age_men,
        percentage_bachelors,
        higher_education_rich,
        lower_education_rich,
        min_work_hours,
        rich_percentage,
        highest_earning_country,
        highest_earning_country_percentage,
        top_in_occupation,
    })
}

impl DemographicReport {
    /// Printable transcript; `focus_country` names the country of the last
    /// line.
    pub fn transcript<'a>(&'a self, focus_country: &'a str) -> Transcript<'a> {
        Transcript {
            report: self,
            focus_country,
        }
    }
}

pub struct Transcript<'a> {
    report: &'a DemographicReport,
    focus_country: &'a str,
}

struct Value<'a, T>(&'a Option<T>);

impl fmt::Display for Value<'_, f64> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{:.1}", v),
            None => write!(f, "n/a"),
        }
    }
}

/// Percentage followed by `%`, or a bare `n/a`.
struct Percent<'a>(&'a Option<f64>);

impl fmt::Display for Percent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{:.1}%", v),
            None => write!(f, "n/a"),
        }
    }
}

impl fmt::Display for Value<'_, String> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "n/a"),
        }
    }
}

impl fmt::Display for Transcript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let r = self.report;
        writeln!(f, "Number of each race:")?;
        let width = r.race_count.iter().map(|(race, _)| race.len()).max().unwrap_or(0);
        for (race, count) in r.race_count.iter() {
            writeln!(f, "{:<width$}  {:>6}", race, count, width = width)?;
        }
        writeln!(f, "Average age of men: {}", Value(&r.average_age_men))?;
        writeln!(f, "Percentage with Bachelors degrees: {:.1}%", r.percentage_bachelors)?;
        writeln!(
            f,
            "Percentage with higher education that earn >50K: {}",
            Percent(&r.higher_education_rich)
        )?;
        writeln!(
            f,
            "Percentage without higher education that earn >50K: {}",
            Percent(&r.lower_education_rich)
        )?;
        writeln!(f, "Min work time: {} hours/week", r.min_work_hours)?;
        writeln!(
            f,
            "Percentage of rich among those who work fewest hours: {:.1}%",
            r.rich_percentage
        )?;
        writeln!(
            f,
            "Country with highest percentage of rich: {}",
            Value(&r.highest_earning_country)
        )?;
        writeln!(
            f,
            "Highest percentage of rich people in country: {}",
            Percent(&r.highest_earning_country_percentage)
        )?;
        writeln!(
            f,
            "Top occupations in {}: {}",
            self.focus_country,
            Value(&r.top_in_occupation)
        )
    }
}
