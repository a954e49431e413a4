//! Dashboard aggregates
//!
//! Everything here is recomputed from full collection snapshots; nothing is
//! updated incrementally.

use crate::types::{Assignment, Doctor, Patient};

/// Age histogram buckets as `(label, inclusive upper bound)`; the last bucket is open-ended.
pub const AGE_BUCKETS: [(&str, Option<i64>); 5] = [
    ("0-18", Some(18)),
    ("19-35", Some(35)),
    ("36-50", Some(50)),
    ("51-65", Some(65)),
    ("65+", None),
];

/// One labelled value in a chart series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Count {
    pub label: String,
    pub count: usize,
}

impl Count {
    fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Share of the whole, drawn as a proportion bar
    Proportion,
    /// One column per bucket
    Histogram,
}

/// Data behind one chart widget. Replaced as a whole on every recompute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartData {
    pub kind: ChartKind,
    pub title: String,
    pub series: Vec<Count>,
}

impl ChartData {
    pub fn total(&self) -> usize {
        self.series.iter().map(|c| c.count).sum()
    }

    pub fn max(&self) -> usize {
        self.series.iter().map(|c| c.count).max().unwrap_or(0)
    }

    /// Share of `count` in the total, as a percentage
    pub fn percent(&self, count: usize) -> f64 {
        match self.total() {
            0 => 0.0,
            total => count as f64 * 100.0 / total as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecializationCount {
    pub specialization: String,
    pub count: usize,
}

impl SpecializationCount {
    /// "1 doctor" / "3 doctors"
    pub fn label(&self) -> String {
        format!(
            "{} doctor{}",
            self.count,
            if self.count == 1 { "" } else { "s" }
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub patients: usize,
    pub doctors: usize,
    pub assignments: usize,
    pub average_age: i64,
}

/// Everything the dashboard tab shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub gender_chart: ChartData,
    pub age_chart: ChartData,
    pub specializations: Vec<SpecializationCount>,
}

impl Dashboard {
    pub fn compute(patients: &[Patient], doctors: &[Doctor], assignments: &[Assignment]) -> Self {
        Self {
            stats: stats(patients, doctors, assignments),
            gender_chart: ChartData {
                kind: ChartKind::Proportion,
                title: "Gender Distribution".to_string(),
                series: gender_distribution(patients),
            },
            age_chart: ChartData {
                kind: ChartKind::Histogram,
                title: "Age Groups".to_string(),
                series: age_histogram(patients),
            },
            specializations: specialization_tally(doctors),
        }
    }
}

/// Upper-case the first character, leave the rest untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Patient count per gender value, in order of first appearance.
///
/// Values are grouped as stored; only the label is capitalized.
pub fn gender_distribution(patients: &[Patient]) -> Vec<Count> {
    let mut groups: Vec<(&str, usize)> = Vec::new();
    for patient in patients {
        match groups.iter_mut().find(|(gender, _)| *gender == patient.gender) {
            Some((_, count)) => *count += 1,
            None => groups.push((patient.gender.as_str(), 1)),
        }
    }
    groups
        .into_iter()
        .map(|(gender, count)| Count::new(capitalize_first(gender), count))
        .collect()
}

/// Label of the bucket `age` falls into.
pub fn age_bucket(age: i64) -> &'static str {
    for (label, upper) in AGE_BUCKETS {
        match upper {
            Some(upper) if age <= upper => return label,
            Some(_) => continue,
            None => return label,
        }
    }
    AGE_BUCKETS[AGE_BUCKETS.len() - 1].0
}

/// Patient count per fixed age bucket; all five buckets are always present.
pub fn age_histogram(patients: &[Patient]) -> Vec<Count> {
    let mut counts = [0usize; AGE_BUCKETS.len()];
    for patient in patients {
        let label = age_bucket(patient.age);
        if let Some(index) = AGE_BUCKETS.iter().position(|(l, _)| *l == label) {
            counts[index] += 1;
        }
    }
    AGE_BUCKETS
        .iter()
        .zip(counts)
        .map(|((label, _), count)| Count::new(*label, count))
        .collect()
}

/// Doctor count per specialization, most common first. Ties keep encounter order.
pub fn specialization_tally(doctors: &[Doctor]) -> Vec<SpecializationCount> {
    let mut tally: Vec<SpecializationCount> = Vec::new();
    for doctor in doctors {
        match tally
            .iter_mut()
            .find(|entry| entry.specialization == doctor.specialization)
        {
            Some(entry) => entry.count += 1,
            None => tally.push(SpecializationCount {
                specialization: doctor.specialization.clone(),
                count: 1,
            }),
        }
    }
    // stable sort
    tally.sort_by(|a, b| b.count.cmp(&a.count));
    tally
}

/// Mean patient age rounded half up; 0 without patients.
pub fn average_age(patients: &[Patient]) -> i64 {
    if patients.is_empty() {
        return 0;
    }
    let sum: i64 = patients.iter().map(|p| p.age).sum();
    (sum as f64 / patients.len() as f64 + 0.5).floor() as i64
}

pub fn stats(patients: &[Patient], doctors: &[Doctor], assignments: &[Assignment]) -> DashboardStats {
    DashboardStats {
        patients: patients.len(),
        doctors: doctors.len(),
        assignments: assignments.len(),
        average_age: average_age(patients),
    }
}
