// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::error::{Result, ViewError};
use crate::field::{FieldSpec, Record, field_spec, read_value};

/// Shown for a mean or coverage computed over zero samples.
pub const NO_DATA: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Count,
    Sum(&'static str),
    Mean(&'static str),
    /// Percentage of records whose field is non-null.
    Coverage(&'static str),
}

impl Metric {
    pub const fn field(self) -> Option<&'static str> {
        match self {
            Self::Count => None,
            Self::Sum(field) | Self::Mean(field) | Self::Coverage(field) => Some(field),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpec {
    pub label: &'static str,
    pub metric: Metric,
}

impl MetricSpec {
    pub const fn count(label: &'static str) -> Self {
        Self {
            label,
            metric: Metric::Count,
        }
    }

    pub const fn sum(label: &'static str, field: &'static str) -> Self {
        Self {
            label,
            metric: Metric::Sum(field),
        }
    }

    pub const fn mean(label: &'static str, field: &'static str) -> Self {
        Self {
            label,
            metric: Metric::Mean(field),
        }
    }

    pub const fn coverage(label: &'static str, field: &'static str) -> Self {
        Self {
            label,
            metric: Metric::Coverage(field),
        }
    }
}

/// A summary value together with the number of samples behind it.
///
/// `sample_size == 0` means "no data"; the value is then always `0.0` so a
/// genuine zero average stays distinguishable from an empty one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stat {
    pub value: f64,
    pub sample_size: usize,
}

impl Stat {
    pub const EMPTY: Self = Self {
        value: 0.0,
        sample_size: 0,
    };

    pub const fn new(value: f64, sample_size: usize) -> Self {
        Self { value, sample_size }
    }

    pub const fn is_defined(&self) -> bool {
        self.sample_size > 0
    }

    /// `total / samples`, or [`Stat::EMPTY`] when there are no samples.
    pub fn ratio(total: f64, samples: usize) -> Self {
        if samples == 0 {
            Self::EMPTY
        } else {
            Self::new(total / samples as f64, samples)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryEntry {
    pub spec: MetricSpec,
    pub stat: Stat,
}

impl SummaryEntry {
    pub fn display(&self) -> String {
        match self.spec.metric {
            Metric::Count => format!("{}", self.stat.value as u64),
            Metric::Sum(_) => format!("{:.2}", self.stat.value),
            Metric::Mean(_) if self.stat.is_defined() => format!("{:.2}", self.stat.value),
            Metric::Coverage(_) if self.stat.is_defined() => format!("{:.0}%", self.stat.value),
            Metric::Mean(_) | Metric::Coverage(_) => NO_DATA.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    entries: Vec<SummaryEntry>,
}

impl Summary {
    pub fn get(&self, label: &str) -> Option<Stat> {
        self.entries
            .iter()
            .find(|entry| entry.spec.label == label)
            .map(|entry| entry.stat)
    }

    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One-line rendering, e.g. `orders 4 | revenue 700.00 | rating —`.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{} {}", entry.spec.label, entry.display()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Computes each metric over `records`, which should already be filtered.
pub fn summarize<R: Record>(records: &[&R], metrics: &[MetricSpec]) -> Result<Summary> {
    let mut entries = Vec::with_capacity(metrics.len());
    for spec in metrics {
        let stat = match spec.metric {
            Metric::Count => Stat::new(records.len() as f64, records.len()),
            Metric::Sum(field) => {
                let (total, samples) = numeric_total(records, numeric_field::<R>(field)?)?;
                if samples == 0 {
                    Stat::EMPTY
                } else {
                    Stat::new(total, samples)
                }
            }
            Metric::Mean(field) => {
                let (total, samples) = numeric_total(records, numeric_field::<R>(field)?)?;
                Stat::ratio(total, samples)
            }
            Metric::Coverage(field) => {
                let field = field_spec::<R>(field)?;
                let mut present = 0_usize;
                for record in records {
                    if !read_value(*record, field)?.is_null() {
                        present += 1;
                    }
                }
                let stat = Stat::ratio(present as f64 * 100.0, records.len());
                Stat::new(stat.value, records.len())
            }
        };
        entries.push(SummaryEntry { spec: *spec, stat });
    }
    Ok(Summary { entries })
}

fn numeric_field<R: Record>(name: &str) -> Result<&'static FieldSpec> {
    let spec = field_spec::<R>(name)?;
    if !spec.kind.is_numeric() {
        return Err(ViewError::metric(
            name,
            format!("needs a numeric field, not {}", spec.kind.label()),
        ));
    }
    Ok(spec)
}

fn numeric_total<R: Record>(records: &[&R], spec: &FieldSpec) -> Result<(f64, usize)> {
    let mut total = 0.0;
    let mut samples = 0_usize;
    for record in records {
        if let Some(number) = read_value(*record, spec)?.as_f64() {
            total += number;
            samples += 1;
        }
    }
    Ok((total, samples))
}

#[cfg(test)]
mod tests {
    use super::{MetricSpec, NO_DATA, Stat, summarize};
    use crate::{FieldKind, FieldSpec, FieldValue, Record, ViewError};

    struct Visit {
        technician: &'static str,
        minutes: Option<f64>,
    }

    impl Record for Visit {
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::required("technician", FieldKind::Text),
            FieldSpec::optional("minutes", FieldKind::Decimal, "untimed"),
        ];

        fn value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "technician" => Some(self.technician.into()),
                "minutes" => Some(self.minutes.into()),
                _ => None,
            }
        }
    }

    const METRICS: &[MetricSpec] = &[
        MetricSpec::count("visits"),
        MetricSpec::sum("total", "minutes"),
        MetricSpec::mean("avg", "minutes"),
        MetricSpec::coverage("timed", "minutes"),
    ];

    #[test]
    fn mean_and_coverage_ignore_nulls() -> Result<(), ViewError> {
        let visits = [
            Visit {
                technician: "Ana",
                minutes: Some(30.0),
            },
            Visit {
                technician: "Ben",
                minutes: None,
            },
            Visit {
                technician: "Cy",
                minutes: Some(90.0),
            },
            Visit {
                technician: "Di",
                minutes: Some(0.0),
            },
        ];
        let refs: Vec<&Visit> = visits.iter().collect();
        let summary = summarize(&refs, METRICS)?;

        assert_eq!(summary.get("visits"), Some(Stat::new(4.0, 4)));
        assert_eq!(summary.get("total"), Some(Stat::new(120.0, 3)));
        assert_eq!(summary.get("avg"), Some(Stat::new(40.0, 3)));
        assert_eq!(summary.get("timed"), Some(Stat::new(75.0, 4)));
        assert_eq!(summary.render(), "visits 4 | total 120.00 | avg 40.00 | timed 75%");
        Ok(())
    }

    #[test]
    fn true_zero_mean_is_defined() -> Result<(), ViewError> {
        let visits = [Visit {
            technician: "Di",
            minutes: Some(0.0),
        }];
        let refs: Vec<&Visit> = visits.iter().collect();
        let summary = summarize(&refs, &[MetricSpec::mean("avg", "minutes")])?;
        let avg = summary.get("avg").expect("avg should be present");
        assert!(avg.is_defined());
        assert_eq!(avg.value, 0.0);
        Ok(())
    }

    #[test]
    fn all_null_samples_render_placeholder() -> Result<(), ViewError> {
        let visits = [Visit {
            technician: "Ben",
            minutes: None,
        }];
        let refs: Vec<&Visit> = visits.iter().collect();
        let summary = summarize(&refs, METRICS)?;
        assert_eq!(summary.get("avg"), Some(Stat::EMPTY));
        assert_eq!(summary.get("timed"), Some(Stat::new(0.0, 1)));
        assert_eq!(summary.entries()[2].display(), NO_DATA);
        assert_eq!(summary.entries()[3].display(), "0%");
        Ok(())
    }

    #[test]
    fn sum_over_text_field_is_rejected() {
        let error = summarize::<Visit>(&[], &[MetricSpec::sum("bad", "technician")])
            .expect_err("text field cannot be summed");
        assert!(matches!(error, ViewError::InvalidMetric { .. }));
    }
}
