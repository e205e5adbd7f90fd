// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use time::Date;
use time::macros::format_description;

use crate::error::{Result, ViewError};
use crate::field::{FieldKind, FieldSpec, FieldValue, Record, field_spec};

/// Raw filter text that leaves a field unconstrained.
pub const ALL: &str = "all";
/// Raw filter text that keeps only rows where a nullable field has a value.
pub const ANY_VALUE: &str = "any";

/// Comparison applied to one field.
///
/// Only [`Rule::IsNull`] and [`Rule::Any`] can match a null value; every
/// comparison against a concrete value treats null as a non-match.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Rule {
    #[default]
    Any,
    IsNull,
    NotNull,
    Equals(FieldValue),
    OneOf(Vec<FieldValue>),
    /// Case-insensitive substring match on a text field.
    Contains(String),
    /// Inclusive numeric bounds.
    Range { min: Option<f64>, max: Option<f64> },
    /// Inclusive calendar-date bounds; timestamps compare by their date.
    DateRange { from: Option<Date>, to: Option<Date> },
}

impl Rule {
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Any)
    }

    /// Parses filter text typed into a dashboard control or passed on the
    /// command line.
    ///
    /// | input                    | rule                          |
    /// |--------------------------|-------------------------------|
    /// | empty, `all`             | [`Rule::Any`]                 |
    /// | the field's null bucket  | [`Rule::IsNull`]              |
    /// | `any` (nullable fields)  | [`Rule::NotNull`]             |
    /// | `~text` (text)           | [`Rule::Contains`]            |
    /// | `=text` (text)           | [`Rule::Equals`], literally   |
    /// | `a,b` (enum)             | [`Rule::OneOf`]               |
    /// | `a..b`, `>=a`, `<=b`     | [`Rule::Range`] / [`Rule::DateRange`] |
    /// | anything else            | [`Rule::Equals`]              |
    ///
    /// The null bucket and `any` win over a text value spelled the same way,
    /// so `Global` on a field whose bucket is `global` selects the null rows.
    /// Prefix `=` to match such a value literally.
    pub fn parse(spec: &FieldSpec, raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(Self::Any);
        }
        if let Some(bucket) = spec.null_bucket() {
            if trimmed.eq_ignore_ascii_case(bucket) {
                return Ok(Self::IsNull);
            }
            if trimmed.eq_ignore_ascii_case(ANY_VALUE) {
                return Ok(Self::NotNull);
            }
        }

        let rule = match spec.kind {
            FieldKind::Text => {
                if let Some(needle) = trimmed.strip_prefix('~') {
                    Self::Contains(needle.trim().to_owned())
                } else {
                    let literal = trimmed.strip_prefix('=').unwrap_or(trimmed).trim();
                    Self::Equals(FieldValue::text(literal))
                }
            }
            FieldKind::Integer | FieldKind::Decimal => parse_numeric(spec, trimmed)?,
            FieldKind::Enum(labels) => parse_enum(spec, labels, trimmed)?,
            FieldKind::Date | FieldKind::Timestamp => parse_dates(spec, trimmed)?,
        };
        rule.validate(spec)?;
        Ok(rule)
    }

    /// Checks that this rule can be evaluated against the declared field.
    pub fn validate(&self, spec: &FieldSpec) -> Result<()> {
        match self {
            Self::Any => Ok(()),
            Self::IsNull | Self::NotNull => {
                if spec.is_nullable() {
                    Ok(())
                } else {
                    Err(ViewError::predicate(spec.name, "field is never null"))
                }
            }
            Self::Equals(expected) => validate_operand(spec, expected),
            Self::OneOf(options) => {
                if options.is_empty() {
                    return Err(ViewError::predicate(spec.name, "empty option list"));
                }
                options
                    .iter()
                    .try_for_each(|option| validate_operand(spec, option))
            }
            Self::Contains(_) => {
                if spec.kind == FieldKind::Text {
                    Ok(())
                } else {
                    Err(ViewError::predicate(
                        spec.name,
                        format!("substring match needs a text field, not {}", spec.kind.label()),
                    ))
                }
            }
            Self::Range { min, max } => {
                if !spec.kind.is_numeric() {
                    return Err(ViewError::predicate(
                        spec.name,
                        format!("numeric range on {} field", spec.kind.label()),
                    ));
                }
                if min.is_some_and(f64::is_nan) || max.is_some_and(f64::is_nan) {
                    return Err(ViewError::predicate(spec.name, "range bound is NaN"));
                }
                if let (Some(min), Some(max)) = (min, max)
                    && min > max
                {
                    return Err(ViewError::predicate(
                        spec.name,
                        format!("lower bound {min} exceeds upper bound {max}"),
                    ));
                }
                Ok(())
            }
            Self::DateRange { from, to } => {
                if !spec.kind.is_temporal() {
                    return Err(ViewError::predicate(
                        spec.name,
                        format!("date range on {} field", spec.kind.label()),
                    ));
                }
                if let (Some(from), Some(to)) = (from, to)
                    && from > to
                {
                    return Err(ViewError::predicate(
                        spec.name,
                        format!("start {from} is after end {to}"),
                    ));
                }
                Ok(())
            }
        }
    }

    pub fn matches(&self, value: &FieldValue) -> bool {
        match self {
            Self::Any => true,
            Self::IsNull => value.is_null(),
            Self::NotNull => !value.is_null(),
            Self::Equals(expected) => values_equal(expected, value),
            Self::OneOf(options) => options.iter().any(|option| values_equal(option, value)),
            Self::Contains(needle) => match value {
                FieldValue::Text(text) => text.to_lowercase().contains(&needle.to_lowercase()),
                _ => false,
            },
            Self::Range { min, max } => value.as_f64().is_some_and(|number| {
                min.is_none_or(|min| number >= min) && max.is_none_or(|max| number <= max)
            }),
            Self::DateRange { from, to } => value.as_date().is_some_and(|day| {
                from.is_none_or(|from| day >= from) && to.is_none_or(|to| day <= to)
            }),
        }
    }

    /// Short form used in status lines.
    pub fn describe(&self) -> String {
        match self {
            Self::Any => ALL.to_owned(),
            Self::IsNull => "none".to_owned(),
            Self::NotNull => ANY_VALUE.to_owned(),
            Self::Equals(value) => value.display(),
            Self::OneOf(options) => options
                .iter()
                .map(FieldValue::display)
                .collect::<Vec<_>>()
                .join(","),
            Self::Contains(needle) => format!("~{needle}"),
            Self::Range { min, max } => format!(
                "{}..{}",
                min.map(|min| min.to_string()).unwrap_or_default(),
                max.map(|max| max.to_string()).unwrap_or_default(),
            ),
            Self::DateRange { from, to } => format!(
                "{}..{}",
                from.map(|from| from.to_string()).unwrap_or_default(),
                to.map(|to| to.to_string()).unwrap_or_default(),
            ),
        }
    }
}

fn validate_operand(spec: &FieldSpec, operand: &FieldValue) -> Result<()> {
    if operand.is_null() {
        return Err(ViewError::predicate(
            spec.name,
            "compare against the null bucket instead of a null value",
        ));
    }
    spec.check(operand).map_err(|error| match error {
        ViewError::FieldTypeMismatch {
            expected, found, ..
        } => ViewError::predicate(spec.name, format!("expected {expected} operand, got {found}")),
        other => other,
    })
}

fn values_equal(expected: &FieldValue, value: &FieldValue) -> bool {
    match (expected, value) {
        (FieldValue::Text(expected), FieldValue::Text(value)) => {
            expected.trim().to_lowercase() == value.trim().to_lowercase()
        }
        (FieldValue::Null, _) | (_, FieldValue::Null) => false,
        _ => expected == value,
    }
}

fn parse_numeric(spec: &FieldSpec, raw: &str) -> Result<Rule> {
    if let Some((low, high)) = raw.split_once("..") {
        return Ok(Rule::Range {
            min: parse_bound(spec, low)?,
            max: parse_bound(spec, high)?,
        });
    }
    if let Some(low) = raw.strip_prefix(">=") {
        return Ok(Rule::Range {
            min: Some(parse_number(spec, low)?),
            max: None,
        });
    }
    if let Some(high) = raw.strip_prefix("<=") {
        return Ok(Rule::Range {
            min: None,
            max: Some(parse_number(spec, high)?),
        });
    }

    let value = match spec.kind {
        FieldKind::Integer => FieldValue::Integer(raw.parse().map_err(|_| {
            ViewError::predicate(spec.name, format!("expected an integer, got {raw:?}"))
        })?),
        _ => FieldValue::Decimal(parse_number(spec, raw)?),
    };
    Ok(Rule::Equals(value))
}

fn parse_bound(spec: &FieldSpec, raw: &str) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_number(spec, raw).map(Some)
}

fn parse_number(spec: &FieldSpec, raw: &str) -> Result<f64> {
    let raw = raw.trim();
    raw.parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| ViewError::predicate(spec.name, format!("expected a number, got {raw:?}")))
}

fn parse_enum(spec: &FieldSpec, labels: &'static [&'static str], raw: &str) -> Result<Rule> {
    let mut options = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let label = labels
            .iter()
            .find(|label| label.eq_ignore_ascii_case(part))
            .ok_or_else(|| {
                ViewError::predicate(
                    spec.name,
                    format!("{part:?} is not one of: {}", labels.join(", ")),
                )
            })?;
        options.push(FieldValue::Enum(*label));
    }

    match options.len() {
        0 => Ok(Rule::Any),
        1 => Ok(Rule::Equals(options.remove(0))),
        _ => Ok(Rule::OneOf(options)),
    }
}

fn parse_dates(spec: &FieldSpec, raw: &str) -> Result<Rule> {
    if let Some((from, to)) = raw.split_once("..") {
        return Ok(Rule::DateRange {
            from: parse_optional_date(spec, from)?,
            to: parse_optional_date(spec, to)?,
        });
    }
    if let Some(from) = raw.strip_prefix(">=") {
        return Ok(Rule::DateRange {
            from: Some(parse_date(spec, from)?),
            to: None,
        });
    }
    if let Some(to) = raw.strip_prefix("<=") {
        return Ok(Rule::DateRange {
            from: None,
            to: Some(parse_date(spec, to)?),
        });
    }

    let day = parse_date(spec, raw)?;
    match spec.kind {
        FieldKind::Date => Ok(Rule::Equals(FieldValue::Date(day))),
        _ => Ok(Rule::DateRange {
            from: Some(day),
            to: Some(day),
        }),
    }
}

fn parse_optional_date(spec: &FieldSpec, raw: &str) -> Result<Option<Date>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_date(spec, raw).map(Some)
}

fn parse_date(spec: &FieldSpec, raw: &str) -> Result<Date> {
    let raw = raw.trim();
    Date::parse(raw, format_description!("[year]-[month]-[day]")).map_err(|_| {
        ViewError::predicate(spec.name, format!("expected YYYY-MM-DD, got {raw:?}"))
    })
}

/// Active rules keyed by field name. A record matches when every rule does.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredicateSet {
    rules: BTreeMap<String, Rule>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, rule: Rule) -> Self {
        self.set(field, rule);
        self
    }

    /// Setting [`Rule::Any`] removes the field's constraint.
    pub fn set(&mut self, field: impl Into<String>, rule: Rule) {
        let field = field.into();
        if rule.is_active() {
            self.rules.insert(field, rule);
        } else {
            self.rules.remove(&field);
        }
    }

    pub fn clear(&mut self, field: &str) -> bool {
        self.rules.remove(field).is_some()
    }

    pub fn get(&self, field: &str) -> Option<&Rule> {
        self.rules.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(field, rule)| (field.as_str(), rule))
    }

    /// Binds every rule to its field declaration, failing on the first rule
    /// the schema cannot evaluate.
    pub fn resolve<R: Record>(&self) -> Result<Vec<(&'static FieldSpec, &Rule)>> {
        let mut resolved = Vec::with_capacity(self.rules.len());
        for (field, rule) in &self.rules {
            let spec = field_spec::<R>(field)?;
            rule.validate(spec)?;
            resolved.push((spec, rule));
        }
        Ok(resolved)
    }
}
