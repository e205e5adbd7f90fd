// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;

use crate::error::{Result, ViewError};
use crate::field::{FieldKind, FieldSpec, FieldValue, NullOrder, Record, field_spec, read_value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parses `field`, `field:asc` or `field:desc`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (field, direction) = match raw.split_once(':') {
            Some((field, direction)) => {
                let direction =
                    SortDirection::parse(direction).ok_or_else(|| ViewError::InvalidSort {
                        raw: raw.to_owned(),
                        reason: format!("direction must be asc or desc, got {direction:?}"),
                    })?;
                (field.trim(), direction)
            }
            None => (raw, SortDirection::Asc),
        };
        if field.is_empty() {
            return Err(ViewError::InvalidSort {
                raw: raw.to_owned(),
                reason: "missing field name".to_owned(),
            });
        }
        Ok(Self {
            field: field.to_owned(),
            direction,
        })
    }
}

/// Orders values of one declared field.
///
/// Numbers compare numerically, text case-insensitively, enum labels by
/// declaration order, dates chronologically. Null sits below or above every
/// real value according to the field's [`NullOrder`], and the direction
/// reverses the whole ordering, null placement included.
pub fn compare_values(
    spec: &FieldSpec,
    left: &FieldValue,
    right: &FieldValue,
    direction: SortDirection,
) -> Ordering {
    let order = match (left.is_null(), right.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => null_vs_value(spec.null_order()),
        (false, true) => null_vs_value(spec.null_order()).reverse(),
        (false, false) => compare_present(spec.kind, left, right),
    };
    match direction {
        SortDirection::Asc => order,
        SortDirection::Desc => order.reverse(),
    }
}

const fn null_vs_value(order: NullOrder) -> Ordering {
    match order {
        NullOrder::Lowest => Ordering::Less,
        NullOrder::Highest => Ordering::Greater,
    }
}

fn compare_present(kind: FieldKind, left: &FieldValue, right: &FieldValue) -> Ordering {
    match (left, right) {
        (FieldValue::Integer(left), FieldValue::Integer(right)) => left.cmp(right),
        (FieldValue::Decimal(left), FieldValue::Decimal(right)) => left.total_cmp(right),
        (FieldValue::Text(left), FieldValue::Text(right)) => {
            left.to_lowercase().cmp(&right.to_lowercase())
        }
        (FieldValue::Date(left), FieldValue::Date(right)) => left.cmp(right),
        (FieldValue::Timestamp(left), FieldValue::Timestamp(right)) => left.cmp(right),
        (FieldValue::Enum(left), FieldValue::Enum(right)) => {
            enum_rank(kind, left).cmp(&enum_rank(kind, right))
        }
        // Values are schema-checked before comparison.
        _ => Ordering::Equal,
    }
}

fn enum_rank(kind: FieldKind, label: &str) -> usize {
    match kind {
        FieldKind::Enum(labels) => labels
            .iter()
            .position(|candidate| *candidate == label)
            .unwrap_or(labels.len()),
        _ => 0,
    }
}

/// Returns the records ordered by `key`. Equal keys keep their input order.
pub fn sort<'a, R: Record>(records: &[&'a R], key: &SortKey) -> Result<Vec<&'a R>> {
    let spec = field_spec::<R>(&key.field)?;
    sort_items(records.to_vec(), spec, key.direction, |record| {
        read_value(*record, spec)
    })
}

pub(crate) fn sort_items<T>(
    items: Vec<T>,
    spec: &FieldSpec,
    direction: SortDirection,
    mut value_of: impl FnMut(&T) -> Result<FieldValue>,
) -> Result<Vec<T>> {
    let mut keyed = Vec::with_capacity(items.len());
    for item in items {
        let value = value_of(&item)?;
        keyed.push((value, item));
    }
    keyed.sort_by(|(left, _), (right, _)| compare_values(spec, left, right, direction));
    Ok(keyed.into_iter().map(|(_, item)| item).collect())
}
