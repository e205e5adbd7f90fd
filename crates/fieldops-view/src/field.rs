// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::{Result, ViewError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    /// Closed set of labels, ordered as declared.
    Enum(&'static [&'static str]),
    Date,
    Timestamp,
}

impl FieldKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Enum(_) => "enum",
            Self::Date => "date",
            Self::Timestamp => "timestamp",
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Decimal)
    }

    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::Timestamp)
    }
}

/// Where null sorts relative to real values, before direction is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullOrder {
    #[default]
    Lowest,
    Highest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullability {
    Required,
    Optional {
        /// Filter label that selects only the null rows, e.g. "unrated".
        bucket: &'static str,
        order: NullOrder,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub nulls: Nullability,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nulls: Nullability::Required,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind, bucket: &'static str) -> Self {
        Self {
            name,
            kind,
            nulls: Nullability::Optional {
                bucket,
                order: NullOrder::Lowest,
            },
        }
    }

    pub const fn nulls_highest(self) -> Self {
        match self.nulls {
            Nullability::Required => self,
            Nullability::Optional { bucket, .. } => Self {
                nulls: Nullability::Optional {
                    bucket,
                    order: NullOrder::Highest,
                },
                ..self
            },
        }
    }

    pub const fn is_nullable(&self) -> bool {
        matches!(self.nulls, Nullability::Optional { .. })
    }

    pub const fn null_bucket(&self) -> Option<&'static str> {
        match self.nulls {
            Nullability::Required => None,
            Nullability::Optional { bucket, .. } => Some(bucket),
        }
    }

    pub const fn null_order(&self) -> NullOrder {
        match self.nulls {
            Nullability::Required => NullOrder::Lowest,
            Nullability::Optional { order, .. } => order,
        }
    }

    /// Rejects a value that contradicts this declaration.
    pub fn check(&self, value: &FieldValue) -> Result<()> {
        let compatible = match (self.kind, value) {
            (_, FieldValue::Null) => self.is_nullable(),
            (FieldKind::Text, FieldValue::Text(_))
            | (FieldKind::Integer, FieldValue::Integer(_))
            | (FieldKind::Decimal, FieldValue::Decimal(_))
            | (FieldKind::Date, FieldValue::Date(_))
            | (FieldKind::Timestamp, FieldValue::Timestamp(_)) => true,
            (FieldKind::Enum(labels), FieldValue::Enum(label)) => labels.contains(label),
            _ => false,
        };
        if compatible {
            return Ok(());
        }

        let found = match (self.kind, value) {
            (FieldKind::Enum(_), FieldValue::Enum(_)) => "an undeclared enum label",
            (_, FieldValue::Null) => "null",
            _ => value.kind_label(),
        };
        Err(ViewError::FieldTypeMismatch {
            field: self.name.to_owned(),
            expected: self.kind.label(),
            found,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Decimal(f64),
    Enum(&'static str),
    Date(Date),
    Timestamp(OffsetDateTime),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Enum(_) => "enum",
            Self::Date(_) => "date",
            Self::Timestamp(_) => "timestamp",
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Decimal(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(value) => Some(*value),
            Self::Timestamp(value) => Some(value.date()),
            _ => None,
        }
    }

    /// Text shown in tables and matched by free-text search. Null is empty.
    pub fn display(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(value) => value.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) => format!("{value:.2}"),
            Self::Enum(label) => (*label).to_owned(),
            Self::Date(value) => value.to_string(),
            Self::Timestamp(value) => value
                .format(format_description!(
                    "[year]-[month]-[day] [hour]:[minute]"
                ))
                .unwrap_or_else(|_| value.date().to_string()),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<Date> for FieldValue {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<OffsetDateTime> for FieldValue {
    fn from(value: OffsetDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A uniformly shaped row the pipeline can read by field name.
pub trait Record {
    const FIELDS: &'static [FieldSpec];

    /// Returns `None` only for names absent from [`Record::FIELDS`].
    fn value(&self, field: &str) -> Option<FieldValue>;
}

pub fn field_spec<R: Record>(name: &str) -> Result<&'static FieldSpec> {
    lookup_field(R::FIELDS, name)
}

pub fn lookup_field(fields: &'static [FieldSpec], name: &str) -> Result<&'static FieldSpec> {
    fields
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| ViewError::UnknownField {
            field: name.to_owned(),
            known: fields
                .iter()
                .map(|spec| spec.name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Reads one field and checks it against its declaration.
pub fn read_value<R: Record>(record: &R, spec: &FieldSpec) -> Result<FieldValue> {
    let value = record
        .value(spec.name)
        .ok_or_else(|| ViewError::UnknownField {
            field: spec.name.to_owned(),
            known: R::FIELDS
                .iter()
                .map(|spec| spec.name)
                .collect::<Vec<_>>()
                .join(", "),
        })?;
    spec.check(&value)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{FieldKind, FieldSpec, FieldValue, NullOrder, lookup_field};
    use crate::ViewError;
    use time::macros::date;

    const PRIORITIES: &[&str] = &["low", "medium", "high"];
    const FIELDS: &[FieldSpec] = &[
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::optional("rating", FieldKind::Integer, "unrated"),
        FieldSpec::optional("eta", FieldKind::Date, "unscheduled").nulls_highest(),
        FieldSpec::required("priority", FieldKind::Enum(PRIORITIES)),
    ];

    #[test]
    fn lookup_lists_known_fields_on_miss() {
        let error = lookup_field(FIELDS, "ratng").expect_err("typo should fail");
        let message = error.to_string();
        assert!(message.contains("\"ratng\""));
        assert!(message.contains("title, rating, eta, priority"));
    }

    #[test]
    fn null_policy_accessors() {
        assert_eq!(FIELDS[0].null_bucket(), None);
        assert_eq!(FIELDS[1].null_bucket(), Some("unrated"));
        assert_eq!(FIELDS[1].null_order(), NullOrder::Lowest);
        assert_eq!(FIELDS[2].null_order(), NullOrder::Highest);
        assert_eq!(FIELDS[0].nulls_highest(), FIELDS[0]);
    }

    #[test]
    fn check_rejects_null_in_required_field() {
        let error = FIELDS[0]
            .check(&FieldValue::Null)
            .expect_err("required text must not be null");
        assert_eq!(
            error,
            ViewError::FieldTypeMismatch {
                field: "title".to_owned(),
                expected: "text",
                found: "null",
            }
        );
    }

    #[test]
    fn check_rejects_wrong_kind_and_undeclared_enum() {
        assert!(FIELDS[1].check(&FieldValue::Decimal(4.0)).is_err());
        assert!(FIELDS[1].check(&FieldValue::Integer(4)).is_ok());
        assert!(FIELDS[1].check(&FieldValue::Null).is_ok());
        assert!(FIELDS[3].check(&FieldValue::Enum("high")).is_ok());

        let error = FIELDS[3]
            .check(&FieldValue::Enum("urgent"))
            .expect_err("undeclared label should fail");
        assert!(error.to_string().contains("undeclared enum label"));
    }

    #[test]
    fn display_formats_each_kind() {
        assert_eq!(FieldValue::Null.display(), "");
        assert_eq!(FieldValue::Decimal(3.14159).display(), "3.14");
        assert_eq!(FieldValue::Integer(7).display(), "7");
        assert_eq!(FieldValue::Date(date!(2026 - 03 - 09)).display(), "2026-03-09");
        assert_eq!(FieldValue::Enum("high").display(), "high");
    }

    #[test]
    fn option_conversion_maps_none_to_null() {
        assert_eq!(FieldValue::from(None::<f64>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(2_i64)), FieldValue::Integer(2));
    }
}
