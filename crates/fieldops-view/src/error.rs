// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

/// Programming errors raised by the view pipeline.
///
/// None of these depend on the data being filtered: they describe criteria
/// or records that contradict a field schema, and are reported before any
/// partial result is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("unknown field {field:?}; known fields: {known}")]
    UnknownField { field: String, known: String },

    #[error("invalid predicate on {field:?}: {reason}")]
    InvalidPredicate { field: String, reason: String },

    #[error("invalid sort {raw:?}: {reason}")]
    InvalidSort { raw: String, reason: String },

    #[error("invalid metric on {field:?}: {reason}")]
    InvalidMetric { field: String, reason: String },

    #[error("field {field:?} holds {found} but is declared {expected}")]
    FieldTypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl ViewError {
    pub(crate) fn predicate(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPredicate {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn metric(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidMetric {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = ViewError> = std::result::Result<T, E>;
