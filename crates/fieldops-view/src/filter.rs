// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::error::Result;
use crate::field::{FieldSpec, Record, field_spec, read_value};
use crate::predicate::PredicateSet;

/// Case-insensitive substring query over a fixed list of fields.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    needle: String,
    fields: Vec<&'static FieldSpec>,
}

impl SearchQuery {
    /// Resolves the searchable fields even when the query is blank, so a
    /// misdeclared field list fails on first use rather than first search.
    pub fn new<R: Record>(query: &str, searchable: &[&str]) -> Result<Self> {
        let fields = searchable
            .iter()
            .map(|name| field_spec::<R>(name))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            needle: query.trim().to_lowercase(),
            fields,
        })
    }

    pub fn is_active(&self) -> bool {
        !self.needle.is_empty()
    }

    pub fn matches<R: Record>(&self, record: &R) -> Result<bool> {
        if !self.is_active() {
            return Ok(true);
        }
        for spec in &self.fields {
            let value = read_value(record, spec)?;
            if !value.is_null() && value.display().to_lowercase().contains(&self.needle) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Keeps the records that satisfy every active predicate and the free-text
/// query, in input order.
///
/// The result borrows from `records`; nothing is cloned or reordered.
pub fn filter<'a, R: Record>(
    records: &'a [R],
    predicates: &PredicateSet,
    query: &str,
    searchable: &[&str],
) -> Result<Vec<&'a R>> {
    let rows = filter_indices(records, predicates, query, searchable)?;
    Ok(rows.into_iter().map(|index| &records[index]).collect())
}

/// Positions of the matching records within `records`.
pub fn filter_indices<R: Record>(
    records: &[R],
    predicates: &PredicateSet,
    query: &str,
    searchable: &[&str],
) -> Result<Vec<usize>> {
    let active = predicates.resolve::<R>()?;
    let search = SearchQuery::new::<R>(query, searchable)?;

    let mut rows = Vec::new();
    'records: for (index, record) in records.iter().enumerate() {
        for (spec, rule) in &active {
            let value = read_value(record, spec)?;
            if !rule.matches(&value) {
                continue 'records;
            }
        }
        if search.matches(record)? {
            rows.push(index);
        }
    }
    Ok(rows)
}
