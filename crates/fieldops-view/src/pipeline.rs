// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;
use crate::field::{Record, field_spec, read_value};
use crate::filter::filter_indices;
use crate::predicate::PredicateSet;
use crate::sort::{SortKey, sort_items};
use crate::summary::{MetricSpec, Summary, summarize};

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// Records from one fetch. Replaced wholesale, never edited in place; every
/// replacement gets a process-unique revision.
#[derive(Debug, Clone)]
pub struct Collection<R> {
    records: Vec<R>,
    revision: u64,
}

impl<R> Collection<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            revision: next_revision(),
        }
    }

    pub fn replace(&mut self, records: Vec<R>) {
        self.records = records;
        self.revision = next_revision();
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<R> From<Vec<R>> for Collection<R> {
    fn from(records: Vec<R>) -> Self {
        Self::new(records)
    }
}

/// Everything the user picked in a view's controls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewCriteria {
    pub predicates: PredicateSet,
    pub query: String,
    pub sort: Option<SortKey>,
}

impl ViewCriteria {
    pub fn sorted_by(sort: SortKey) -> Self {
        Self {
            sort: Some(sort),
            ..Self::default()
        }
    }
}

/// Filtered, ordered row positions plus the summary of those rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub rows: Vec<usize>,
    pub summary: Summary,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// filter, then sort, then summarize the filtered rows.
pub fn project<R: Record>(
    records: &[R],
    criteria: &ViewCriteria,
    searchable: &[&str],
    metrics: &[MetricSpec],
) -> Result<Projection> {
    let mut rows = filter_indices(records, &criteria.predicates, &criteria.query, searchable)?;

    if let Some(key) = &criteria.sort {
        let spec = field_spec::<R>(&key.field)?;
        rows = sort_items(rows, spec, key.direction, |index| {
            read_value(&records[*index], spec)
        })?;
    }

    let matched: Vec<&R> = rows.iter().map(|index| &records[*index]).collect();
    let summary = summarize(&matched, metrics)?;
    Ok(Projection { rows, summary })
}

#[derive(Debug, Clone)]
struct CachedProjection {
    revision: u64,
    criteria: ViewCriteria,
    projection: Projection,
}

/// Memoized [`project`] for one view: recomputes only when the collection
/// revision or the criteria differ from the previous call.
#[derive(Debug, Clone)]
pub struct ViewCache {
    searchable: &'static [&'static str],
    metrics: &'static [MetricSpec],
    cached: Option<CachedProjection>,
    recomputations: u64,
}

impl ViewCache {
    pub fn new(searchable: &'static [&'static str], metrics: &'static [MetricSpec]) -> Self {
        Self {
            searchable,
            metrics,
            cached: None,
            recomputations: 0,
        }
    }

    pub fn refresh<R: Record>(
        &mut self,
        collection: &Collection<R>,
        criteria: &ViewCriteria,
    ) -> Result<&Projection> {
        let revision = collection.revision();
        let entry = match self.cached.take() {
            Some(entry) if entry.revision == revision && entry.criteria == *criteria => entry,
            _ => {
                let projection =
                    project(collection.records(), criteria, self.searchable, self.metrics)?;
                self.recomputations += 1;
                tracing::debug!(
                    revision,
                    rows = projection.len(),
                    total = collection.len(),
                    "recomputed view projection"
                );
                CachedProjection {
                    revision,
                    criteria: criteria.clone(),
                    projection,
                }
            }
        };
        Ok(&self.cached.insert(entry).projection)
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
