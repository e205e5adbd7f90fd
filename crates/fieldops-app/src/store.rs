// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use fieldops_view::{ViewCache, ViewCriteria, ViewError};

use crate::fetch::{FetchOutcome, FetchTicket, FetchTracker};
use crate::model::ViewKind;
use crate::views::{Dataset, RenderedView, preset};

#[derive(Debug, Clone)]
struct Slot {
    dataset: Dataset,
    cache: ViewCache,
    loaded: bool,
}

impl Slot {
    fn new(kind: ViewKind) -> Self {
        Self {
            dataset: Dataset::empty(kind),
            cache: preset(kind).cache(),
            loaded: false,
        }
    }
}

/// Latest records for every view, with a memoized projection per view.
#[derive(Debug, Clone)]
pub struct ViewStore {
    slots: BTreeMap<ViewKind, Slot>,
    fetches: FetchTracker,
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStore {
    pub fn new() -> Self {
        Self {
            slots: ViewKind::ALL
                .into_iter()
                .map(|kind| (kind, Slot::new(kind)))
                .collect(),
            fetches: FetchTracker::new(),
        }
    }

    pub fn begin_fetch(&mut self, kind: ViewKind) -> FetchTicket {
        let ticket = self.fetches.begin(kind);
        tracing::debug!(
            view = kind.label(),
            generation = ticket.generation,
            "fetch started"
        );
        ticket
    }

    /// Installs fetched records if `ticket` is still the newest for its
    /// view. Stale results are dropped whole, never merged.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, dataset: Dataset) -> Result<FetchOutcome> {
        if dataset.kind() != ticket.kind {
            bail!(
                "fetch for {} returned {} records",
                ticket.kind.label(),
                dataset.kind().label()
            );
        }
        if !self.fetches.is_current(ticket) {
            let newest = self.fetches.newest(ticket.kind).unwrap_or(ticket.generation);
            tracing::debug!(
                view = ticket.kind.label(),
                generation = ticket.generation,
                newest,
                "discarding superseded fetch"
            );
            return Ok(FetchOutcome::Superseded {
                kind: ticket.kind,
                newest,
            });
        }

        let records = dataset.len();
        let slot = self.slot_mut(ticket.kind);
        slot.dataset = dataset;
        slot.loaded = true;
        tracing::debug!(view = ticket.kind.label(), records, "fetch applied");
        Ok(FetchOutcome::Applied {
            kind: ticket.kind,
            records,
        })
    }

    /// Replaces a view's records without going through a fetch ticket.
    pub fn load(&mut self, dataset: Dataset) {
        let slot = self.slot_mut(dataset.kind());
        slot.dataset = dataset;
        slot.loaded = true;
    }

    pub fn dataset(&self, kind: ViewKind) -> Option<&Dataset> {
        self.slots.get(&kind).map(|slot| &slot.dataset)
    }

    pub fn is_loaded(&self, kind: ViewKind) -> bool {
        self.slots.get(&kind).is_some_and(|slot| slot.loaded)
    }

    pub fn recomputations(&self, kind: ViewKind) -> u64 {
        self.slots
            .get(&kind)
            .map_or(0, |slot| slot.cache.recomputations())
    }

    /// Filters, sorts and summarizes a view, then formats up to `limit`
    /// rows. The summary always covers every matched row.
    pub fn render(
        &mut self,
        kind: ViewKind,
        criteria: &ViewCriteria,
        limit: Option<usize>,
    ) -> Result<RenderedView, ViewError> {
        let preset = preset(kind);
        let slot = self.slot_mut(kind);
        let projection = slot.dataset.project(&mut slot.cache, criteria)?;
        let visible = match limit {
            Some(limit) => &projection.rows[..projection.rows.len().min(limit)],
            None => &projection.rows[..],
        };
        let rows = slot.dataset.cells(visible, preset.columns)?;
        Ok(RenderedView {
            kind,
            title: preset.title,
            columns: preset.columns.to_vec(),
            rows,
            total: slot.dataset.len(),
            matched: projection.len(),
            summary: projection.summary.clone(),
        })
    }

    fn slot_mut(&mut self, kind: ViewKind) -> &mut Slot {
        self.slots.entry(kind).or_insert_with(|| Slot::new(kind))
    }
}
