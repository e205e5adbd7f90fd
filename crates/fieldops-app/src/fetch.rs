// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use crate::model::ViewKind;

/// Proof that a fetch was started. Only the newest ticket per view may
/// deliver records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub kind: ViewKind,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct FetchTracker {
    next_generation: u64,
    newest: BTreeMap<ViewKind, u64>,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fetch for `kind`, superseding any still in flight.
    pub fn begin(&mut self, kind: ViewKind) -> FetchTicket {
        self.next_generation += 1;
        self.newest.insert(kind, self.next_generation);
        FetchTicket {
            kind,
            generation: self.next_generation,
        }
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.newest.get(&ticket.kind) == Some(&ticket.generation)
    }

    pub fn newest(&self, kind: ViewKind) -> Option<u64> {
        self.newest.get(&kind).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { kind: ViewKind, records: usize },
    /// A newer fetch for the same view started; the records were dropped.
    Superseded { kind: ViewKind, newest: u64 },
}
