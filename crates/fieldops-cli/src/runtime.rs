// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use fieldops_app::{
    AppCommand, AppEvent, AppState, Dataset, FetchOutcome, RenderedView, ViewKind, ViewStore,
};
use fieldops_client::Client;
use serde_json::Value;

/// Where view records come from, and where mutations go.
pub trait DataSource {
    fn describe(&self) -> String;
    fn fetch(&mut self, kind: ViewKind) -> Result<Dataset>;
    fn submit(&mut self, kind: ViewKind, body: &Value) -> Result<Value>;
}

pub struct ApiSource {
    client: Client,
}

impl ApiSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl DataSource for ApiSource {
    fn describe(&self) -> String {
        format!("api {}", self.client.base_url())
    }

    fn fetch(&mut self, kind: ViewKind) -> Result<Dataset> {
        self.client.fetch_dataset(kind)
    }

    fn submit(&mut self, kind: ViewKind, body: &Value) -> Result<Value> {
        self.client.submit(kind, body)
    }
}

/// Generated records; each fetch advances the seed so `--watch` shows movement.
pub struct DemoSource {
    seed: u64,
    count: usize,
    fetches: u64,
}

impl DemoSource {
    pub fn new(seed: u64, count: usize) -> Self {
        Self {
            seed,
            count,
            fetches: 0,
        }
    }
}

impl DataSource for DemoSource {
    fn describe(&self) -> String {
        format!("demo data (seed {}, {} rows per view)", self.seed, self.count)
    }

    fn fetch(&mut self, kind: ViewKind) -> Result<Dataset> {
        let seed = self.seed.wrapping_add(self.fetches);
        self.fetches += 1;
        Ok(fieldops_testkit::demo_dataset(kind, seed, self.count))
    }

    /// Generated data has no backend; mutations are acknowledged and dropped.
    fn submit(&mut self, kind: ViewKind, _body: &Value) -> Result<Value> {
        tracing::info!(view = kind.label(), "demo mode ignores mutation");
        Ok(Value::Null)
    }
}

pub struct Runtime<S> {
    source: S,
    store: ViewStore,
    state: AppState,
}

impl<S: DataSource> Runtime<S> {
    pub fn new(source: S, view: ViewKind) -> Self {
        Self {
            source,
            store: ViewStore::new(),
            state: AppState::with_view(view),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Dispatches a command and services any refetch it asks for.
    pub fn apply(&mut self, command: AppCommand) -> Result<Vec<AppEvent>> {
        let events = self.state.dispatch(command)?;
        for event in &events {
            match event {
                AppEvent::RefetchRequested(kind) => {
                    self.refresh(*kind)?;
                }
                other => tracing::debug!(event = ?other, "app event"),
            }
        }
        Ok(events)
    }

    pub fn refresh(&mut self, kind: ViewKind) -> Result<FetchOutcome> {
        let ticket = self.store.begin_fetch(kind);
        let dataset = self
            .source
            .fetch(kind)
            .with_context(|| format!("load {} view", kind.label()))?;
        let outcome = self.store.apply_fetch(ticket, dataset)?;
        if let FetchOutcome::Applied { records, .. } = outcome {
            tracing::info!(view = kind.label(), records, "view refreshed");
        }
        Ok(outcome)
    }

    /// Posts a mutation. Only an accepted one reports success and refetches;
    /// a rejected one leaves the state untouched.
    pub fn submit(&mut self, kind: ViewKind, body: &Value) -> Result<Vec<AppEvent>> {
        let response = self
            .source
            .submit(kind, body)
            .with_context(|| format!("save {} record", kind.label()))?;
        tracing::debug!(view = kind.label(), %response, "mutation accepted");
        self.apply(AppCommand::MutationSucceeded(kind))
    }

    /// Renders the active view, fetching it first if it was never loaded.
    pub fn render(&mut self, limit: Option<usize>) -> Result<RenderedView> {
        let kind = self.state.active_view;
        if !self.store.is_loaded(kind) {
            self.refresh(kind)?;
        }
        let view = self.store.render(kind, self.state.criteria(kind), limit)?;
        Ok(view)
    }
}

pub fn format_view(view: &RenderedView) -> String {
    let mut out = format!(
        "{} ({} of {} records)\n",
        view.title, view.matched, view.total
    );

    if view.rows.is_empty() {
        out.push_str("(no rows)\n");
    } else {
        let mut widths: Vec<usize> = view
            .columns
            .iter()
            .map(|column| column.chars().count())
            .collect();
        for row in &view.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        push_row(&mut out, &view.columns, &widths);
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        push_row(&mut out, &rule, &widths);
        for row in &view.rows {
            push_row(&mut out, row, &widths);
        }
        if view.matched > view.rows.len() {
            out.push_str(&format!("(+{} more rows)\n", view.matched - view.rows.len()));
        }
    }

    out.push_str(&view.summary.render());
    out.push('\n');
    out
}

fn push_row<T: AsRef<str>>(out: &mut String, cells: &[T], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}
