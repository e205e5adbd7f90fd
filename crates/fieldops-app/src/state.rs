// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use fieldops_view::{Rule, SortDirection, SortKey, ViewCriteria, ViewError, lookup_field};

use crate::model::{Dialog, DialogKind, ViewKind};
use crate::views::preset;

/// Everything the dashboard remembers between commands: which view is
/// showing, the criteria picked on each view, and any open dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub active_view: ViewKind,
    criteria: [ViewCriteria; ViewKind::ALL.len()],
    pub dialog: Option<Dialog>,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_view(ViewKind::Orders)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    NextView,
    PrevView,
    SelectView(ViewKind),
    /// Raw filter text as typed, parsed against the active view's schema.
    SetFilter { field: String, raw: String },
    ClearFilter(String),
    SetSearch(String),
    SetSort(SortKey),
    /// Ascending, then descending, then unsorted.
    CycleSort(String),
    ResetCriteria,
    OpenDialog(Dialog),
    CloseDialog,
    MutationSucceeded(ViewKind),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ViewChanged(ViewKind),
    CriteriaChanged(ViewKind),
    DialogOpened(DialogKind),
    DialogClosed,
    RefetchRequested(ViewKind),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn with_view(active_view: ViewKind) -> Self {
        Self {
            active_view,
            criteria: ViewKind::ALL.map(|kind| preset(kind).default_criteria()),
            dialog: None,
            status_line: None,
        }
    }

    pub fn criteria(&self, kind: ViewKind) -> &ViewCriteria {
        &self.criteria[view_index(kind)]
    }

    pub fn active_criteria(&self) -> &ViewCriteria {
        self.criteria(self.active_view)
    }

    /// Applies one command. Criteria that contradict the active view's
    /// schema are rejected and leave the state untouched.
    pub fn dispatch(&mut self, command: AppCommand) -> Result<Vec<AppEvent>, ViewError> {
        tracing::debug!(view = self.active_view.label(), ?command, "dispatch");
        let events = match command {
            AppCommand::NextView => self.rotate_view(1),
            AppCommand::PrevView => self.rotate_view(-1),
            AppCommand::SelectView(kind) => self.select_view(kind),
            AppCommand::SetFilter { field, raw } => {
                let spec = lookup_field(self.active_view.fields(), &field)?;
                let rule = Rule::parse(spec, &raw)?;
                let message = if rule.is_active() {
                    format!("{field} = {}", rule.describe())
                } else {
                    format!("{field} cleared")
                };
                self.active_criteria_mut().predicates.set(field, rule);
                self.criteria_changed(&message)
            }
            AppCommand::ClearFilter(field) => {
                if !self.active_criteria_mut().predicates.clear(&field) {
                    return Ok(Vec::new());
                }
                self.criteria_changed(&format!("{field} cleared"))
            }
            AppCommand::SetSearch(query) => {
                let query = query.trim().to_owned();
                if self.active_criteria().query == query {
                    return Ok(Vec::new());
                }
                let message = if query.is_empty() {
                    "search cleared".to_owned()
                } else {
                    format!("search {query:?}")
                };
                self.active_criteria_mut().query = query;
                self.criteria_changed(&message)
            }
            AppCommand::SetSort(key) => {
                lookup_field(self.active_view.fields(), &key.field)?;
                let message = format!("sort {} {}", key.field, key.direction.as_str());
                self.active_criteria_mut().sort = Some(key);
                self.criteria_changed(&message)
            }
            AppCommand::CycleSort(field) => {
                lookup_field(self.active_view.fields(), &field)?;
                let next = match &self.active_criteria().sort {
                    Some(key) if key.field == field && key.direction == SortDirection::Asc => {
                        Some(SortKey::desc(field))
                    }
                    Some(key) if key.field == field => None,
                    _ => Some(SortKey::asc(field)),
                };
                let message = match &next {
                    Some(key) => format!("sort {} {}", key.field, key.direction.as_str()),
                    None => "sort cleared".to_owned(),
                };
                self.active_criteria_mut().sort = next;
                self.criteria_changed(&message)
            }
            AppCommand::ResetCriteria => {
                let defaults = preset(self.active_view).default_criteria();
                if *self.active_criteria() == defaults {
                    return Ok(Vec::new());
                }
                *self.active_criteria_mut() = defaults;
                self.criteria_changed("criteria reset")
            }
            AppCommand::OpenDialog(dialog) => {
                self.dialog = Some(dialog);
                vec![
                    AppEvent::DialogOpened(dialog.kind),
                    self.set_status(dialog.kind.label()),
                ]
            }
            AppCommand::CloseDialog => self.close_dialog(),
            AppCommand::MutationSucceeded(kind) => {
                let mut events = self.close_dialog();
                events.push(AppEvent::RefetchRequested(kind));
                events.push(self.set_status(&format!("{} updated", kind.label())));
                events
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        };
        Ok(events)
    }

    fn rotate_view(&mut self, delta: isize) -> Vec<AppEvent> {
        let views = ViewKind::ALL;
        let current = view_index(self.active_view) as isize;
        let len = views.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.select_view(views[next])
    }

    fn select_view(&mut self, kind: ViewKind) -> Vec<AppEvent> {
        if kind == self.active_view {
            return Vec::new();
        }
        let mut events = self.close_dialog();
        self.active_view = kind;
        events.push(AppEvent::ViewChanged(kind));
        events
    }

    fn close_dialog(&mut self) -> Vec<AppEvent> {
        match self.dialog.take() {
            Some(_) => vec![AppEvent::DialogClosed],
            None => Vec::new(),
        }
    }

    fn active_criteria_mut(&mut self) -> &mut ViewCriteria {
        &mut self.criteria[view_index(self.active_view)]
    }

    fn criteria_changed(&mut self, message: &str) -> Vec<AppEvent> {
        vec![
            AppEvent::CriteriaChanged(self.active_view),
            self.set_status(message),
        ]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

const fn view_index(kind: ViewKind) -> usize {
    match kind {
        ViewKind::Orders => 0,
        ViewKind::Contractors => 1,
        ViewKind::Parts => 2,
        ViewKind::Coaching => 3,
        ViewKind::Activity => 4,
        ViewKind::Retention => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState};
    use crate::model::{Dialog, DialogKind, ViewKind};
    use anyhow::Result;
    use fieldops_view::{Rule, SortKey, ViewError};

    fn set_filter(field: &str, raw: &str) -> AppCommand {
        AppCommand::SetFilter {
            field: field.to_owned(),
            raw: raw.to_owned(),
        }
    }

    #[test]
    fn view_rotation_wraps() -> Result<()> {
        let mut state = AppState::with_view(ViewKind::Retention);

        let events = state.dispatch(AppCommand::NextView)?;
        assert_eq!(state.active_view, ViewKind::Orders);
        assert_eq!(events, vec![AppEvent::ViewChanged(ViewKind::Orders)]);

        state.dispatch(AppCommand::PrevView)?;
        assert_eq!(state.active_view, ViewKind::Retention);
        Ok(())
    }

    #[test]
    fn criteria_start_at_preset_defaults() {
        let state = AppState::default();
        assert_eq!(
            state.criteria(ViewKind::Orders).sort,
            Some(SortKey::desc("completedOn"))
        );
        assert!(state.criteria(ViewKind::Parts).predicates.is_empty());
    }

    #[test]
    fn filter_is_parsed_against_active_view() -> Result<()> {
        let mut state = AppState::default();

        let events = state.dispatch(set_filter("customerRating", "unrated"))?;
        assert_eq!(
            state.active_criteria().predicates.get("customerRating"),
            Some(&Rule::IsNull)
        );
        assert_eq!(
            events,
            vec![
                AppEvent::CriteriaChanged(ViewKind::Orders),
                AppEvent::StatusUpdated("customerRating = none".to_owned()),
            ],
        );

        state.dispatch(set_filter("customerRating", "all"))?;
        assert!(state.active_criteria().predicates.is_empty());
        Ok(())
    }

    #[test]
    fn invalid_filter_leaves_state_untouched() {
        let mut state = AppState::default();
        let before = state.clone();

        let error = state
            .dispatch(set_filter("stage", "lead"))
            .expect_err("orders have no stage field");
        assert!(matches!(error, ViewError::UnknownField { .. }));

        let error = state
            .dispatch(set_filter("jobType", "overhaul"))
            .expect_err("undeclared enum label");
        assert!(matches!(error, ViewError::InvalidPredicate { .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn criteria_are_kept_per_view() -> Result<()> {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetSearch("Houston".to_owned()))?;
        state.dispatch(AppCommand::SelectView(ViewKind::Parts))?;
        assert_eq!(state.active_criteria().query, "");

        state.dispatch(AppCommand::SelectView(ViewKind::Orders))?;
        assert_eq!(state.active_criteria().query, "Houston");
        Ok(())
    }

    #[test]
    fn cycle_sort_goes_asc_desc_then_off() -> Result<()> {
        let mut state = AppState::with_view(ViewKind::Parts);

        state.dispatch(AppCommand::CycleSort("totalCost".to_owned()))?;
        assert_eq!(state.active_criteria().sort, Some(SortKey::asc("totalCost")));
        state.dispatch(AppCommand::CycleSort("totalCost".to_owned()))?;
        assert_eq!(state.active_criteria().sort, Some(SortKey::desc("totalCost")));
        let events = state.dispatch(AppCommand::CycleSort("totalCost".to_owned()))?;
        assert_eq!(state.active_criteria().sort, None);
        assert_eq!(
            events,
            vec![
                AppEvent::CriteriaChanged(ViewKind::Parts),
                AppEvent::StatusUpdated("sort cleared".to_owned()),
            ],
        );
        Ok(())
    }

    #[test]
    fn reset_restores_defaults_once() -> Result<()> {
        let mut state = AppState::default();
        state.dispatch(set_filter("revenue", ">=100"))?;
        state.dispatch(AppCommand::SetSort(SortKey::asc("revenue")))?;

        let events = state.dispatch(AppCommand::ResetCriteria)?;
        assert_eq!(events.len(), 2);
        assert_eq!(
            state.active_criteria().sort,
            Some(SortKey::desc("completedOn"))
        );
        assert!(state.dispatch(AppCommand::ResetCriteria)?.is_empty());
        Ok(())
    }

    #[test]
    fn mutation_closes_dialog_and_requests_refetch() -> Result<()> {
        let mut state = AppState::with_view(ViewKind::Contractors);
        state.dispatch(AppCommand::OpenDialog(Dialog {
            kind: DialogKind::NewContractor,
            row: None,
        }))?;
        assert_eq!(state.status_line.as_deref(), Some("new contractor"));

        let events = state.dispatch(AppCommand::MutationSucceeded(ViewKind::Contractors))?;
        assert_eq!(state.dialog, None);
        assert_eq!(
            events,
            vec![
                AppEvent::DialogClosed,
                AppEvent::RefetchRequested(ViewKind::Contractors),
                AppEvent::StatusUpdated("contractors updated".to_owned()),
            ],
        );
        Ok(())
    }

    #[test]
    fn switching_view_closes_dialog() -> Result<()> {
        let mut state = AppState::default();
        state.dispatch(AppCommand::OpenDialog(Dialog {
            kind: DialogKind::RecordDetail,
            row: Some(0),
        }))?;

        let events = state.dispatch(AppCommand::SelectView(ViewKind::Activity))?;
        assert_eq!(
            events,
            vec![
                AppEvent::DialogClosed,
                AppEvent::ViewChanged(ViewKind::Activity),
            ],
        );
        assert!(state.dispatch(AppCommand::CloseDialog)?.is_empty());
        Ok(())
    }

    #[test]
    fn clear_status() -> Result<()> {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetSearch("gasket".to_owned()))?;
        assert!(state.status_line.is_some());

        let events = state.dispatch(AppCommand::ClearStatus)?;
        assert_eq!(state.status_line, None);
        assert_eq!(events, vec![AppEvent::StatusCleared]);
        Ok(())
    }
}
