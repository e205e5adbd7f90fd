// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use fieldops_view::{
    Collection, FieldSpec, MetricSpec, Projection, Record, SortDirection, SortKey, Summary,
    ViewCache, ViewCriteria, ViewError, field_spec, read_value,
};

use crate::model::{
    ActivityEvent, CompletedOrder, Contractor, PartsOrder, Recommendation, TechnicianRetention,
    ViewKind,
};

/// Static description of one dashboard screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPreset {
    pub kind: ViewKind,
    pub title: &'static str,
    pub columns: &'static [&'static str],
    pub searchable: &'static [&'static str],
    pub default_sort: Option<(&'static str, SortDirection)>,
    pub metrics: &'static [MetricSpec],
}

impl ViewPreset {
    pub fn default_sort_key(&self) -> Option<SortKey> {
        self.default_sort.map(|(field, direction)| SortKey {
            field: field.to_owned(),
            direction,
        })
    }

    pub fn default_criteria(&self) -> ViewCriteria {
        ViewCriteria {
            sort: self.default_sort_key(),
            ..ViewCriteria::default()
        }
    }

    pub fn cache(&self) -> ViewCache {
        ViewCache::new(self.searchable, self.metrics)
    }
}

static ORDERS: ViewPreset = ViewPreset {
    kind: ViewKind::Orders,
    title: "Completed Orders",
    columns: &[
        "orderNumber",
        "completedOn",
        "customerName",
        "planningArea",
        "technicianName",
        "appliance",
        "revenue",
        "customerRating",
        "cycleTime",
    ],
    searchable: &[
        "customerName",
        "planningArea",
        "technicianName",
        "appliance",
    ],
    default_sort: Some(("completedOn", SortDirection::Desc)),
    metrics: &[
        MetricSpec::count("orders"),
        MetricSpec::sum("revenue", "revenue"),
        MetricSpec::mean("avgCustomerRating", "customerRating"),
        MetricSpec::mean("avgCycleTime", "cycleTime"),
        MetricSpec::coverage("rated", "customerRating"),
    ],
};

static CONTRACTORS: ViewPreset = ViewPreset {
    kind: ViewKind::Contractors,
    title: "Contractor Recruitment",
    columns: &[
        "companyName",
        "contactName",
        "region",
        "trade",
        "stage",
        "technicianCount",
        "rating",
        "lastContacted",
    ],
    searchable: &["companyName", "contactName", "region", "trade", "notes"],
    default_sort: Some(("stage", SortDirection::Asc)),
    metrics: &[
        MetricSpec::count("contractors"),
        MetricSpec::sum("technicians", "technicianCount"),
        MetricSpec::mean("avgRating", "rating"),
        MetricSpec::coverage("contacted", "lastContacted"),
    ],
};

static PARTS: ViewPreset = ViewPreset {
    kind: ViewKind::Parts,
    title: "Parts Orders",
    columns: &[
        "orderNumber",
        "partNumber",
        "description",
        "supplier",
        "status",
        "quantity",
        "totalCost",
        "orderedOn",
        "expectedOn",
    ],
    searchable: &["orderNumber", "partNumber", "description", "supplier"],
    default_sort: Some(("expectedOn", SortDirection::Asc)),
    metrics: &[
        MetricSpec::count("partsOrders"),
        MetricSpec::sum("spend", "totalCost"),
        MetricSpec::coverage("scheduled", "expectedOn"),
        MetricSpec::coverage("delivered", "deliveredOn"),
    ],
};

static COACHING: ViewPreset = ViewPreset {
    kind: ViewKind::Coaching,
    title: "Personalized Coaching",
    columns: &[
        "technicianName",
        "category",
        "title",
        "priority",
        "status",
        "createdOn",
        "impactScore",
    ],
    searchable: &["technicianName", "category", "title"],
    default_sort: Some(("priority", SortDirection::Desc)),
    metrics: &[
        MetricSpec::count("recommendations"),
        MetricSpec::mean("avgImpact", "impactScore"),
        MetricSpec::coverage("scored", "impactScore"),
    ],
};

static ACTIVITY: ViewPreset = ViewPreset {
    kind: ViewKind::Activity,
    title: "Live Activity",
    columns: &["occurredAt", "kind", "actor", "planningArea", "summary"],
    searchable: &["actor", "summary", "planningArea"],
    default_sort: Some(("occurredAt", SortDirection::Desc)),
    metrics: &[
        MetricSpec::count("events"),
        MetricSpec::coverage("regional", "planningArea"),
    ],
};

static RETENTION: ViewPreset = ViewPreset {
    kind: ViewKind::Retention,
    title: "Technician Retention",
    columns: &[
        "technicianName",
        "planningArea",
        "tenureMonths",
        "riskLevel",
        "engagementScore",
        "callbackRate",
        "lastReview",
    ],
    searchable: &["technicianName", "planningArea"],
    default_sort: Some(("riskLevel", SortDirection::Desc)),
    metrics: &[
        MetricSpec::count("technicians"),
        MetricSpec::mean("avgTenure", "tenureMonths"),
        MetricSpec::mean("avgEngagement", "engagementScore"),
        MetricSpec::mean("avgCallbackRate", "callbackRate"),
    ],
};

pub fn preset(kind: ViewKind) -> &'static ViewPreset {
    match kind {
        ViewKind::Orders => &ORDERS,
        ViewKind::Contractors => &CONTRACTORS,
        ViewKind::Parts => &PARTS,
        ViewKind::Coaching => &COACHING,
        ViewKind::Activity => &ACTIVITY,
        ViewKind::Retention => &RETENTION,
    }
}

/// The most recent fetch for one view, whichever record kind it holds.
#[derive(Debug, Clone)]
pub enum Dataset {
    Orders(Collection<CompletedOrder>),
    Contractors(Collection<Contractor>),
    Parts(Collection<PartsOrder>),
    Coaching(Collection<Recommendation>),
    Activity(Collection<ActivityEvent>),
    Retention(Collection<TechnicianRetention>),
}

macro_rules! dataset_from {
    ($record:ty, $variant:ident) => {
        impl From<Vec<$record>> for Dataset {
            fn from(records: Vec<$record>) -> Self {
                Self::$variant(Collection::new(records))
            }
        }
    };
}

dataset_from!(CompletedOrder, Orders);
dataset_from!(Contractor, Contractors);
dataset_from!(PartsOrder, Parts);
dataset_from!(Recommendation, Coaching);
dataset_from!(ActivityEvent, Activity);
dataset_from!(TechnicianRetention, Retention);

impl Dataset {
    pub fn empty(kind: ViewKind) -> Self {
        match kind {
            ViewKind::Orders => Self::Orders(Collection::default()),
            ViewKind::Contractors => Self::Contractors(Collection::default()),
            ViewKind::Parts => Self::Parts(Collection::default()),
            ViewKind::Coaching => Self::Coaching(Collection::default()),
            ViewKind::Activity => Self::Activity(Collection::default()),
            ViewKind::Retention => Self::Retention(Collection::default()),
        }
    }

    pub const fn kind(&self) -> ViewKind {
        match self {
            Self::Orders(_) => ViewKind::Orders,
            Self::Contractors(_) => ViewKind::Contractors,
            Self::Parts(_) => ViewKind::Parts,
            Self::Coaching(_) => ViewKind::Coaching,
            Self::Activity(_) => ViewKind::Activity,
            Self::Retention(_) => ViewKind::Retention,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Orders(collection) => collection.len(),
            Self::Contractors(collection) => collection.len(),
            Self::Parts(collection) => collection.len(),
            Self::Coaching(collection) => collection.len(),
            Self::Activity(collection) => collection.len(),
            Self::Retention(collection) => collection.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn revision(&self) -> u64 {
        match self {
            Self::Orders(collection) => collection.revision(),
            Self::Contractors(collection) => collection.revision(),
            Self::Parts(collection) => collection.revision(),
            Self::Coaching(collection) => collection.revision(),
            Self::Activity(collection) => collection.revision(),
            Self::Retention(collection) => collection.revision(),
        }
    }

    pub fn project<'c>(
        &self,
        cache: &'c mut ViewCache,
        criteria: &ViewCriteria,
    ) -> Result<&'c Projection, ViewError> {
        match self {
            Self::Orders(collection) => cache.refresh(collection, criteria),
            Self::Contractors(collection) => cache.refresh(collection, criteria),
            Self::Parts(collection) => cache.refresh(collection, criteria),
            Self::Coaching(collection) => cache.refresh(collection, criteria),
            Self::Activity(collection) => cache.refresh(collection, criteria),
            Self::Retention(collection) => cache.refresh(collection, criteria),
        }
    }

    /// Table cells for the given rows, one string per column.
    pub fn cells(&self, rows: &[usize], columns: &[&str]) -> Result<Vec<Vec<String>>, ViewError> {
        match self {
            Self::Orders(collection) => table_cells(collection.records(), rows, columns),
            Self::Contractors(collection) => table_cells(collection.records(), rows, columns),
            Self::Parts(collection) => table_cells(collection.records(), rows, columns),
            Self::Coaching(collection) => table_cells(collection.records(), rows, columns),
            Self::Activity(collection) => table_cells(collection.records(), rows, columns),
            Self::Retention(collection) => table_cells(collection.records(), rows, columns),
        }
    }
}

fn table_cells<R: Record>(
    records: &[R],
    rows: &[usize],
    columns: &[&str],
) -> Result<Vec<Vec<String>>, ViewError> {
    let specs = columns
        .iter()
        .map(|name| field_spec::<R>(name))
        .collect::<Result<Vec<&FieldSpec>, ViewError>>()?;

    let mut table = Vec::with_capacity(rows.len());
    for record in rows.iter().filter_map(|index| records.get(*index)) {
        let mut cells = Vec::with_capacity(specs.len());
        for spec in &specs {
            let value = read_value(record, spec)?;
            cells.push(match spec.null_bucket() {
                Some(bucket) if value.is_null() => bucket.to_owned(),
                _ => value.display(),
            });
        }
        table.push(cells);
    }
    Ok(table)
}

/// One screenful: the visible rows plus the summary of every matched row.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub kind: ViewKind,
    pub title: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    /// Records in the collection before filtering.
    pub total: usize,
    /// Records that passed the filters; may exceed `rows.len()` under a limit.
    pub matched: usize,
    pub summary: Summary,
}

#[cfg(test)]
mod tests {
    use super::{Dataset, preset};
    use crate::ids::ContractorId;
    use crate::model::{Contractor, ContractorStage, ViewKind};
    use anyhow::Result;
    use fieldops_view::lookup_field;

    #[test]
    fn every_preset_names_declared_fields() -> Result<()> {
        for kind in ViewKind::ALL {
            let preset = preset(kind);
            assert_eq!(preset.kind, kind);
            let fields = kind.fields();
            for name in preset.columns.iter().chain(preset.searchable) {
                lookup_field(fields, name)?;
            }
            if let Some((field, _)) = preset.default_sort {
                lookup_field(fields, field)?;
            }
            for metric in preset.metrics {
                if let Some(field) = metric.metric.field() {
                    lookup_field(fields, field)?;
                }
            }
        }
        Ok(())
    }

    #[test]
    fn empty_datasets_project_to_zero_summaries() -> Result<()> {
        for kind in ViewKind::ALL {
            let dataset = Dataset::empty(kind);
            assert_eq!(dataset.kind(), kind);
            let preset = preset(kind);
            let mut cache = preset.cache();
            let projection = dataset.project(&mut cache, &preset.default_criteria())?;
            assert!(projection.is_empty());
            for entry in projection.summary.entries() {
                assert_eq!(entry.stat.sample_size, 0, "{kind:?} {}", entry.spec.label);
            }
        }
        Ok(())
    }

    #[test]
    fn null_cells_show_their_bucket_label() -> Result<()> {
        let contractor = Contractor {
            id: ContractorId::new(1),
            company_name: "Gulf Coast Appliance".to_owned(),
            contact_name: "Rae Kim".to_owned(),
            region: "Houston".to_owned(),
            trade: "refrigeration".to_owned(),
            stage: ContractorStage::Interviewing,
            technician_count: Some(6),
            rating: None,
            last_contacted: None,
            notes: String::new(),
        };
        let dataset = Dataset::from(vec![contractor]);
        let cells = dataset.cells(&[0], &["companyName", "stage", "rating", "technicianCount"])?;
        assert_eq!(
            cells,
            vec![vec![
                "Gulf Coast Appliance".to_owned(),
                "interviewing".to_owned(),
                "unrated".to_owned(),
                "6".to_owned(),
            ]]
        );
        Ok(())
    }
}
