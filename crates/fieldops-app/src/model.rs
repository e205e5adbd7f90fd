// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use fieldops_view::{FieldKind, FieldSpec, FieldValue, Record};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::ids::*;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Repair,
    Install,
    Maintenance,
}

impl JobType {
    pub const ALL: [Self; 3] = [Self::Repair, Self::Install, Self::Maintenance];
    pub const LABELS: &'static [&'static str] = &["repair", "install", "maintenance"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Repair => "repair",
            Self::Install => "install",
            Self::Maintenance => "maintenance",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "repair" => Some(Self::Repair),
            "install" => Some(Self::Install),
            "maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }
}

/// Recruitment pipeline position, in funnel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractorStage {
    Lead,
    Contacted,
    Interviewing,
    Onboarding,
    Active,
    Inactive,
}

impl ContractorStage {
    pub const ALL: [Self; 6] = [
        Self::Lead,
        Self::Contacted,
        Self::Interviewing,
        Self::Onboarding,
        Self::Active,
        Self::Inactive,
    ];
    pub const LABELS: &'static [&'static str] = &[
        "lead",
        "contacted",
        "interviewing",
        "onboarding",
        "active",
        "inactive",
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Contacted => "contacted",
            Self::Interviewing => "interviewing",
            Self::Onboarding => "onboarding",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "lead" => Some(Self::Lead),
            "contacted" => Some(Self::Contacted),
            "interviewing" => Some(Self::Interviewing),
            "onboarding" => Some(Self::Onboarding),
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartsOrderStatus {
    Ordered,
    Backordered,
    Shipped,
    Delivered,
    Cancelled,
}

impl PartsOrderStatus {
    pub const ALL: [Self; 5] = [
        Self::Ordered,
        Self::Backordered,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];
    pub const LABELS: &'static [&'static str] =
        &["ordered", "backordered", "shipped", "delivered", "cancelled"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ordered => "ordered",
            Self::Backordered => "backordered",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ordered" => Some(Self::Ordered),
            "backordered" => Some(Self::Backordered),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub const fn is_open(self) -> bool {
        matches!(self, Self::Ordered | Self::Backordered | Self::Shipped)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];
    pub const LABELS: &'static [&'static str] = &["low", "medium", "high"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    New,
    InProgress,
    Completed,
    Dismissed,
}

impl RecommendationStatus {
    pub const ALL: [Self; 4] = [
        Self::New,
        Self::InProgress,
        Self::Completed,
        Self::Dismissed,
    ];
    pub const LABELS: &'static [&'static str] = &["new", "in_progress", "completed", "dismissed"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Dismissed => "dismissed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Self::New),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "dismissed" => Some(Self::Dismissed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    OrderCompleted,
    PartsOrdered,
    PartsDelivered,
    ContractorAdded,
    ContractorStageChanged,
    RecommendationCreated,
    TechnicianFlagged,
}

impl ActivityKind {
    pub const ALL: [Self; 7] = [
        Self::OrderCompleted,
        Self::PartsOrdered,
        Self::PartsDelivered,
        Self::ContractorAdded,
        Self::ContractorStageChanged,
        Self::RecommendationCreated,
        Self::TechnicianFlagged,
    ];
    pub const LABELS: &'static [&'static str] = &[
        "order_completed",
        "parts_ordered",
        "parts_delivered",
        "contractor_added",
        "contractor_stage_changed",
        "recommendation_created",
        "technician_flagged",
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrderCompleted => "order_completed",
            Self::PartsOrdered => "parts_ordered",
            Self::PartsDelivered => "parts_delivered",
            Self::ContractorAdded => "contractor_added",
            Self::ContractorStageChanged => "contractor_stage_changed",
            Self::RecommendationCreated => "recommendation_created",
            Self::TechnicianFlagged => "technician_flagged",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "order_completed" => Some(Self::OrderCompleted),
            "parts_ordered" => Some(Self::PartsOrdered),
            "parts_delivered" => Some(Self::PartsDelivered),
            "contractor_added" => Some(Self::ContractorAdded),
            "contractor_stage_changed" => Some(Self::ContractorStageChanged),
            "recommendation_created" => Some(Self::RecommendationCreated),
            "technician_flagged" => Some(Self::TechnicianFlagged),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [Self; 4] = [Self::Low, Self::Moderate, Self::High, Self::Critical];
    pub const LABELS: &'static [&'static str] = &["low", "moderate", "high", "critical"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "moderate" => Some(Self::Moderate),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Orders,
    Contractors,
    Parts,
    Coaching,
    Activity,
    Retention,
}

impl ViewKind {
    pub const ALL: [Self; 6] = [
        Self::Orders,
        Self::Contractors,
        Self::Parts,
        Self::Coaching,
        Self::Activity,
        Self::Retention,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Contractors => "contractors",
            Self::Parts => "parts",
            Self::Coaching => "coaching",
            Self::Activity => "activity",
            Self::Retention => "retention",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.label() == value)
    }

    /// Path segment of the backend collection behind this view.
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Contractors => "contractors",
            Self::Parts => "parts-orders",
            Self::Coaching => "recommendations",
            Self::Activity => "activities",
            Self::Retention => "retention",
        }
    }

    pub const fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Orders => CompletedOrder::FIELDS,
            Self::Contractors => Contractor::FIELDS,
            Self::Parts => PartsOrder::FIELDS,
            Self::Coaching => Recommendation::FIELDS,
            Self::Activity => ActivityEvent::FIELDS,
            Self::Retention => TechnicianRetention::FIELDS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    RecordDetail,
    NewContractor,
    NewPartsOrder,
    NewRecommendation,
    ConfirmDismiss,
}

impl DialogKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::RecordDetail => "detail",
            Self::NewContractor => "new contractor",
            Self::NewPartsOrder => "new parts order",
            Self::NewRecommendation => "new recommendation",
            Self::ConfirmDismiss => "confirm dismiss",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    /// Row position within the active projection, for dialogs about one record.
    pub row: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedOrder {
    pub id: OrderId,
    pub order_number: String,
    pub customer_name: String,
    pub planning_area: String,
    pub technician_name: String,
    pub appliance: String,
    pub job_type: JobType,
    #[serde(with = "iso_date")]
    pub completed_on: Date,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub parts_cost: Option<f64>,
    #[serde(default)]
    pub customer_rating: Option<i64>,
    /// Days from dispatch to completion; null while the order is still open.
    #[serde(default)]
    pub cycle_time: Option<f64>,
}

impl Record for CompletedOrder {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("orderNumber", FieldKind::Text),
        FieldSpec::required("customerName", FieldKind::Text),
        FieldSpec::required("planningArea", FieldKind::Text),
        FieldSpec::required("technicianName", FieldKind::Text),
        FieldSpec::required("appliance", FieldKind::Text),
        FieldSpec::required("jobType", FieldKind::Enum(JobType::LABELS)),
        FieldSpec::required("completedOn", FieldKind::Date),
        FieldSpec::optional("revenue", FieldKind::Decimal, "unbilled"),
        FieldSpec::optional("partsCost", FieldKind::Decimal, "no parts"),
        FieldSpec::optional("customerRating", FieldKind::Integer, "unrated"),
        FieldSpec::optional("cycleTime", FieldKind::Decimal, "open"),
    ];

    fn value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "orderNumber" => Some(self.order_number.as_str().into()),
            "customerName" => Some(self.customer_name.as_str().into()),
            "planningArea" => Some(self.planning_area.as_str().into()),
            "technicianName" => Some(self.technician_name.as_str().into()),
            "appliance" => Some(self.appliance.as_str().into()),
            "jobType" => Some(FieldValue::Enum(self.job_type.as_str())),
            "completedOn" => Some(self.completed_on.into()),
            "revenue" => Some(self.revenue.into()),
            "partsCost" => Some(self.parts_cost.into()),
            "customerRating" => Some(self.customer_rating.into()),
            "cycleTime" => Some(self.cycle_time.into()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contractor {
    pub id: ContractorId,
    pub company_name: String,
    pub contact_name: String,
    pub region: String,
    pub trade: String,
    pub stage: ContractorStage,
    #[serde(default)]
    pub technician_count: Option<i64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, with = "iso_date::option")]
    pub last_contacted: Option<Date>,
    #[serde(default)]
    pub notes: String,
}

impl Record for Contractor {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("companyName", FieldKind::Text),
        FieldSpec::required("contactName", FieldKind::Text),
        FieldSpec::required("region", FieldKind::Text),
        FieldSpec::required("trade", FieldKind::Text),
        FieldSpec::required("stage", FieldKind::Enum(ContractorStage::LABELS)),
        FieldSpec::optional("technicianCount", FieldKind::Integer, "unknown"),
        FieldSpec::optional("rating", FieldKind::Decimal, "unrated"),
        FieldSpec::optional("lastContacted", FieldKind::Date, "never"),
        FieldSpec::required("notes", FieldKind::Text),
    ];

    fn value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "companyName" => Some(self.company_name.as_str().into()),
            "contactName" => Some(self.contact_name.as_str().into()),
            "region" => Some(self.region.as_str().into()),
            "trade" => Some(self.trade.as_str().into()),
            "stage" => Some(FieldValue::Enum(self.stage.as_str())),
            "technicianCount" => Some(self.technician_count.into()),
            "rating" => Some(self.rating.into()),
            "lastContacted" => Some(self.last_contacted.into()),
            "notes" => Some(self.notes.as_str().into()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartsOrder {
    pub id: PartsOrderId,
    pub order_number: String,
    pub part_number: String,
    pub description: String,
    pub supplier: String,
    pub status: PartsOrderStatus,
    pub quantity: i64,
    pub unit_cost: f64,
    #[serde(with = "iso_date")]
    pub ordered_on: Date,
    #[serde(default, with = "iso_date::option")]
    pub expected_on: Option<Date>,
    #[serde(default, with = "iso_date::option")]
    pub delivered_on: Option<Date>,
}

impl PartsOrder {
    pub fn total_cost(&self) -> f64 {
        self.quantity as f64 * self.unit_cost
    }
}

impl Record for PartsOrder {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("orderNumber", FieldKind::Text),
        FieldSpec::required("partNumber", FieldKind::Text),
        FieldSpec::required("description", FieldKind::Text),
        FieldSpec::required("supplier", FieldKind::Text),
        FieldSpec::required("status", FieldKind::Enum(PartsOrderStatus::LABELS)),
        FieldSpec::required("quantity", FieldKind::Integer),
        FieldSpec::required("unitCost", FieldKind::Decimal),
        FieldSpec::required("totalCost", FieldKind::Decimal),
        FieldSpec::required("orderedOn", FieldKind::Date),
        // An order without an ETA is the least urgent to chase.
        FieldSpec::optional("expectedOn", FieldKind::Date, "unscheduled").nulls_highest(),
        FieldSpec::optional("deliveredOn", FieldKind::Date, "pending").nulls_highest(),
    ];

    fn value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "orderNumber" => Some(self.order_number.as_str().into()),
            "partNumber" => Some(self.part_number.as_str().into()),
            "description" => Some(self.description.as_str().into()),
            "supplier" => Some(self.supplier.as_str().into()),
            "status" => Some(FieldValue::Enum(self.status.as_str())),
            "quantity" => Some(self.quantity.into()),
            "unitCost" => Some(self.unit_cost.into()),
            "totalCost" => Some(self.total_cost().into()),
            "orderedOn" => Some(self.ordered_on.into()),
            "expectedOn" => Some(self.expected_on.into()),
            "deliveredOn" => Some(self.delivered_on.into()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: RecommendationId,
    pub technician_id: TechnicianId,
    pub technician_name: String,
    pub category: String,
    pub title: String,
    pub priority: Priority,
    pub status: RecommendationStatus,
    #[serde(with = "iso_date")]
    pub created_on: Date,
    /// Expected improvement in first-time-fix rate, in percentage points.
    #[serde(default)]
    pub impact_score: Option<f64>,
}

impl Record for Recommendation {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("technicianName", FieldKind::Text),
        FieldSpec::required("category", FieldKind::Text),
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::required("priority", FieldKind::Enum(Priority::LABELS)),
        FieldSpec::required("status", FieldKind::Enum(RecommendationStatus::LABELS)),
        FieldSpec::required("createdOn", FieldKind::Date),
        FieldSpec::optional("impactScore", FieldKind::Decimal, "unscored"),
    ];

    fn value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "technicianName" => Some(self.technician_name.as_str().into()),
            "category" => Some(self.category.as_str().into()),
            "title" => Some(self.title.as_str().into()),
            "priority" => Some(FieldValue::Enum(self.priority.as_str())),
            "status" => Some(FieldValue::Enum(self.status.as_str())),
            "createdOn" => Some(self.created_on.into()),
            "impactScore" => Some(self.impact_score.into()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub id: ActivityId,
    pub kind: ActivityKind,
    pub actor: String,
    pub summary: String,
    #[serde(default)]
    pub planning_area: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
}

impl Record for ActivityEvent {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("kind", FieldKind::Enum(ActivityKind::LABELS)),
        FieldSpec::required("actor", FieldKind::Text),
        FieldSpec::required("summary", FieldKind::Text),
        FieldSpec::optional("planningArea", FieldKind::Text, "global"),
        FieldSpec::required("occurredAt", FieldKind::Timestamp),
    ];

    fn value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "kind" => Some(FieldValue::Enum(self.kind.as_str())),
            "actor" => Some(self.actor.as_str().into()),
            "summary" => Some(self.summary.as_str().into()),
            "planningArea" => Some(self.planning_area.as_deref().into()),
            "occurredAt" => Some(self.occurred_at.into()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianRetention {
    pub technician_id: TechnicianId,
    pub technician_name: String,
    pub planning_area: String,
    pub tenure_months: i64,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub engagement_score: Option<f64>,
    /// Share of completed orders that needed a return visit, in percent.
    #[serde(default)]
    pub callback_rate: Option<f64>,
    #[serde(default, with = "iso_date::option")]
    pub last_review: Option<Date>,
}

impl Record for TechnicianRetention {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("technicianName", FieldKind::Text),
        FieldSpec::required("planningArea", FieldKind::Text),
        FieldSpec::required("tenureMonths", FieldKind::Integer),
        FieldSpec::required("riskLevel", FieldKind::Enum(RiskLevel::LABELS)),
        FieldSpec::optional("engagementScore", FieldKind::Decimal, "unscored"),
        FieldSpec::optional("callbackRate", FieldKind::Decimal, "no data"),
        FieldSpec::optional("lastReview", FieldKind::Date, "never"),
    ];

    fn value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "technicianName" => Some(self.technician_name.as_str().into()),
            "planningArea" => Some(self.planning_area.as_str().into()),
            "tenureMonths" => Some(self.tenure_months.into()),
            "riskLevel" => Some(FieldValue::Enum(self.risk_level.as_str())),
            "engagementScore" => Some(self.engagement_score.into()),
            "callbackRate" => Some(self.callback_rate.into()),
            "lastReview" => Some(self.last_review.into()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use time::macros::{date, datetime};

    #[test]
    fn enum_labels_match_as_str_order() {
        let labels: Vec<&str> = JobType::ALL.iter().map(|value| value.as_str()).collect();
        assert_eq!(labels, JobType::LABELS);
        let labels: Vec<&str> = ContractorStage::ALL.iter().map(|value| value.as_str()).collect();
        assert_eq!(labels, ContractorStage::LABELS);
        let labels: Vec<&str> = PartsOrderStatus::ALL.iter().map(|value| value.as_str()).collect();
        assert_eq!(labels, PartsOrderStatus::LABELS);
        let labels: Vec<&str> = Priority::ALL.iter().map(|value| value.as_str()).collect();
        assert_eq!(labels, Priority::LABELS);
        let labels: Vec<&str> = RecommendationStatus::ALL
            .iter()
            .map(|value| value.as_str())
            .collect();
        assert_eq!(labels, RecommendationStatus::LABELS);
        let labels: Vec<&str> = ActivityKind::ALL.iter().map(|value| value.as_str()).collect();
        assert_eq!(labels, ActivityKind::LABELS);
        let labels: Vec<&str> = RiskLevel::ALL.iter().map(|value| value.as_str()).collect();
        assert_eq!(labels, RiskLevel::LABELS);
    }

    #[test]
    fn enum_parse_round_trips_every_label() {
        for stage in ContractorStage::ALL {
            assert_eq!(ContractorStage::parse(stage.as_str()), Some(stage));
        }
        for kind in ActivityKind::ALL {
            assert_eq!(ActivityKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RecommendationStatus::parse("in progress"), None);
    }

    #[test]
    fn view_kind_parse_is_case_insensitive() {
        assert_eq!(ViewKind::parse(" Parts "), Some(ViewKind::Parts));
        assert_eq!(ViewKind::parse("parts-orders"), None);
        assert_eq!(ViewKind::Parts.collection(), "parts-orders");
    }

    #[test]
    fn completed_order_reads_camel_case_json_with_nulls() -> Result<()> {
        let order: CompletedOrder = serde_json::from_str(
            r#"{
                "id": 7,
                "orderNumber": "WO-1007",
                "customerName": "Brooks",
                "planningArea": "Houston Metro",
                "technicianName": "Morgan Reed",
                "appliance": "Refrigerator",
                "jobType": "repair",
                "completedOn": "2026-03-14",
                "revenue": 200.0,
                "customerRating": null
            }"#,
        )?;
        assert_eq!(order.id, OrderId::new(7));
        assert_eq!(order.completed_on, date!(2026 - 03 - 14));
        assert_eq!(order.customer_rating, None);
        assert_eq!(order.cycle_time, None);
        assert_eq!(order.value("customerRating"), Some(FieldValue::Null));
        assert_eq!(order.value("jobType"), Some(FieldValue::Enum("repair")));
        Ok(())
    }

    #[test]
    fn activity_event_round_trips_rfc3339() -> Result<()> {
        let event = ActivityEvent {
            id: ActivityId::new(1),
            kind: ActivityKind::PartsDelivered,
            actor: "dispatch".to_owned(),
            summary: "Compressor delivered".to_owned(),
            planning_area: None,
            occurred_at: datetime!(2026-05-02 14:30 UTC),
        };
        let json = serde_json::to_string(&event)?;
        assert!(json.contains("\"kind\":\"parts_delivered\""));
        assert!(json.contains("\"occurredAt\":\"2026-05-02T14:30:00Z\""));
        let back: ActivityEvent = serde_json::from_str(&json)?;
        assert_eq!(back, event);
        Ok(())
    }

    #[test]
    fn parts_order_total_cost_is_a_readable_field() {
        let order = PartsOrder {
            id: PartsOrderId::new(3),
            order_number: "WO-1".to_owned(),
            part_number: "DG-220".to_owned(),
            description: "Door gasket".to_owned(),
            supplier: "Coastline".to_owned(),
            status: PartsOrderStatus::Shipped,
            quantity: 3,
            unit_cost: 12.5,
            ordered_on: date!(2026 - 01 - 05),
            expected_on: None,
            delivered_on: None,
        };
        assert_eq!(order.value("totalCost"), Some(FieldValue::Decimal(37.5)));
        assert!(order.status.is_open());
    }

    #[test]
    fn every_declared_field_is_readable_and_well_typed() -> Result<()> {
        let retention = TechnicianRetention {
            technician_id: TechnicianId::new(4),
            technician_name: "Sam Ortiz".to_owned(),
            planning_area: "Austin".to_owned(),
            tenure_months: 18,
            risk_level: RiskLevel::High,
            engagement_score: Some(61.0),
            callback_rate: None,
            last_review: Some(date!(2026 - 02 - 01)),
        };
        for spec in TechnicianRetention::FIELDS {
            fieldops_view::read_value(&retention, spec)?;
        }
        Ok(())
    }
}
