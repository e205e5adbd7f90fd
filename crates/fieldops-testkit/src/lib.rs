// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Seeded demo records for every dashboard view.
//!
//! The same seed always yields the same records, so tests and `--demo`
//! screenshots stay stable.

use fieldops_app::{
    ActivityEvent, ActivityId, ActivityKind, CompletedOrder, Contractor, ContractorId,
    ContractorStage, Dataset, JobType, OrderId, PartsOrder, PartsOrderId, PartsOrderStatus,
    Priority, Recommendation, RecommendationId, RecommendationStatus, RiskLevel, TechnicianId,
    TechnicianRetention, ViewKind,
};
use time::macros::{date, datetime};
use time::{Date, Duration, OffsetDateTime};

const REFERENCE_DATE: Date = date!(2026 - 01 - 01);
const REFERENCE_TIME: OffsetDateTime = datetime!(2026-01-01 0:00 UTC);

const PLANNING_AREAS: [&str; 8] = [
    "Houston Metro",
    "Dallas North",
    "Dallas South",
    "Austin",
    "San Antonio",
    "Fort Worth",
    "El Paso",
    "Gulf Coast",
];

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];

const APPLIANCES: [&str; 12] = [
    "Refrigerator",
    "Washer",
    "Dryer",
    "Dishwasher",
    "Oven / Range",
    "Cooktop",
    "Microwave",
    "Freezer",
    "Ice Maker",
    "Wine Cooler",
    "Garbage Disposal",
    "Range Hood",
];

const TRADES: [&str; 6] = [
    "refrigeration",
    "laundry",
    "cooking",
    "dishwashers",
    "HVAC",
    "general appliance",
];
const COMPANY_ADJECTIVES: [&str; 10] = [
    "Premier", "Lone Star", "Reliable", "Bluebonnet", "Summit", "Gulf Coast", "Heritage",
    "Pecan", "Frontier", "Apex",
];
const COMPANY_SUFFIXES: [&str; 5] = ["Appliance", "Repair", "Service Co", "Pros", "Group"];

const PARTS: [(&str, &str, f64); 10] = [
    ("DG-220", "Door gasket", 38.5),
    ("CMP-114", "Compressor", 412.0),
    ("EVF-310", "Evaporator fan motor", 64.25),
    ("DPV-09", "Drain pump", 89.0),
    ("IGN-45", "Oven igniter", 47.75),
    ("CTL-700", "Control board", 236.4),
    ("WIV-12", "Water inlet valve", 29.99),
    ("BLT-88", "Drive belt", 18.5),
    ("THR-05", "Thermostat", 54.0),
    ("HTR-61", "Heating element", 72.8),
];
const SUPPLIERS: [&str; 5] = [
    "Coastline Parts",
    "Marcone",
    "Reliable Parts",
    "Encompass",
    "Direct OEM",
];

const COACHING_TOPICS: [(&str, &str); 8] = [
    ("first-time fix", "Stock common door gaskets on the truck"),
    ("first-time fix", "Run the sealed-system checklist before leaving"),
    ("diagnostics", "Pair with a senior tech on control board faults"),
    ("diagnostics", "Complete the inverter compressor module"),
    ("customer experience", "Call ahead when running more than 15 minutes late"),
    ("customer experience", "Walk the customer through the repair before closing"),
    ("efficiency", "Pre-order parts from the triage notes"),
    ("efficiency", "Batch stops within the same planning area"),
];

const ACTORS: [&str; 4] = ["dispatch", "parts desk", "recruiting", "coaching engine"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    /// True roughly once every `n` calls.
    fn one_in(&mut self, n: usize) -> bool {
        self.int_n(n) == 0
    }
}

#[derive(Debug, Clone)]
pub struct FieldOpsFaker {
    rng: DeterministicRng,
    seed: u64,
    next_id: i64,
}

impl FieldOpsFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
            next_id: 1,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn completed_order(&mut self) -> CompletedOrder {
        let id = self.take_id();
        let job_type = self.pick_copy(&JobType::ALL);
        let base = match job_type {
            JobType::Repair => 180.0,
            JobType::Install => 320.0,
            JobType::Maintenance => 95.0,
        };
        let unbilled = self.rng.one_in(8);
        let open = self.rng.one_in(6);
        CompletedOrder {
            id: OrderId::new(id),
            order_number: format!("WO-{}", 10_000 + id),
            customer_name: self.person_name(),
            planning_area: self.pick(&PLANNING_AREAS).to_owned(),
            technician_name: self.person_name(),
            appliance: self.pick(&APPLIANCES).to_owned(),
            job_type,
            completed_on: self.date_within_days(120),
            revenue: (!unbilled).then(|| cents(base + self.float_range(0.0, 450.0))),
            parts_cost: (!self.rng.one_in(3)).then(|| cents(self.float_range(15.0, 420.0))),
            customer_rating: (!self.rng.one_in(4)).then(|| self.int_range(1, 5)),
            cycle_time: (!open).then(|| cents(self.float_range(0.5, 9.0))),
        }
    }

    pub fn contractor(&mut self) -> Contractor {
        let id = self.take_id();
        let stage = self.pick_copy(&ContractorStage::ALL);
        let contacted = !matches!(stage, ContractorStage::Lead) || !self.rng.one_in(2);
        Contractor {
            id: ContractorId::new(id),
            company_name: format!(
                "{} {}",
                self.pick(&COMPANY_ADJECTIVES),
                self.pick(&COMPANY_SUFFIXES)
            ),
            contact_name: self.person_name(),
            region: self.pick(&PLANNING_AREAS).to_owned(),
            trade: self.pick(&TRADES).to_owned(),
            stage,
            technician_count: (!self.rng.one_in(4)).then(|| self.int_range(1, 24)),
            rating: (!self.rng.one_in(3)).then(|| (self.int_range(20, 50) as f64) / 10.0),
            last_contacted: contacted.then(|| self.date_within_days(60)),
            notes: if self.rng.one_in(2) {
                String::new()
            } else {
                format!("Covers {}", self.pick(&PLANNING_AREAS))
            },
        }
    }

    pub fn parts_order(&mut self) -> PartsOrder {
        let id = self.take_id();
        let (part_number, description, unit_cost) = PARTS[self.rng.int_n(PARTS.len())];
        let status = self.pick_copy(&PartsOrderStatus::ALL);
        let ordered_on = self.date_within_days(45);
        let expected_on = match status {
            PartsOrderStatus::Backordered if self.rng.one_in(2) => None,
            PartsOrderStatus::Cancelled => None,
            _ => Some(ordered_on.saturating_add(Duration::days(self.int_range(2, 14)))),
        };
        let delivered_on = match (status, expected_on) {
            (PartsOrderStatus::Delivered, Some(expected)) => {
                Some(expected.saturating_add(Duration::days(self.int_range(-1, 3))))
            }
            _ => None,
        };
        PartsOrder {
            id: PartsOrderId::new(id),
            order_number: format!("WO-{}", 10_000 + self.int_range(1, 500)),
            part_number: part_number.to_owned(),
            description: description.to_owned(),
            supplier: self.pick(&SUPPLIERS).to_owned(),
            status,
            quantity: self.int_range(1, 4),
            unit_cost,
            ordered_on,
            expected_on,
            delivered_on,
        }
    }

    pub fn recommendation(&mut self) -> Recommendation {
        let id = self.take_id();
        let (category, title) = COACHING_TOPICS[self.rng.int_n(COACHING_TOPICS.len())];
        Recommendation {
            id: RecommendationId::new(id),
            technician_id: TechnicianId::new(self.int_range(1, 40)),
            technician_name: self.person_name(),
            category: category.to_owned(),
            title: title.to_owned(),
            priority: self.pick_copy(&Priority::ALL),
            status: self.pick_copy(&RecommendationStatus::ALL),
            created_on: self.date_within_days(90),
            impact_score: (!self.rng.one_in(4)).then(|| cents(self.float_range(0.5, 12.0))),
        }
    }

    pub fn activity_event(&mut self) -> ActivityEvent {
        let id = self.take_id();
        let kind = self.pick_copy(&ActivityKind::ALL);
        let subject = self.person_name();
        let summary = match kind {
            ActivityKind::OrderCompleted => {
                format!("{subject} closed a {} job", self.pick(&APPLIANCES))
            }
            ActivityKind::PartsOrdered => {
                let (_, description, _) = PARTS[self.rng.int_n(PARTS.len())];
                format!("{description} ordered for {subject}")
            }
            ActivityKind::PartsDelivered => {
                let (_, description, _) = PARTS[self.rng.int_n(PARTS.len())];
                format!("{description} delivered to {subject}")
            }
            ActivityKind::ContractorAdded => format!("{subject} added as a lead"),
            ActivityKind::ContractorStageChanged => format!(
                "{subject} moved to {}",
                self.pick_copy(&ContractorStage::ALL).as_str()
            ),
            ActivityKind::RecommendationCreated => format!("New coaching plan for {subject}"),
            ActivityKind::TechnicianFlagged => format!("{subject} flagged for retention review"),
        };
        ActivityEvent {
            id: ActivityId::new(id),
            kind,
            actor: self.pick(&ACTORS).to_owned(),
            summary,
            planning_area: (!self.rng.one_in(5)).then(|| self.pick(&PLANNING_AREAS).to_owned()),
            occurred_at: self.time_within_hours(72),
        }
    }

    pub fn technician_retention(&mut self) -> TechnicianRetention {
        let id = self.take_id();
        let tenure_months = self.int_range(1, 120);
        let engagement = (!self.rng.one_in(5)).then(|| cents(self.float_range(20.0, 98.0)));
        let risk_level = match engagement {
            Some(score) if score < 40.0 => RiskLevel::Critical,
            Some(score) if score < 60.0 => RiskLevel::High,
            _ if tenure_months < 6 => RiskLevel::Moderate,
            _ => self.pick_copy(&[RiskLevel::Low, RiskLevel::Moderate]),
        };
        TechnicianRetention {
            technician_id: TechnicianId::new(id),
            technician_name: self.person_name(),
            planning_area: self.pick(&PLANNING_AREAS).to_owned(),
            tenure_months,
            risk_level,
            engagement_score: engagement,
            callback_rate: (!self.rng.one_in(4)).then(|| cents(self.float_range(1.0, 18.0))),
            last_review: (!self.rng.one_in(3)).then(|| self.date_within_days(365)),
        }
    }

    /// `count` fresh records of the kind shown by `kind`.
    pub fn dataset(&mut self, kind: ViewKind, count: usize) -> Dataset {
        match kind {
            ViewKind::Orders => (0..count)
                .map(|_| self.completed_order())
                .collect::<Vec<_>>()
                .into(),
            ViewKind::Contractors => (0..count)
                .map(|_| self.contractor())
                .collect::<Vec<_>>()
                .into(),
            ViewKind::Parts => (0..count)
                .map(|_| self.parts_order())
                .collect::<Vec<_>>()
                .into(),
            ViewKind::Coaching => (0..count)
                .map(|_| self.recommendation())
                .collect::<Vec<_>>()
                .into(),
            ViewKind::Activity => (0..count)
                .map(|_| self.activity_event())
                .collect::<Vec<_>>()
                .into(),
            ViewKind::Retention => (0..count)
                .map(|_| self.technician_retention())
                .collect::<Vec<_>>()
                .into(),
        }
    }

    fn take_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn person_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn pick_copy<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    fn float_range(&mut self, min: f64, max: f64) -> f64 {
        let unit = (self.rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64;
        min + unit * (max - min)
    }

    fn date_within_days(&mut self, days: i64) -> Date {
        REFERENCE_DATE.saturating_sub(Duration::days(self.int_range(0, days)))
    }

    fn time_within_hours(&mut self, hours: i64) -> OffsetDateTime {
        REFERENCE_TIME.saturating_sub(Duration::minutes(self.int_range(0, hours * 60)))
    }
}

/// Demo records for one view, as served by `fieldops --demo`.
pub fn demo_dataset(kind: ViewKind, seed: u64, count: usize) -> Dataset {
    FieldOpsFaker::new(seed).dataset(kind, count)
}

/// The fixed "today" all generated dates count back from.
pub fn reference_date() -> Date {
    REFERENCE_DATE
}

fn cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
