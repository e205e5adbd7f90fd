// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Filter, sort and summarize uniformly shaped record collections.
//!
//! Every dashboard screen is the same pipeline instantiated against a
//! different record type: keep the records that satisfy the active
//! predicates and free-text query, order them by one field, and compute
//! summary statistics over what survived. Record types describe their
//! fields once through [`Record::FIELDS`]; everything else is driven by
//! that schema.

pub mod error;
pub mod field;
pub mod filter;
pub mod pipeline;
pub mod predicate;
pub mod sort;
pub mod summary;

pub use error::*;
pub use field::*;
pub use filter::*;
pub use pipeline::*;
pub use predicate::*;
pub use sort::*;
pub use summary::*;
