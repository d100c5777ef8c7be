//! Core business logic for the ECF ledger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached only through the async traits in [`ports`].
//!
//! # Modules
//!
//! - `period` - Accounting-period guard and enforcement before mutations
//! - `chart` - Chart of accounts types, rules and registry
//! - `journal` - Journal entry validation and lifecycle
//! - `company` - Company record as seen by the core
//! - `context` - Explicit request context (acting company and user)

pub mod chart;
pub mod company;
pub mod context;
pub mod journal;
pub mod period;
pub mod ports;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use company::Company;
pub use context::RequestContext;
pub use ports::StoreError;
pub use status::RecordStatus;
