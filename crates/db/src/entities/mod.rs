//! `SeaORM` entity definitions.
//!
//! Enum-like columns are stored as text and mapped to core types by the
//! store in [`crate::store`].

pub mod chart_of_accounts;
pub mod companies;
pub mod journal_entries;
pub mod reference_accounts;
