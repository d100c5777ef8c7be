//! Repository abstractions for data access.
//!
//! Mutating repositories open one database transaction per call, hand the
//! core service a [`SeaOrmStore`](crate::store::SeaOrmStore) bound to it, and
//! commit only when the service succeeds.

pub mod account;
pub mod company;
pub mod journal_entry;
pub mod reference;

pub use account::AccountRepository;
pub use company::{CompanyError, CompanyRepository, CreateCompanyInput};
pub use journal_entry::JournalEntryRepository;
pub use reference::ReferenceAccountRepository;
