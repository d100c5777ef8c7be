//! Explicit request context.
//!
//! The acting company and user are passed to every core call as a value.
//! Nothing in the core reads them from ambient or thread-local state.

use ecf_shared::types::{CompanyId, UserId};

/// Identity of the caller of a core operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// The tenant the request acts on, if tenant-scoped.
    pub company_id: Option<CompanyId>,
    /// The acting user, if any.
    pub user_id: Option<UserId>,
}

impl RequestContext {
    /// Context for a user acting on behalf of a company.
    #[must_use]
    pub const fn for_company(company_id: CompanyId, user_id: UserId) -> Self {
        Self {
            company_id: Some(company_id),
            user_id: Some(user_id),
        }
    }

    /// Context for a tenant-less caller such as a maintenance job.
    ///
    /// Period enforcement is skipped for this context.
    #[must_use]
    pub const fn system() -> Self {
        Self {
            company_id: None,
            user_id: None,
        }
    }

    /// Returns true if the context carries no company.
    #[must_use]
    pub const fn is_system(&self) -> bool {
        self.company_id.is_none()
    }
}
