//! Role- and ownership-based access rules for jobs, applications and users.
//!
//! Every protected handler consults [`decide`] (usually through [`enforce`])
//! before touching persistence. The decision is a pure function of the
//! caller's role and id and the target's ownership; a deny is terminal.

use crate::errors::DomainError;
use crate::models::users::{Role, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<'a> {
    CreateJob,
    /// update or delete of an existing job
    ModifyJob { job_author_id: &'a UserId },
    CreateApplication,
    ReadApplication {
        applicant_id: &'a UserId,
        job_author_id: &'a UserId,
    },
    /// update or delete of an existing application
    ModifyApplication { applicant_id: &'a UserId },
    ListJobApplications { job_author_id: &'a UserId },
    ListOwnApplications,
    ReadSelf,
    UpdateSelf,
    /// admin-only user administration: create, read, update, delete, list
    ManageUsers,
    CleanDatabase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    WrongRole,
    NotOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

fn require_role(caller_role: Role, wanted: Role) -> Decision {
    if caller_role == wanted {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::WrongRole)
    }
}

fn require_owner(
    caller_role: Role,
    wanted: Role,
    caller_id: &UserId,
    owner_id: &UserId,
) -> Decision {
    match require_role(caller_role, wanted) {
        Decision::Allow if caller_id == owner_id => Decision::Allow,
        Decision::Allow => Decision::Deny(DenyReason::NotOwner),
        deny => deny,
    }
}

pub fn decide(
    caller_role: Role,
    caller_id: &UserId,
    action: &Action<'_>,
) -> Decision {
    use Action::*;
    match *action {
        CreateJob => require_role(caller_role, Role::Company),
        ModifyJob { job_author_id } => {
            require_owner(caller_role, Role::Company, caller_id, job_author_id)
        }
        CreateApplication => require_role(caller_role, Role::Worker),
        ReadApplication {
            applicant_id,
            job_author_id,
        } => match caller_role {
            Role::Worker if caller_id == applicant_id => Decision::Allow,
            Role::Company if caller_id == job_author_id => Decision::Allow,
            Role::Worker | Role::Company => {
                Decision::Deny(DenyReason::NotOwner)
            }
            Role::Admin => Decision::Deny(DenyReason::WrongRole),
        },
        ModifyApplication { applicant_id } => {
            require_owner(caller_role, Role::Worker, caller_id, applicant_id)
        }
        ListJobApplications { job_author_id } => {
            require_owner(caller_role, Role::Company, caller_id, job_author_id)
        }
        ListOwnApplications => require_role(caller_role, Role::Worker),
        ReadSelf | UpdateSelf => Decision::Allow,
        ManageUsers | CleanDatabase => require_role(caller_role, Role::Admin),
    }
}

/// Convenience wrapper turning a deny into the transport-facing error.
pub fn enforce(
    caller_role: Role,
    caller_id: &UserId,
    action: &Action<'_>,
) -> Result<(), DomainError> {
    match decide(caller_role, caller_id, action) {
        Decision::Allow => Ok(()),
        Decision::Deny(_) => Err(DomainError::new_not_allowed()),
    }
}

/// Which publication states an author-scoped job listing may reveal. Only
/// the owning COMPANY sees its unpublished posts; everyone else (including
/// anonymous callers) is forced to published-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishedScope {
    PublishedOnly,
    All,
}

impl PublishedScope {
    /// An owner may ask for published posts only; the switch never widens
    /// a scope.
    pub fn narrowed(self, only_published: bool) -> PublishedScope {
        if only_published {
            PublishedScope::PublishedOnly
        } else {
            self
        }
    }
}

pub fn author_jobs_scope(
    caller: Option<(Role, &UserId)>,
    author_id: &UserId,
) -> PublishedScope {
    match caller {
        Some((Role::Company, caller_id)) if caller_id == author_id => {
            PublishedScope::All
        }
        _ => PublishedScope::PublishedOnly,
    }
}
