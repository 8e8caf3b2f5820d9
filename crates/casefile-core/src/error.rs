use thiserror::Error;

use crate::models::Role;

/// Failures raised by the portal core.
///
/// `PermissionDenied` is the only structured failure a query operation
/// can raise, and it always precedes any store access or log append.
/// "No matches" outcomes (an empty search result, the composer's
/// apology answer) are successful degenerate outputs, not errors.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("permission denied: requires role '{required}' or higher, actor has '{actual}'")]
    PermissionDenied { required: Role, actual: Role },

    /// The retrieval composer requires a non-empty query; callers must
    /// trim and check before invoking it.
    #[error("query must not be empty")]
    EmptyQuery,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
