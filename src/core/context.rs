//! Request context passed explicitly into operations that need the acting user.

/// Identity of the user performing the current request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// Id of the acting user
    pub user_id: i64,
}

impl RequestContext {
    /// Creates a context acting as the given user.
    #[must_use]
    pub const fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}
