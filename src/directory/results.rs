//! Result types for directory operations

/// One row of a user listing or search
#[derive(Debug, Clone)]
pub struct UserSummary {
    pub user_id: String,
    pub username: String,
}
