//! Result types for catalog operations

/// One row of an owner-scoped file listing or search
#[derive(Debug, Clone)]
pub struct FileSummary {
    pub code: String,
    pub name: String,
}

/// One row of an administrative listing, owner included
#[derive(Debug, Clone)]
pub struct AdminFileSummary {
    pub code: String,
    pub name: String,
    pub owner_id: String,
}
