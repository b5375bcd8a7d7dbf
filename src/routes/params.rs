use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Page size, default 10, at most 100.
    pub limit: Option<u64>,
    /// Rows to skip, default 0.
    pub offset: Option<u64>,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const MAX_LIMIT: u64 = 100;
    /// Postgres binds OFFSET as a signed bigint.
    pub const MAX_OFFSET: u64 = i64::MAX as u64;

    pub fn normalize(&self) -> (u64, u64) {
        let limit = self
            .limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT);
        let offset = self.offset.unwrap_or(0).min(Self::MAX_OFFSET);
        (limit, offset)
    }
}
