use serde::Serialize;
use utoipa::ToSchema;

/// Paging details echoed back on list responses.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq)]
pub struct Meta {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub count: Option<u64>,
}

impl Meta {
    pub fn page(limit: u64, offset: u64, count: u64) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
            count: Some(count),
        }
    }

    pub fn empty() -> Self {
        Self {
            limit: None,
            offset: None,
            count: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
