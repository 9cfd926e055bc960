use std::collections::BTreeMap;

use crate::domain::entities::account::AccountRecord;
use crate::domain::entities::catalog::EntityDescriptor;
use crate::domain::entities::record::{ListQuery, ListResult, MasterRecord, RecordId};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Transport(String),
    Backend { status: u16, message: String },
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(message) => write!(f, "{message}"),
            ApiError::Backend { status, message } => write!(f, "HTTP {status}：{message}"),
            ApiError::Decode(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_sales: f64,
    pub total_purchases: f64,
    pub stock_value: f64,
    pub open_vouchers: i64,
}

/// The ERP back-end as seen from this client. One implementation speaks HTTP;
/// tests substitute an in-memory double at the same seam.
pub trait ErpApi: Send + Sync {
    fn list(&self, entity: &EntityDescriptor, query: &ListQuery) -> Result<ListResult, ApiError>;

    fn search(&self, entity: &EntityDescriptor, term: &str)
        -> Result<Vec<MasterRecord>, ApiError>;

    fn list_inactive(&self, entity: &EntityDescriptor) -> Result<Vec<MasterRecord>, ApiError>;

    fn create(
        &self,
        entity: &EntityDescriptor,
        values: &BTreeMap<String, String>,
        user_id: i64,
    ) -> Result<(), ApiError>;

    fn update(
        &self,
        entity: &EntityDescriptor,
        id: RecordId,
        values: &BTreeMap<String, String>,
        user_id: i64,
    ) -> Result<(), ApiError>;

    fn deactivate(
        &self,
        entity: &EntityDescriptor,
        id: RecordId,
        user_id: i64,
    ) -> Result<(), ApiError>;

    fn restore(&self, entity: &EntityDescriptor, id: RecordId, user_id: i64)
        -> Result<(), ApiError>;

    fn account_heads(&self) -> Result<Vec<AccountRecord>, ApiError>;

    fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError>;
}
