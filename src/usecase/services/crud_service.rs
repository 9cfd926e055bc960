use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::catalog::EntityDescriptor;
use crate::domain::entities::record::{
    find_duplicate, ListQuery, ListResult, MasterRecord, RecordId,
};
use crate::domain::entities::session::Session;
use crate::usecase::ports::api::{ApiError, ErpApi};
use crate::usecase::services::dashboard_service::StaleSignal;

#[derive(Debug, Clone, PartialEq)]
pub enum SaveError {
    MissingField(String),
    NotNumeric(String),
    Duplicate { field: String, value: String },
    NotSignedIn,
    Api(ApiError),
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::MissingField(label) => write!(f, "「{label}」為必填欄位"),
            SaveError::NotNumeric(label) => write!(f, "「{label}」必須是數字"),
            SaveError::Duplicate { field, value } => {
                write!(f, "「{field}」已有相同資料：{value}")
            }
            SaveError::NotSignedIn => write!(f, "請先登入再執行此操作"),
            SaveError::Api(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SaveError {}

/// One lifecycle controller for every master-data entity: list, search,
/// create, update, deactivate, restore. Mutations mark the dashboard stale.
pub struct CrudService {
    api: Arc<dyn ErpApi>,
    stale: StaleSignal,
}

impl CrudService {
    pub fn new(api: Arc<dyn ErpApi>, stale: StaleSignal) -> Self {
        Self { api, stale }
    }

    pub fn load_page(
        &self,
        entity: &EntityDescriptor,
        query: &ListQuery,
    ) -> Result<ListResult, ApiError> {
        self.api.list(entity, query)
    }

    // Empty search text is the same as reloading the first page; a non-empty
    // term returns whatever the backend's full-text match yields.
    pub fn search(
        &self,
        entity: &EntityDescriptor,
        term: &str,
        fallback: &ListQuery,
    ) -> Result<ListResult, ApiError> {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            let query = ListQuery {
                page: 1,
                limit: fallback.limit,
                sort: fallback.sort.clone(),
            };
            return self.api.list(entity, &query);
        }
        let records = self.api.search(entity, trimmed)?;
        let total = records.len() as i64;
        Ok(ListResult { records, total })
    }

    pub fn load_inactive(&self, entity: &EntityDescriptor) -> Result<Vec<MasterRecord>, ApiError> {
        self.api.list_inactive(entity)
    }

    /// Create (`editing` = None) or update. Field validation runs first, then
    /// a uniqueness probe per unique field against the backend's search
    /// results. A probe that cannot be completed blocks the save; a save must
    /// never go through with an unverified duplicate check.
    pub fn save(
        &self,
        entity: &EntityDescriptor,
        values: &BTreeMap<String, String>,
        editing: Option<RecordId>,
        session: Option<&Session>,
    ) -> Result<(), SaveError> {
        let session = session.ok_or(SaveError::NotSignedIn)?;

        for field in entity.fields {
            let value = values.get(field.key).map(|v| v.trim()).unwrap_or("");
            if field.required && value.is_empty() {
                return Err(SaveError::MissingField(field.label.to_string()));
            }
            if field.numeric && !value.is_empty() && value.parse::<f64>().is_err() {
                return Err(SaveError::NotNumeric(field.label.to_string()));
            }
        }

        for field in entity.fields.iter().filter(|field| field.unique) {
            let value = values.get(field.key).map(|v| v.trim()).unwrap_or("");
            if value.is_empty() {
                continue;
            }
            let matches = self.api.search(entity, value).map_err(SaveError::Api)?;
            if find_duplicate(&matches, field.key, value, editing).is_some() {
                return Err(SaveError::Duplicate {
                    field: field.label.to_string(),
                    value: value.to_string(),
                });
            }
        }

        match editing {
            Some(id) => self
                .api
                .update(entity, id, values, session.user_id)
                .map_err(SaveError::Api)?,
            None => self
                .api
                .create(entity, values, session.user_id)
                .map_err(SaveError::Api)?,
        }
        self.stale.mark_dirty();
        Ok(())
    }

    pub fn deactivate(
        &self,
        entity: &EntityDescriptor,
        id: RecordId,
        session: Option<&Session>,
    ) -> Result<(), SaveError> {
        let session = session.ok_or(SaveError::NotSignedIn)?;
        self.api
            .deactivate(entity, id, session.user_id)
            .map_err(SaveError::Api)?;
        self.stale.mark_dirty();
        Ok(())
    }

    pub fn restore(
        &self,
        entity: &EntityDescriptor,
        id: RecordId,
        session: Option<&Session>,
    ) -> Result<(), SaveError> {
        let session = session.ok_or(SaveError::NotSignedIn)?;
        self.api
            .restore(entity, id, session.user_id)
            .map_err(SaveError::Api)?;
        self.stale.mark_dirty();
        Ok(())
    }
}
