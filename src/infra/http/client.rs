use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::domain::entities::account::AccountRecord;
use crate::domain::entities::catalog::EntityDescriptor;
use crate::domain::entities::record::{
    ListQuery, ListResult, MasterRecord, RecordId, SortDirection,
};
use crate::parse_amount;
use crate::usecase::ports::api::{ApiError, DashboardSummary, ErpApi};

/// Blocking HTTP binding of the back-end port. Base URL comes from
/// configuration; paths follow the backend's REST layout.
pub struct HttpApi {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent: ureq::agent(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn call(request: ureq::Request) -> Result<ureq::Response, ApiError> {
    match request.call() {
        Ok(response) => Ok(response),
        Err(err) => Err(map_error(err)),
    }
}

fn send(request: ureq::Request, body: Value) -> Result<ureq::Response, ApiError> {
    match request.send_json(body) {
        Ok(response) => Ok(response),
        Err(err) => Err(map_error(err)),
    }
}

fn map_error(err: ureq::Error) -> ApiError {
    let mapped = match err {
        ureq::Error::Status(status, response) => ApiError::Backend {
            status,
            message: response.into_string().unwrap_or_default(),
        },
        other => ApiError::Transport(other.to_string()),
    };
    log::warn!("api request failed: {mapped}");
    mapped
}

fn decode_value(response: ureq::Response) -> Result<Value, ApiError> {
    response.into_json::<Value>().map_err(|err| {
        let mapped = ApiError::Decode(err.to_string());
        log::warn!("api response decode failed: {mapped}");
        mapped
    })
}

// --- wire shapes ---

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    #[allow(dead_code)]
    status: Value,
    data: T,
}

#[derive(Debug, Deserialize)]
struct ListPayload {
    #[serde(default)]
    records: Vec<WireRecord>,
    #[serde(default)]
    total: i64,
}

/// Search endpoints answer either a bare array or a `{ records: [...] }`
/// wrapper; both shapes decode through this one discriminated payload.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordsPayload {
    Wrapped { records: Vec<WireRecord> },
    Bare(Vec<WireRecord>),
}

impl RecordsPayload {
    fn into_records(self) -> Vec<WireRecord> {
        match self {
            RecordsPayload::Wrapped { records } => records,
            RecordsPayload::Bare(records) => records,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireRecord {
    id: i64,
    #[serde(default, rename = "isActive")]
    is_active: Option<Value>,
    #[serde(flatten)]
    values: Map<String, Value>,
}

impl From<WireRecord> for MasterRecord {
    fn from(wire: WireRecord) -> Self {
        let is_active = match &wire.is_active {
            None | Some(Value::Null) => true,
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(number)) => number.as_f64().map(|v| v != 0.0).unwrap_or(true),
            Some(Value::String(text)) => text != "0" && !text.eq_ignore_ascii_case("false"),
            Some(_) => true,
        };
        let values: BTreeMap<String, String> = wire
            .values
            .iter()
            .map(|(key, value)| (key.clone(), value_to_string(value)))
            .collect();
        MasterRecord {
            id: RecordId(wire.id),
            values,
            is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAccountHead {
    #[serde(default)]
    head_code: Value,
    #[serde(default)]
    head_name: String,
    #[serde(default)]
    parent_head: Value,
    #[serde(default)]
    opening_balance: Value,
    #[serde(default)]
    balance: Value,
}

impl From<WireAccountHead> for AccountRecord {
    fn from(wire: WireAccountHead) -> Self {
        AccountRecord {
            head_code: value_to_string(&wire.head_code),
            head_name: wire.head_name,
            parent_head: value_to_string(&wire.parent_head),
            opening_balance: parse_amount(&value_to_string(&wire.opening_balance)),
            balance: parse_amount(&value_to_string(&wire.balance)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WireDashboard {
    total_sales: Value,
    total_purchases: Value,
    stock_value: Value,
    open_vouchers: Value,
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}

// --- envelope parsers (shared with the test suite) ---

pub fn parse_list_envelope(value: Value) -> Result<ListResult, ApiError> {
    let envelope: Envelope<ListPayload> = decode(value)?;
    Ok(ListResult {
        records: envelope
            .data
            .records
            .into_iter()
            .map(MasterRecord::from)
            .collect(),
        total: envelope.data.total,
    })
}

pub fn parse_records_envelope(value: Value) -> Result<Vec<MasterRecord>, ApiError> {
    let envelope: Envelope<RecordsPayload> = decode(value)?;
    Ok(envelope
        .data
        .into_records()
        .into_iter()
        .map(MasterRecord::from)
        .collect())
}

pub fn parse_account_heads_envelope(value: Value) -> Result<Vec<AccountRecord>, ApiError> {
    let envelope: Envelope<Vec<WireAccountHead>> = decode(value)?;
    Ok(envelope.data.into_iter().map(AccountRecord::from).collect())
}

pub fn parse_dashboard_envelope(value: Value) -> Result<DashboardSummary, ApiError> {
    let envelope: Envelope<WireDashboard> = decode(value)?;
    let data = envelope.data;
    Ok(DashboardSummary {
        total_sales: parse_amount(&value_to_string(&data.total_sales)),
        total_purchases: parse_amount(&value_to_string(&data.total_purchases)),
        stock_value: parse_amount(&value_to_string(&data.stock_value)),
        open_vouchers: parse_amount(&value_to_string(&data.open_vouchers)) as i64,
    })
}

fn mutation_body(values: &BTreeMap<String, String>, user_id: i64) -> Value {
    let mut body = Map::new();
    for (key, value) in values {
        body.insert(key.clone(), Value::String(value.clone()));
    }
    body.insert("userId".to_string(), Value::from(user_id));
    Value::Object(body)
}

impl ErpApi for HttpApi {
    fn list(&self, entity: &EntityDescriptor, query: &ListQuery) -> Result<ListResult, ApiError> {
        let mut request = self
            .agent
            .get(&self.url(entity.collection))
            .query("page", &query.page.to_string())
            .query("limit", &query.limit.to_string());
        if let Some(sort) = &query.sort {
            let direction = match sort.direction {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            };
            request = request.query("sortKey", &sort.key).query("sortDir", direction);
        }
        parse_list_envelope(decode_value(call(request)?)?)
    }

    fn search(
        &self,
        entity: &EntityDescriptor,
        term: &str,
    ) -> Result<Vec<MasterRecord>, ApiError> {
        let request = self
            .agent
            .get(&self.url(&format!("{}/search", entity.collection)))
            .query("q", term);
        parse_records_envelope(decode_value(call(request)?)?)
    }

    fn list_inactive(&self, entity: &EntityDescriptor) -> Result<Vec<MasterRecord>, ApiError> {
        let request = self
            .agent
            .get(&self.url(&format!("{}/inactive", entity.collection)));
        parse_records_envelope(decode_value(call(request)?)?)
    }

    fn create(
        &self,
        entity: &EntityDescriptor,
        values: &BTreeMap<String, String>,
        user_id: i64,
    ) -> Result<(), ApiError> {
        let request = self.agent.post(&self.url(entity.collection));
        send(request, mutation_body(values, user_id))?;
        Ok(())
    }

    fn update(
        &self,
        entity: &EntityDescriptor,
        id: RecordId,
        values: &BTreeMap<String, String>,
        user_id: i64,
    ) -> Result<(), ApiError> {
        let request = self
            .agent
            .put(&self.url(&format!("{}/{}", entity.collection, id.0)));
        send(request, mutation_body(values, user_id))?;
        Ok(())
    }

    fn deactivate(
        &self,
        entity: &EntityDescriptor,
        id: RecordId,
        user_id: i64,
    ) -> Result<(), ApiError> {
        let request = self
            .agent
            .delete(&self.url(&format!("{}/{}", entity.collection, id.0)));
        send(request, json!({ "userId": user_id }))?;
        Ok(())
    }

    fn restore(
        &self,
        entity: &EntityDescriptor,
        id: RecordId,
        user_id: i64,
    ) -> Result<(), ApiError> {
        let request = self
            .agent
            .post(&self.url(&format!("{}/{}/restore", entity.collection, id.0)));
        send(request, json!({ "userId": user_id }))?;
        Ok(())
    }

    fn account_heads(&self) -> Result<Vec<AccountRecord>, ApiError> {
        let request = self.agent.get(&self.url("accounts/heads"));
        parse_account_heads_envelope(decode_value(call(request)?)?)
    }

    fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        let request = self.agent.get(&self.url("dashboard/summary"));
        parse_dashboard_envelope(decode_value(call(request)?)?)
    }
}
