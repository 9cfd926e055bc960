use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use serde_json::json;

use crate::domain::entities::account::{
    build_account_tree, filter_accounts, flatten_account_tree, page_slice, AccountRecord,
    AccountRow,
};
use crate::domain::entities::catalog::{entity_by_key, EntityDescriptor, MASTER_ENTITIES};
use crate::domain::entities::record::{
    toggle_sort, ListQuery, ListResult, MasterRecord, RecordId, SortDirection, SortSpec,
};
use crate::domain::entities::session::Session;
use crate::infra::http::client::{
    parse_account_heads_envelope, parse_dashboard_envelope, parse_list_envelope,
    parse_records_envelope,
};
use crate::infra::store::profile::{Profile, ProfileStore};
use crate::usecase::ports::api::{ApiError, DashboardSummary, ErpApi};
use crate::usecase::services::crud_service::{CrudService, SaveError};
use crate::usecase::services::dashboard_service::{DashboardService, StaleSignal};
use crate::usecase::services::ledger_service::LedgerService;
use crate::*;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("erp-{prefix}-{nanos}"))
}

#[derive(Default)]
struct FakeApi {
    active: Mutex<Vec<MasterRecord>>,
    inactive: Mutex<Vec<MasterRecord>>,
    accounts: Vec<AccountRecord>,
    summary_calls: AtomicUsize,
    create_calls: AtomicUsize,
    fail_search: bool,
}

impl FakeApi {
    fn with_active(records: Vec<MasterRecord>) -> Self {
        Self {
            active: Mutex::new(records),
            ..Self::default()
        }
    }
}

impl ErpApi for FakeApi {
    fn list(&self, _entity: &EntityDescriptor, query: &ListQuery) -> Result<ListResult, ApiError> {
        let mut rows = self.active.lock().expect("active lock should work").clone();
        if let Some(sort) = &query.sort {
            rows.sort_by(|a, b| {
                let left = a.values.get(&sort.key).cloned().unwrap_or_default();
                let right = b.values.get(&sort.key).cloned().unwrap_or_default();
                match sort.direction {
                    SortDirection::Asc => left.cmp(&right),
                    SortDirection::Desc => right.cmp(&left),
                }
            });
        }
        let total = rows.len() as i64;
        let records = page_slice(&rows, query.page, query.limit);
        Ok(ListResult { records, total })
    }

    fn search(
        &self,
        _entity: &EntityDescriptor,
        term: &str,
    ) -> Result<Vec<MasterRecord>, ApiError> {
        if self.fail_search {
            return Err(ApiError::Transport("search unavailable".to_string()));
        }
        let needle = term.to_lowercase();
        Ok(self
            .active
            .lock()
            .expect("active lock should work")
            .iter()
            .filter(|record| {
                record
                    .values
                    .values()
                    .any(|value| value.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    fn list_inactive(&self, _entity: &EntityDescriptor) -> Result<Vec<MasterRecord>, ApiError> {
        Ok(self
            .inactive
            .lock()
            .expect("inactive lock should work")
            .clone())
    }

    fn create(
        &self,
        _entity: &EntityDescriptor,
        values: &BTreeMap<String, String>,
        _user_id: i64,
    ) -> Result<(), ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.active.lock().expect("active lock should work");
        let next_id = rows.iter().map(|record| record.id.0).max().unwrap_or(0) + 1;
        rows.push(MasterRecord {
            id: RecordId(next_id),
            values: values.clone(),
            is_active: true,
        });
        Ok(())
    }

    fn update(
        &self,
        _entity: &EntityDescriptor,
        id: RecordId,
        values: &BTreeMap<String, String>,
        _user_id: i64,
    ) -> Result<(), ApiError> {
        let mut rows = self.active.lock().expect("active lock should work");
        match rows.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.values = values.clone();
                Ok(())
            }
            None => Err(ApiError::Backend {
                status: 404,
                message: "record not found".to_string(),
            }),
        }
    }

    fn deactivate(
        &self,
        _entity: &EntityDescriptor,
        id: RecordId,
        _user_id: i64,
    ) -> Result<(), ApiError> {
        let mut active = self.active.lock().expect("active lock should work");
        let position = active
            .iter()
            .position(|record| record.id == id)
            .ok_or(ApiError::Backend {
                status: 404,
                message: "record not found".to_string(),
            })?;
        let mut record = active.remove(position);
        record.is_active = false;
        self.inactive
            .lock()
            .expect("inactive lock should work")
            .push(record);
        Ok(())
    }

    fn restore(
        &self,
        _entity: &EntityDescriptor,
        id: RecordId,
        _user_id: i64,
    ) -> Result<(), ApiError> {
        let mut inactive = self.inactive.lock().expect("inactive lock should work");
        let position = inactive
            .iter()
            .position(|record| record.id == id)
            .ok_or(ApiError::Backend {
                status: 404,
                message: "record not found".to_string(),
            })?;
        let mut record = inactive.remove(position);
        record.is_active = true;
        self.active
            .lock()
            .expect("active lock should work")
            .push(record);
        Ok(())
    }

    fn account_heads(&self) -> Result<Vec<AccountRecord>, ApiError> {
        Ok(self.accounts.clone())
    }

    fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        Ok(DashboardSummary {
            total_sales: 1200.0,
            total_purchases: 800.0,
            stock_value: 4200.0,
            open_vouchers: 3,
        })
    }
}

fn currency() -> &'static EntityDescriptor {
    entity_by_key("currency").expect("catalog should include currency")
}

fn record(id: i64, pairs: &[(&str, &str)]) -> MasterRecord {
    MasterRecord {
        id: RecordId(id),
        values: pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
        is_active: true,
    }
}

fn currency_inputs(name: &str, symbol: &str, rate: &str) -> BTreeMap<String, String> {
    [
        ("currencyName", name),
        ("symbol", symbol),
        ("exchangeRate", rate),
    ]
    .iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect()
}

fn sample_currencies() -> Vec<MasterRecord> {
    vec![
        record(
            1,
            &[
                ("currencyName", "Dollar"),
                ("symbol", "$"),
                ("exchangeRate", "31.5"),
            ],
        ),
        record(
            2,
            &[
                ("currencyName", "Euro"),
                ("symbol", "€"),
                ("exchangeRate", "33.1"),
            ],
        ),
        record(
            3,
            &[
                ("currencyName", "Yen"),
                ("symbol", "¥"),
                ("exchangeRate", "0.21"),
            ],
        ),
    ]
}

fn head(code: &str, parent: &str, name: &str, opening: f64, balance: f64) -> AccountRecord {
    AccountRecord {
        head_code: code.to_string(),
        head_name: name.to_string(),
        parent_head: parent.to_string(),
        opening_balance: opening,
        balance,
    }
}

fn sample_heads() -> Vec<AccountRecord> {
    vec![
        head("1", "0", "資產", 5.0, 100.0),
        head("1.1", "1", "流動資產", 1.0, 40.0),
        head("1.2", "1", "Fixed Assets", 2.0, 10.0),
        head("2", "0", "負債", 0.0, 70.0),
    ]
}

fn signed_in() -> Session {
    Session {
        user_id: 7,
        username: "amy".to_string(),
        display_name: "Amy".to_string(),
        signed_in_at: Utc::now(),
    }
}

fn codes(rows: &[AccountRow]) -> Vec<String> {
    rows.iter().map(|row| row.head_code.clone()).collect()
}

#[test]
fn sort_toggle_cycles_direction_and_resets_on_new_key() {
    let first = toggle_sort(None, "currencyName");
    assert_eq!(
        first,
        SortSpec {
            key: "currencyName".to_string(),
            direction: SortDirection::Asc,
        }
    );

    let second = toggle_sort(Some(&first), "currencyName");
    assert_eq!(second.direction, SortDirection::Desc);

    let third = toggle_sort(Some(&second), "currencyName");
    assert_eq!(third.direction, SortDirection::Asc);

    let other = toggle_sort(Some(&second), "symbol");
    assert_eq!(
        other,
        SortSpec {
            key: "symbol".to_string(),
            direction: SortDirection::Asc,
        }
    );
}

#[test]
fn list_applies_server_side_sort() {
    let api = Arc::new(FakeApi::with_active(sample_currencies()));
    let service = CrudService::new(api, StaleSignal::new());

    let query = ListQuery {
        page: 1,
        limit: 10,
        sort: Some(SortSpec {
            key: "currencyName".to_string(),
            direction: SortDirection::Desc,
        }),
    };
    let result = service
        .load_page(currency(), &query)
        .expect("list should succeed");

    let names: Vec<String> = result
        .records
        .iter()
        .map(|r| r.values.get("currencyName").cloned().unwrap_or_default())
        .collect();
    assert_eq!(names, ["Yen", "Euro", "Dollar"]);
}

#[test]
fn deactivate_and_restore_move_records_between_partitions() {
    let api = Arc::new(FakeApi::with_active(sample_currencies()));
    let service = CrudService::new(api.clone(), StaleSignal::new());
    let session = signed_in();

    service
        .deactivate(currency(), RecordId(1), Some(&session))
        .expect("deactivate should succeed");
    {
        let active = api.active.lock().expect("active lock should work");
        let inactive = api.inactive.lock().expect("inactive lock should work");
        assert_eq!(active.len(), 2, "deactivate should move exactly one record");
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].id, RecordId(1));
        assert!(!inactive[0].is_active);
        assert!(
            active.iter().all(|record| record.id != RecordId(1)),
            "a record should live in exactly one partition"
        );
    }

    service
        .restore(currency(), RecordId(1), Some(&session))
        .expect("restore should succeed");
    {
        let active = api.active.lock().expect("active lock should work");
        let inactive = api.inactive.lock().expect("inactive lock should work");
        assert_eq!(active.len(), 3);
        assert!(inactive.is_empty());
        assert!(active
            .iter()
            .any(|record| record.id == RecordId(1) && record.is_active));
    }
}

#[test]
fn create_rejects_case_insensitive_duplicate_without_calling_backend() {
    let api = Arc::new(FakeApi::with_active(sample_currencies()));
    let service = CrudService::new(api.clone(), StaleSignal::new());
    let session = signed_in();

    let err = service
        .save(
            currency(),
            &currency_inputs("dollar", "US$", "30"),
            None,
            Some(&session),
        )
        .expect_err("duplicate name should be rejected");

    assert!(matches!(err, SaveError::Duplicate { .. }), "got {err:?}");
    assert_eq!(
        api.create_calls.load(Ordering::SeqCst),
        0,
        "create endpoint should not be called for a duplicate"
    );
}

#[test]
fn update_keeping_own_value_is_not_a_duplicate() {
    let api = Arc::new(FakeApi::with_active(vec![record(
        5,
        &[
            ("currencyName", "Dollar"),
            ("symbol", "$"),
            ("exchangeRate", "31.5"),
        ],
    )]));
    let service = CrudService::new(api.clone(), StaleSignal::new());
    let session = signed_in();

    service
        .save(
            currency(),
            &currency_inputs("Dollar", "$", "32.0"),
            Some(RecordId(5)),
            Some(&session),
        )
        .expect("a record must not collide with itself");

    let rows = api.active.lock().expect("active lock should work");
    assert_eq!(rows[0].values.get("exchangeRate"), Some(&"32.0".to_string()));
}

#[test]
fn duplicate_check_failure_blocks_save() {
    let api = Arc::new(FakeApi {
        fail_search: true,
        ..FakeApi::default()
    });
    let service = CrudService::new(api.clone(), StaleSignal::new());
    let session = signed_in();

    let err = service
        .save(
            currency(),
            &currency_inputs("Peso", "P", "1.5"),
            None,
            Some(&session),
        )
        .expect_err("save should be blocked when the duplicate check cannot run");

    assert!(matches!(err, SaveError::Api(ApiError::Transport(_))), "got {err:?}");
    assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn required_and_numeric_validation_run_before_any_call() {
    let api = Arc::new(FakeApi::default());
    let service = CrudService::new(api.clone(), StaleSignal::new());
    let session = signed_in();

    let err = service
        .save(currency(), &currency_inputs("", "$", "1"), None, Some(&session))
        .expect_err("missing name should fail validation");
    assert_eq!(err, SaveError::MissingField("名稱".to_string()));

    let err = service
        .save(
            currency(),
            &currency_inputs("Peso", "P", "abc"),
            None,
            Some(&session),
        )
        .expect_err("non-numeric rate should fail validation");
    assert_eq!(err, SaveError::NotNumeric("匯率".to_string()));

    assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn mutations_require_a_signed_in_session() {
    let api = Arc::new(FakeApi::default());
    let service = CrudService::new(api.clone(), StaleSignal::new());

    let err = service
        .save(currency(), &currency_inputs("Peso", "P", "1"), None, None)
        .expect_err("saving without a session should fail");
    assert_eq!(err, SaveError::NotSignedIn);

    let err = service
        .deactivate(currency(), RecordId(1), None)
        .expect_err("deactivating without a session should fail");
    assert_eq!(err, SaveError::NotSignedIn);
    assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn empty_search_falls_back_to_first_page_list() {
    let api = Arc::new(FakeApi::with_active(sample_currencies()));
    let service = CrudService::new(api, StaleSignal::new());

    let fallback = ListQuery {
        page: 3,
        limit: 2,
        sort: None,
    };
    let result = service
        .search(currency(), "   ", &fallback)
        .expect("empty search should fall back to the list");

    assert_eq!(result.total, 3);
    assert_eq!(result.records.len(), 2, "fallback should use page 1");
    assert_eq!(result.records[0].id, RecordId(1));
}

#[test]
fn search_returns_backend_matches_unpaginated() {
    let api = Arc::new(FakeApi::with_active(sample_currencies()));
    let service = CrudService::new(api, StaleSignal::new());

    let fallback = ListQuery {
        page: 1,
        limit: 1,
        sort: None,
    };
    let result = service
        .search(currency(), "eur", &fallback)
        .expect("search should succeed");

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.total, 1);
    assert_eq!(
        result.records[0].values.get("currencyName"),
        Some(&"Euro".to_string())
    );
}

#[test]
fn aggregation_rolls_descendant_balances_into_ancestors() {
    let tree = build_account_tree(&sample_heads());

    assert_eq!(tree.len(), 2);
    let assets = &tree[0];
    assert_eq!(assets.head_code, "1");
    assert_eq!(assets.balance, 150.0, "100 own + 40 + 10 descendants");
    assert_eq!(assets.opening_balance, 8.0);

    assert_eq!(assets.children.len(), 2);
    assert_eq!(assets.children[0].head_code, "1.1");
    assert_eq!(assets.children[0].balance, 40.0, "leaves keep their own value");
    assert_eq!(assets.children[1].balance, 10.0);

    assert_eq!(tree[1].head_code, "2");
    assert_eq!(tree[1].balance, 70.0);
}

#[test]
fn unknown_parent_rows_become_roots() {
    let heads = vec![
        head("1", "0", "資產", 0.0, 10.0),
        head("7.1", "999", "孤兒科目", 0.0, 5.0),
    ];
    let tree = build_account_tree(&heads);

    assert_eq!(tree.len(), 2, "a dangling parent reference makes a root");
    assert!(tree.iter().any(|node| node.head_code == "7.1"));
}

#[test]
fn flatten_respects_expand_state_and_levels() {
    let tree = build_account_tree(&sample_heads());

    let collapsed = flatten_account_tree(&tree, &BTreeSet::new());
    assert_eq!(codes(&collapsed), ["1", "2"]);
    assert!(collapsed[0].has_children);
    assert_eq!(collapsed[0].level, 0);

    let expanded = flatten_account_tree(&tree, &BTreeSet::from(["1".to_string()]));
    assert_eq!(codes(&expanded), ["1", "1.1", "1.2", "2"]);
    assert_eq!(expanded[1].level, 1);
    assert_eq!(expanded[2].level, 1);
    assert_eq!(expanded[3].level, 0);
}

#[test]
fn account_search_bypasses_hierarchy() {
    let heads = sample_heads();

    let by_code = filter_accounts(&heads, "1.1");
    assert_eq!(by_code.len(), 1);
    assert_eq!(by_code[0].level, 0, "search results carry no indentation");
    assert!(!by_code[0].has_children);
    assert_eq!(by_code[0].balance, 40.0, "search shows raw, not rolled-up, values");

    let by_name = filter_accounts(&heads, "fixed assets");
    assert_eq!(by_name.len(), 1, "name match should be case-insensitive");
    assert_eq!(by_name[0].head_code, "1.2");
}

#[test]
fn ledger_service_builds_aggregated_tree_from_port() {
    let api = Arc::new(FakeApi {
        accounts: sample_heads(),
        ..FakeApi::default()
    });
    let ledger = LedgerService::new(api);

    let (records, tree) = ledger.load_tree().expect("tree should load");
    assert_eq!(records.len(), 4);
    assert_eq!(tree[0].balance, 150.0);
}

#[test]
fn page_slice_windows_flattened_rows() {
    let items: Vec<i32> = (1..=5).collect();
    assert_eq!(page_slice(&items, 2, 2), vec![3, 4]);
    assert_eq!(page_slice(&items, 4, 2), Vec::<i32>::new());
    assert_eq!(page_slice(&items, 0, 2), vec![1, 2]);
    assert_eq!(page_slice(&items, 1, 0), items);
}

#[test]
fn search_payload_accepts_both_wire_shapes() {
    let wrapped = json!({
        "status": 200,
        "data": { "records": [
            { "id": 1, "currencyName": "Dollar", "exchangeRate": 31.5, "isActive": 1 }
        ] }
    });
    let bare = json!({
        "status": "success",
        "data": [
            { "id": 1, "currencyName": "Dollar", "exchangeRate": 31.5, "isActive": 1 }
        ]
    });

    let from_wrapped = parse_records_envelope(wrapped).expect("wrapped shape should decode");
    let from_bare = parse_records_envelope(bare).expect("bare shape should decode");

    assert_eq!(from_wrapped, from_bare);
    assert_eq!(from_wrapped.len(), 1);
    assert_eq!(from_wrapped[0].id, RecordId(1));
    assert_eq!(
        from_wrapped[0].values.get("exchangeRate"),
        Some(&"31.5".to_string()),
        "numeric fields normalize to strings"
    );
    assert!(from_wrapped[0].is_active, "numeric isActive should coerce");
}

#[test]
fn list_envelope_carries_records_and_total() {
    let value = json!({
        "status": 200,
        "data": {
            "records": [
                { "id": 1, "currencyName": "Dollar", "isActive": true },
                { "id": 2, "currencyName": "Euro", "isActive": false }
            ],
            "total": 25
        }
    });

    let result = parse_list_envelope(value).expect("list envelope should decode");
    assert_eq!(result.total, 25);
    assert_eq!(result.records.len(), 2);
    assert!(!result.records[1].is_active);
}

#[test]
fn account_head_envelope_coerces_codes_and_balances() {
    let value = json!({
        "status": 200,
        "data": [
            { "headCode": 1, "headName": "資產", "parentHead": 0, "openingBalance": "100.5", "balance": null }
        ]
    });

    let heads = parse_account_heads_envelope(value).expect("account heads should decode");
    assert_eq!(heads.len(), 1);
    assert_eq!(heads[0].head_code, "1", "numeric codes normalize to strings");
    assert_eq!(heads[0].parent_head, "0");
    assert_eq!(heads[0].opening_balance, 100.5);
    assert_eq!(heads[0].balance, 0.0, "missing balances default to zero");
}

#[test]
fn dashboard_envelope_tolerates_mixed_numeric_shapes() {
    let value = json!({
        "status": 200,
        "data": {
            "totalSales": "1,200.50",
            "totalPurchases": 800,
            "stockValue": null,
            "openVouchers": 3
        }
    });

    let summary = parse_dashboard_envelope(value).expect("dashboard envelope should decode");
    assert_eq!(summary.total_sales, 1200.5);
    assert_eq!(summary.total_purchases, 800.0);
    assert_eq!(summary.stock_value, 0.0);
    assert_eq!(summary.open_vouchers, 3);
}

#[test]
fn dashboard_refetches_only_after_invalidation() {
    let api = Arc::new(FakeApi::default());
    let stale = StaleSignal::new();
    let dashboard = DashboardService::new(api.clone(), stale.clone());

    assert!(dashboard.is_stale(), "an empty cache counts as stale");
    let first = dashboard
        .refresh_if_stale()
        .expect("first refresh should fetch");
    assert!(!dashboard.is_stale());

    let second = dashboard
        .refresh_if_stale()
        .expect("fresh cache should be reused");
    assert_eq!(api.summary_calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.summary, second.summary);

    stale.mark_dirty();
    assert!(dashboard.is_stale());
    dashboard
        .refresh_if_stale()
        .expect("stale cache should refetch");
    assert_eq!(api.summary_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn lifecycle_mutations_mark_dashboard_stale() {
    let api = Arc::new(FakeApi::default());
    let stale = StaleSignal::new();
    let service = CrudService::new(api, stale.clone());
    let session = signed_in();

    assert_eq!(stale.generation(), 0);
    service
        .save(
            currency(),
            &currency_inputs("Euro", "€", "33.2"),
            None,
            Some(&session),
        )
        .expect("save should succeed");
    assert_eq!(stale.generation(), 1);

    service
        .deactivate(currency(), RecordId(1), Some(&session))
        .expect("deactivate should succeed");
    assert_eq!(stale.generation(), 2);

    service
        .restore(currency(), RecordId(1), Some(&session))
        .expect("restore should succeed");
    assert_eq!(stale.generation(), 3);
}

#[test]
fn profile_store_round_trips_session_theme_and_columns() {
    let temp_dir = unique_test_dir("profile");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let store = ProfileStore::new(temp_dir.join("profile.json"));

    let mut hidden = BTreeMap::new();
    hidden.insert(
        "currency".to_string(),
        BTreeSet::from(["exchangeRate".to_string()]),
    );
    let profile = Profile {
        session: Some(signed_in()),
        theme: Theme::Dark,
        hidden_columns: hidden,
    };

    store.save(&profile).expect("profile should save");
    let loaded = store.load().expect("profile should load");
    assert_eq!(loaded, profile);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn missing_profile_loads_as_default() {
    let temp_dir = unique_test_dir("profile-missing");
    let store = ProfileStore::new(temp_dir.join("profile.json"));

    let loaded = store.load().expect("missing profile should load as default");
    assert_eq!(loaded, Profile::default());
    assert!(loaded.session.is_none());
}

#[test]
fn parse_amount_defaults_invalid_input_to_zero() {
    assert_eq!(parse_amount("1,234.5"), 1234.5);
    assert_eq!(parse_amount(" 42 "), 42.0);
    assert_eq!(parse_amount("abc"), 0.0);
    assert_eq!(parse_amount(""), 0.0);
}

#[test]
fn format_amount_trims_trailing_zeros() {
    assert_eq!(format_amount(150.0), "150");
    assert_eq!(format_amount(31.5), "31.5");
    assert_eq!(format_amount(0.0), "0");
}

#[test]
fn master_catalog_keys_are_unique_and_fields_are_declared() {
    let mut keys = BTreeSet::new();
    for entity in MASTER_ENTITIES {
        assert!(keys.insert(entity.key), "duplicate entity key: {}", entity.key);
        assert!(
            !entity.fields.is_empty(),
            "entity {} should declare fields",
            entity.key
        );
        assert!(
            entity.fields.iter().any(|field| field.required),
            "entity {} should have a required field",
            entity.key
        );
    }
    assert!(entity_by_key("currency").is_some());
    assert!(entity_by_key("missing").is_none());
}

#[test]
fn table_header_cells_stay_sticky_in_both_themes() {
    for theme in [Theme::Light, Theme::Dark] {
        let style = table_header_cell_style(theme);
        assert!(style.contains("position: sticky"));
        assert!(style.contains("top: 0"));
        assert!(style.contains("z-index"));
    }
}

#[test]
fn root_container_uses_viewport_height_and_flex() {
    let light = root_container_style(Theme::Light);
    let dark = root_container_style(Theme::Dark);
    for style in [&light, &dark] {
        assert!(style.contains("height: 100vh"));
        assert!(style.contains("display: flex"));
        assert!(style.contains("overflow: hidden"));
    }
    assert_ne!(light, dark, "themes should use different palettes");
}

#[test]
fn table_container_style_allows_scroll() {
    let style = table_container_style();
    assert!(style.contains("flex: 1"));
    assert!(style.contains("overflow: auto"));
}
