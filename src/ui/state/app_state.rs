use std::collections::{BTreeMap, BTreeSet};

use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::account::{AccountNode, AccountRecord};
use crate::domain::entities::catalog::MASTER_ENTITIES;
use crate::domain::entities::record::{MasterRecord, RecordId, SortSpec};
use crate::infra::store::profile::Profile;
use crate::usecase::services::dashboard_service::DashboardView;
use crate::{MainTab, Theme, DEFAULT_PAGE_LIMIT};

pub struct AppState {
    pub active_tab: Signal<MainTab>,
    pub theme: Signal<Theme>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,

    pub entity_key: Signal<String>,
    pub records: Signal<Vec<MasterRecord>>,
    pub total_records: Signal<i64>,
    pub page: Signal<i64>,
    pub limit: Signal<i64>,
    pub sort: Signal<Option<SortSpec>>,
    pub search_text: Signal<String>,
    pub show_inactive: Signal<bool>,
    pub inactive_records: Signal<Vec<MasterRecord>>,
    pub inactive_loaded: Signal<bool>,
    pub hidden_columns: Signal<BTreeMap<String, BTreeSet<String>>>,
    pub column_menu_open: Signal<bool>,

    pub show_form: Signal<bool>,
    pub editing_id: Signal<Option<RecordId>>,
    pub form_inputs: Signal<BTreeMap<String, String>>,

    pub account_records: Signal<Vec<AccountRecord>>,
    pub account_tree: Signal<Vec<AccountNode>>,
    pub expanded_heads: Signal<BTreeSet<String>>,
    pub account_search: Signal<String>,
    pub account_page: Signal<i64>,

    pub dashboard: Signal<Option<DashboardView>>,
}

impl AppState {
    pub fn new(profile: &Profile) -> Self {
        let theme = profile.theme;
        let hidden_columns = profile.hidden_columns.clone();
        Self {
            active_tab: use_signal(|| MainTab::MasterData),
            theme: use_signal(move || theme),
            busy: use_signal(|| false),
            status: use_signal(|| "就緒".to_string()),

            entity_key: use_signal(|| MASTER_ENTITIES[0].key.to_string()),
            records: use_signal(Vec::<MasterRecord>::new),
            total_records: use_signal(|| 0_i64),
            page: use_signal(|| 1_i64),
            limit: use_signal(|| DEFAULT_PAGE_LIMIT),
            sort: use_signal(|| None::<SortSpec>),
            search_text: use_signal(String::new),
            show_inactive: use_signal(|| false),
            inactive_records: use_signal(Vec::<MasterRecord>::new),
            inactive_loaded: use_signal(|| false),
            hidden_columns: use_signal(move || hidden_columns),
            column_menu_open: use_signal(|| false),

            show_form: use_signal(|| false),
            editing_id: use_signal(|| None::<RecordId>),
            form_inputs: use_signal(BTreeMap::<String, String>::new),

            account_records: use_signal(Vec::<AccountRecord>::new),
            account_tree: use_signal(Vec::<AccountNode>::new),
            expanded_heads: use_signal(BTreeSet::<String>::new),
            account_search: use_signal(String::new),
            account_page: use_signal(|| 1_i64),

            dashboard: use_signal(|| None::<DashboardView>),
        }
    }
}
