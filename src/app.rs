use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::domain::entities::account::{filter_accounts, flatten_account_tree, page_slice, AccountRow};
use crate::domain::entities::catalog::{entity_by_key, EntityDescriptor, FieldSpec, MASTER_ENTITIES};
use crate::domain::entities::record::{toggle_sort, ListQuery, MasterRecord, SortDirection};
use crate::infra::http::client::HttpApi;
use crate::infra::store::profile::{default_profile_path, Profile, ProfileStore};
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::api::ErpApi;
use crate::usecase::services::crud_service::CrudService;
use crate::usecase::services::dashboard_service::{DashboardService, StaleSignal};
use crate::usecase::services::ledger_service::LedgerService;
use crate::usecase::services::session_service::SessionService;
use crate::{
    api_base_url, control_button_style, dashboard_tile_style, export_rows_to_csv, format_amount,
    menu_panel_style, modal_overlay_style, modal_panel_style, nav_style, root_container_style,
    tab_button_style, table_cell_style, table_container_style, table_header_cell_style,
    table_style, MainTab, Theme, ACCOUNT_PAGE_LIMIT, DEFAULT_PAGE_LIMIT,
};

type SharedHandler = Rc<RefCell<dyn FnMut()>>;

fn run_handler(handler: &SharedHandler) {
    let mut handler = handler.borrow_mut();
    (*handler)();
}

#[derive(Clone)]
struct Services {
    store: Arc<ProfileStore>,
    session: Arc<SessionService>,
    crud: Arc<CrudService>,
    ledger: Arc<LedgerService>,
    dashboard: Arc<DashboardService>,
    profile: Profile,
}

fn current_entity(key: &str) -> &'static EntityDescriptor {
    entity_by_key(key).unwrap_or(&MASTER_ENTITIES[0])
}

fn confirm_action(title: &str, description: &str) -> bool {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::YesNo)
        .show()
        == MessageDialogResult::Yes
}

#[component]
fn ColumnVisibilityDropdown(
    fields: Vec<(String, String)>,
    hidden: BTreeSet<String>,
    mut open: Signal<bool>,
    on_toggle: EventHandler<(String, bool)>,
    theme: Theme,
) -> Element {
    let button_style = control_button_style(theme);
    let panel_style = menu_panel_style(theme);

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            button {
                style: "{button_style}",
                onclick: move |event| {
                    event.stop_propagation();
                    open.set(!open());
                },
                "顯示欄位"
            }

            if open() {
                div {
                    style: "{panel_style}",
                    onclick: move |event| event.stop_propagation(),
                    {fields.iter().map(|(key, label)| {
                        let checked = !hidden.contains(key);
                        let key = key.clone();
                        let label = label.clone();
                        rsx!(
                            label {
                                style: "display: flex; align-items: center; gap: 8px; padding: 6px 4px; cursor: pointer;",
                                input {
                                    r#type: "checkbox",
                                    checked: checked,
                                    onclick: move |_| {
                                        on_toggle.call((key.clone(), !checked));
                                    }
                                }
                                span { "{label}" }
                            }
                        )
                    })}
                }
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let profile_path = match default_profile_path() {
        Ok(path) => path,
        Err(err) => {
            return rsx! {
                div {
                    p { "無法取得設定檔路徑：{err}" }
                }
            };
        }
    };

    let services = use_hook(move || {
        let store = Arc::new(ProfileStore::new(profile_path));
        let profile = match store.load() {
            Ok(profile) => profile,
            Err(err) => {
                log::warn!("failed to load local profile: {err:#}");
                Profile::default()
            }
        };
        let session = Arc::new(SessionService::new(profile.session.clone()));
        let api: Arc<dyn ErpApi> = Arc::new(HttpApi::new(api_base_url()));
        let stale = StaleSignal::new();
        Services {
            store,
            session,
            crud: Arc::new(CrudService::new(api.clone(), stale.clone())),
            ledger: Arc::new(LedgerService::new(api.clone())),
            dashboard: Arc::new(DashboardService::new(api, stale)),
            profile,
        }
    });

    let AppState {
        mut active_tab,
        mut theme,
        mut busy,
        mut status,
        mut entity_key,
        mut records,
        mut total_records,
        mut page,
        mut limit,
        mut sort,
        mut search_text,
        mut show_inactive,
        mut inactive_records,
        mut inactive_loaded,
        mut hidden_columns,
        mut column_menu_open,
        mut show_form,
        mut editing_id,
        mut form_inputs,
        mut account_records,
        mut account_tree,
        mut expanded_heads,
        mut account_search,
        mut account_page,
        mut dashboard,
    } = AppState::new(&services.profile);

    let reload_active: SharedHandler = {
        let crud = services.crud.clone();
        Rc::new(RefCell::new(move || {
            let entity = current_entity(&entity_key());
            let query = ListQuery {
                page: page(),
                limit: limit(),
                sort: sort(),
            };
            let term = search_text();
            let result = run_blocking(|| {
                if term.trim().is_empty() {
                    crud.load_page(entity, &query)
                } else {
                    crud.search(entity, &term, &query)
                }
            });
            match result {
                Ok(list) => {
                    *records.write() = list.records;
                    *total_records.write() = list.total;
                }
                Err(err) => {
                    *status.write() = format!("載入清單失敗：{err}");
                }
            }
        }))
    };

    let reload_inactive: SharedHandler = {
        let crud = services.crud.clone();
        Rc::new(RefCell::new(move || {
            let entity = current_entity(&entity_key());
            match run_blocking(|| crud.load_inactive(entity)) {
                Ok(rows) => {
                    *inactive_records.write() = rows;
                    inactive_loaded.set(true);
                }
                Err(err) => {
                    *status.write() = format!("載入停用清單失敗：{err}");
                }
            }
        }))
    };

    let crud_for_init = services.crud.clone();
    use_effect(move || {
        *busy.write() = true;
        let entity = &MASTER_ENTITIES[0];
        let query = ListQuery {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            sort: None,
        };
        match run_blocking(|| crud_for_init.load_page(entity, &query)) {
            Ok(list) => {
                *records.write() = list.records;
                *total_records.write() = list.total;
                *status.write() = "已載入主檔資料".to_string();
            }
            Err(err) => {
                *status.write() = format!("載入主檔資料失敗：{err}");
            }
        }
        *busy.write() = false;
    });

    let reload_active_for_entity = reload_active.clone();
    let reload_active_for_search = reload_active.clone();
    let reload_active_for_limit = reload_active.clone();
    let reload_active_for_prev = reload_active.clone();
    let reload_active_for_next = reload_active.clone();
    let reload_active_for_sort = reload_active.clone();
    let reload_active_for_save = reload_active.clone();
    let reload_active_for_rows = reload_active.clone();
    let reload_inactive_for_toggle = reload_inactive.clone();
    let reload_inactive_for_save = reload_inactive.clone();
    let reload_inactive_for_rows = reload_inactive.clone();
    let crud_for_rows = services.crud.clone();
    let crud_for_save = services.crud.clone();
    let session_for_rows = services.session.clone();
    let session_for_save = services.session.clone();
    let session_for_theme = services.session.clone();
    let session_for_columns = services.session.clone();
    let store_for_theme = services.store.clone();
    let store_for_columns = services.store.clone();
    let ledger_for_tab = services.ledger.clone();
    let dashboard_for_tab = services.dashboard.clone();

    let theme_now = theme();
    let entity = current_entity(&entity_key());
    let entity_key_for_columns = entity.key.to_string();
    let hidden_for_entity: BTreeSet<String> = hidden_columns()
        .get(entity.key)
        .cloned()
        .unwrap_or_default();
    let visible_fields: Vec<&'static FieldSpec> = entity
        .fields
        .iter()
        .filter(|field| !hidden_for_entity.contains(field.key))
        .collect();
    let inactive_view = show_inactive();
    let table_records: Vec<MasterRecord> = if inactive_view {
        inactive_records()
    } else {
        records()
    };
    let searching = !search_text().trim().is_empty();
    let total = total_records();
    let current_limit = limit();
    let total_pages = if current_limit > 0 {
        ((total + current_limit - 1) / current_limit).max(1)
    } else {
        1
    };
    let current_page = page();
    let sort_now = sort();
    let session_label = services.session.label();
    let signed_in = services.session.current().is_some();

    let account_rows_all: Vec<AccountRow> = {
        let term = account_search();
        if term.trim().is_empty() {
            flatten_account_tree(&account_tree(), &expanded_heads())
        } else {
            filter_accounts(&account_records(), &term)
        }
    };
    let account_total = account_rows_all.len() as i64;
    let account_pages = ((account_total + ACCOUNT_PAGE_LIMIT - 1) / ACCOUNT_PAGE_LIMIT).max(1);
    let account_page_now = account_page();
    let paged_accounts = page_slice(&account_rows_all, account_page_now, ACCOUNT_PAGE_LIMIT);
    let account_searching = !account_search().trim().is_empty();

    let dashboard_view = dashboard();
    let dashboard_cards: Option<Vec<(String, String)>> = dashboard_view.as_ref().map(|view| {
        vec![
            ("本月銷售".to_string(), format_amount(view.summary.total_sales)),
            ("本月採購".to_string(), format_amount(view.summary.total_purchases)),
            ("庫存價值".to_string(), format_amount(view.summary.stock_value)),
            ("未結傳票".to_string(), view.summary.open_vouchers.to_string()),
        ]
    });
    let dashboard_fetched = dashboard_view
        .as_ref()
        .map(|view| view.fetched_at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default();

    let root_style = root_container_style(theme_now);
    let nav_style_now = nav_style(theme_now);
    let control_style = control_button_style(theme_now);
    let master_tab_style = tab_button_style(theme_now, active_tab() == MainTab::MasterData);
    let accounts_tab_style = tab_button_style(theme_now, active_tab() == MainTab::Accounts);
    let dashboard_tab_style = tab_button_style(theme_now, active_tab() == MainTab::Dashboard);
    let container_style = table_container_style();
    let table_style_now = table_style(theme_now);
    let header_style = table_header_cell_style(theme_now);
    let cell_style = table_cell_style(theme_now);
    let overlay_style = modal_overlay_style();
    let panel_style = modal_panel_style(theme_now);
    let tile_style = dashboard_tile_style(theme_now);

    rsx! {
        div {
            style: "{root_style}",
            onclick: move |_| {
                column_menu_open.set(false);
            },

            nav {
                style: "{nav_style_now}",
                button {
                    style: "{master_tab_style}",
                    onclick: move |_| {
                        active_tab.set(MainTab::MasterData);
                    },
                    "主檔資料"
                }
                button {
                    style: "{accounts_tab_style}",
                    disabled: busy(),
                    onclick: move |_| {
                        active_tab.set(MainTab::Accounts);
                        *busy.write() = true;
                        match run_blocking(|| ledger_for_tab.load_tree()) {
                            Ok((loaded_records, loaded_tree)) => {
                                account_records.set(loaded_records);
                                account_tree.set(loaded_tree);
                                account_page.set(1);
                                *status.write() = "已載入會計科目".to_string();
                            }
                            Err(err) => {
                                *status.write() = format!("載入會計科目失敗：{err}");
                            }
                        }
                        *busy.write() = false;
                    },
                    "會計科目表"
                }
                button {
                    style: "{dashboard_tab_style}",
                    disabled: busy(),
                    onclick: move |_| {
                        active_tab.set(MainTab::Dashboard);
                        *busy.write() = true;
                        match run_blocking(|| dashboard_for_tab.refresh_if_stale()) {
                            Ok(view) => {
                                dashboard.set(Some(view));
                                *status.write() = "儀表板已更新".to_string();
                            }
                            Err(err) => {
                                *status.write() = format!("載入儀表板失敗：{err}");
                            }
                        }
                        *busy.write() = false;
                    },
                    "儀表板"
                }

                span { style: "flex: 1;" }
                span { "{session_label}" }
                button {
                    style: "{control_style}",
                    onclick: move |_| {
                        let next = if theme() == Theme::Dark {
                            Theme::Light
                        } else {
                            Theme::Dark
                        };
                        theme.set(next);
                        let profile = Profile {
                            session: session_for_theme.current().cloned(),
                            theme: next,
                            hidden_columns: hidden_columns(),
                        };
                        if let Err(err) = store_for_theme.save(&profile) {
                            log::warn!("failed to persist local profile: {err:#}");
                        }
                    },
                    if theme_now == Theme::Dark { "淺色主題" } else { "深色主題" }
                }
                span { " {status}" }
            }

            if active_tab() == MainTab::MasterData {
                div {
                    style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 12px;",
                    label { "類別 " }
                    select {
                        disabled: busy(),
                        value: entity_key(),
                        onchange: move |event| {
                            entity_key.set(event.value());
                            page.set(1);
                            sort.set(None);
                            search_text.set(String::new());
                            show_inactive.set(false);
                            inactive_loaded.set(false);
                            *inactive_records.write() = Vec::new();
                            column_menu_open.set(false);
                            *busy.write() = true;
                            run_handler(&reload_active_for_entity);
                            *busy.write() = false;
                        },
                        for descriptor in MASTER_ENTITIES.iter() {
                            option {
                                value: "{descriptor.key}",
                                "{descriptor.label}"
                            }
                        }
                    }

                    label { "搜尋 " }
                    input {
                        disabled: busy(),
                        value: search_text(),
                        placeholder: "輸入關鍵字",
                        onchange: move |event| {
                            search_text.set(event.value());
                            page.set(1);
                            *busy.write() = true;
                            run_handler(&reload_active_for_search);
                            *busy.write() = false;
                        },
                    }

                    select {
                        disabled: busy(),
                        value: limit().to_string(),
                        onchange: move |event| {
                            let next = event.value().parse::<i64>().unwrap_or(DEFAULT_PAGE_LIMIT);
                            limit.set(next);
                            page.set(1);
                            *busy.write() = true;
                            run_handler(&reload_active_for_limit);
                            *busy.write() = false;
                        },
                        option { value: "10", "每頁 10 筆" }
                        option { value: "20", "每頁 20 筆" }
                        option { value: "50", "每頁 50 筆" }
                    }

                    label {
                        input {
                            r#type: "checkbox",
                            checked: show_inactive(),
                            onchange: move |event| {
                                let checked = event.value().parse::<bool>().unwrap_or(false);
                                show_inactive.set(checked);
                                if checked && !inactive_loaded() {
                                    *busy.write() = true;
                                    run_handler(&reload_inactive_for_toggle);
                                    *busy.write() = false;
                                }
                                *status.write() = if checked {
                                    "已顯示停用資料".to_string()
                                } else {
                                    "已顯示使用中資料".to_string()
                                };
                            },
                        }
                        "顯示停用資料"
                    }

                    button {
                        style: "{control_style}",
                        disabled: busy() || !signed_in,
                        onclick: move |_| {
                            editing_id.set(None);
                            form_inputs.write().clear();
                            show_form.set(true);
                        },
                        "新增"
                    }

                    ColumnVisibilityDropdown {
                        fields: entity
                            .fields
                            .iter()
                            .map(|field| (field.key.to_string(), field.label.to_string()))
                            .collect::<Vec<_>>(),
                        hidden: hidden_for_entity.clone(),
                        open: column_menu_open,
                        theme: theme_now,
                        on_toggle: move |(key, visible): (String, bool)| {
                            let mut next = hidden_columns();
                            let entry = next.entry(entity_key_for_columns.clone()).or_default();
                            if visible {
                                entry.remove(&key);
                            } else {
                                entry.insert(key);
                            }
                            hidden_columns.set(next.clone());
                            let profile = Profile {
                                session: session_for_columns.current().cloned(),
                                theme: theme(),
                                hidden_columns: next,
                            };
                            if let Err(err) = store_for_columns.save(&profile) {
                                log::warn!("failed to persist local profile: {err:#}");
                            }
                        },
                    }

                    button {
                        style: "{control_style}",
                        disabled: busy(),
                        onclick: move |_| {
                            let entity = current_entity(&entity_key());
                            let hidden = hidden_columns()
                                .get(entity.key)
                                .cloned()
                                .unwrap_or_default();
                            let fields: Vec<&FieldSpec> = entity
                                .fields
                                .iter()
                                .filter(|field| !hidden.contains(field.key))
                                .collect();
                            let source = if show_inactive() {
                                inactive_records()
                            } else {
                                records()
                            };
                            let Some(path) = FileDialog::new()
                                .add_filter("CSV", &["csv"])
                                .set_file_name(&format!("{}.csv", entity.key))
                                .save_file() else {
                                *status.write() = "已取消匯出".to_string();
                                return;
                            };
                            let headers: Vec<String> =
                                fields.iter().map(|field| field.label.to_string()).collect();
                            let rows: Vec<Vec<String>> = source
                                .iter()
                                .map(|record| {
                                    fields
                                        .iter()
                                        .map(|field| {
                                            record
                                                .values
                                                .get(field.key)
                                                .cloned()
                                                .unwrap_or_default()
                                        })
                                        .collect()
                                })
                                .collect();
                            match export_rows_to_csv(&path, &headers, &rows) {
                                Ok(()) => {
                                    *status.write() = format!("已匯出 {} 筆資料", rows.len());
                                }
                                Err(err) => {
                                    *status.write() = format!("匯出失敗：{err}");
                                }
                            }
                        },
                        "匯出 CSV"
                    }
                }

                div {
                    style: "{container_style}",
                    table { style: "{table_style_now}",
                        thead {
                            tr {
                                {visible_fields.iter().map(|field| {
                                    let field_key = field.key;
                                    let reload = reload_active_for_sort.clone();
                                    let indicator = match &sort_now {
                                        Some(spec) if spec.key == field_key => match spec.direction {
                                            SortDirection::Asc => " ▲",
                                            SortDirection::Desc => " ▼",
                                        },
                                        _ => "",
                                    };
                                    rsx!(
                                        th {
                                            style: "{header_style}",
                                            onclick: move |_| {
                                                if busy() || show_inactive() {
                                                    return;
                                                }
                                                let next = toggle_sort(sort().as_ref(), field_key);
                                                sort.set(Some(next));
                                                page.set(1);
                                                *busy.write() = true;
                                                run_handler(&reload);
                                                *busy.write() = false;
                                            },
                                            "{field.label}{indicator}"
                                        }
                                    )
                                })}
                                th { style: "{header_style}", "操作" }
                            }
                        }
                        tbody {
                            if table_records.is_empty() {
                                tr {
                                    td {
                                        style: "{cell_style}",
                                        colspan: visible_fields.len() + 1,
                                        "無資料"
                                    }
                                }
                            } else {
                                {table_records.iter().map(|record| {
                                    let record_id = record.id;
                                    let record_for_edit = record.clone();
                                    let crud_for_deactivate = crud_for_rows.clone();
                                    let session_for_deactivate = session_for_rows.clone();
                                    let reload_a_for_deactivate = reload_active_for_rows.clone();
                                    let reload_i_for_deactivate = reload_inactive_for_rows.clone();
                                    let crud_for_restore = crud_for_rows.clone();
                                    let session_for_restore = session_for_rows.clone();
                                    let reload_a_for_restore = reload_active_for_rows.clone();
                                    let reload_i_for_restore = reload_inactive_for_rows.clone();
                                    let cells: Vec<String> = visible_fields
                                        .iter()
                                        .map(|field| {
                                            record.values.get(field.key).cloned().unwrap_or_default()
                                        })
                                        .collect();
                                    rsx!(
                                        tr {
                                            {cells.iter().map(|cell| {
                                                let cell = cell.clone();
                                                rsx!(td { style: "{cell_style}", "{cell}" })
                                            })}
                                            td { style: "{cell_style}",
                                                if inactive_view {
                                                    button {
                                                        style: "{control_style}",
                                                        disabled: busy() || !signed_in,
                                                        onclick: move |_| {
                                                            if !confirm_action(
                                                                "確認還原",
                                                                "確定要將此筆資料還原為使用中嗎？",
                                                            ) {
                                                                return;
                                                            }
                                                            *busy.write() = true;
                                                            let entity = current_entity(&entity_key());
                                                            match run_blocking(|| {
                                                                crud_for_restore.restore(
                                                                    entity,
                                                                    record_id,
                                                                    session_for_restore.current(),
                                                                )
                                                            }) {
                                                                Ok(()) => {
                                                                    *status.write() = "已還原資料".to_string();
                                                                    run_handler(&reload_a_for_restore);
                                                                    run_handler(&reload_i_for_restore);
                                                                }
                                                                Err(err) => {
                                                                    *status.write() = format!("還原失敗：{err}");
                                                                }
                                                            }
                                                            *busy.write() = false;
                                                        },
                                                        "還原"
                                                    }
                                                } else {
                                                    button {
                                                        style: "{control_style}",
                                                        disabled: busy() || !signed_in,
                                                        onclick: move |_| {
                                                            let mut inputs = BTreeMap::new();
                                                            for field in current_entity(&entity_key()).fields {
                                                                if let Some(value) =
                                                                    record_for_edit.values.get(field.key)
                                                                {
                                                                    inputs.insert(
                                                                        field.key.to_string(),
                                                                        value.clone(),
                                                                    );
                                                                }
                                                            }
                                                            form_inputs.set(inputs);
                                                            editing_id.set(Some(record_id));
                                                            show_form.set(true);
                                                        },
                                                        "編輯"
                                                    }
                                                    button {
                                                        style: "{control_style}",
                                                        disabled: busy() || !signed_in,
                                                        onclick: move |_| {
                                                            if !confirm_action(
                                                                "確認停用",
                                                                "確定要停用此筆資料嗎？可在「顯示停用資料」中還原。",
                                                            ) {
                                                                return;
                                                            }
                                                            *busy.write() = true;
                                                            let entity = current_entity(&entity_key());
                                                            match run_blocking(|| {
                                                                crud_for_deactivate.deactivate(
                                                                    entity,
                                                                    record_id,
                                                                    session_for_deactivate.current(),
                                                                )
                                                            }) {
                                                                Ok(()) => {
                                                                    *status.write() =
                                                                        "已停用資料（可還原）".to_string();
                                                                    run_handler(&reload_a_for_deactivate);
                                                                    if inactive_loaded() {
                                                                        run_handler(&reload_i_for_deactivate);
                                                                    }
                                                                }
                                                                Err(err) => {
                                                                    *status.write() = format!("停用失敗：{err}");
                                                                }
                                                            }
                                                            *busy.write() = false;
                                                        },
                                                        "停用"
                                                    }
                                                }
                                            }
                                        }
                                    )
                                })}
                            }
                        }
                    }
                }

                if !searching && !inactive_view {
                    div {
                        style: "display: flex; gap: 8px; align-items: center; padding: 0 12px 8px;",
                        button {
                            style: "{control_style}",
                            disabled: busy() || current_page <= 1,
                            onclick: move |_| {
                                if page() <= 1 {
                                    return;
                                }
                                page.set(page() - 1);
                                *busy.write() = true;
                                run_handler(&reload_active_for_prev);
                                *busy.write() = false;
                            },
                            "上一頁"
                        }
                        span { "第 {current_page} / {total_pages} 頁（共 {total} 筆）" }
                        button {
                            style: "{control_style}",
                            disabled: busy() || current_page >= total_pages,
                            onclick: move |_| {
                                if page() >= total_pages {
                                    return;
                                }
                                page.set(page() + 1);
                                *busy.write() = true;
                                run_handler(&reload_active_for_next);
                                *busy.write() = false;
                            },
                            "下一頁"
                        }
                    }
                }

                if show_form() {
                    div {
                        style: "{overlay_style}",
                        div {
                            style: "{panel_style}",
                            div { style: "margin-bottom: 8px; font-weight: 600;",
                                if editing_id().is_some() {
                                    "編輯{entity.label}"
                                } else {
                                    "新增{entity.label}"
                                }
                            }
                            div { style: "display: grid; grid-template-columns: 120px 1fr; gap: 6px;",
                                {entity.fields.iter().map(|field| {
                                    let field_key = field.key;
                                    let current = form_inputs()
                                        .get(field.key)
                                        .cloned()
                                        .unwrap_or_default();
                                    rsx!(
                                        label { "{field.label}" }
                                        input {
                                            value: "{current}",
                                            oninput: move |event| {
                                                form_inputs
                                                    .write()
                                                    .insert(field_key.to_string(), event.value());
                                            }
                                        }
                                    )
                                })}
                            }
                            div { style: "display: flex; gap: 8px; margin-top: 12px;",
                                button {
                                    style: "{control_style}",
                                    disabled: busy(),
                                    onclick: move |_| {
                                        if busy() {
                                            return;
                                        }
                                        let entity = current_entity(&entity_key());
                                        let inputs = form_inputs();
                                        let editing = editing_id();
                                        *busy.write() = true;
                                        let result = run_blocking(|| {
                                            crud_for_save.save(
                                                entity,
                                                &inputs,
                                                editing,
                                                session_for_save.current(),
                                            )
                                        });
                                        match result {
                                            Ok(()) => {
                                                show_form.set(false);
                                                form_inputs.write().clear();
                                                editing_id.set(None);
                                                *status.write() = if editing.is_some() {
                                                    "已更新資料".to_string()
                                                } else {
                                                    "已新增資料".to_string()
                                                };
                                                run_handler(&reload_active_for_save);
                                                if editing.is_some() && inactive_loaded() {
                                                    run_handler(&reload_inactive_for_save);
                                                }
                                            }
                                            Err(err) => {
                                                *status.write() = format!("儲存失敗：{err}");
                                            }
                                        }
                                        *busy.write() = false;
                                    },
                                    "儲存"
                                }
                                button {
                                    style: "{control_style}",
                                    onclick: move |_| {
                                        show_form.set(false);
                                        form_inputs.write().clear();
                                        editing_id.set(None);
                                    },
                                    "取消"
                                }
                            }
                        }
                    }
                }
            }

            if active_tab() == MainTab::Accounts {
                div {
                    style: "display: flex; gap: 12px; align-items: center; padding: 8px 12px;",
                    label { "搜尋科目 " }
                    input {
                        disabled: busy(),
                        value: account_search(),
                        placeholder: "名稱或代碼",
                        onchange: move |event| {
                            account_search.set(event.value());
                            account_page.set(1);
                        },
                    }
                    span { "共 {account_total} 筆" }
                }

                div {
                    style: "{container_style}",
                    table { style: "{table_style_now}",
                        thead {
                            tr {
                                th { style: "{header_style}", "科目代碼" }
                                th { style: "{header_style}", "科目名稱" }
                                th { style: "{header_style}", "期初餘額" }
                                th { style: "{header_style}", "餘額" }
                            }
                        }
                        tbody {
                            if paged_accounts.is_empty() {
                                tr {
                                    td { style: "{cell_style}", colspan: 4, "無資料" }
                                }
                            } else {
                                {paged_accounts.iter().map(|row| {
                                    let head_code_for_toggle = row.head_code.clone();
                                    let indent_style = format!(
                                        "{} padding-left: {}px;",
                                        cell_style,
                                        8 + row.level * 18
                                    );
                                    let code = row.head_code.clone();
                                    let name = row.head_name.clone();
                                    let opening = format_amount(row.opening_balance);
                                    let balance = format_amount(row.balance);
                                    let is_expanded = expanded_heads().contains(&row.head_code);
                                    let has_children = row.has_children;
                                    rsx!(
                                        tr {
                                            td { style: "{cell_style}", "{code}" }
                                            td { style: "{indent_style}",
                                                if has_children {
                                                    button {
                                                        style: "border: none; background: transparent; cursor: pointer; padding: 0 6px 0 0; color: inherit;",
                                                        onclick: move |_| {
                                                            let mut next = expanded_heads();
                                                            if !next.insert(head_code_for_toggle.clone()) {
                                                                next.remove(&head_code_for_toggle);
                                                            }
                                                            expanded_heads.set(next);
                                                        },
                                                        if is_expanded { "▾" } else { "▸" }
                                                    }
                                                }
                                                "{name}"
                                            }
                                            td { style: "{cell_style} text-align: right;", "{opening}" }
                                            td { style: "{cell_style} text-align: right;", "{balance}" }
                                        }
                                    )
                                })}
                            }
                        }
                    }
                }

                if !account_searching {
                    div {
                        style: "display: flex; gap: 8px; align-items: center; padding: 0 12px 8px;",
                        button {
                            style: "{control_style}",
                            disabled: busy() || account_page_now <= 1,
                            onclick: move |_| {
                                if account_page() > 1 {
                                    account_page.set(account_page() - 1);
                                }
                            },
                            "上一頁"
                        }
                        span { "第 {account_page_now} / {account_pages} 頁" }
                        button {
                            style: "{control_style}",
                            disabled: busy() || account_page_now >= account_pages,
                            onclick: move |_| {
                                if account_page() < account_pages {
                                    account_page.set(account_page() + 1);
                                }
                            },
                            "下一頁"
                        }
                    }
                }
            }

            if active_tab() == MainTab::Dashboard {
                if let Some(cards) = dashboard_cards.clone() {
                    div {
                        style: "display: flex; gap: 12px; flex-wrap: wrap; padding: 12px;",
                        {cards.iter().map(|(label, value)| {
                            let label = label.clone();
                            let value = value.clone();
                            rsx!(
                                div { style: "{tile_style}",
                                    div { style: "color: #888; margin-bottom: 6px;", "{label}" }
                                    div { style: "font-size: 24px; font-weight: 600;", "{value}" }
                                }
                            )
                        })}
                    }
                    div { style: "padding: 0 12px; color: #888;", "資料時間：{dashboard_fetched}" }
                }
                if dashboard_cards.is_none() {
                    div { style: "padding: 12px;", "尚未載入儀表板資料" }
                }
            }
        }
    }
}
