use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

mod app;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

const DEFAULT_PAGE_LIMIT: i64 = 20;
const ACCOUNT_PAGE_LIMIT: i64 = 15;

fn main() {
    env_logger::init();

    #[cfg(windows)]
    detach_console();

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("ERP"))
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}

#[cfg(windows)]
fn detach_console() {
    unsafe {
        windows_sys::Win32::System::Console::FreeConsole();
    }
}

fn api_base_url() -> String {
    std::env::var("ERP_API_BASE").unwrap_or_else(|_| "http://127.0.0.1:3000/api".to_string())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    fn surface(self) -> &'static str {
        match self {
            Theme::Light => "#fafafa",
            Theme::Dark => "#1d1f24",
        }
    }

    fn panel(self) -> &'static str {
        match self {
            Theme::Light => "#ffffff",
            Theme::Dark => "#282b31",
        }
    }

    fn text(self) -> &'static str {
        match self {
            Theme::Light => "#1a1a1a",
            Theme::Dark => "#e6e6e6",
        }
    }

    fn border(self) -> &'static str {
        match self {
            Theme::Light => "#bbbbbb",
            Theme::Dark => "#4a4e55",
        }
    }

    fn header_bg(self) -> &'static str {
        match self {
            Theme::Light => "#f2f2f2",
            Theme::Dark => "#33363c",
        }
    }

    fn accent_bg(self) -> &'static str {
        match self {
            Theme::Light => "#eef4ff",
            Theme::Dark => "#2f3a4f",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainTab {
    MasterData,
    Accounts,
    Dashboard,
}

fn root_container_style(theme: Theme) -> String {
    format!(
        "height: 100vh; display: flex; flex-direction: column; overflow: hidden; background: {}; color: {}; font-family: system-ui, sans-serif;",
        theme.surface(),
        theme.text()
    )
}

fn nav_style(theme: Theme) -> String {
    format!(
        "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 12px; border-bottom: 1px solid {};",
        theme.border()
    )
}

fn tab_button_style(theme: Theme, active: bool) -> String {
    let background = if active { theme.accent_bg() } else { theme.panel() };
    format!(
        "border: 1px solid {}; background: {}; color: {}; padding: 4px 12px; border-radius: 6px; cursor: pointer;",
        theme.border(),
        background,
        theme.text()
    )
}

fn control_button_style(theme: Theme) -> String {
    format!(
        "border: 1px solid {}; background: {}; color: {}; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
        theme.border(),
        theme.panel(),
        theme.text()
    )
}

fn table_container_style() -> String {
    "flex: 1; min-height: 0; overflow: auto; padding: 0 12px 12px;".to_string()
}

fn table_style(theme: Theme) -> String {
    format!(
        "border-collapse: collapse; width: 100%; background: {};",
        theme.panel()
    )
}

fn table_header_cell_style(theme: Theme) -> String {
    format!(
        "border: 1px solid {}; padding: 6px; background: {}; position: sticky; top: 0; z-index: 2; text-align: left; cursor: pointer;",
        theme.border(),
        theme.header_bg()
    )
}

fn table_cell_style(theme: Theme) -> String {
    format!("border: 1px solid {}; padding: 6px;", theme.border())
}

fn modal_overlay_style() -> String {
    "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1100;".to_string()
}

fn modal_panel_style(theme: Theme) -> String {
    format!(
        "background: {}; color: {}; padding: 16px; border: 1px solid {}; min-width: 320px; max-height: 80vh; overflow: auto;",
        theme.panel(),
        theme.text(),
        theme.border()
    )
}

fn menu_panel_style(theme: Theme) -> String {
    format!(
        "position: absolute; left: 0; top: 32px; min-width: 200px; max-height: 320px; overflow-y: auto; background: {}; color: {}; border: 1px solid {}; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 6px;",
        theme.panel(),
        theme.text(),
        theme.border()
    )
}

fn dashboard_tile_style(theme: Theme) -> String {
    format!(
        "flex: 1; min-width: 180px; background: {}; border: 1px solid {}; border-radius: 8px; padding: 16px;",
        theme.panel(),
        theme.border()
    )
}

fn parse_amount(value: &str) -> f64 {
    value.trim().replace(',', "").parse::<f64>().unwrap_or(0.0)
}

fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if (value.fract()).abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        let mut text = format!("{value:.6}");
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
        text
    }
}

fn export_rows_to_csv(path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create csv: {}", path.display()))?;
    writer
        .write_record(headers)
        .context("failed to write csv header")?;
    for row in rows {
        writer.write_record(row).context("failed to write csv row")?;
    }
    writer.flush().context("failed to flush csv")?;
    Ok(())
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "erp")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}
