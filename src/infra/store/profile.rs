use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::entities::session::Session;
use crate::Theme;

/// Everything this client keeps locally: the signed-in session, the theme
/// preference, and the hidden table columns per entity. Business data never
/// lands here; the back-end owns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub hidden_columns: BTreeMap<String, BTreeSet<String>>,
}

pub struct ProfileStore {
    pub path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<Profile> {
        if !self.path.exists() {
            return Ok(Profile::default());
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read profile: {}", self.path.display()))?;
        let profile = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse profile: {}", self.path.display()))?;
        Ok(profile)
    }

    pub fn save(&self, profile: &Profile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create profile dir: {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(profile).context("failed to serialize profile")?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write profile: {}", self.path.display()))?;
        Ok(())
    }
}

pub fn default_profile_path() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "erp")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().join("profile.json"))
}
