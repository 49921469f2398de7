//! UI preferences
//!
//! Theme and last opened workspace. Values are read once by `load` and
//! served from memory afterwards; setters write through to the store.

use estateflow_store::PreferenceStore;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::SyncResult;

const THEME_KEY: &str = "theme";
const LAST_WORKSPACE_KEY: &str = "last_workspace";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Cached {
    theme: Theme,
    last_workspace: Option<String>,
}

pub struct UiPreferences {
    store: Arc<dyn PreferenceStore>,
    cache: RwLock<Cached>,
}

impl UiPreferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store, cache: RwLock::new(Cached::default()) }
    }

    /// Read every preference from the store
    pub async fn load(&self) -> SyncResult<()> {
        let theme = match self.store.get(THEME_KEY).await? {
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                log::warn!("unknown theme '{}', using light", raw);
                Theme::Light
            }),
            None => Theme::Light,
        };
        let last_workspace = self.store.get(LAST_WORKSPACE_KEY).await?;

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.theme = theme;
        cache.last_workspace = last_workspace;
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).theme
    }

    pub async fn set_theme(&self, theme: Theme) -> SyncResult<()> {
        self.store.set(THEME_KEY, theme.as_str()).await?;
        self.cache.write().unwrap_or_else(PoisonError::into_inner).theme = theme;
        log::info!("theme set to {}", theme.as_str());
        Ok(())
    }

    pub async fn toggle_theme(&self) -> SyncResult<Theme> {
        let next = self.theme().toggled();
        self.set_theme(next).await?;
        Ok(next)
    }

    pub fn last_workspace(&self) -> Option<String> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last_workspace
            .clone()
    }

    pub async fn set_last_workspace(&self, id: &str) -> SyncResult<()> {
        self.store.set(LAST_WORKSPACE_KEY, id).await?;
        self.cache.write().unwrap_or_else(PoisonError::into_inner).last_workspace = Some(id.to_string());
        Ok(())
    }
}
