//! EstateFlow App
//!
//! Wires the store, write lanes, notifier and views together and tracks
//! which workspace, category and item are open.

use chrono::Utc;
use estateflow_store::{init_db, ChecklistEntry, DomainError, Repositories};
use rolling_logger::{LoggerError, LoggerOptions};
use std::sync::Arc;
use thiserror::Error;

use crate::clipboard::ChecklistClipboard;
use crate::config::{AppConfig, ConfigError};
use crate::error::{SyncError, SyncResult};
use crate::notify::ToastLog;
use crate::optimistic::Optimistic;
use crate::preferences::UiPreferences;
use crate::queue::WriteLanes;
use crate::views::{BookmarkBoard, CategorySidebar, ChecklistView, ItemsList, WorkspaceTabs};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("store: {0}")]
    Store(#[from] DomainError),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error("logger: {0}")]
    Logger(#[from] LoggerError),
}

pub struct App {
    config: AppConfig,
    toasts: ToastLog,
    preferences: UiPreferences,
    clipboard: ChecklistClipboard,
    pub workspaces: WorkspaceTabs,
    pub categories: CategorySidebar,
    pub items: ItemsList,
    pub checklist: ChecklistView,
    pub bookmarks: BookmarkBoard,
}

fn init_logging(config: &AppConfig) -> Result<(), AppError> {
    if !config.log_to_file {
        return Ok(());
    }
    let options = LoggerOptions {
        max_file_bytes: config.log_file_bytes,
        max_files: config.log_files,
        ..LoggerOptions::new(config.log_dir(), "EstateFlow")
    };
    match rolling_logger::init_logger_with(options) {
        Ok(()) => Ok(()),
        Err(LoggerError::AlreadyInitialized) => {
            log::warn!("logger already running, keeping it");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

impl App {
    /// Open the database and load the initial screen. Must run inside a
    /// tokio runtime; the write lanes spawn on it.
    pub async fn start(config: AppConfig) -> Result<Self, AppError> {
        init_logging(&config)?;

        let db_path = config.db_path();
        let db = match init_db(&db_path).await {
            Ok(db) => db,
            Err(e) => {
                let _ = rolling_logger::error(&format!("DB init failed: {}", e));
                return Err(e.into());
            }
        };
        let _ = rolling_logger::info(&format!("DB ready at {}", db_path.display()));
        let repos = Repositories::new(&db);

        let toasts = ToastLog::new();
        let notifier = Arc::new(toasts.clone());
        let sync = Optimistic::new(WriteLanes::current()?, notifier.clone(), config.failure_policy);

        let preferences = UiPreferences::new(repos.preferences.clone());
        preferences.load().await?;

        let mut app = Self {
            clipboard: ChecklistClipboard::with_ttl(notifier, config.clipboard_ttl()),
            toasts,
            preferences,
            workspaces: WorkspaceTabs::new(repos.workspaces.clone(), sync.clone()),
            categories: CategorySidebar::new(repos.categories.clone(), sync.clone()),
            items: ItemsList::new(repos.items.clone(), sync.clone()),
            checklist: ChecklistView::new(repos.checklist.clone(), sync.clone()),
            bookmarks: BookmarkBoard::new(repos.zones.clone(), repos.bookmarks.clone(), sync),
            config,
        };

        app.workspaces.load().await?;
        if let Some(last) = app.preferences.last_workspace() {
            if app.workspaces.select(&last).is_err() {
                log::info!("last workspace {} no longer exists", last);
            }
        }
        if let Some(active) = app.workspaces.active().map(str::to_string) {
            app.categories.load(&active).await?;
        }
        app.bookmarks.load().await?;

        log::info!("app started with {} workspaces", app.workspaces.tabs().len());
        Ok(app)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn toasts(&self) -> &ToastLog {
        &self.toasts
    }

    pub fn preferences(&self) -> &UiPreferences {
        &self.preferences
    }

    pub fn clipboard(&self) -> &ChecklistClipboard {
        &self.clipboard
    }

    /// Open a workspace tab and remember it for the next start
    pub async fn select_workspace(&mut self, id: &str) -> SyncResult<()> {
        self.workspaces.select(id)?;
        self.categories.load(id).await?;
        self.items.clear();
        self.checklist.clear();
        self.preferences.set_last_workspace(id).await
    }

    pub async fn select_category(&mut self, id: &str) -> SyncResult<()> {
        self.categories.select(Some(id));
        self.items.load(id).await?;
        self.checklist.clear();
        Ok(())
    }

    pub async fn select_item(&mut self, id: &str) -> SyncResult<()> {
        self.items.select(Some(id));
        self.checklist.load(id).await
    }

    /// Copy a line of the open checklist
    pub fn copy_line(&mut self, entry_id: &str) -> SyncResult<()> {
        let entry = self
            .checklist
            .list()
            .get(entry_id)
            .ok_or_else(|| SyncError::NotFound(format!("checklist entry {}", entry_id)))?;
        self.clipboard.copy(&entry, Utc::now())
    }

    /// Paste the clipboard line at the end of the open checklist
    pub async fn paste_into_current_item(&mut self) -> SyncResult<ChecklistEntry> {
        if self.checklist.item_id().is_none() {
            return Err(SyncError::NotFound("no item is open".to_string()));
        }
        let draft = self.clipboard.paste_draft(Utc::now())?;
        self.checklist.add_entry(draft).await
    }
}
