//! A scripted desktop session: store, host services, and the last Spotlight results.

use desktop_runtime::keybindings::{shortcut_action, Shortcut};
use desktop_runtime::{
    load_boot_state, search, AppId, DesktopAction, DesktopError, DesktopResult, DesktopStore,
    EffectExecutor, IndexedItem, RuntimeConfig, RuntimeEffect, SearchResult, WindowRecord,
    WindowView,
};
use platform_host::{ExternalUrlService, PrefsStore};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::command::{Command, USAGE};

pub struct Session {
    config: RuntimeConfig,
    store: DesktopStore,
    prefs: Box<dyn PrefsStore>,
    urls: Box<dyn ExternalUrlService>,
    items: Vec<IndexedItem>,
    last_results: Vec<SearchResult>,
}

impl Session {
    /// Builds a session from config and restores whatever `prefs` holds from an earlier run.
    ///
    /// # Errors
    ///
    /// Fails when the preference store cannot be read. Unreadable entries and snapshots from an
    /// unknown schema are logged and skipped.
    pub fn boot(
        config: RuntimeConfig,
        prefs: Box<dyn PrefsStore>,
        urls: Box<dyn ExternalUrlService>,
    ) -> DesktopResult<Self> {
        let boot = load_boot_state(prefs.as_ref())?;
        let mut state = config.initial_state();
        state.user = boot.user;
        let mut store = DesktopStore::new(state, config.policy());

        if let Some(snapshot) = boot.layout {
            match store.dispatch(DesktopAction::HydrateSnapshot { snapshot }) {
                Ok(_) => tracing::info!(active = ?store.active_app(), "restored desktop layout"),
                Err(err @ DesktopError::UnsupportedSnapshot(_)) => {
                    tracing::warn!(%err, "ignoring persisted layout");
                }
                Err(err) => return Err(err),
            }
        }
        // The theme key is written on its own and wins over the snapshot copy.
        if let Some(theme) = boot.theme {
            store.dispatch(DesktopAction::SetTheme { theme })?;
        }

        Ok(Self {
            config,
            store,
            prefs,
            urls,
            items: Vec::new(),
            last_results: Vec::new(),
        })
    }

    /// Files and folders offered to Spotlight alongside the apps.
    pub fn with_indexed_items(mut self, items: Vec<IndexedItem>) -> Self {
        self.items = items;
        self
    }

    pub fn store(&self) -> &DesktopStore {
        &self.store
    }

    /// Runs one command and returns the text to print.
    ///
    /// # Errors
    ///
    /// Returns reducer errors, host failures from effects, and out-of-range launch indices.
    pub fn execute(&mut self, command: Command) -> DesktopResult<String> {
        match command {
            Command::Dispatch(action) => self.dispatch(action),
            Command::ListWindows => Ok(window_table(
                &self.store.list_windows(),
                self.store.active_app(),
            )),
            Command::StageRail => Ok(self.rail_line()),
            Command::RenderPlan => Ok(plan_table(&self.store.render_plan(
                self.config.viewport,
                self.config.menu_bar_height,
            ))),
            Command::Search(query) => {
                self.last_results = search(&query, &self.items);
                Ok(self
                    .last_results
                    .iter()
                    .enumerate()
                    .map(|(index, result)| format!("{:>2}. {}", index + 1, result.label()))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            Command::Launch(index) => {
                let result = index
                    .checked_sub(1)
                    .and_then(|slot| self.last_results.get(slot))
                    .cloned()
                    .ok_or_else(|| {
                        DesktopError::InvalidCommand(format!(
                            "no search result #{index} (run `search` first)"
                        ))
                    })?;
                self.dispatch(DesktopAction::LaunchSearchResult { result })
            }
            Command::Key(press) => match shortcut_action(&press) {
                Some(action) => self.dispatch(action),
                None => Ok(String::new()),
            },
            Command::Help => Ok(help_text()),
        }
    }

    fn dispatch(&mut self, action: DesktopAction) -> DesktopResult<String> {
        let is_login = matches!(action, DesktopAction::Login { .. });
        let effects = self.store.dispatch(action)?;
        EffectExecutor::new(self.prefs.as_ref(), self.urls.as_ref())
            .run(self.store.state(), &effects)?;
        let notes: Vec<String> = effects
            .iter()
            .filter_map(|effect| match effect {
                RuntimeEffect::OpenExternalUrl(url) => Some(format!("opened {url}")),
                RuntimeEffect::LoginRejected => Some("incorrect password".to_string()),
                RuntimeEffect::PersistSession if is_login => Some("signed in".to_string()),
                _ => None,
            })
            .collect();
        Ok(notes.join("\n"))
    }

    fn rail_line(&self) -> String {
        if !self.store.is_stage_mode() {
            return "stage mode is off".to_string();
        }
        let rail: Vec<String> = self.store.stage_rail().iter().map(AppId::to_string).collect();
        if rail.is_empty() {
            "(empty)".to_string()
        } else {
            rail.join(" ")
        }
    }
}

fn window_table(windows: &[WindowRecord], active: Option<AppId>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["app", "open", "min", "max", "z", "x", "y", "w", "h", "active"]);
    for window in windows {
        builder.push_record([
            window.app_id.to_string(),
            flag(window.is_open),
            flag(window.minimized),
            flag(window.maximized),
            window.z_index.to_string(),
            window.rect.x.to_string(),
            window.rect.y.to_string(),
            window.rect.w.to_string(),
            window.rect.h.to_string(),
            flag(active == Some(window.app_id)),
        ]);
    }
    builder.build().with(Style::psql()).to_string()
}

fn plan_table(plan: &[WindowView]) -> String {
    if plan.is_empty() {
        return "(nothing to draw)".to_string();
    }
    let mut builder = Builder::default();
    builder.push_record(["z", "app", "x", "y", "w", "h", "active"]);
    for view in plan {
        builder.push_record([
            view.z_index.to_string(),
            view.app_id.to_string(),
            view.rect.x.to_string(),
            view.rect.y.to_string(),
            view.rect.w.to_string(),
            view.rect.h.to_string(),
            flag(view.is_active),
        ]);
    }
    builder.build().with(Style::psql()).to_string()
}

fn help_text() -> String {
    let mut text = format!("{USAGE}\n\nshortcuts:");
    for shortcut in Shortcut::ALL {
        text.push_str(&format!("\n  {shortcut}"));
    }
    text
}

fn flag(value: bool) -> String {
    let text = if value { "yes" } else { "-" };
    text.to_string()
}
