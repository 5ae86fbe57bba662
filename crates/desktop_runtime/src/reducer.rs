//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use crate::error::DesktopError;
use crate::model::{
    AppId, DesktopSnapshot, DesktopState, DragSession, InteractionState, OverlayKind,
    PointerPosition, ResizeSession, ThemeMode, UserProfile, WindowRecord,
    DEFAULT_PASSWORD, DESKTOP_LAYOUT_SCHEMA_VERSION, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
};
use crate::spotlight::{self, SearchResult};
use crate::window_manager::{
    close_window, focus_window, minimize_window, move_window, open_and_focus, open_window,
    reset_registry, resize_window, toggle_maximize,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a window and focus it (dock click, spotlight launch, rail click on a closed app).
    OpenApp {
        /// App to launch.
        app_id: AppId,
    },
    /// Mark a window open without focusing it.
    OpenWindow {
        /// Window to open.
        app_id: AppId,
    },
    /// Focus (and raise) a window.
    FocusWindow {
        /// Window to focus.
        app_id: AppId,
    },
    /// Close a window.
    CloseWindow {
        /// Window to close.
        app_id: AppId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        app_id: AppId,
    },
    /// Flip the maximized flag.
    ToggleMaximize {
        /// Window to maximize or restore.
        app_id: AppId,
    },
    /// Set a window's stored position.
    MoveWindow {
        /// Window to move.
        app_id: AppId,
        /// New left edge.
        x: i32,
        /// New top edge.
        y: i32,
    },
    /// Set a window's stored size.
    ResizeWindow {
        /// Window to resize.
        app_id: AppId,
        /// New width.
        width: i32,
        /// New height.
        height: i32,
    },
    /// Begin dragging a window by its title bar.
    BeginMove {
        /// Window being dragged.
        app_id: AppId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window from its bottom-right handle.
    BeginResize {
        /// Window being resized.
        app_id: AppId,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window resize.
    EndResize,
    /// Enable or disable stage mode.
    SetStageMode {
        /// Whether stage mode is enabled.
        enabled: bool,
    },
    /// Flip stage mode.
    ToggleStageMode,
    /// Show or hide an overlay.
    SetOverlay {
        /// Overlay to change.
        overlay: OverlayKind,
        /// Whether the overlay is shown.
        open: bool,
    },
    /// Flip an overlay.
    ToggleOverlay {
        /// Overlay to flip.
        overlay: OverlayKind,
    },
    /// Act on a Spotlight result.
    LaunchSearchResult {
        /// Selected result.
        result: SearchResult,
    },
    /// Attempt to unlock the session.
    Login {
        /// Password typed on the login screen.
        password: String,
    },
    /// Lock the session and re-seed every window.
    Logout,
    /// Switch between light and dark appearance.
    SetTheme {
        /// New theme.
        theme: ThemeMode,
    },
    /// Change the signed-in user's wallpaper.
    SetWallpaper {
        /// Wallpaper URL.
        wallpaper: String,
    },
    /// Replay a persisted layout snapshot.
    HydrateSnapshot {
        /// Snapshot payload to restore.
        snapshot: DesktopSnapshot,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the runtime to execute.
pub enum RuntimeEffect {
    /// Persist the current desktop layout snapshot.
    PersistLayout,
    /// Persist the theme.
    PersistTheme,
    /// Persist the signed-in user profile.
    PersistSession,
    /// Forget the persisted user profile.
    ClearSession,
    /// Open an external URL (web search results leave the shell).
    OpenExternalUrl(String),
    /// The login password was wrong; the login screen should shake.
    LoginRejected,
}

/// Reducer inputs that come from configuration rather than from events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopPolicy {
    /// Minimum window width and height enforced on resize.
    pub min_window_size: (i32, i32),
    /// Password that unlocks the session.
    pub password: String,
}

impl Default for DesktopPolicy {
    fn default() -> Self {
        Self {
            min_window_size: (MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// Window actions are defined for every [`AppId`] and never fail.
///
/// # Errors
///
/// Returns [`DesktopError::UnsupportedSnapshot`] when a hydrated snapshot carries an unknown
/// layout schema version. State is left untouched in that case.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    policy: &DesktopPolicy,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, DesktopError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenApp { app_id } => {
            open_and_focus(state, app_id);
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::OpenWindow { app_id } => {
            if open_window(state, app_id) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::FocusWindow { app_id } => {
            focus_window(state, app_id);
        }
        DesktopAction::CloseWindow { app_id } => {
            if close_window(state, app_id) {
                effects.push(RuntimeEffect::PersistLayout);
            }
            drop_sessions_for(interaction, app_id);
        }
        DesktopAction::MinimizeWindow { app_id } => {
            if minimize_window(state, app_id) {
                effects.push(RuntimeEffect::PersistLayout);
            }
            drop_sessions_for(interaction, app_id);
        }
        DesktopAction::ToggleMaximize { app_id } => {
            toggle_maximize(state, app_id);
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::MoveWindow { app_id, x, y } => {
            if move_window(state, app_id, x, y) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::ResizeWindow {
            app_id,
            width,
            height,
        } => {
            if resize_window(state, app_id, width, height, policy.min_window_size) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::BeginMove { app_id, pointer } => {
            if focus_window(state, app_id).is_some() {
                let window = state.window(app_id);
                if !window.maximized {
                    interaction.dragging = Some(DragSession {
                        app_id,
                        pointer_start: pointer,
                        rect_start: window.rect,
                    });
                }
            }
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.dragging.as_ref() {
                let dx = pointer.x.saturating_sub(session.pointer_start.x);
                let dy = pointer.y.saturating_sub(session.pointer_start.y);
                let target = session.rect_start.offset(dx, dy);
                move_window(state, session.app_id, target.x, target.y);
            }
        }
        DesktopAction::EndMove => {
            if interaction.dragging.take().is_some() {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::BeginResize { app_id, pointer } => {
            if focus_window(state, app_id).is_some() {
                let window = state.window(app_id);
                if !window.maximized {
                    interaction.resizing = Some(ResizeSession {
                        app_id,
                        pointer_start: pointer,
                        rect_start: window.rect,
                    });
                }
            }
        }
        DesktopAction::UpdateResize { pointer } => {
            if let Some(session) = interaction.resizing.as_ref() {
                let dx = pointer.x.saturating_sub(session.pointer_start.x);
                let dy = pointer.y.saturating_sub(session.pointer_start.y);
                resize_window(
                    state,
                    session.app_id,
                    session.rect_start.w.saturating_add(dx),
                    session.rect_start.h.saturating_add(dy),
                    policy.min_window_size,
                );
            }
        }
        DesktopAction::EndResize => {
            if interaction.resizing.take().is_some() {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::SetStageMode { enabled } => {
            if state.stage_mode != enabled {
                state.stage_mode = enabled;
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::ToggleStageMode => {
            state.stage_mode = !state.stage_mode;
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::SetOverlay { overlay, open } => {
            state.overlays.set(overlay, open);
        }
        DesktopAction::ToggleOverlay { overlay } => {
            state.overlays.toggle(overlay);
        }
        DesktopAction::LaunchSearchResult { result } => match result {
            SearchResult::App { app_id } => {
                open_and_focus(state, app_id);
                effects.push(RuntimeEffect::PersistLayout);
            }
            SearchResult::Item(_) => {
                open_and_focus(state, AppId::Finder);
                effects.push(RuntimeEffect::PersistLayout);
            }
            SearchResult::Web { query } => {
                state.overlays.set(OverlayKind::Spotlight, false);
                effects.push(RuntimeEffect::OpenExternalUrl(spotlight::web_search_url(
                    &query,
                )));
            }
            // The palette stays open; the presentation swaps the query for the value.
            SearchResult::Calculator { .. } => {}
        },
        DesktopAction::Login { password } => {
            if password == policy.password {
                tracing::info!("session unlocked");
                let mut user = UserProfile::admin();
                user.theme = state.theme;
                state.user = Some(user);
                effects.push(RuntimeEffect::PersistSession);
            } else {
                tracing::warn!("rejected login attempt");
                effects.push(RuntimeEffect::LoginRejected);
            }
        }
        DesktopAction::Logout => {
            tracing::info!("session locked");
            state.user = None;
            reset_registry(state);
            *interaction = InteractionState::default();
            effects.push(RuntimeEffect::ClearSession);
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::SetTheme { theme } => {
            state.theme = theme;
            if let Some(user) = state.user.as_mut() {
                user.theme = theme;
            }
            effects.push(RuntimeEffect::PersistTheme);
        }
        DesktopAction::SetWallpaper { wallpaper } => {
            if let Some(user) = state.user.as_mut() {
                user.wallpaper = wallpaper;
                effects.push(RuntimeEffect::PersistSession);
            }
        }
        DesktopAction::HydrateSnapshot { snapshot } => {
            hydrate_snapshot(state, snapshot)?;
            *interaction = InteractionState::default();
        }
    }

    Ok(effects)
}

/// Replays a snapshot through the registry operations so z-indices come from the live counter.
fn hydrate_snapshot(state: &mut DesktopState, snapshot: DesktopSnapshot) -> Result<(), DesktopError> {
    if snapshot.schema_version != DESKTOP_LAYOUT_SCHEMA_VERSION {
        return Err(DesktopError::UnsupportedSnapshot(snapshot.schema_version));
    }

    reset_registry(state);
    state.stage_mode = snapshot.stage_mode;
    state.theme = snapshot.theme;

    let mut windows: Vec<WindowRecord> = snapshot.windows;
    windows.sort_by_key(|w| w.z_index);
    for saved in &windows {
        let window = state.windows.get_mut(saved.app_id);
        window.rect = saved.rect;
        window.maximized = saved.maximized;
        window.stage_group = saved.stage_group.clone();
    }
    for saved in windows.iter().filter(|w| w.is_open) {
        open_window(state, saved.app_id);
        if saved.minimized {
            minimize_window(state, saved.app_id);
        } else {
            focus_window(state, saved.app_id);
        }
    }
    tracing::debug!(active = ?state.active_app, "hydrated desktop snapshot");
    Ok(())
}

fn drop_sessions_for(interaction: &mut InteractionState, app_id: AppId) {
    if interaction
        .dragging
        .as_ref()
        .is_some_and(|session| session.app_id == app_id)
    {
        interaction.dragging = None;
    }
    if interaction
        .resizing
        .as_ref()
        .is_some_and(|session| session.app_id == app_id)
    {
        interaction.resizing = None;
    }
}
