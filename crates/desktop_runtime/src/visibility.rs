//! Per-window render decisions derived from registry flags and stage mode.

use serde::{Deserialize, Serialize};

use crate::model::{AppId, DesktopState, Viewport, WindowRecord, WindowRect};

/// The one presentation state each window is in at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowPresentation {
    Closed,
    Minimized,
    /// Open but represented by a stand-in in the stage rail.
    StagedBackground,
    VisibleForeground,
}

pub fn presentation(
    window: &WindowRecord,
    active_app: Option<AppId>,
    stage_mode: bool,
) -> WindowPresentation {
    if !window.is_open {
        return WindowPresentation::Closed;
    }
    if window.minimized {
        return WindowPresentation::Minimized;
    }
    match active_app {
        Some(active) if stage_mode && active != window.app_id => {
            WindowPresentation::StagedBackground
        }
        _ => WindowPresentation::VisibleForeground,
    }
}

/// Whether the window frame renders on the primary surface.
pub fn should_render(window: &WindowRecord, active_app: Option<AppId>, stage_mode: bool) -> bool {
    presentation(window, active_app, stage_mode) == WindowPresentation::VisibleForeground
}

/// Stand-ins for the stage rail: open, not minimized, not active. Empty unless stage mode is on.
///
/// Unlike the primary surface, the rail lists background windows even when nothing is active.
pub fn stage_rail(state: &DesktopState) -> Vec<AppId> {
    if !state.stage_mode {
        return Vec::new();
    }
    state
        .windows
        .iter()
        .filter(|w| w.is_open && !w.minimized && Some(w.app_id) != state.active_app)
        .map(|w| w.app_id)
        .collect()
}

/// A window as the presentation layer should draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowView {
    pub app_id: AppId,
    pub title: String,
    pub rect: WindowRect,
    pub z_index: u32,
    pub is_active: bool,
    pub maximized: bool,
}

/// Foreground windows ordered back to front, with effective geometry.
pub fn render_plan(state: &DesktopState, viewport: Viewport, menu_bar_height: i32) -> Vec<WindowView> {
    let mut plan: Vec<WindowView> = state
        .windows
        .iter()
        .filter(|w| should_render(w, state.active_app, state.stage_mode))
        .map(|w| WindowView {
            app_id: w.app_id,
            title: w.title.clone(),
            rect: w.effective_rect(viewport, menu_bar_height),
            z_index: w.z_index,
            is_active: state.active_app == Some(w.app_id),
            maximized: w.maximized,
        })
        .collect();
    plan.sort_by_key(|view| view.z_index);
    plan
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::MENU_BAR_HEIGHT;
    use crate::window_manager::{
        close_window, focus_window, minimize_window, open_and_focus, open_window, toggle_maximize,
    };

    fn presentation_of(state: &DesktopState, app_id: AppId) -> WindowPresentation {
        presentation(state.window(app_id), state.active_app, state.stage_mode)
    }

    #[test]
    fn lifecycle_walks_through_every_presentation() {
        let mut state = DesktopState::default();
        assert_eq!(presentation_of(&state, AppId::Notes), WindowPresentation::Closed);

        open_window(&mut state, AppId::Notes);
        assert_eq!(
            presentation_of(&state, AppId::Notes),
            WindowPresentation::VisibleForeground
        );

        minimize_window(&mut state, AppId::Notes);
        assert_eq!(presentation_of(&state, AppId::Notes), WindowPresentation::Minimized);

        close_window(&mut state, AppId::Notes);
        assert_eq!(presentation_of(&state, AppId::Notes), WindowPresentation::Closed);
    }

    #[test]
    fn stage_mode_swaps_foreground_on_focus() {
        let mut state = DesktopState::default();
        state.stage_mode = true;
        open_and_focus(&mut state, AppId::Finder);
        open_window(&mut state, AppId::Safari);

        assert_eq!(
            presentation_of(&state, AppId::Safari),
            WindowPresentation::StagedBackground
        );
        assert_eq!(stage_rail(&state), vec![AppId::Safari]);

        focus_window(&mut state, AppId::Safari);
        assert_eq!(
            presentation_of(&state, AppId::Safari),
            WindowPresentation::VisibleForeground
        );
        assert_eq!(
            presentation_of(&state, AppId::Finder),
            WindowPresentation::StagedBackground
        );
        assert_eq!(stage_rail(&state), vec![AppId::Finder]);
    }

    #[test]
    fn stage_mode_without_active_window_renders_everything_open() {
        let mut state = DesktopState::default();
        state.stage_mode = true;
        open_window(&mut state, AppId::Notes);
        open_window(&mut state, AppId::Terminal);

        assert!(should_render(state.window(AppId::Notes), None, true));
        assert_eq!(stage_rail(&state), vec![AppId::Notes, AppId::Terminal]);
    }

    #[test]
    fn rail_is_empty_outside_stage_mode() {
        let mut state = DesktopState::default();
        open_and_focus(&mut state, AppId::Notes);
        open_window(&mut state, AppId::Camera);
        assert!(stage_rail(&state).is_empty());
    }

    #[test]
    fn render_plan_orders_by_z_and_applies_maximized_override() {
        let viewport = Viewport {
            width: 1000,
            height: 700,
        };
        let mut state = DesktopState::default();
        open_and_focus(&mut state, AppId::Terminal);
        open_and_focus(&mut state, AppId::Notes);
        focus_window(&mut state, AppId::Terminal);
        toggle_maximize(&mut state, AppId::Terminal);

        let plan = render_plan(&state, viewport, MENU_BAR_HEIGHT);
        let order: Vec<AppId> = plan.iter().map(|view| view.app_id).collect();
        assert_eq!(order, vec![AppId::Notes, AppId::Terminal]);
        assert_eq!(plan[1].rect, viewport.maximized_rect(MENU_BAR_HEIGHT));
        assert!(plan[1].is_active);
        assert_eq!(plan[0].rect, AppId::Notes.default_rect());
    }
}
