//! Window registry transitions and the focus controller used by the desktop reducer.
//!
//! Every function here takes the whole [`DesktopState`] so the z-order counter, the active id and
//! the overlay flags move together. Registry operations (`open`, `close`, `minimize`, maximize
//! and geometry) never change focus on their own; only [`focus_window`] allocates z-order.

use crate::model::{AppId, DesktopState, WindowRect, WindowRegistry};

/// Marks `app_id` open and not minimized. Geometry and focus are left alone.
///
/// Returns `true` when a flag changed.
pub fn open_window(state: &mut DesktopState, app_id: AppId) -> bool {
    let window = state.windows.get_mut(app_id);
    let changed = !window.is_open || window.minimized;
    window.is_open = true;
    window.minimized = false;
    if changed {
        tracing::debug!(app_id = %app_id, "opened window");
    }
    changed
}

/// Closes `app_id`, keeping its geometry and z-index for the next open.
///
/// Returns `true` when the window was open.
pub fn close_window(state: &mut DesktopState, app_id: AppId) -> bool {
    let window = state.windows.get_mut(app_id);
    let was_open = window.is_open;
    window.is_open = false;
    release_active(state, app_id);
    if was_open {
        tracing::debug!(app_id = %app_id, "closed window");
    }
    was_open
}

/// Minimizes `app_id`. The maximized flag is kept so a restore brings back the same layout.
///
/// Returns `true` when the window was not already minimized.
pub fn minimize_window(state: &mut DesktopState, app_id: AppId) -> bool {
    let window = state.windows.get_mut(app_id);
    let changed = !window.minimized;
    window.minimized = true;
    release_active(state, app_id);
    if changed {
        tracing::debug!(app_id = %app_id, "minimized window");
    }
    changed
}

/// Flips the maximized flag and returns the new value. Stored geometry is untouched.
pub fn toggle_maximize(state: &mut DesktopState, app_id: AppId) -> bool {
    let window = state.windows.get_mut(app_id);
    window.maximized = !window.maximized;
    window.maximized
}

/// Moves a non-maximized window. Returns `false` (and changes nothing) while maximized.
pub fn move_window(state: &mut DesktopState, app_id: AppId, x: i32, y: i32) -> bool {
    let window = state.windows.get_mut(app_id);
    if window.maximized {
        return false;
    }
    window.rect = WindowRect { x, y, ..window.rect };
    true
}

/// Resizes a non-maximized window, clamping to the minimum size.
///
/// Returns `false` (and changes nothing) while maximized.
pub fn resize_window(
    state: &mut DesktopState,
    app_id: AppId,
    width: i32,
    height: i32,
    min_size: (i32, i32),
) -> bool {
    let window = state.windows.get_mut(app_id);
    if window.maximized {
        return false;
    }
    window.rect = WindowRect {
        w: width,
        h: height,
        ..window.rect
    }
    .clamped_min(min_size.0, min_size.1);
    true
}

/// Focuses and raises `app_id`: allocates the next z-index, clears minimized, makes it the active
/// app and closes both overlays.
///
/// A closed window cannot become active, so focusing one is a no-op that returns `None`.
/// Otherwise returns the newly allocated z-index.
pub fn focus_window(state: &mut DesktopState, app_id: AppId) -> Option<u32> {
    if !state.windows.get(app_id).is_open {
        tracing::debug!(app_id = %app_id, "ignoring focus for closed window");
        return None;
    }
    Some(raise_window(state, app_id))
}

/// Opens `app_id` and focuses it. Used by every launch path (dock, spotlight, rail).
pub fn open_and_focus(state: &mut DesktopState, app_id: AppId) -> u32 {
    open_window(state, app_id);
    raise_window(state, app_id)
}

/// Re-seeds every window to its initial closed state and drops focus and overlays.
///
/// The z-order counter is kept so indices allocated after a reset still exceed every earlier one.
pub fn reset_registry(state: &mut DesktopState) {
    state.windows = WindowRegistry::default();
    state.active_app = None;
    state.overlays.close_all();
}

fn raise_window(state: &mut DesktopState, app_id: AppId) -> u32 {
    let z_index = allocate_z_index(state);
    let window = state.windows.get_mut(app_id);
    window.z_index = z_index;
    window.minimized = false;
    state.active_app = Some(app_id);
    state.overlays.close_all();
    tracing::debug!(app_id = %app_id, z_index, "focused window");
    z_index
}

fn allocate_z_index(state: &mut DesktopState) -> u32 {
    let next = state
        .z_counter
        .max(state.windows.max_z_index())
        .saturating_add(1);
    state.z_counter = next;
    next
}

fn release_active(state: &mut DesktopState, app_id: AppId) {
    if state.active_app == Some(app_id) {
        state.active_app = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{OverlayKind, INITIAL_Z_INDEX, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};

    const MIN: (i32, i32) = (MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);

    #[test]
    fn open_does_not_focus() {
        let mut state = DesktopState::default();
        assert!(open_window(&mut state, AppId::Notes));
        assert!(!open_window(&mut state, AppId::Notes));
        assert!(state.window(AppId::Notes).is_open);
        assert_eq!(state.active_app, None);
        assert_eq!(state.window(AppId::Notes).z_index, INITIAL_Z_INDEX);
    }

    #[test]
    fn first_focus_allocates_above_seed_and_keeps_growing() {
        let mut state = DesktopState::default();
        assert_eq!(open_and_focus(&mut state, AppId::Notes), INITIAL_Z_INDEX + 1);
        assert_eq!(open_and_focus(&mut state, AppId::Terminal), INITIAL_Z_INDEX + 2);
        assert_eq!(focus_window(&mut state, AppId::Notes), Some(INITIAL_Z_INDEX + 3));
        assert_eq!(focus_window(&mut state, AppId::Notes), Some(INITIAL_Z_INDEX + 4));
    }

    #[test]
    fn focusing_closed_window_changes_nothing() {
        let mut state = DesktopState::default();
        state.overlays.set(OverlayKind::Spotlight, true);
        let before = state.clone();
        assert_eq!(focus_window(&mut state, AppId::Camera), None);
        assert_eq!(state, before);
    }

    #[test]
    fn focus_restores_minimized_window_and_closes_overlays() {
        let mut state = DesktopState::default();
        open_and_focus(&mut state, AppId::Safari);
        minimize_window(&mut state, AppId::Safari);
        state.overlays.set(OverlayKind::Spotlight, true);
        state.overlays.set(OverlayKind::ControlCenter, true);

        focus_window(&mut state, AppId::Safari);
        assert!(!state.window(AppId::Safari).minimized);
        assert_eq!(state.active_app, Some(AppId::Safari));
        assert!(!state.overlays.any_open());
    }

    #[test]
    fn close_and_minimize_release_only_their_own_focus() {
        let mut state = DesktopState::default();
        open_and_focus(&mut state, AppId::Notes);
        open_and_focus(&mut state, AppId::Terminal);

        assert!(close_window(&mut state, AppId::Notes));
        assert_eq!(state.active_app, Some(AppId::Terminal));

        assert!(minimize_window(&mut state, AppId::Terminal));
        assert_eq!(state.active_app, None);
        assert!(state.window(AppId::Terminal).is_open);

        assert!(!close_window(&mut state, AppId::Notes));
    }

    #[test]
    fn closing_keeps_geometry_for_reopen() {
        let mut state = DesktopState::default();
        open_and_focus(&mut state, AppId::Finder);
        move_window(&mut state, AppId::Finder, 12, 34);
        resize_window(&mut state, AppId::Finder, 640, 480, MIN);
        let z_before = state.window(AppId::Finder).z_index;
        close_window(&mut state, AppId::Finder);
        open_window(&mut state, AppId::Finder);

        let window = state.window(AppId::Finder);
        assert_eq!(
            window.rect,
            WindowRect {
                x: 12,
                y: 34,
                w: 640,
                h: 480,
            }
        );
        assert_eq!(window.z_index, z_before);
    }

    #[test]
    fn geometry_is_frozen_while_maximized() {
        let mut state = DesktopState::default();
        open_and_focus(&mut state, AppId::Notes);
        let original = state.window(AppId::Notes).rect;

        assert!(toggle_maximize(&mut state, AppId::Notes));
        assert!(!move_window(&mut state, AppId::Notes, 0, 0));
        assert!(!resize_window(&mut state, AppId::Notes, 900, 900, MIN));
        assert!(!toggle_maximize(&mut state, AppId::Notes));
        assert_eq!(state.window(AppId::Notes).rect, original);
    }

    #[test]
    fn resize_clamps_to_minimum() {
        let mut state = DesktopState::default();
        resize_window(&mut state, AppId::Camera, 10, 10, MIN);
        let rect = state.window(AppId::Camera).rect;
        assert_eq!((rect.w, rect.h), MIN);
    }

    #[test]
    fn minimize_keeps_maximized_flag() {
        let mut state = DesktopState::default();
        open_and_focus(&mut state, AppId::Settings);
        toggle_maximize(&mut state, AppId::Settings);
        minimize_window(&mut state, AppId::Settings);
        let window = state.window(AppId::Settings);
        assert!(window.minimized && window.maximized);
    }

    #[test]
    fn reset_keeps_counter_monotonic() {
        let mut state = DesktopState::default();
        open_and_focus(&mut state, AppId::Notes);
        let last = open_and_focus(&mut state, AppId::Terminal);
        reset_registry(&mut state);

        assert_eq!(state.active_app, None);
        assert!(state.windows.iter().all(|w| !w.is_open));
        assert!(open_and_focus(&mut state, AppId::Notes) > last);
    }
}
