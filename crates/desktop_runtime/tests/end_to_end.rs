use desktop_runtime::{
    load_boot_state, AppId, DesktopAction, DesktopError, DesktopStore, EffectExecutor,
    OverlayKind, RuntimeEffect, WindowPresentation,
};
use platform_host::{JsonFilePrefsStore, NoopExternalUrlService};
use pretty_assertions::assert_eq;

fn dispatch(store: &mut DesktopStore, action: DesktopAction) -> Vec<RuntimeEffect> {
    store.dispatch(action).expect("dispatch")
}

fn open(store: &mut DesktopStore, app_id: AppId) {
    dispatch(store, DesktopAction::OpenApp { app_id });
}

#[test]
fn notes_and_terminal_session() {
    let mut store = DesktopStore::default();
    assert!(store.list_windows().iter().all(|w| !w.is_open));
    assert!(!store.is_stage_mode());

    open(&mut store, AppId::Notes);
    let notes = store.window(AppId::Notes);
    assert!(notes.is_open);
    assert_eq!(store.active_app(), Some(AppId::Notes));
    assert!(store
        .list_windows()
        .iter()
        .all(|w| w.app_id == AppId::Notes || w.z_index < notes.z_index));

    open(&mut store, AppId::Terminal);
    assert_eq!(store.active_app(), Some(AppId::Terminal));
    let terminal_z = store.window(AppId::Terminal).z_index;
    assert!(terminal_z > store.window(AppId::Notes).z_index);
    assert!(store.window(AppId::Notes).is_open);

    dispatch(
        &mut store,
        DesktopAction::MinimizeWindow {
            app_id: AppId::Terminal,
        },
    );
    assert!(store.window(AppId::Terminal).minimized);
    assert_eq!(store.active_app(), None);
    let notes = store.window(AppId::Notes);
    assert!(notes.is_open && !notes.minimized);

    dispatch(
        &mut store,
        DesktopAction::FocusWindow {
            app_id: AppId::Notes,
        },
    );
    assert_eq!(store.active_app(), Some(AppId::Notes));
    assert!(store.window(AppId::Notes).z_index > terminal_z);
}

#[test]
fn close_and_minimize_clear_focus() {
    let mut store = DesktopStore::default();
    open(&mut store, AppId::Safari);
    dispatch(
        &mut store,
        DesktopAction::CloseWindow {
            app_id: AppId::Safari,
        },
    );
    assert_eq!(store.active_app(), None);

    open(&mut store, AppId::Camera);
    dispatch(
        &mut store,
        DesktopAction::MinimizeWindow {
            app_id: AppId::Camera,
        },
    );
    assert_eq!(store.active_app(), None);
    assert!(store.window(AppId::Camera).is_open);
}

#[test]
fn maximize_round_trip_restores_geometry() {
    let mut store = DesktopStore::default();
    open(&mut store, AppId::Finder);
    let before = store.window(AppId::Finder);
    for _ in 0..2 {
        dispatch(
            &mut store,
            DesktopAction::ToggleMaximize {
                app_id: AppId::Finder,
            },
        );
    }
    assert_eq!(store.window(AppId::Finder), before);
}

#[test]
fn focus_closes_the_palette() {
    let mut store = DesktopStore::default();
    open(&mut store, AppId::Notes);
    dispatch(
        &mut store,
        DesktopAction::SetOverlay {
            overlay: OverlayKind::Spotlight,
            open: true,
        },
    );
    assert!(store.is_overlay_open(OverlayKind::Spotlight));

    dispatch(
        &mut store,
        DesktopAction::FocusWindow {
            app_id: AppId::Notes,
        },
    );
    assert!(!store.is_overlay_open(OverlayKind::Spotlight));
}

#[test]
fn stage_mode_swaps_foreground_on_focus() {
    let mut store = DesktopStore::default();
    dispatch(&mut store, DesktopAction::SetStageMode { enabled: true });
    open(&mut store, AppId::Safari);
    open(&mut store, AppId::Notes);

    assert_eq!(
        store.presentation(AppId::Safari),
        WindowPresentation::StagedBackground
    );
    assert_eq!(
        store.presentation(AppId::Notes),
        WindowPresentation::VisibleForeground
    );
    assert_eq!(store.stage_rail(), vec![AppId::Safari]);

    dispatch(
        &mut store,
        DesktopAction::FocusWindow {
            app_id: AppId::Safari,
        },
    );
    assert_eq!(
        store.presentation(AppId::Safari),
        WindowPresentation::VisibleForeground
    );
    assert_eq!(
        store.presentation(AppId::Notes),
        WindowPresentation::StagedBackground
    );
}

#[test]
fn unknown_ids_are_rejected_at_the_boundary() {
    for raw in ["trash", "", "notes2"] {
        assert!(matches!(
            raw.parse::<AppId>(),
            Err(DesktopError::UnknownApp(_))
        ));
    }
    assert_eq!(" Terminal ".parse::<AppId>().expect("parse"), AppId::Terminal);
}

#[test]
fn layout_survives_a_restart_through_the_prefs_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let prefs = JsonFilePrefsStore::new(dir.path().join("state.json"));
    let urls = NoopExternalUrlService;

    let mut first = DesktopStore::default();
    for app_id in [AppId::Notes, AppId::Terminal, AppId::Safari] {
        open(&mut first, app_id);
    }
    let effects = dispatch(
        &mut first,
        DesktopAction::MinimizeWindow {
            app_id: AppId::Safari,
        },
    );
    EffectExecutor::new(&prefs, &urls)
        .run(first.state(), &effects)
        .expect("persist");

    let boot = load_boot_state(&prefs).expect("boot");
    let mut second = DesktopStore::default();
    dispatch(
        &mut second,
        DesktopAction::HydrateSnapshot {
            snapshot: boot.layout.expect("layout saved"),
        },
    );

    assert_eq!(second.active_app(), Some(AppId::Terminal));
    assert!(second.window(AppId::Notes).is_open);
    assert!(second.window(AppId::Safari).minimized);
    assert!(
        second.window(AppId::Terminal).z_index > second.window(AppId::Notes).z_index
    );
}
