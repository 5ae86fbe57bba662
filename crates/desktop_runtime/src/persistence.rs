//! Desktop runtime persistence adapters for boot hydration and lightweight preferences.

use platform_host::{load_pref_with, save_pref_with, PrefsStore};

use crate::error::DesktopResult;
use crate::model::{DesktopSnapshot, DesktopState, ThemeMode, UserProfile};

pub const LAYOUT_KEY: &str = "desk.layout.v1";
pub const THEME_KEY: &str = "desk.theme.v1";
pub const SESSION_KEY: &str = "desk.session.v1";

/// Everything a previous session left behind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BootState {
    pub layout: Option<DesktopSnapshot>,
    pub theme: Option<ThemeMode>,
    pub user: Option<UserProfile>,
}

/// Loads the layout snapshot, theme override, and signed-in profile if present.
///
/// Malformed entries are logged and skipped so one bad key never blocks boot.
///
/// # Errors
///
/// Returns an error only when the store itself cannot be read.
pub fn load_boot_state<S: PrefsStore + ?Sized>(store: &S) -> DesktopResult<BootState> {
    Ok(BootState {
        layout: load_lenient(store, LAYOUT_KEY)?,
        theme: load_lenient(store, THEME_KEY)?,
        user: load_lenient(store, SESSION_KEY)?,
    })
}

fn load_lenient<S, T>(store: &S, key: &str) -> DesktopResult<Option<T>>
where
    S: PrefsStore + ?Sized,
    T: serde::de::DeserializeOwned,
{
    match load_pref_with::<S, T>(store, key) {
        Ok(value) => Ok(value),
        Err(platform_host::HostError::Serialization(err)) => {
            tracing::warn!(key, %err, "discarding malformed persisted value");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn persist_layout_snapshot<S: PrefsStore + ?Sized>(
    store: &S,
    state: &DesktopState,
) -> DesktopResult<()> {
    save_pref_with(store, LAYOUT_KEY, &state.snapshot())?;
    Ok(())
}

/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn persist_theme<S: PrefsStore + ?Sized>(store: &S, theme: ThemeMode) -> DesktopResult<()> {
    save_pref_with(store, THEME_KEY, &theme)?;
    Ok(())
}

/// Saves the profile, or deletes the key when nobody is signed in.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn persist_session<S: PrefsStore + ?Sized>(
    store: &S,
    user: Option<&UserProfile>,
) -> DesktopResult<()> {
    match user {
        Some(user) => save_pref_with(store, SESSION_KEY, user)?,
        None => store.delete_pref(SESSION_KEY)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryPrefsStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::AppId;
    use crate::window_manager::open_and_focus;

    #[test]
    fn empty_store_boots_clean() {
        let store = MemoryPrefsStore::default();
        assert_eq!(load_boot_state(&store).expect("load"), BootState::default());
    }

    #[test]
    fn persisted_values_come_back() {
        let store = MemoryPrefsStore::default();
        let mut state = DesktopState::default();
        open_and_focus(&mut state, AppId::Notes);

        persist_layout_snapshot(&store, &state).expect("layout");
        persist_theme(&store, ThemeMode::Light).expect("theme");
        persist_session(&store, Some(&UserProfile::admin())).expect("session");

        let boot = load_boot_state(&store).expect("load");
        assert_eq!(boot.layout, Some(state.snapshot()));
        assert_eq!(boot.theme, Some(ThemeMode::Light));
        assert_eq!(boot.user, Some(UserProfile::admin()));

        persist_session(&store, None).expect("clear");
        assert_eq!(load_boot_state(&store).expect("load").user, None);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let store = MemoryPrefsStore::default();
        store.save_pref(LAYOUT_KEY, "{\"windows\": 3}").expect("raw");
        persist_theme(&store, ThemeMode::Dark).expect("theme");

        let boot = load_boot_state(&store).expect("load");
        assert_eq!(boot.layout, None);
        assert_eq!(boot.theme, Some(ThemeMode::Dark));
    }
}
