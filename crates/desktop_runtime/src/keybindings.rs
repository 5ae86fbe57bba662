//! Global keyboard shortcuts mapped onto reducer actions.

use std::fmt;

use crate::model::OverlayKind;
use crate::reducer::DesktopAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

/// A key press as reported by the host (`key` follows DOM `KeyboardEvent.key` names).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub mods: KeyModifiers,
}

impl KeyPress {
    pub fn plain(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            mods: KeyModifiers::default(),
        }
    }

    pub fn with_ctrl(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            mods: KeyModifiers {
                ctrl: true,
                ..KeyModifiers::default()
            },
        }
    }

    pub fn with_meta(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            mods: KeyModifiers {
                meta: true,
                ..KeyModifiers::default()
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    ToggleSpotlight,
    DismissSpotlight,
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Shortcut::ToggleSpotlight => "Toggle Spotlight (Ctrl/Cmd+Space)",
            Shortcut::DismissSpotlight => "Close Spotlight (Esc)",
        };
        write!(f, "{}", s)
    }
}

impl Shortcut {
    pub const ALL: [Shortcut; 2] = [Shortcut::ToggleSpotlight, Shortcut::DismissSpotlight];

    pub fn action(self) -> DesktopAction {
        match self {
            Shortcut::ToggleSpotlight => DesktopAction::ToggleOverlay {
                overlay: OverlayKind::Spotlight,
            },
            Shortcut::DismissSpotlight => DesktopAction::SetOverlay {
                overlay: OverlayKind::Spotlight,
                open: false,
            },
        }
    }
}

pub fn match_shortcut(press: &KeyPress) -> Option<Shortcut> {
    let command = press.mods.ctrl || press.mods.meta;
    match press.key.as_str() {
        " " | "Spacebar" if command => Some(Shortcut::ToggleSpotlight),
        "Escape" => Some(Shortcut::DismissSpotlight),
        _ => None,
    }
}

/// Resolves a key press straight to the action it dispatches.
pub fn shortcut_action(press: &KeyPress) -> Option<DesktopAction> {
    match_shortcut(press).map(Shortcut::action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_or_meta_space_toggles_spotlight() {
        assert_eq!(
            match_shortcut(&KeyPress::with_ctrl(" ")),
            Some(Shortcut::ToggleSpotlight)
        );
        assert_eq!(
            match_shortcut(&KeyPress::with_meta(" ")),
            Some(Shortcut::ToggleSpotlight)
        );
        assert_eq!(match_shortcut(&KeyPress::plain(" ")), None);
    }

    #[test]
    fn escape_always_dismisses() {
        assert_eq!(
            shortcut_action(&KeyPress::plain("Escape")),
            Some(DesktopAction::SetOverlay {
                overlay: OverlayKind::Spotlight,
                open: false,
            })
        );
        assert_eq!(shortcut_action(&KeyPress::plain("a")), None);
    }
}
