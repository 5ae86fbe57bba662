//! Spotlight and Control Center show/hide flags.

use serde::{Deserialize, Serialize};

use crate::model::OverlayKind;

/// Two independent overlay flags. Window focus closes both through [`OverlayToggles::close_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverlayToggles {
    spotlight: bool,
    control_center: bool,
}

impl OverlayToggles {
    pub fn is_open(&self, kind: OverlayKind) -> bool {
        match kind {
            OverlayKind::Spotlight => self.spotlight,
            OverlayKind::ControlCenter => self.control_center,
        }
    }

    /// Sets `kind` and returns whether the flag changed.
    pub fn set(&mut self, kind: OverlayKind, open: bool) -> bool {
        let slot = self.slot_mut(kind);
        let changed = *slot != open;
        *slot = open;
        changed
    }

    /// Flips `kind` and returns the new value.
    pub fn toggle(&mut self, kind: OverlayKind) -> bool {
        let slot = self.slot_mut(kind);
        *slot = !*slot;
        *slot
    }

    pub fn close_all(&mut self) {
        self.spotlight = false;
        self.control_center = false;
    }

    pub fn any_open(&self) -> bool {
        self.spotlight || self.control_center
    }

    fn slot_mut(&mut self, kind: OverlayKind) -> &mut bool {
        match kind {
            OverlayKind::Spotlight => &mut self.spotlight,
            OverlayKind::ControlCenter => &mut self.control_center,
        }
    }
}
