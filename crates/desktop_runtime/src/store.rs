//! Owned desktop state container with a single dispatch entry point and change subscriptions.
//!
//! Presentation layers read snapshots through the accessors and re-derive visibility each time
//! they are notified; they never mutate state directly.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::DesktopError;
use crate::model::{AppId, DesktopState, InteractionState, OverlayKind, Viewport, WindowRecord};
use crate::reducer::{reduce_desktop, DesktopAction, DesktopPolicy, RuntimeEffect};
use crate::visibility::{self, WindowPresentation, WindowView};

/// Handle returned by [`DesktopStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&DesktopState, &[RuntimeEffect]) + Send>;

pub struct DesktopStore {
    state: DesktopState,
    interaction: InteractionState,
    policy: DesktopPolicy,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl std::fmt::Debug for DesktopStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopStore")
            .field("state", &self.state)
            .field("interaction", &self.interaction)
            .field("policy", &self.policy)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for DesktopStore {
    fn default() -> Self {
        Self::new(DesktopState::default(), DesktopPolicy::default())
    }
}

impl DesktopStore {
    pub fn new(state: DesktopState, policy: DesktopPolicy) -> Self {
        Self {
            state,
            interaction: InteractionState::default(),
            policy,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Runs `action` through the reducer and notifies listeners when state changed.
    ///
    /// # Errors
    ///
    /// Propagates reducer errors; listeners are not notified for a failed action.
    pub fn dispatch(&mut self, action: DesktopAction) -> Result<Vec<RuntimeEffect>, DesktopError> {
        let before = self.state.clone();
        let effects = reduce_desktop(&mut self.state, &mut self.interaction, &self.policy, action)?;
        if self.state != before || !effects.is_empty() {
            for (_, listener) in &mut self.listeners {
                listener(&self.state, &effects);
            }
        }
        Ok(effects)
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&DesktopState, &[RuntimeEffect]) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `true` when `id` was subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn policy(&self) -> &DesktopPolicy {
        &self.policy
    }

    pub fn window(&self, app_id: AppId) -> WindowRecord {
        self.state.window(app_id).clone()
    }

    pub fn list_windows(&self) -> Vec<WindowRecord> {
        self.state.windows.iter().cloned().collect()
    }

    pub fn active_app(&self) -> Option<AppId> {
        self.state.active_app
    }

    pub fn is_stage_mode(&self) -> bool {
        self.state.stage_mode
    }

    pub fn is_overlay_open(&self, overlay: OverlayKind) -> bool {
        self.state.overlays.is_open(overlay)
    }

    pub fn presentation(&self, app_id: AppId) -> WindowPresentation {
        visibility::presentation(
            self.state.window(app_id),
            self.state.active_app,
            self.state.stage_mode,
        )
    }

    pub fn render_plan(&self, viewport: Viewport, menu_bar_height: i32) -> Vec<WindowView> {
        visibility::render_plan(&self.state, viewport, menu_bar_height)
    }

    pub fn stage_rail(&self) -> Vec<AppId> {
        visibility::stage_rail(&self.state)
    }
}

/// [`DesktopStore`] behind one mutex, for event sources on more than one thread.
///
/// The lock covers the registry and the z-order counter together, so every dispatch completes
/// before the next begins.
#[derive(Debug, Clone, Default)]
pub struct SharedDesktopStore {
    inner: Arc<Mutex<DesktopStore>>,
}

impl SharedDesktopStore {
    pub fn new(store: DesktopStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Dispatches under the lock.
    ///
    /// # Errors
    ///
    /// Propagates reducer errors.
    pub fn dispatch(&self, action: DesktopAction) -> Result<Vec<RuntimeEffect>, DesktopError> {
        self.with(|store| store.dispatch(action))
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut DesktopStore) -> R) -> R {
        // A listener that panicked mid-notification leaves the state itself consistent.
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }

    pub fn snapshot(&self) -> DesktopState {
        self.with(|store| store.state().clone())
    }
}
