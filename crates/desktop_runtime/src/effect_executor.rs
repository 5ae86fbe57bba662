//! Runs reducer effects against host services.

use platform_host::{ExternalUrlService, PrefsStore};

use crate::error::DesktopResult;
use crate::model::DesktopState;
use crate::persistence;
use crate::reducer::RuntimeEffect;

/// Executes [`RuntimeEffect`]s after a dispatch. Effects never roll state back; a failing host
/// call is logged and reported.
pub struct EffectExecutor<'a> {
    prefs: &'a dyn PrefsStore,
    urls: &'a dyn ExternalUrlService,
}

impl<'a> EffectExecutor<'a> {
    pub fn new(prefs: &'a dyn PrefsStore, urls: &'a dyn ExternalUrlService) -> Self {
        Self { prefs, urls }
    }

    /// Runs every effect in order, continuing past failures.
    ///
    /// # Errors
    ///
    /// Returns the first failure after all effects were attempted.
    pub fn run(&self, state: &DesktopState, effects: &[RuntimeEffect]) -> DesktopResult<()> {
        let mut first_error = None;
        for effect in effects {
            if let Err(err) = self.run_one(state, effect) {
                tracing::warn!(?effect, %err, "runtime effect failed");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn run_one(&self, state: &DesktopState, effect: &RuntimeEffect) -> DesktopResult<()> {
        match effect {
            RuntimeEffect::PersistLayout => persistence::persist_layout_snapshot(self.prefs, state),
            RuntimeEffect::PersistTheme => persistence::persist_theme(self.prefs, state.theme),
            RuntimeEffect::PersistSession | RuntimeEffect::ClearSession => {
                persistence::persist_session(self.prefs, state.user.as_ref())
            }
            RuntimeEffect::OpenExternalUrl(url) => Ok(self.urls.open_url(url)?),
            RuntimeEffect::LoginRejected => Ok(()),
        }
    }
}
