//! Window, focus, and z-order runtime for a simulated desktop.
//!
//! [`DesktopStore`] owns the [`DesktopState`] and applies [`DesktopAction`]s through
//! [`reduce_desktop`]. Side effects come back as [`RuntimeEffect`] values for an
//! [`EffectExecutor`] to run against `platform_host` services.

pub mod config;
pub mod effect_executor;
pub mod error;
pub mod keybindings;
pub mod logging;
pub mod model;
pub mod overlay;
pub mod persistence;
pub mod reducer;
pub mod spotlight;
pub mod store;
pub mod visibility;
pub mod window_manager;

pub use config::{ConfigLoader, RuntimeConfig};
pub use effect_executor::EffectExecutor;
pub use error::{DesktopError, DesktopResult};
pub use model::*;
pub use overlay::OverlayToggles;
pub use persistence::{
    load_boot_state, persist_layout_snapshot, persist_session, persist_theme, BootState,
};
pub use reducer::{reduce_desktop, DesktopAction, DesktopPolicy, RuntimeEffect};
pub use spotlight::{search, IndexedItem, IndexedItemKind, SearchCursor, SearchResult};
pub use store::{DesktopStore, SharedDesktopStore, SubscriptionId};
pub use visibility::{render_plan, stage_rail, WindowPresentation, WindowView};
