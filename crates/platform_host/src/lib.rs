//! Host-service contracts the desktop runtime executes its side effects against.
//!
//! The runtime never touches durable storage or the outside world directly. It emits effects,
//! and an executor runs them against the services defined here: a key/value preference store
//! for layout/theme/session snapshots and an external URL opener for web-search results.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod external_url;
pub mod storage;

pub use error::HostError;
pub use external_url::{ExternalUrlService, NoopExternalUrlService, RecordingExternalUrlService};
pub use storage::file_prefs::JsonFilePrefsStore;
pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore,
};
