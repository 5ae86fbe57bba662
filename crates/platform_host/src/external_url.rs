//! External URL host-service contracts.

use std::{cell::RefCell, rc::Rc};

use crate::HostError;

/// Host service for opening external URLs outside the desktop shell.
pub trait ExternalUrlService {
    /// Opens a URL using the host's external navigation mechanism.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot hand the URL off.
    fn open_url(&self, url: &str) -> Result<(), HostError>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op external URL service for hosts without a browser.
pub struct NoopExternalUrlService;

impl ExternalUrlService for NoopExternalUrlService {
    fn open_url(&self, _url: &str) -> Result<(), HostError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// URL service that records every request instead of navigating.
///
/// Used for dry runs and tests.
pub struct RecordingExternalUrlService {
    opened: Rc<RefCell<Vec<String>>>,
}

impl RecordingExternalUrlService {
    /// Returns every URL opened so far, oldest first.
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl ExternalUrlService for RecordingExternalUrlService {
    fn open_url(&self, url: &str) -> Result<(), HostError> {
        tracing::debug!(url, "recording external url");
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_service_keeps_urls_in_order() {
        let service = RecordingExternalUrlService::default();
        let handle: &dyn ExternalUrlService = &service;
        handle.open_url("https://a.example").expect("open a");
        handle.open_url("https://b.example").expect("open b");

        assert_eq!(
            service.opened(),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(service.clone().opened().len(), 2);
    }
}
