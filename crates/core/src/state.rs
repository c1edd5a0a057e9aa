use crate::wire::ServerInfo;

/// Shown in place of a version when metadata could not be fetched.
pub const VERSION_UNAVAILABLE: &str = "File not found";

/// Connectivity of the snapshot stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Open,
    Closed,
}

impl ConnectionStatus {
    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}

/// Presentation-facing page state around the rolling window.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Metadata request in flight.
    pub loading: bool,
    /// Metadata fetched successfully.
    pub loaded:  bool,
    pub info:    Option<ServerInfo>,
    /// Reason the metadata request failed, if it did.
    pub error:   Option<String>,
    pub status:  ConnectionStatus,
}

impl ViewState {
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn load_succeeded(&mut self, info: ServerInfo) {
        self.loading = false;
        self.loaded = true;
        self.error = None;
        self.info = Some(info);
    }

    pub fn load_failed(&mut self, error: String) {
        self.loading = false;
        self.loaded = false;
        self.error = Some(error);
    }

    /// Version string for display, or [`VERSION_UNAVAILABLE`] after a failure.
    pub fn version(&self) -> &str {
        match (&self.info, &self.error) {
            (Some(info), _) => info.version.as_str(),
            (None, Some(_)) => VERSION_UNAVAILABLE,
            (None, None) => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_lifecycle() {
        let mut view = ViewState::default();
        view.begin_load();
        assert!(view.loading && !view.loaded);

        view.load_succeeded(ServerInfo { version: "1.0.0".into(), name: "lab".into() });
        assert!(view.loaded && !view.loading);
        assert_eq!(view.version(), "1.0.0");
    }

    #[test]
    fn failed_load_reports_missing_version() {
        let mut view = ViewState::default();
        view.begin_load();
        view.load_failed("connection refused".into());
        assert!(!view.loaded);
        assert_eq!(view.version(), VERSION_UNAVAILABLE);
        assert_eq!(view.status, ConnectionStatus::Connecting);
    }
}
