use std::time::Duration;

/// Connection settings shared by the HTTP repositories.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Origin of the org backend, e.g. `https://portal.example.org`.
    pub base_url: String,
    /// Endpoint of the external major-list directory.
    pub majors_url: String,
    /// Session credential applied to credentialed requests.
    pub session_token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            majors_url: "https://api.umd.io/v1/majors/list".to_string(),
            session_token: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl PortalConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn with_majors_url(mut self, majors_url: impl Into<String>) -> Self {
        self.majors_url = majors_url.into();
        self
    }
}
