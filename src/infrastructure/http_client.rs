use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::domain::errors::DomainError;
use crate::infrastructure::config::PortalConfig;

/// Keep a stable product token so upstream API gateways can whitelist requests.
pub const APP_USER_AGENT: &str = concat!("PeoplePortal/", env!("CARGO_PKG_VERSION"));

pub fn apply_default_user_agent(builder: ClientBuilder) -> ClientBuilder {
    builder.user_agent(APP_USER_AGENT)
}

pub fn build_http_client(config: &PortalConfig) -> Result<Client, DomainError> {
    apply_default_user_agent(Client::builder())
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()
        .map_err(|error| {
            DomainError::InternalError(format!("Failed to build HTTP client: {error}"))
        })
}

/// Client for direct storage uploads: same agent, but a longer request
/// budget since avatar POSTs can ride slow links.
pub fn build_upload_client(config: &PortalConfig) -> Result<Client, DomainError> {
    apply_default_user_agent(Client::builder())
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout.max(Duration::from_secs(120)))
        .build()
        .map_err(|error| {
            DomainError::InternalError(format!("Failed to build upload client: {error}"))
        })
}

#[cfg(test)]
mod tests {
    use super::APP_USER_AGENT;

    #[test]
    fn app_user_agent_matches_package_version() {
        assert_eq!(
            APP_USER_AGENT,
            concat!("PeoplePortal/", env!("CARGO_PKG_VERSION"))
        );
    }
}
