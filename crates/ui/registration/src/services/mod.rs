//! Outbound services: the submission client and its transport strategies.
pub mod submission;

#[cfg(any(test, feature = "mock"))]
pub mod interception;

use std::sync::Arc;

use tracing::info;

use crate::config::{Config, EndpointError};
use submission::{HttpTransport, SubmissionClient, Transport};

/// Which transport the app was started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Http,
    #[cfg(any(test, feature = "mock"))]
    Intercepted,
}

/// Pick the transport strategy once at startup.
///
/// Production always gets the plain HTTP transport, even when the binary was
/// compiled with the `mock` feature.
#[cfg(any(test, feature = "mock"))]
pub fn select_transport(config: &Config) -> TransportKind {
    if wants_interception(config) {
        TransportKind::Intercepted
    } else {
        TransportKind::Http
    }
}

#[cfg(not(any(test, feature = "mock")))]
pub fn select_transport(config: &Config) -> TransportKind {
    if wants_interception(config) {
        tracing::warn!(
            mode = %config.mode,
            "mock requested but this build lacks the `mock` feature; requests go to the real endpoint"
        );
    }
    TransportKind::Http
}

/// Config asks for interception and the mode allows it.
fn wants_interception(config: &Config) -> bool {
    !config.mode.is_production() && config.mock_enabled()
}

/// Build the submission client for `config`.
pub fn submission_client(config: &Config) -> Result<SubmissionClient, EndpointError> {
    let url = config.submit_url()?;
    let http: Arc<dyn Transport> = Arc::new(HttpTransport::new());
    let transport: Arc<dyn Transport> = match select_transport(config) {
        TransportKind::Http => http,
        #[cfg(any(test, feature = "mock"))]
        TransportKind::Intercepted => {
            let raw = config.endpoint()?;
            let endpoint = url::Url::parse(&raw)
                .map_err(|source| EndpointError::Invalid { url: raw, source })?;
            Arc::new(interception::InterceptingTransport::for_endpoint(http, endpoint))
        }
    };
    info!(mode = %config.mode, url = %url, transport = transport.name(), "submission client ready");
    Ok(SubmissionClient::new(transport, url))
}
