//! Conversions from external infrastructure errors into domain errors.

use obscreen_domain::ObscreenError;
use reqwest::Error as HttpError;
use thiserror::Error;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct InfraError(#[from] pub ObscreenError);

impl From<InfraError> for ObscreenError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

trait IntoObscreenError {
    fn into_obscreen(self) -> ObscreenError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ObscreenError */
/* -------------------------------------------------------------------------- */

impl IntoObscreenError for HttpError {
    fn into_obscreen(self) -> ObscreenError {
        if self.is_timeout() {
            return ObscreenError::transport("HTTP request timed out");
        }

        if self.is_connect() {
            return ObscreenError::transport(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            return ObscreenError::api(
                code,
                status.canonical_reason().unwrap_or("unknown status").to_string(),
            );
        }

        if self.is_builder() {
            return ObscreenError::config(format!("Invalid HTTP request: {self}"));
        }

        if self.is_decode() || self.is_body() {
            return ObscreenError::transport(format!("Failed to read response body: {self}"));
        }

        ObscreenError::transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_obscreen())
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn http_status_404_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::NOT_FOUND))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: ObscreenError = InfraError::from(error).into();
        assert_eq!(mapped, ObscreenError::api(404, "Not Found"));
    }

    #[tokio::test]
    async fn connection_refused_maps_to_transport() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        let mapped: ObscreenError = InfraError::from(error).into();
        match mapped {
            ObscreenError::Transport { message } => assert!(message.contains("connection")),
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
