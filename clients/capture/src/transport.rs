use relay::model::result::{RelayErrorBody, RelayResult};
use reqwest::Client;
use serde_json::{Map, Value};
use thiserror::Error;

const DEFAULT_REJECTION: &str = "Submission failed";

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Could not reach the relay: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Relay rejected the submission: {0}")]
    Rejected(String),

    #[error("Relay response could not be read: {0}")]
    MalformedResponse(String),
}

/// The single outbound call a submission makes
#[allow(async_fn_in_trait)]
pub trait RelayTransport {
    async fn send(&self, payload: &Map<String, Value>) -> Result<RelayResult, CaptureError>;
}

/// Posts submissions to the relay endpoint as JSON
pub struct HttpRelayTransport {
    client: Client,
    endpoint: String,
}

impl HttpRelayTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RelayTransport for HttpRelayTransport {
    async fn send(&self, payload: &Map<String, Value>) -> Result<RelayResult, CaptureError> {
        let response = self.client.post(&self.endpoint).json(payload).send().await?;

        let status = response.status();
        let body = response.text().await?;

        read_relay_response(status.is_success(), &body)
    }
}

/// Interprets a relay reply. Non-2xx replies carry `{success: false, error}`, the error text is
/// surfaced when present.
pub fn read_relay_response(is_success: bool, body: &str) -> Result<RelayResult, CaptureError> {
    if !is_success {
        let error = serde_json::from_str::<RelayErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| DEFAULT_REJECTION.to_string());

        return Err(CaptureError::Rejected(error));
    }

    let result: RelayResult = serde_json::from_str(body)
        .map_err(|e| CaptureError::MalformedResponse(e.to_string()))?;

    if !result.success {
        return Err(CaptureError::Rejected(DEFAULT_REJECTION.to_string()));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod http {
        use std::{
            io::{Read, Write},
            net::{SocketAddr, TcpListener, TcpStream},
            thread::{self, JoinHandle},
        };

        use serde_json::json;

        use super::*;

        fn read_request(stream: &mut TcpStream) -> String {
            let mut buffer = Vec::new();
            let mut chunk = [0; 1024];

            loop {
                let read = stream.read(&mut chunk).expect("request should be readable");
                if read == 0 {
                    break;
                }
                buffer.extend_from_slice(&chunk[..read]);

                let text = String::from_utf8_lossy(&buffer);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .filter_map(|line| line.split_once(':'))
                        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);

                    if buffer.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            String::from_utf8_lossy(&buffer).into_owned()
        }

        /// Stands in for the relay for exactly one request
        fn serve_once(status: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<String>) {
            let listener = TcpListener::bind("127.0.0.1:0").expect("should bind");
            let address = listener.local_addr().expect("should have an address");

            let handle = thread::spawn(move || {
                let (mut stream, _) = listener.accept().expect("should accept");
                let request = read_request(&mut stream);

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                stream
                    .write_all(response.as_bytes())
                    .expect("should write response");

                request
            });

            (address, handle)
        }

        fn payload() -> Map<String, Value> {
            match json!({ "fullName": "Jane Doe", "phone": "0400000000", "source": "contact" }) {
                Value::Object(map) => map,
                _ => unreachable!(),
            }
        }

        #[tokio::test]
        async fn posts_json_and_reads_result() {
            // Given a relay that accepts the submission
            let (address, server) = serve_once(
                "200 OK",
                r#"{"success": true, "message": "Thanks", "person_created": true, "opportunity_created": true}"#,
            );
            let transport = HttpRelayTransport::new(format!("http://{}/submit", address));

            // When the form is sent
            let result = transport.send(&payload()).await.expect("should be accepted");

            // Then the fields go out as a JSON body, and the relay's reply comes back
            let request = server.join().expect("server thread should finish");
            let (head, body) = request
                .split_once("\r\n\r\n")
                .expect("request should have a body");

            assert!(head.starts_with("POST /submit HTTP/1.1"));
            assert!(head
                .lines()
                .any(|line| line.eq_ignore_ascii_case("content-type: application/json")));
            assert_eq!(
                serde_json::from_str::<Value>(body).expect("body should be json"),
                Value::Object(payload())
            );

            assert_eq!(result.message.as_deref(), Some("Thanks"));
            assert!(result.person_created);
            assert!(result.opportunity_created);
        }

        #[tokio::test]
        async fn non_success_status_is_rejected() {
            let (address, server) = serve_once(
                "400 Bad Request",
                r#"{"success": false, "error": "Name is required"}"#,
            );
            let transport = HttpRelayTransport::new(format!("http://{}/submit", address));

            let result = transport.send(&payload()).await;
            server.join().expect("server thread should finish");

            assert!(matches!(result, Err(CaptureError::Rejected(e)) if e == "Name is required"));
        }
    }

    #[test]
    fn reads_success() {
        let result = read_relay_response(
            true,
            r#"{"success": true, "message": "Thanks", "person_created": true, "opportunity_created": false}"#,
        )
        .expect("should read");

        assert_eq!(result.message.as_deref(), Some("Thanks"));
        assert!(result.person_created);
        assert!(!result.opportunity_created);
    }

    #[test]
    fn surfaces_relay_error_text() {
        let result = read_relay_response(
            false,
            r#"{"success": false, "error": "Name is required"}"#,
        );

        assert!(matches!(result, Err(CaptureError::Rejected(e)) if e == "Name is required"));
    }

    #[test]
    fn unreadable_error_body_uses_default() {
        let result = read_relay_response(false, "<html>502 Bad Gateway</html>");

        assert!(matches!(result, Err(CaptureError::Rejected(e)) if e == DEFAULT_REJECTION));
    }

    #[test]
    fn malformed_success_body_is_an_error() {
        let result = read_relay_response(true, "OK");

        assert!(matches!(result, Err(CaptureError::MalformedResponse(_))));
    }

    #[test]
    fn unsuccessful_result_is_rejected() {
        let result = read_relay_response(true, r#"{"success": false}"#);

        assert!(matches!(result, Err(CaptureError::Rejected(_))));
    }
}
