use std::time::Duration;

use async_trait::async_trait;
use bestseat_types::Selection;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;

use crate::{PredictError, PredictionPayload, Predictor};

#[derive(Clone)]
pub struct PredictionClient {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl PredictionClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, PredictError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PredictError::Transport)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/predict", self.base_url)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check that the backend origin answers at all, returning its status code
    pub async fn check_connection(&self) -> Result<u16, PredictError> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| PredictError::transport(e, self.timeout))?;

        Ok(response.status().as_u16())
    }
}

#[async_trait]
impl Predictor for PredictionClient {
    async fn predict(&self, selection: &Selection) -> Result<PredictionPayload, PredictError> {
        let form = selection
            .fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| {
                form.text(name, value.to_string())
            });

        tracing::info!(
            "Requesting prediction: {} vs {} at {}",
            selection.team1,
            selection.team2,
            selection.venue
        );

        let response = self
            .client
            .post(self.endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(|e| PredictError::transport(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| PredictError::transport(e, self.timeout))?;
            tracing::warn!("Prediction backend returned {}", status);
            return Err(PredictError::request(status.as_u16(), body));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if !content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
        {
            tracing::warn!(
                "Prediction response has non-image content type: {:?}",
                content_type
            );
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PredictError::transport(e, self.timeout))?;

        tracing::debug!("Prediction image received: {} bytes", bytes.len());

        Ok(PredictionPayload {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-data";

    fn selection() -> Selection {
        Selection {
            team1: "New York Yankees".to_string(),
            team2: "Boston Red Sox".to_string(),
            venue: "Fenway Park".to_string(),
        }
    }

    /// Serve one canned response and hand back the raw request bytes
    async fn stub_server(
        status_line: &'static str,
        content_type: &'static str,
        body: &'static [u8],
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;

            let head = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(body).await.unwrap();
            let _ = socket.shutdown().await;

            request
        });

        (format!("http://{addr}"), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let lower = line.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .and_then(|v| v.trim().parse::<usize>().ok())
                    })
                    .unwrap_or(0);

                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&buf).to_string()
    }

    fn client(base_url: String) -> PredictionClient {
        PredictionClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = client("http://localhost:8000/".to_string());
        assert_eq!(client.endpoint(), "http://localhost:8000/predict");
    }

    #[tokio::test]
    async fn success_returns_image_bytes_and_posts_fields() {
        let (url, server) = stub_server("200 OK", "image/png", PNG_BYTES).await;

        let payload = client(url).predict(&selection()).await.unwrap();
        assert_eq!(payload.bytes, PNG_BYTES);
        assert_eq!(payload.content_type.as_deref(), Some("image/png"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /predict HTTP/1.1"));
        assert!(request.contains("multipart/form-data"));
        assert!(request.contains("name=\"team1\"\r\n\r\nNew York Yankees\r\n"));
        assert!(request.contains("name=\"team2\"\r\n\r\nBoston Red Sox\r\n"));
        assert!(request.contains("name=\"venue\"\r\n\r\nFenway Park\r\n"));
    }

    #[tokio::test]
    async fn failure_body_is_used_verbatim() {
        let (url, _server) =
            stub_server("400 Bad Request", "text/plain", b"Invalid venue").await;

        let err = client(url).predict(&selection()).await.unwrap_err();
        assert!(matches!(err, PredictError::Request { status: 400, .. }));
        assert_eq!(err.user_message(), "Invalid venue");
    }

    #[tokio::test]
    async fn empty_failure_body_falls_back() {
        let (url, _server) =
            stub_server("500 Internal Server Error", "text/plain", b"").await;

        let err = client(url).predict(&selection()).await.unwrap_err();
        assert_eq!(err.user_message(), "Server error");
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{addr}"))
            .predict(&selection())
            .await
            .unwrap_err();
        assert!(matches!(err, PredictError::Transport(_)));
        assert!(!err.user_message().is_empty());
    }

    #[tokio::test]
    async fn hung_backend_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let client =
            PredictionClient::new(format!("http://{addr}"), Duration::from_millis(200)).unwrap();
        let err = client.predict(&selection()).await.unwrap_err();

        assert!(matches!(err, PredictError::Timeout(_)));
        assert!(err.user_message().starts_with("Request timed out"));
    }

    #[tokio::test]
    async fn check_connection_reports_status() {
        let (url, _server) = stub_server("404 Not Found", "text/plain", b"").await;
        assert_eq!(client(url).check_connection().await.unwrap(), 404);
    }
}
