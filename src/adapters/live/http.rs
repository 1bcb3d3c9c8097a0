//! Live adapter that downloads image bytes over HTTP(S).

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::ImageError;
use crate::ports::image_fetcher::{FetchFuture, ImageFetcher};

/// Upper bound on a single image download.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches generated images with a plain GET and a fixed timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests time out after [`FETCH_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, ImageError> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    /// Create a fetcher with a custom per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ImageError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> FetchFuture<'_> {
        Box::pin(fetch_body(&self.client, url.to_string()))
    }
}

async fn fetch_body(client: &Client, url: String) -> Result<Vec<u8>, ImageError> {
    let response = client.get(&url).send().await?;
    // The body is returned whatever the status; decoding reports bad payloads.
    let status = response.status();
    let bytes = response.bytes().await?;
    debug!(%url, %status, len = bytes.len(), "fetched image");
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Serve a single connection on a local port with `respond`.
    fn serve_once<F>(respond: F) -> String
    where
        F: FnOnce(std::net::TcpStream) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                respond(stream);
            }
        });
        format!("http://{addr}/image.png")
    }

    #[tokio::test]
    async fn error_status_body_is_returned() {
        let url = serve_once(|mut stream| {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\n\
                  Content-Length: 9\r\n\
                  Connection: close\r\n\r\n\
                  not found",
            );
        });

        let fetcher = HttpFetcher::new().unwrap();
        let body = fetcher.fetch(&url).await.unwrap();

        assert_eq!(body, b"not found");
    }

    #[tokio::test]
    async fn silent_host_times_out() {
        let url = serve_once(|mut stream| {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            thread::sleep(Duration::from_secs(2));
        });

        let fetcher = HttpFetcher::with_timeout(Duration::from_millis(200)).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(
            matches!(&err, ImageError::Network(e) if e.is_timeout()),
            "expected timeout, got: {err}"
        );
    }

    #[test]
    fn default_timeout_is_ten_seconds() {
        assert_eq!(FETCH_TIMEOUT, Duration::from_secs(10));
    }
}
