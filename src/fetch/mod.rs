// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

// The quote pages answer bot-looking agents with a consent wall.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// HTTP client used for the single page fetch.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .gzip(true)
        .cookie_store(true)
        .timeout(timeout)
        .build()
        .context("building HTTP client")
}

/// GET `url` and return the body. Transport failures and non-success statuses are errors.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String> {
    debug!("Fetching page");
    let body = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))?;
    debug!(bytes = body.len(), "Fetched page");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer one request on a local port with `status` and `body`.
    async fn serve_once(status: &'static str, body: &'static str) -> Result<Url> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let Ok((mut sock, _)) = listener.accept().await else {
                return;
            };
            let mut req = Vec::new();
            let mut buf = [0u8; 1024];
            while !req.windows(4).any(|w| w == b"\r\n\r\n") {
                match sock.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => req.extend_from_slice(&buf[..n]),
                }
            }
            let resp = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = sock.write_all(resp.as_bytes()).await;
            let _ = sock.shutdown().await;
        });
        Ok(Url::parse(&format!(
            "http://{addr}/quote/AAPL/options?date=1700006400"
        ))?)
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(Duration::from_secs(5)).is_ok());
    }

    #[tokio::test]
    async fn test_connection_refused_names_url() -> Result<()> {
        let client = build_client(Duration::from_secs(5))?;
        // port 1 is tcpmux; nothing listens there on a dev box
        let url = Url::parse("http://127.0.0.1:1/quote/AAPL/options?date=0")?;
        let err = fetch_page(&client, &url).await.unwrap_err();
        assert!(format!("{err:#}").contains("127.0.0.1:1"));
        Ok(())
    }

    #[tokio::test]
    async fn test_not_found_is_error() -> Result<()> {
        let url = serve_once("404 Not Found", "gone").await?;
        let client = build_client(Duration::from_secs(5))?;
        let err = fetch_page(&client, &url).await.unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Non-success status"), "{msg}");
        assert!(msg.contains("404"), "{msg}");
        Ok(())
    }

    #[tokio::test]
    async fn test_ok_returns_body() -> Result<()> {
        let url = serve_once("200 OK", "<table class=\"calls\"></table>").await?;
        let client = build_client(Duration::from_secs(5))?;
        assert_eq!(
            fetch_page(&client, &url).await?,
            "<table class=\"calls\"></table>"
        );
        Ok(())
    }
}
