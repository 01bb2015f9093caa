use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use url::Url;

use crate::cancel::CancelToken;
use crate::config::FetchConfig;
use crate::error::FetchError;

/// Rejects anything that is not an absolute http/https URL, before any
/// network call is made.
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
    let parsed =
        Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(FetchError::InvalidUrl(format!(
            "{url}: unsupported scheme '{scheme}'"
        ))),
    }
}

/// Blocking page fetcher.
///
/// Holds a single reqwest client so the connection pool is built once and
/// reused across calls. Issues exactly one GET per fetch with a browser user
/// agent and a bounded timeout; redirects are followed. Retrying is left to
/// the caller.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Fetcher { client })
    }

    pub fn fetch(&self, url: &Url, cancel: &CancelToken) -> Result<String, FetchError> {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        response.text().map_err(map_transport_error)
    }
}

fn map_transport_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_schemes() {
        assert!(matches!(
            validate_url("ftp://example.com/recette"),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_url("file:///etc/passwd"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_urls() {
        assert!(matches!(
            validate_url("pas une url"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_url("http://example.com/recette").is_ok());
        assert!(validate_url("https://www.marmiton.org/recettes/tarte").is_ok());
    }

    #[test]
    fn test_fetch_maps_http_status() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create();

        let fetcher = Fetcher::new(&FetchConfig::default()).unwrap();
        let url = validate_url(&format!("{}/missing", server.url())).unwrap();
        let result = fetcher.fetch(&url, &CancelToken::new());
        assert!(matches!(result, Err(FetchError::HttpStatus { status: 404 })));
    }

    #[test]
    fn test_fetch_honours_cancellation() {
        let fetcher = Fetcher::new(&FetchConfig::default()).unwrap();
        let url = validate_url("http://example.com/").unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        assert!(matches!(
            fetcher.fetch(&url, &cancel),
            Err(FetchError::Cancelled)
        ));
    }
}
