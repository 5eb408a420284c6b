use crate::error::{ProcessingError, Result};
use tracing::{error, info};
use url::Url;

/// Marks the start of the Markdown body in the proxy's response.
pub const MARKDOWN_DELIMITER: &str = "Markdown Content:";

/// Parses a client-supplied target; only absolute http(s) URLs are accepted.
pub fn parse_target(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ProcessingError::bad_request(format!("Invalid URL {:?}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" if url.host().is_some() => Ok(url),
        _ => Err(ProcessingError::bad_request(format!(
            "Invalid URL {:?}: only http and https URLs are supported",
            raw
        ))),
    }
}

/// Everything after the first delimiter, trimmed.
pub fn extract_markdown_segment(body: &str) -> Option<String> {
    body.split_once(MARKDOWN_DELIMITER)
        .map(|(_, markdown)| markdown.trim().to_string())
}

/// Fetches a URL rendered as Markdown by a third-party proxy.
///
/// The proxy is treated as unreliable: every failure is logged and reported
/// as `None`, never as an error.
#[derive(Clone)]
pub struct UrlExtractor {
    client: reqwest::Client,
    prefix: String,
}

impl UrlExtractor {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            prefix: prefix.into(),
        }
    }

    pub fn proxy_url(&self, target: &Url) -> String {
        format!("{}{}", self.prefix, target)
    }

    pub async fn extract(&self, target: &Url) -> Option<String> {
        let markdown_url = self.proxy_url(target);
        info!(url = %markdown_url, "Fetching markdown from URL proxy");

        let response = match self.client.get(&markdown_url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(url = %markdown_url, error = %e, "Couldn't get markdown from URL");
                return None;
            }
        };

        if !response.status().is_success() {
            error!(
                url = %markdown_url,
                status = %response.status(),
                "Couldn't get markdown from URL"
            );
            return None;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!(url = %markdown_url, error = %e, "Couldn't read markdown response");
                return None;
            }
        };

        let markdown = extract_markdown_segment(&body);
        if markdown.is_none() {
            error!(url = %markdown_url, "Couldn't clean markdown for URL");
        }
        markdown
    }
}
