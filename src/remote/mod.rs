//! SimpleLogin alias API client.

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api.simplelogin.io";

/// A failed alias fetch. Any non-success response is fatal for the run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("alias API returned {status} for page {page}: {body}")]
    Status { status: reqwest::StatusCode, page: u32, body: String },

    #[error("alias API request failed")]
    Transport(#[from] reqwest::Error),
}

/// Tri-state alias filters. `None` leaves the parameter off the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AliasFilter {
    pub pinned: Option<bool>,
    pub disabled: Option<bool>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct AliasPage {
    aliases: Vec<AliasEntry>,
}

#[derive(Debug, Deserialize)]
struct AliasEntry {
    email: String,
}

pub struct AliasApi {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl AliasApi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Fetch every alias email, walking pages from 0 until one comes back
    /// empty.
    pub fn fetch_all(&self, filter: &AliasFilter) -> Result<Vec<String>, FetchError> {
        let mut emails = Vec::new();

        for page in 0.. {
            tracing::info!(page, "fetching alias page");
            let url = page_url(&self.base_url, page, filter);

            let response = self.client.get(&url).header("Authentication", &self.api_key).send()?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                return Err(FetchError::Status { status, page, body });
            }

            let parsed: AliasPage = response.json()?;
            if parsed.aliases.is_empty() {
                break;
            }
            emails.extend(parsed.aliases.into_iter().map(|alias| alias.email));
        }

        Ok(emails)
    }
}

/// Build the aliases endpoint URL for one page, appending only the filters
/// that are set, as lowercase booleans.
fn page_url(base_url: &str, page: u32, filter: &AliasFilter) -> String {
    let mut url = format!("{base_url}/api/v2/aliases?page_id={page}");
    if let Some(pinned) = filter.pinned {
        url.push_str(&format!("&pinned={pinned}"));
    }
    if let Some(disabled) = filter.disabled {
        url.push_str(&format!("&disabled={disabled}"));
    }
    if let Some(enabled) = filter.enabled {
        url.push_str(&format!("&enabled={enabled}"));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_without_filters_has_only_page_id() {
        let url = page_url("https://api.simplelogin.io", 0, &AliasFilter::default());
        assert_eq!(url, "https://api.simplelogin.io/api/v2/aliases?page_id=0");
    }

    #[test]
    fn page_url_appends_set_filters_as_lowercase_booleans() {
        let filter = AliasFilter { pinned: Some(true), disabled: Some(false), enabled: None };
        let url = page_url("https://api.simplelogin.io", 3, &filter);
        assert_eq!(
            url,
            "https://api.simplelogin.io/api/v2/aliases?page_id=3&pinned=true&disabled=false"
        );
    }

    #[test]
    fn with_base_url_strips_trailing_slash() {
        let api = AliasApi::with_base_url("key", "http://localhost:9000/");
        assert_eq!(api.base_url, "http://localhost:9000");
    }

    #[test]
    fn alias_page_parses_email_field() {
        let page: AliasPage = serde_json::from_str(
            r#"{"aliases":[{"email":"a@x.com","enabled":true},{"email":"b@x.com"}]}"#,
        )
        .expect("parse");
        let emails: Vec<String> = page.aliases.into_iter().map(|a| a.email).collect();
        assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
    }
}
