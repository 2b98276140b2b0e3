//! HTTP client for the Open Library API.

use reqwest::{Client, Url, redirect::Policy};
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::BookError;
use super::format::{BookDetails, SearchDoc, SearchResponse, format_details, format_search};
use crate::config::BooksConfig;

pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Which lookup endpoint an identifier belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IdType {
    /// Work ID such as `OL27448W`.
    #[default]
    Work,
    /// ISBN-10 or ISBN-13.
    Isbn,
}

impl IdType {
    fn collection(self) -> &'static str {
        match self {
            IdType::Work => "works",
            IdType::Isbn => "isbn",
        }
    }
}

/// Open Library client with a fixed timeout that follows redirects.
#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    http: Client,
    base_url: Url,
}

impl OpenLibraryClient {
    pub fn new(config: &BooksConfig) -> Result<Self, BookError> {
        super::install_crypto_provider();

        let base_url = Url::parse(&config.base_url).map_err(|e| BookError::Client {
            message: format!("Invalid base URL {}: {}", config.base_url, e),
        })?;

        let http = Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::limited(10))
            .build()
            .map_err(|e| BookError::Client {
                message: e.to_string(),
            })?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BookError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BookError::Client {
                message: format!("Base URL cannot have a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, BookError> {
        let response = request.send().await.map_err(|e| {
            warn!("Book catalog request failed: {}", e);
            BookError::Request {
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Book catalog returned HTTP {} for {}", status, response.url());
            return Err(BookError::Status {
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            warn!("Book catalog response could not be decoded: {}", e);
            BookError::Decode {
                message: e.to_string(),
            }
        })
    }

    /// `GET /search.json?q=&limit=`
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchDoc>, BookError> {
        let limit = limit.max(1);
        info!("Searching books with query: {}", query);

        let url = self.endpoint(&["search.json"])?;
        let request = self
            .http
            .get(url)
            .query(&[("q", query.to_string()), ("limit", limit.to_string())]);

        let response: SearchResponse = self.fetch(request).await?;
        Ok(response.docs.into_iter().take(limit).collect())
    }

    /// `GET /works/{id}.json` or `GET /isbn/{id}.json`
    pub async fn details(&self, identifier: &str, id_type: IdType) -> Result<BookDetails, BookError> {
        info!("Fetching details for {:?}: {}", id_type, identifier);

        let file = format!("{}.json", identifier.trim());
        let url = self.endpoint(&[id_type.collection(), &file])?;
        self.fetch(self.http.get(url)).await
    }

    /// Search and render as text. Failures become `Error: ...` text.
    pub async fn search_text(&self, query: &str, limit: usize) -> String {
        match self.search(query, limit).await {
            Ok(docs) => format_search(&docs, limit.max(1)),
            Err(e) => format!("Error: {}", e),
        }
    }

    /// Look up and render as text. Failures become `Error: ...` text.
    pub async fn details_text(&self, identifier: &str, id_type: IdType) -> String {
        match self.details(identifier, id_type).await {
            Ok(details) => format_details(&details),
            Err(e) => format!("Error: {}", e),
        }
    }
}
