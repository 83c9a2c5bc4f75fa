use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::data_models::{AnswerResponse, ContentResponse, SearchResponse};
use crate::error::{RagError, Result};
use crate::transport::{HttpTransport, decode};

/// Knobs for a single `/search` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub num_results: u32,
    /// Let the service rewrite the query for better retrieval.
    pub use_autoprompt: bool,
    pub highlight_results: bool,
    /// Crawl uncached pages synchronously before answering. Can be slow.
    pub live_crawl: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            num_results: 5,
            use_autoprompt: true,
            highlight_results: true,
            live_crawl: true,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    query: &'a str,
    num_results: u32,
    use_autoprompt: bool,
    highlight_results: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<SearchSource>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SearchSource {
    live_crawl: bool,
}

impl<'a> SearchRequest<'a> {
    fn new(query: &'a str, options: &SearchOptions) -> Self {
        SearchRequest {
            query,
            num_results: options.num_results,
            use_autoprompt: options.use_autoprompt,
            highlight_results: options.highlight_results,
            source: options.live_crawl.then_some(SearchSource { live_crawl: true }),
        }
    }
}

#[derive(Serialize, Debug)]
struct ContentsRequest<'a> {
    urls: &'a [String],
}

#[derive(Serialize, Debug)]
struct AnswerRequest<'a> {
    query: &'a str,
    stream: bool,
}

/// Client for the search service family: `/search`, `/contents` and `/answer`.
pub struct ExaClient {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    base_url: String,
}

impl ExaClient {
    pub fn new(transport: Arc<dyn HttpTransport>, api_key: String, base_url: String) -> Self {
        Self {
            transport,
            api_key,
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchResponse> {
        if query.trim().is_empty() {
            return Err(RagError::InvalidInput("query cannot be empty".to_string()));
        }
        if options.num_results == 0 {
            return Err(RagError::InvalidInput(
                "number of results must be positive".to_string(),
            ));
        }

        let url = self.endpoint("search");
        let body = serde_json::to_value(SearchRequest::new(query, options)).map_err(|e| {
            RagError::InvalidInput(format!("cannot encode search request: {e}"))
        })?;

        let started = Instant::now();
        let value = self.transport.post_json(&url, &self.api_key, &body).await?;
        let response: SearchResponse = decode(&url, value)?;

        tracing::info!(
            num_requested = options.num_results,
            live_crawl = options.live_crawl,
            num_results = response.results.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "search completed"
        );

        Ok(response)
    }

    /// Fetches extracted page text. An empty list still issues the request; callers that
    /// want to save the round trip must check first.
    pub async fn get_contents(&self, urls: &[String]) -> Result<ContentResponse> {
        let url = self.endpoint("contents");
        let body = serde_json::to_value(ContentsRequest { urls }).map_err(|e| {
            RagError::InvalidInput(format!("cannot encode contents request: {e}"))
        })?;

        let value = self.transport.post_json(&url, &self.api_key, &body).await?;
        let response: ContentResponse = decode(&url, value)?;

        tracing::info!(
            num_urls = urls.len(),
            num_contents = response.results.len(),
            "contents fetched"
        );

        Ok(response)
    }

    /// Search and generation in one hosted call. Streaming is always off.
    pub async fn answer(&self, query: &str) -> Result<AnswerResponse> {
        if query.trim().is_empty() {
            return Err(RagError::InvalidInput("query cannot be empty".to_string()));
        }

        let url = self.endpoint("answer");
        let body = serde_json::to_value(AnswerRequest {
            query,
            stream: false,
        })
        .map_err(|e| RagError::InvalidInput(format!("cannot encode answer request: {e}")))?;

        let started = Instant::now();
        let value = self.transport.post_json(&url, &self.api_key, &body).await?;
        let response: AnswerResponse = decode(&url, value)?;

        tracing::info!(
            num_sources = response.sources.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "answer received"
        );

        Ok(response)
    }
}
