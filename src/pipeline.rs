use std::io::Write;
use std::sync::Arc;

use crate::completion::CompletionClient;
use crate::config::Config;
use crate::error::Result;
use crate::exa::{ExaClient, SearchOptions};
use crate::prompt::format_sources;
use crate::transport::HttpTransport;

/// Only the first few result pages get their full contents fetched, to bound cost.
pub const CONTENT_FETCH_LIMIT: usize = 2;

pub const RESPONSE_HEADER: &str = "--- Generated Response ---";

/// The two ways of producing an answer, chosen once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pipeline {
    /// search -> contents -> prompt -> completion
    Custom {
        num_results: u32,
        live_crawl: bool,
        model: String,
    },
    /// hosted search + generation
    Exa,
}

pub struct Orchestrator {
    exa: ExaClient,
    completion: CompletionClient,
}

impl Orchestrator {
    pub fn new(config: &Config, transport: Arc<dyn HttpTransport>) -> Orchestrator {
        Orchestrator {
            exa: ExaClient::new(
                transport.clone(),
                config.exa_api_key.clone(),
                config.exa_base_url.clone(),
            ),
            completion: CompletionClient::new(
                transport,
                config.openai_api_key.clone(),
                &config.openai_base_url,
            ),
        }
    }

    /// Reads configuration through `lookup` and builds the clients. Fails before any
    /// request can be made when a credential is missing.
    pub fn bootstrap<F>(lookup: F, transport: Arc<dyn HttpTransport>) -> Result<Orchestrator>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config::load(lookup)?;
        tracing::debug!(?config, "configuration loaded");
        Ok(Orchestrator::new(&config, transport))
    }

    pub async fn run<W: Write>(&self, query: &str, pipeline: &Pipeline, out: &mut W) -> Result<()> {
        match pipeline {
            Pipeline::Custom {
                num_results,
                live_crawl,
                model,
            } => {
                let options = SearchOptions {
                    num_results: *num_results,
                    live_crawl: *live_crawl,
                    ..SearchOptions::default()
                };
                self.run_custom(query, &options, model, out).await
            }
            Pipeline::Exa => self.run_exa(query, out).await,
        }
    }

    async fn run_custom<W: Write>(
        &self,
        query: &str,
        options: &SearchOptions,
        model: &str,
        out: &mut W,
    ) -> Result<()> {
        if options.live_crawl {
            writeln!(out, "Searching for: {query} (live crawl enabled)")?;
        } else {
            writeln!(out, "Searching for: {query}")?;
        }

        let search_response = self.exa.search(query, options).await?;
        writeln!(out, "Found {} results", search_response.results.len())?;

        // Contents are fetched and counted but not fed into the prompt.
        let urls = search_response.top_urls(CONTENT_FETCH_LIMIT);
        if !urls.is_empty() {
            let contents = self.exa.get_contents(&urls).await?;
            writeln!(
                out,
                "Fetched full content for {} pages",
                contents.results.len()
            )?;
        }

        writeln!(out, "Generating response with {model}...")?;
        let text = self
            .completion
            .complete(query, &search_response, model)
            .await?;

        writeln!(out)?;
        writeln!(out, "{RESPONSE_HEADER}")?;
        writeln!(out, "{text}")?;
        Ok(())
    }

    async fn run_exa<W: Write>(&self, query: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Using Exa answer endpoint for: {query}")?;

        let response = self.exa.answer(query).await?;

        writeln!(out)?;
        writeln!(out, "{RESPONSE_HEADER}")?;
        writeln!(out, "{}", response.answer())?;

        let sources = format_sources(&response.sources);
        if !sources.is_empty() {
            writeln!(out)?;
            writeln!(out, "{sources}")?;
        }
        Ok(())
    }
}
