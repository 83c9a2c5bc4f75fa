use clap::{Parser, ValueEnum};

use crate::completion::DEFAULT_MODEL;
use crate::pipeline::Pipeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// search, fetch contents, assemble a prompt, call the completion model
    Custom,
    /// hand the whole question to the hosted answer endpoint
    Exa,
}

/// Answer a question from live web search results.
#[derive(Debug, Parser)]
#[command(name = "exa-rag", version)]
pub struct Cli {
    /// The question to answer
    pub query: String,

    #[arg(long, value_enum, default_value_t = Method::Custom)]
    pub method: Method,

    /// Crawl pages missing from the search index before returning results (slower)
    #[arg(long)]
    pub live_crawl: bool,

    /// Number of search results to retrieve
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub results: u32,

    /// Completion model identifier
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,
}

impl Cli {
    pub fn pipeline(&self) -> Pipeline {
        match self.method {
            Method::Custom => Pipeline::Custom {
                num_results: self.results,
                live_crawl: self.live_crawl,
                model: self.model.clone(),
            },
            Method::Exa => Pipeline::Exa,
        }
    }
}
