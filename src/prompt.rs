use crate::data_models::{SearchResponse, SearchResult, Source};

pub const HIGHLIGHT_SEPARATOR: &str = " ... ";

pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant that provides accurate, well-cited answers based on search results.";

/// Highlights win over full text whenever there is at least one.
pub fn content_body(result: &SearchResult) -> String {
    if result.highlights.is_empty() {
        result.text().to_string()
    } else {
        result
            .highlights
            .iter()
            .map(|h| h.text.as_str())
            .collect::<Vec<&str>>()
            .join(HIGHLIGHT_SEPARATOR)
    }
}

pub fn format_result(result: &SearchResult) -> String {
    format!(
        "Title: {}\nURL: {}\nContent: {}",
        result.title(),
        result.url(),
        content_body(result)
    )
}

/// All result blocks in order, blank-line separated. No dedup, no length cap.
pub fn build_context(response: &SearchResponse) -> String {
    response
        .results
        .iter()
        .map(format_result)
        .collect::<Vec<String>>()
        .join("\n\n")
}

pub fn build_prompt(query: &str, response: &SearchResponse) -> String {
    let context = build_context(response);
    format!(
        "You are a helpful assistant that answers questions using web search results.\n\
         \n\
         Question: {query}\n\
         \n\
         Search Results:\n\
         {context}\n\
         \n\
         Answer the question using the search results above. Cite your sources by \
         referencing their URLs. If the search results do not contain relevant \
         information, say so."
    )
}

/// `Sources:` header followed by `1. <title> - <url>` lines, or nothing for no sources.
pub fn format_sources(sources: &[Source]) -> String {
    if sources.is_empty() {
        return String::new();
    }

    let mut out = String::from("Sources:");
    for (idx, source) in sources.iter().enumerate() {
        out.push_str(&format!("\n{}. {} - {}", idx + 1, source.title(), source.url()));
    }
    out
}
