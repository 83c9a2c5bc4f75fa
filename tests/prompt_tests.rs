use exa_rag::data_models::{Highlight, SearchResponse, SearchResult};
use exa_rag::prompt::*;

fn response_of(results: Vec<SearchResult>) -> SearchResponse {
    SearchResponse { results }
}

#[cfg(test)]
mod content_body_tests {
    use super::*;

    #[test]
    fn test_highlights_joined_never_raw_text() {
        let cases: Vec<Vec<&str>> = vec![
            vec!["only"],
            vec!["hi", "there"],
            vec!["a", "", "c"],
            vec!["contains ... already", "x"],
        ];
        for highlights in cases {
            let result = SearchResult::new(
                "T",
                "http://t",
                "RAW TEXT",
                highlights.iter().map(|h| Highlight::from(*h)).collect(),
            );
            let body = content_body(&result);
            assert_eq!(body, highlights.join(" ... "));
            assert!(!body.contains("RAW TEXT"));
        }
    }

    #[test]
    fn test_no_highlights_uses_text_verbatim() {
        for text in ["", "hello", "  padded  ", "multi\nline"] {
            let result = SearchResult::new("T", "http://t", text, vec![]);
            assert_eq!(content_body(&result), text);
        }
    }

    #[test]
    fn test_absent_text_is_empty() {
        let result: SearchResult =
            serde_json::from_str(r#"{"title": "T", "url": "http://t"}"#).unwrap();
        assert_eq!(content_body(&result), "");
    }
}

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn test_single_result_with_text() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"results": [{"title": "A", "url": "http://a", "text": "hello", "highlights": []}]}"#,
        )
        .unwrap();
        assert_eq!(
            build_context(&response),
            "Title: A\nURL: http://a\nContent: hello"
        );
        assert!(build_prompt("test", &response).contains("Title: A\nURL: http://a\nContent: hello"));
    }

    #[test]
    fn test_single_result_with_highlights() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"results": [{"title": "A", "url": "http://a", "text": "hello",
                "highlights": [{"text": "hi"}, {"text": "there"}]}]}"#,
        )
        .unwrap();
        assert_eq!(
            build_context(&response),
            "Title: A\nURL: http://a\nContent: hi ... there"
        );
    }

    #[test]
    fn test_missing_title_uses_placeholder() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"results": [{"url": "http://a", "text": "x"}]}"#).unwrap();
        assert_eq!(build_context(&response), "Title: Untitled\nURL: http://a\nContent: x");
    }
}

#[cfg(test)]
mod prompt_tests {
    use super::*;

    #[test]
    fn test_prompt_is_idempotent() {
        let response = response_of(vec![
            SearchResult::new("A", "http://a", "alpha", vec![]),
            SearchResult::new("B", "http://b", "", vec![Highlight::from("beta")]),
        ]);
        assert_eq!(
            build_prompt("q", &response),
            build_prompt("q", &response)
        );
    }

    #[test]
    fn test_empty_results_still_produce_prompt() {
        let prompt = build_prompt("why is the sky blue", &SearchResponse::default());
        assert!(prompt.contains("Question: why is the sky blue"));
        assert!(prompt.contains("Search Results:\n\n"));
        assert!(!prompt.contains("Title:"));
        assert!(prompt.contains("do not contain relevant information"));
    }

    #[test]
    fn test_prompt_sections_in_order() {
        let response = response_of(vec![SearchResult::new("A", "http://a", "alpha", vec![])]);
        let prompt = build_prompt("my question", &response);

        let question = prompt.find("Question: my question").unwrap();
        let label = prompt.find("Search Results:").unwrap();
        let block = prompt.find("Title: A").unwrap();
        let cite = prompt.find("Cite your sources").unwrap();
        assert!(question < label && label < block && block < cite);
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let response = response_of(vec![
            SearchResult::new("A", "http://a", "alpha", vec![]),
            SearchResult::new("B", "http://b", "beta", vec![]),
        ]);
        assert_eq!(
            build_context(&response),
            "Title: A\nURL: http://a\nContent: alpha\n\nTitle: B\nURL: http://b\nContent: beta"
        );
    }
}
