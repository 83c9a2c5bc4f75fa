use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// An explicit `null` or a value of the wrong type is treated like a missing key.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keeps the entries that decode and drops the rest; anything but an array is empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HighlightRepr {
    Plain(String),
    Object {
        #[serde(default, deserialize_with = "lenient")]
        text: Option<String>,
    },
}

/// A short snippet the search service judged most relevant to the query.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(from = "HighlightRepr")]
pub struct Highlight {
    pub text: String,
}

impl From<HighlightRepr> for Highlight {
    fn from(repr: HighlightRepr) -> Self {
        let text = match repr {
            HighlightRepr::Plain(text) => text,
            HighlightRepr::Object { text } => text.unwrap_or_default(),
        };
        Highlight { text }
    }
}

impl From<&str> for Highlight {
    fn from(text: &str) -> Self {
        Highlight {
            text: text.to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub highlights: Vec<Highlight>,
}

impl SearchResult {
    pub fn new(title: &str, url: &str, text: &str, highlights: Vec<Highlight>) -> SearchResult {
        SearchResult {
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            text: Some(text.to_string()),
            highlights,
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    /// URLs of the first `limit` results, in result order. Results without a URL are
    /// dropped, not replaced by later ones.
    pub fn top_urls(&self, limit: usize) -> Vec<String> {
        self.results
            .iter()
            .take(limit)
            .map(|r| r.url())
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ContentResult {
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ContentResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    pub results: Vec<ContentResult>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Source {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
}

impl Source {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AnswerResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub sources: Vec<Source>,
}

impl AnswerResponse {
    pub fn answer(&self) -> &str {
        self.answer.as_deref().unwrap_or("")
    }
}
