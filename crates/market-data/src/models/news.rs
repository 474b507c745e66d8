use serde::{Deserialize, Serialize};

/// A single news item about a symbol.
///
/// Both news sources are mapped into this one shape: Finnhub company news
/// fields map directly, NewsAPI articles map title/description/source.name
/// onto the same fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewsArticle {
    /// Headline / title
    pub headline: String,

    /// Short summary or description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Publisher name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Link to the full article
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Preview image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Publication time (Unix seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<i64>,
}
