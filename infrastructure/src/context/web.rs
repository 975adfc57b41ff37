//! Web-search context provider using the DuckDuckGo Instant Answer API.
//!
//! No API key required. The instant answer abstract and related topics are
//! flattened into one bullet-list block advisors can cite.

use async_trait::async_trait;
use consilium_application::ports::context_provider::ContextProvider;
use consilium_domain::preview;
use tracing::{debug, warn};

const DDG_API_URL: &str = "https://api.duckduckgo.com/";

/// Context provider producing a "Web search highlights" block
pub struct WebSearchHighlights {
    client: reqwest::Client,
    max_topics: usize,
}

impl WebSearchHighlights {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            max_topics: 5,
        }
    }

    pub fn with_max_topics(mut self, max_topics: usize) -> Self {
        self.max_topics = max_topics.max(1);
        self
    }

    async fn search(&self, query: &str) -> Result<serde_json::Value, reqwest::Error> {
        self.client
            .get(DDG_API_URL)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .header("User-Agent", "consilium/0.3 (advisory panel)")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl ContextProvider for WebSearchHighlights {
    fn name(&self) -> &str {
        "web-search"
    }

    async fn gather(&self, case_text: &str, category: &str) -> String {
        let query = format!("{} background for: {}", category, preview(case_text, 400));
        match self.search(&query).await {
            Ok(body) => format_highlights(&body, self.max_topics),
            Err(e) => {
                warn!("Web search unavailable: {}", e);
                String::new()
            }
        }
    }
}

/// Flatten an Instant Answer payload into a bullet block, or empty string
/// when nothing useful came back.
fn format_highlights(data: &serde_json::Value, max_topics: usize) -> String {
    let mut bullets: Vec<String> = Vec::new();

    if let Some(abstract_text) = data["AbstractText"].as_str()
        && !abstract_text.is_empty()
    {
        let source = data["AbstractSource"].as_str().unwrap_or("Unknown");
        let url = data["AbstractURL"].as_str().unwrap_or("");
        bullets.push(format!("- {abstract_text} — {source} ({url})"));
    }

    if let Some(topics) = data["RelatedTopics"].as_array() {
        for topic in topics {
            if bullets.len() >= max_topics {
                break;
            }
            if let Some(text) = topic["Text"].as_str()
                && !text.is_empty()
            {
                let url = topic["FirstURL"].as_str().unwrap_or("");
                bullets.push(format!("- {text} ({url})"));
            }
        }
    }

    if bullets.is_empty() {
        debug!("No instant answer content for query");
        return String::new();
    }
    format!("Web search highlights:\n{}", bullets.join("\n"))
}
