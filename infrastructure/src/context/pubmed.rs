//! PubMed context provider using the NCBI eutils API.
//!
//! Two calls per round: `esearch` turns the case text into PMIDs,
//! `esummary` turns PMIDs into citation lines. An optional API key
//! (`NCBI_API_KEY`) raises the rate limit but is not required.

use async_trait::async_trait;
use consilium_application::ports::context_provider::ContextProvider;
use tracing::{debug, warn};

const EUTILS_BASE: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Context provider producing a "PubMed highlights" block
pub struct PubMedHighlights {
    client: reqwest::Client,
    api_key: Option<String>,
    max_results: usize,
}

impl PubMedHighlights {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            api_key: std::env::var("NCBI_API_KEY").ok(),
            max_results: 5,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    /// Free-text term with recency/quality filters, as the intake UI sends it
    fn build_term(case_text: &str) -> String {
        format!(
            "{} AND (english[la]) AND (last 5 years[dp] OR systematic[sb])",
            case_text.trim()
        )
    }

    async fn esearch(&self, term: &str) -> Result<Vec<String>, reqwest::Error> {
        let mut query: Vec<(&str, String)> = vec![
            ("db", "pubmed".to_string()),
            ("retmode", "json".to_string()),
            ("retmax", self.max_results.to_string()),
            ("term", term.to_string()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("api_key", key.clone()));
        }

        let body: serde_json::Value = self
            .client
            .get(format!("{EUTILS_BASE}/esearch.fcgi"))
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(extract_id_list(&body, self.max_results))
    }

    async fn esummary(&self, ids: &[String]) -> Result<serde_json::Value, reqwest::Error> {
        let mut query: Vec<(&str, String)> = vec![
            ("db", "pubmed".to_string()),
            ("retmode", "json".to_string()),
            ("id", ids.join(",")),
        ];
        if let Some(key) = &self.api_key {
            query.push(("api_key", key.clone()));
        }

        self.client
            .get(format!("{EUTILS_BASE}/esummary.fcgi"))
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl ContextProvider for PubMedHighlights {
    fn name(&self) -> &str {
        "pubmed"
    }

    async fn gather(&self, case_text: &str, _category: &str) -> String {
        if case_text.trim().is_empty() {
            return String::new();
        }

        let term = Self::build_term(case_text);
        let ids = match self.esearch(&term).await {
            Ok(ids) if !ids.is_empty() => ids,
            Ok(_) => {
                debug!("PubMed search returned no results");
                return String::new();
            }
            Err(e) => {
                warn!("PubMed search unavailable: {}", e);
                return String::new();
            }
        };

        match self.esummary(&ids).await {
            Ok(summary) => format_highlights(&ids, &summary),
            Err(e) => {
                warn!("PubMed summary unavailable: {}", e);
                String::new()
            }
        }
    }
}

fn extract_id_list(body: &serde_json::Value, max: usize) -> Vec<String> {
    body["esearchresult"]["idlist"]
        .as_array()
        .map(|ids| {
            ids.iter()
                .filter_map(|v| v.as_str())
                .take(max)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// One citation bullet per PMID, in search-rank order
fn format_highlights(ids: &[String], summary: &serde_json::Value) -> String {
    let result = &summary["result"];
    let mut items: Vec<String> = Vec::new();

    for pmid in ids {
        let record = &result[pmid.as_str()];
        if record.is_null() {
            continue;
        }
        let title = record["title"].as_str().unwrap_or("(no title)");
        let source = record["source"].as_str().unwrap_or("");
        let pubdate = record["pubdate"]
            .as_str()
            .or_else(|| record["sortpubdate"].as_str())
            .unwrap_or("");
        items.push(format!("- {title} — {source} {pubdate} (PMID: {pmid})"));
    }

    if items.is_empty() {
        return String::new();
    }
    format!("PubMed highlights:\n{}", items.join("\n"))
}
