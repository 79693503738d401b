pub mod page;
pub mod parser;

use crate::domain::article::Article;
use crate::domain::error::{AppError, Result};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub use page::PageExtras;

const USER_AGENT: &str = "RehabResearchBot/1.0 (Educational Project)";
const REQUEST_TIMEOUT_SECS: u64 = 15;
const PAGE_SCRAPE_DELAY_MS: u64 = 500;

#[derive(Deserialize)]
struct EsearchResponse {
    esearchresult: Option<EsearchResult>,
}

#[derive(Deserialize)]
struct EsearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

/// Client for the PubMed E-utilities API and article pages.
///
/// Both base URLs are injectable so tests can point at a local server.
pub struct PubMedClient {
    client: reqwest::Client,
    eutils_base: String,
    pubmed_base: String,
}

impl PubMedClient {
    pub fn new(eutils_base: &str, pubmed_base: &str) -> Result<Self> {
        for raw in [eutils_base, pubmed_base] {
            Url::parse(raw)
                .map_err(|e| AppError::Validation(format!("Invalid base URL {}: {}", raw, e)))?;
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            eutils_base: eutils_base.trim_end_matches('/').to_string(),
            pubmed_base: pubmed_base.trim_end_matches('/').to_string(),
        })
    }

    /// Search PubMed for article IDs matching the query. The query is
    /// narrowed to rehabilitation literature before being sent upstream.
    pub async fn search_articles(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        let term = format!("{} AND rehabilitation", query);
        let retmax = max_results.to_string();
        let url = format!("{}/esearch.fcgi", self.eutils_base);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("db", "pubmed"),
                ("term", term.as_str()),
                ("retmax", retmax.as_str()),
                ("retmode", "json"),
                ("sort", "relevance"),
            ])
            .send()
            .await
            .map_err(|e| AppError::PubMed(format!("Search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::PubMed(format!(
                "Search returned HTTP {}",
                response.status()
            )));
        }

        let body: EsearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::PubMed(format!("Failed to parse search response: {}", e)))?;

        Ok(body.esearchresult.map(|r| r.idlist).unwrap_or_default())
    }

    /// Fetch full metadata for a batch of article IDs via efetch.
    pub async fn fetch_article_details(&self, ids: &[String]) -> Result<Vec<Article>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        let url = format!("{}/efetch.fcgi", self.eutils_base);

        let response = self
            .client
            .get(&url)
            .query(&[("db", "pubmed"), ("id", joined.as_str()), ("retmode", "xml")])
            .send()
            .await
            .map_err(|e| AppError::PubMed(format!("Fetch request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::PubMed(format!(
                "Fetch returned HTTP {}",
                response.status()
            )));
        }

        let xml = response
            .text()
            .await
            .map_err(|e| AppError::PubMed(format!("Failed to read fetch response: {}", e)))?;

        Ok(parser::parse_pubmed_xml(&xml, &self.pubmed_base))
    }

    /// Scrape the article's web page for keywords and MeSH terms.
    pub async fn scrape_article_page(&self, pmid: &str) -> Result<PageExtras> {
        let url = format!("{}/{}/", self.pubmed_base, pmid);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::PubMed(format!("Page request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::PubMed(format!(
                "Page {} returned HTTP {}",
                url,
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::PubMed(format!("Failed to read page body: {}", e)))?;

        Ok(page::parse_page_extras(&html))
    }

    /// Full pipeline: search, fetch details, then enrich each article from
    /// its web page. Page scrapes are rate-limited to stay polite to PubMed,
    /// and a failed scrape degrades to empty extras instead of failing the
    /// whole request.
    pub async fn get_research_data(&self, query: &str, max_results: usize) -> Result<Vec<Article>> {
        let ids = self.search_articles(query, max_results).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut articles = self.fetch_article_details(&ids).await?;

        for (i, article) in articles.iter_mut().enumerate() {
            if i > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(PAGE_SCRAPE_DELAY_MS)).await;
            }
            match self.scrape_article_page(&article.pmid).await {
                Ok(extras) => {
                    article.keywords = extras.keywords;
                    article.mesh_terms = extras.mesh_terms;
                }
                Err(err) => {
                    warn!(pmid = %article.pmid, error = %err, "Article page scrape failed");
                }
            }
        }

        Ok(articles)
    }
}
