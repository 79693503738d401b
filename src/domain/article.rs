use serde::{Deserialize, Serialize};

/// A single PubMed article as assembled by the search pipeline.
///
/// The E-utilities fetch fills everything except `keywords` and
/// `mesh_terms`, which come from scraping the article's web page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub pmid: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub authors: Vec<String>,
    pub journal: String,
    pub year: String,
    pub url: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub mesh_terms: Vec<String>,
}

impl Article {
    pub fn new(pmid: String, title: String, abstract_text: String, url: String) -> Self {
        Self {
            pmid,
            title,
            abstract_text,
            authors: Vec::new(),
            journal: "Unknown Journal".to_string(),
            year: "N/A".to_string(),
            url,
            keywords: Vec::new(),
            mesh_terms: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abstract_serializes_under_json_name() {
        let article = Article::new(
            "123".to_string(),
            "Title".to_string(),
            "Some abstract.".to_string(),
            "https://pubmed.ncbi.nlm.nih.gov/123/".to_string(),
        );
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["abstract"], "Some abstract.");
        assert!(json.get("abstract_text").is_none());
    }

    #[test]
    fn test_keywords_default_when_missing() {
        let json = r#"{
            "pmid": "1",
            "title": "T",
            "abstract": "A",
            "authors": [],
            "journal": "J",
            "year": "2024",
            "url": "https://pubmed.ncbi.nlm.nih.gov/1/"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert!(article.keywords.is_empty());
        assert!(article.mesh_terms.is_empty());
    }
}
