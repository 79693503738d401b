use crate::domain::article::Article;
use roxmltree::{Document, Node};

const MAX_AUTHORS: usize = 5;

/// Parse a PubMed efetch XML document into articles.
///
/// Unparseable XML yields an empty list rather than an error; a record
/// without a `MedlineCitation` is skipped.
pub fn parse_pubmed_xml(xml: &str, pubmed_base: &str) -> Vec<Article> {
    let doc = match Document::parse(xml) {
        Ok(doc) => doc,
        Err(_) => return Vec::new(),
    };

    doc.descendants()
        .filter(|n| n.has_tag_name("PubmedArticle"))
        .filter_map(|n| extract_article(n, pubmed_base))
        .collect()
}

fn extract_article<'a>(article: Node<'a, 'a>, pubmed_base: &str) -> Option<Article> {
    let medline = article
        .descendants()
        .find(|n| n.has_tag_name("MedlineCitation"))?;

    let pmid = first_text(medline, "PMID").unwrap_or("Unknown").to_string();
    let title = first_text(medline, "ArticleTitle")
        .unwrap_or("No title available")
        .to_string();

    let abstract_parts: Vec<&str> = medline
        .descendants()
        .filter(|n| n.has_tag_name("AbstractText"))
        .filter_map(|n| n.text())
        .collect();
    let abstract_text = if abstract_parts.is_empty() {
        "No abstract available.".to_string()
    } else {
        abstract_parts.join(" ")
    };

    let mut authors = Vec::new();
    for author in medline.descendants().filter(|n| n.has_tag_name("Author")) {
        let last = child_text(author, "LastName");
        let fore = child_text(author, "ForeName");
        match (last, fore) {
            (Some(last), Some(fore)) => authors.push(format!("{}, {}", last, fore)),
            (Some(last), None) => authors.push(last.to_string()),
            _ => {}
        }
    }
    authors.truncate(MAX_AUTHORS);

    let journal = medline
        .descendants()
        .find(|n| n.has_tag_name("Journal"))
        .and_then(|j| child_text(j, "Title"))
        .unwrap_or("Unknown Journal")
        .to_string();

    let year = medline
        .descendants()
        .find(|n| n.has_tag_name("PubDate"))
        .and_then(|d| child_text(d, "Year"))
        .unwrap_or("N/A")
        .to_string();

    let url = format!("{}/{}/", pubmed_base, pmid);

    Some(Article {
        pmid,
        title,
        abstract_text,
        authors,
        journal,
        year,
        url,
        keywords: Vec::new(),
        mesh_terms: Vec::new(),
    })
}

fn first_text<'a>(scope: Node<'a, 'a>, tag: &str) -> Option<&'a str> {
    scope
        .descendants()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
}

fn child_text<'a>(node: Node<'a, 'a>, tag: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBMED_BASE: &str = "https://pubmed.ncbi.nlm.nih.gov";

    const FULL_RECORD: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>38012345</PMID>
      <Article>
        <Journal>
          <Title>Archives of Physical Medicine</Title>
          <JournalIssue>
            <PubDate>
              <Year>2024</Year>
            </PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>Robotic gait training after stroke</ArticleTitle>
        <Abstract>
          <AbstractText>Background text.</AbstractText>
          <AbstractText>Results text.</AbstractText>
        </Abstract>
        <AuthorList>
          <Author><LastName>Smith</LastName><ForeName>Jane</ForeName></Author>
          <Author><LastName>Doe</LastName><ForeName>Alan</ForeName></Author>
          <Author><LastName>Lee</LastName><ForeName>Mina</ForeName></Author>
          <Author><LastName>Chen</LastName><ForeName>Wei</ForeName></Author>
          <Author><LastName>Garcia</LastName><ForeName>Ana</ForeName></Author>
          <Author><LastName>Okafor</LastName><ForeName>Chidi</ForeName></Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

    const SPARSE_RECORD: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>99</PMID>
      <Article>
        <ArticleTitle>Minimal record</ArticleTitle>
        <AuthorList>
          <Author><LastName>Solo</LastName></Author>
          <Author><CollectiveName>Study Group</CollectiveName></Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

    #[test]
    fn test_parse_full_record() {
        let articles = parse_pubmed_xml(FULL_RECORD, PUBMED_BASE);
        assert_eq!(articles.len(), 1);

        let article = &articles[0];
        assert_eq!(article.pmid, "38012345");
        assert_eq!(article.title, "Robotic gait training after stroke");
        assert_eq!(article.abstract_text, "Background text. Results text.");
        assert_eq!(article.journal, "Archives of Physical Medicine");
        assert_eq!(article.year, "2024");
        assert_eq!(article.url, "https://pubmed.ncbi.nlm.nih.gov/38012345/");
        assert_eq!(article.authors.len(), 5, "authors should be capped at 5");
        assert_eq!(article.authors[0], "Smith, Jane");
    }

    #[test]
    fn test_parse_sparse_record_uses_fallbacks() {
        let articles = parse_pubmed_xml(SPARSE_RECORD, PUBMED_BASE);
        assert_eq!(articles.len(), 1);

        let article = &articles[0];
        assert_eq!(article.abstract_text, "No abstract available.");
        assert_eq!(article.journal, "Unknown Journal");
        assert_eq!(article.year, "N/A");
        assert_eq!(article.authors, vec!["Solo".to_string()]);
    }

    #[test]
    fn test_parse_skips_record_without_citation() {
        let xml = r#"<PubmedArticleSet><PubmedArticle></PubmedArticle></PubmedArticleSet>"#;
        assert!(parse_pubmed_xml(xml, PUBMED_BASE).is_empty());
    }

    #[test]
    fn test_parse_malformed_xml_returns_empty() {
        assert!(parse_pubmed_xml("<PubmedArticleSet><unclosed", PUBMED_BASE).is_empty());
        assert!(parse_pubmed_xml("", PUBMED_BASE).is_empty());
    }
}
