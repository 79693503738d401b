use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

/// Metadata only available on the article's web page, not in efetch XML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageExtras {
    pub keywords: Vec<String>,
    pub mesh_terms: Vec<String>,
}

/// Extract keywords and MeSH terms from a PubMed article page.
pub fn parse_page_extras(html: &str) -> PageExtras {
    let document = Html::parse_document(html);

    let keyword_selector =
        Selector::parse("div.keywords-section button.keyword-actions-trigger").unwrap();
    let mesh_selector = Selector::parse("div.mesh-terms button").unwrap();

    PageExtras {
        keywords: collect_button_text(&document, &keyword_selector),
        mesh_terms: collect_button_text(&document, &mesh_selector),
    }
}

fn collect_button_text(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}
