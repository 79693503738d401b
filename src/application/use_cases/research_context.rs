use crate::domain::article::Article;

/// Format articles into the numbered context block shared by every
/// analysis prompt.
pub fn research_context(articles: &[Article]) -> String {
    let mut blocks = Vec::with_capacity(articles.len());

    for (i, article) in articles.iter().enumerate() {
        let authors = article.authors.join("; ");
        let keywords = article.keywords.join(", ");
        blocks.push(format!(
            "--- Article {} ---\n\
             Title: {}\n\
             Authors: {}\n\
             Journal: {} ({})\n\
             Abstract: {}\n\
             Keywords: {}\n\
             URL: {}\n",
            i + 1,
            article.title,
            authors,
            article.journal,
            article.year,
            article.abstract_text,
            keywords,
            article.url
        ));
    }

    blocks.join("\n")
}
