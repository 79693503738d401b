use std::sync::{Arc, Mutex};

use actix_web::{test, web, App};
use httpmock::prelude::*;
use serde_json::json;

use rehabsearch::application::{AnalyzeUseCase, CompareUseCase, SummarizeUseCase};
use rehabsearch::domain::error::Result;
use rehabsearch::domain::llm_config::LlmConfig;
use rehabsearch::infrastructure::llm_clients::LlmClient;
use rehabsearch::infrastructure::pubmed::PubMedClient;
use rehabsearch::interfaces::http::{routes, AppState};

const EFETCH_XML: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>111</PMID>
      <Article>
        <Journal>
          <Title>Rehab Journal</Title>
          <JournalIssue><PubDate><Year>2024</Year></PubDate></JournalIssue>
        </Journal>
        <ArticleTitle>Stroke Rehabilitation Outcomes</ArticleTitle>
        <Abstract><AbstractText>Motor recovery after stroke.</AbstractText></Abstract>
        <AuthorList>
          <Author><LastName>Smith</LastName><ForeName>Jane</ForeName></Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>222</PMID>
      <Article>
        <ArticleTitle>Virtual Reality in Spinal Cord Injury Rehab</ArticleTitle>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

const PAGE_111: &str = r#"<html><body>
  <div class="keywords-section">
    <button class="keyword-actions-trigger">stroke</button>
    <button class="keyword-actions-trigger">gait</button>
  </div>
  <div class="mesh-terms"><button>Stroke Rehabilitation</button></div>
</body></html>"#;

struct CannedClient(&'static str);

#[async_trait::async_trait]
impl LlmClient for CannedClient {
    async fn generate(&self, _config: &LlmConfig, _system: &str, _user: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

async fn mock_pubmed_backend(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/esearch.fcgi")
                .query_param("db", "pubmed")
                .query_param("term", "stroke AND rehabilitation")
                .query_param("retmode", "json");
            then.status(200)
                .json_body(json!({ "esearchresult": { "idlist": ["111", "222"] } }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/efetch.fcgi")
                .query_param("id", "111,222")
                .query_param("retmode", "xml");
            then.status(200).body(EFETCH_XML);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/111/");
            then.status(200).body(PAGE_111);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/222/");
            then.status(404);
        })
        .await;
}

fn state_for(server: &MockServer) -> AppState {
    let llm: Arc<dyn LlmClient + Send + Sync> = Arc::new(CannedClient("Synthesis of findings."));
    AppState {
        pubmed: PubMedClient::new(&server.base_url(), &server.base_url()).unwrap(),
        analyze_use_case: AnalyzeUseCase::new(llm.clone(), LlmConfig::default()),
        summarize_use_case: SummarizeUseCase::new(llm.clone(), LlmConfig::default()),
        compare_use_case: CompareUseCase::new(llm, LlmConfig::default()),
        max_articles: 10,
        logs: Arc::new(Mutex::new(Vec::new())),
    }
}

#[tokio::test]
async fn test_pipeline_merges_page_extras_and_degrades_on_scrape_failure() {
    let server = MockServer::start_async().await;
    mock_pubmed_backend(&server).await;

    let client = PubMedClient::new(&server.base_url(), &server.base_url()).unwrap();
    let articles = client.get_research_data("stroke", 10).await.unwrap();

    assert_eq!(articles.len(), 2);

    assert_eq!(articles[0].pmid, "111");
    assert_eq!(articles[0].title, "Stroke Rehabilitation Outcomes");
    assert_eq!(articles[0].journal, "Rehab Journal");
    assert_eq!(articles[0].authors, vec!["Smith, Jane".to_string()]);
    assert_eq!(articles[0].keywords, vec!["stroke", "gait"]);
    assert_eq!(articles[0].mesh_terms, vec!["Stroke Rehabilitation"]);

    // The second article's page scrape 404s; extras stay empty.
    assert_eq!(articles[1].pmid, "222");
    assert_eq!(articles[1].abstract_text, "No abstract available.");
    assert!(articles[1].keywords.is_empty());
    assert!(articles[1].mesh_terms.is_empty());
}

#[tokio::test]
async fn test_search_returns_empty_when_no_ids_match() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/esearch.fcgi");
            then.status(200)
                .json_body(json!({ "esearchresult": { "idlist": [] } }));
        })
        .await;

    let client = PubMedClient::new(&server.base_url(), &server.base_url()).unwrap();
    let articles = client.get_research_data("nonexistent", 10).await.unwrap();
    assert!(articles.is_empty());
}

#[actix_web::test]
async fn test_search_route_end_to_end() {
    let server = MockServer::start_async().await;
    mock_pubmed_backend(&server).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(&server)))
            .configure(routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/search")
        .set_json(json!({ "query": "stroke" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["articles"][0]["pmid"], "111");
    assert_eq!(body["articles"][0]["abstract"], "Motor recovery after stroke.");
    assert_eq!(body["articles"][0]["keywords"][0], "stroke");
}

#[actix_web::test]
async fn test_search_route_returns_404_when_nothing_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/esearch.fcgi");
            then.status(200)
                .json_body(json!({ "esearchresult": { "idlist": [] } }));
        })
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(&server)))
            .configure(routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/search")
        .set_json(json!({ "query": "stroke" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn test_search_route_maps_upstream_failure_to_bad_gateway() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/esearch.fcgi");
            then.status(500).body("upstream broke");
        })
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(&server)))
            .configure(routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/search")
        .set_json(json!({ "query": "stroke" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 502);
}
