use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, Mutex};
use validator::Validate;

use crate::application::{AnalyzeUseCase, CompareUseCase, SummarizeUseCase};
use crate::domain::article::Article;
use crate::domain::error::AppError;
use crate::infrastructure::pubmed::PubMedClient;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");
const MAX_SEARCH_RESULTS: usize = 20;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct AppState {
    pub pubmed: PubMedClient,
    pub analyze_use_case: AnalyzeUseCase,
    pub summarize_use_case: SummarizeUseCase,
    pub compare_use_case: CompareUseCase,
    pub max_articles: usize,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SearchRequest {
    #[serde(default)]
    #[validate(length(max = 500, message = "Search query is too long."))]
    pub query: String,
    pub max_results: Option<usize>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Question is too long."))]
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub treatment_a: String,
    #[serde(default)]
    pub treatment_b: String,
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[post("/search")]
async fn search(data: web::Data<AppState>, req: web::Json<SearchRequest>) -> impl Responder {
    if let Err(err) = req.validate() {
        return error_response(&AppError::Validation(err.to_string()));
    }

    let query = req.query.trim();
    if query.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Please enter a search query." }));
    }

    let max_results = req
        .max_results
        .unwrap_or(data.max_articles)
        .clamp(1, MAX_SEARCH_RESULTS);

    add_log(
        &data.logs,
        "INFO",
        "Search",
        &format!("Searching PubMed: {} (max {})", query, max_results),
    );

    match data.pubmed.get_research_data(query, max_results).await {
        Ok(articles) if articles.is_empty() => HttpResponse::NotFound()
            .json(json!({ "error": "No articles found. Try a different search term." })),
        Ok(articles) => {
            add_log(
                &data.logs,
                "INFO",
                "Search",
                &format!("Found {} articles", articles.len()),
            );
            let count = articles.len();
            HttpResponse::Ok().json(json!({ "articles": articles, "count": count }))
        }
        Err(e) => {
            add_log(&data.logs, "ERROR", "Search", &format!("Search failed: {}", e));
            error_response(&e)
        }
    }
}

#[post("/summarize")]
async fn summarize(data: web::Data<AppState>, req: web::Json<SummarizeRequest>) -> impl Responder {
    if req.articles.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "No articles provided." }));
    }

    add_log(
        &data.logs,
        "INFO",
        "Analysis",
        &format!("Summarizing {} articles", req.articles.len()),
    );

    match data.summarize_use_case.execute(&req.articles).await {
        Ok(summary) => HttpResponse::Ok().json(json!({ "summary": summary })),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Analysis",
                &format!("Summarization failed: {}", e),
            );
            error_response(&e)
        }
    }
}

#[post("/analyze")]
async fn analyze(data: web::Data<AppState>, req: web::Json<AnalyzeRequest>) -> impl Responder {
    if let Err(err) = req.validate() {
        return error_response(&AppError::Validation(err.to_string()));
    }

    if req.articles.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "No articles provided." }));
    }

    let question = req.question.trim();
    if question.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Please enter a question." }));
    }

    add_log(
        &data.logs,
        "INFO",
        "Analysis",
        &format!("Answering question against {} articles", req.articles.len()),
    );

    match data.analyze_use_case.execute(&req.articles, question).await {
        Ok(analysis) => HttpResponse::Ok().json(json!({ "analysis": analysis })),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Analysis",
                &format!("Analysis failed: {}", e),
            );
            error_response(&e)
        }
    }
}

#[post("/compare")]
async fn compare(data: web::Data<AppState>, req: web::Json<CompareRequest>) -> impl Responder {
    if req.articles.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "No articles provided." }));
    }

    let treatment_a = req.treatment_a.trim();
    let treatment_b = req.treatment_b.trim();
    if treatment_a.is_empty() || treatment_b.is_empty() {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "Please provide both treatments to compare." }));
    }

    add_log(
        &data.logs,
        "INFO",
        "Analysis",
        &format!("Comparing treatments: {} vs {}", treatment_a, treatment_b),
    );

    match data
        .compare_use_case
        .execute(&req.articles, treatment_a, treatment_b)
        .await
    {
        Ok(comparison) => HttpResponse::Ok().json(json!({ "comparison": comparison })),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Analysis",
                &format!("Comparison failed: {}", e),
            );
            error_response(&e)
        }
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<AppState>) -> impl Responder {
    let logs = data.logs.lock().unwrap();
    HttpResponse::Ok().json(&*logs)
}

fn error_response(err: &AppError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        AppError::Validation(_) => HttpResponse::BadRequest().json(body),
        AppError::NotFound(_) => HttpResponse::NotFound().json(body),
        AppError::Llm(_) | AppError::PubMed(_) => HttpResponse::BadGateway().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap();
    logs.push(entry);
    if logs.len() > 100 {
        logs.remove(0);
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(
        web::scope("/api")
            .service(search)
            .service(summarize)
            .service(analyze)
            .service(compare)
            .service(get_logs),
    );
}

pub fn start_server(state: AppState, port: u16) -> std::io::Result<Server> {
    let data = web::Data::new(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // local research tool
        App::new().wrap(cors).app_data(data.clone()).configure(routes)
    })
    .bind(("127.0.0.1", port))?
    .run();

    Ok(server)
}
