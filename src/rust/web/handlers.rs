use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::page;
use super::state::{submit, ViewState};
use super::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub text: String,
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

async fn index() -> HttpResponse {
    html(StatusCode::OK, page::render(&ViewState::Idle, ""))
}

async fn analyze(state: web::Data<AppState>, form: web::Form<AnalyzeForm>) -> HttpResponse {
    let view = submit(&*state.analyzer, &form.text);
    let status = if view.is_failure() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    html(status, page::render(&view, &form.text))
}

/// Registers the analyzer page. Expects `web::Data<AppState>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(index))
            .route(web::post().to(analyze)),
    );
}
