//! The single-page front-end: one form, one button, one result region.
//!
//! `GET /` renders the idle form and `POST /` runs the submitted text through
//! the analyzer and renders the outcome. There are no other routes.

mod handlers;
pub mod page;
mod state;

use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::info;

use crate::classifier::SentimentAnalyzer;
use crate::config::Config;

pub use handlers::{configure, AnalyzeForm};
pub use state::{
    submit, ViewState, EMPTY_INPUT_WARNING, NEGATIVE_MESSAGE, PENDING_MESSAGE, POSITIVE_MESSAGE,
    UNKNOWN_LABEL_NOTE,
};

/// Shared by every worker; the analyzer is read-only.
pub struct AppState {
    pub analyzer: Arc<dyn SentimentAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: Arc<dyn SentimentAnalyzer>) -> Self {
        Self { analyzer }
    }
}

/// Serves the page until the server is stopped.
pub async fn serve(config: &Config, analyzer: Arc<dyn SentimentAnalyzer>) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(analyzer));

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
    });
    if config.workers > 0 {
        server = server.workers(config.workers);
    }

    info!("Serving on http://{}:{}", config.host, config.port);
    server.bind((config.host.as_str(), config.port))?.run().await
}
