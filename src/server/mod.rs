//! Web serving: application state and route table

pub mod handlers;

use crate::currency::CurrencyTable;
use crate::models::SalaryPipeline;
use actix_files::Files;
use actix_web::web;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared immutable state: the loaded pipeline, the currency table, and
/// the directory holding the form page.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SalaryPipeline>,
    pub currencies: CurrencyTable,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(pipeline: SalaryPipeline, currencies: CurrencyTable, static_dir: PathBuf) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            currencies,
            static_dir,
        }
    }
}

/// Route table, reusable per worker.
pub fn app_config(static_dir: PathBuf) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg| {
        cfg.route("/api/health", web::get().to(handlers::health))
            .route("/api/model-info", web::get().to(handlers::model_info))
            .route("/api/predict", web::post().to(handlers::predict))
            .route("/", web::get().to(handlers::index))
            .service(Files::new("/static", static_dir.clone()).prefer_utf8(true))
            .default_service(web::route().to(handlers::not_found));
    }
}
