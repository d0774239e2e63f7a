//! Serve the salary prediction form and API
//!
//! Usage: cargo run --bin serve -- --model salary_prediction_model.bin

use actix_web::{web, App, HttpServer};
use actix_web::middleware::Logger;
use anyhow::{Context, Result};
use clap::Parser;
use salary_predictor::currency::CurrencyTable;
use salary_predictor::models::SalaryPipeline;
use salary_predictor::server::{app_config, AppState};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Serve the salary prediction web form")]
struct Args {
    /// Model artifact produced by the train binary
    #[arg(short, long, default_value = "salary_prediction_model.bin")]
    model: PathBuf,

    /// Bind host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind port
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Directory holding the form page
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,
}

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("salary_predictor=info,actix_web=info")
        .init();

    let args = Args::parse();

    // Fail fast: without a readable artifact there is nothing to serve.
    let pipeline = SalaryPipeline::load(&args.model).with_context(|| {
        format!(
            "cannot start: model artifact {} is missing or unreadable; run the train binary first",
            args.model.display()
        )
    })?;

    let state = AppState::new(pipeline, CurrencyTable::builtin(), args.static_dir.clone());
    let bind_address = format!("{}:{}", args.host, args.port);

    info!("serving salary predictions on http://{}", bind_address);
    info!("  GET  /                - prediction form");
    info!("  GET  /api/health      - liveness check");
    info!("  GET  /api/model-info  - model metadata");
    info!("  POST /api/predict     - salary prediction");

    let static_dir = args.static_dir;
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(app_config(static_dir.clone()))
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {}", bind_address))?
    .run()
    .await?;

    Ok(())
}
