//! HTTP handlers for the prediction service

use crate::currency::SalaryQuote;
use crate::models::EvalMetrics;
use crate::request::{PredictionRequest, ValidationError};
use crate::server::AppState;
use actix_files::NamedFile;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info, warn};

/// Fixed post-prediction pause so the form's spinner is visible.
const PREDICTION_DELAY: Duration = Duration::from_secs(1);

/// Uniform JSON envelope for every API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: &str) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Successful prediction payload.
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub employee_name: String,
    pub quote: SalaryQuote,
    /// Formatted panel lines, one per displayed currency
    pub lines: Vec<String>,
}

/// Model facts exposed by `/api/model-info`.
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub feature_columns: Vec<String>,
    pub n_trees: usize,
    pub trained_at: String,
    pub metrics: Option<EvalMetrics>,
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success("salary prediction service is up"))
}

pub async fn model_info(state: web::Data<AppState>) -> impl Responder {
    let meta = state.pipeline.meta();

    HttpResponse::Ok().json(ApiResponse::success(ModelInfo {
        feature_columns: meta.feature_columns.clone(),
        n_trees: meta.n_trees,
        trained_at: meta.trained_at.clone(),
        metrics: meta.metrics,
    }))
}

pub async fn predict(
    state: web::Data<AppState>,
    payload: web::Json<PredictionRequest>,
) -> impl Responder {
    let request = payload.into_inner();

    match request.validate() {
        // Blank name skips prediction entirely; this is the one
        // submission outcome that is a warning, not an error.
        Err(ValidationError::BlankEmployeeName) => {
            warn!("submission without employee name, skipping prediction");
            return HttpResponse::UnprocessableEntity().json(ApiResponse::<PredictionResponse>::error(
                "Please enter the employee name before requesting a prediction.",
            ));
        }
        Err(e) => {
            warn!("rejected prediction request: {}", e);
            return HttpResponse::BadRequest()
                .json(ApiResponse::<PredictionResponse>::error(&e.to_string()));
        }
        Ok(()) => {}
    }

    let pipeline = state.pipeline.clone();
    let record = request.to_record();
    let result = web::block(move || pipeline.predict_usd(&record)).await;

    tokio::time::sleep(PREDICTION_DELAY).await;

    match result {
        Ok(salary_usd) if salary_usd.is_finite() => {
            let quote = state.currencies.quote(salary_usd, &request.company_location);
            info!(
                "predicted salary for {} ({}, {}): {:.2} USD",
                request.employee_name, request.job_title, request.company_location, salary_usd
            );

            let lines = quote.lines();
            HttpResponse::Ok().json(ApiResponse::success(PredictionResponse {
                employee_name: request.employee_name,
                quote,
                lines,
            }))
        }
        Ok(salary_usd) => {
            error!("prediction produced a non-finite value: {}", salary_usd);
            HttpResponse::InternalServerError().json(ApiResponse::<PredictionResponse>::error(
                "Prediction failed. Please check the submitted values and try again.",
            ))
        }
        Err(e) => {
            error!("prediction call failed: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::<PredictionResponse>::error(
                "Prediction failed. Please check the submitted values and try again.",
            ))
        }
    }
}

/// The form page.
pub async fn index(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    match NamedFile::open_async(state.static_dir.join("index.html")).await {
        Ok(file) => file.into_response(&req),
        Err(e) => {
            error!("failed to open form page: {}", e);
            HttpResponse::InternalServerError().body("failed to load the form page")
        }
    }
}

pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(ApiResponse::<()>::error("endpoint not found"))
}

#[cfg(test)]
mod tests {
    use crate::currency::CurrencyTable;
    use crate::data::{SalaryRecord, SalaryTable};
    use crate::models::{ForestConfig, SalaryPipeline};
    use crate::server::{app_config, AppState};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};

    fn record(level: &str, location: &str, salary: f64) -> SalaryRecord {
        SalaryRecord {
            experience_level: level.to_string(),
            job_title: "Data Scientist".to_string(),
            company_location: location.to_string(),
            remote_ratio: Some(50.0),
            work_year: Some(2023.0),
            salary_in_usd: Some(salary),
        }
    }

    fn fitted_state() -> AppState {
        let rows = vec![
            record("Entry-level", "IN", 40_000.0),
            record("Mid-level", "GB", 80_000.0),
            record("Senior", "US", 150_000.0),
            record("Executive", "US", 250_000.0),
            record("Entry-level", "IN", 42_000.0),
            record("Senior", "US", 155_000.0),
        ];
        let (table, _) = SalaryTable::from_records(rows);

        let config = ForestConfig {
            n_trees: 5,
            max_depth: 4,
            ..Default::default()
        };
        let pipeline = SalaryPipeline::fit(&table, config).unwrap();

        AppState::new(pipeline, CurrencyTable::builtin(), "static".into())
    }

    fn submission(name: &str) -> serde_json::Value {
        serde_json::json!({
            "employee_name": name,
            "experience_level": "Senior",
            "job_title": "Data Scientist",
            "company_location": "IN",
            "remote_ratio": 50,
            "work_year": 2024,
        })
    }

    #[actix_web::test]
    async fn test_blank_name_yields_warning_and_no_prediction() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fitted_state()))
                .configure(app_config("static".into())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/predict")
            .set_json(submission("  "))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["data"].is_null());
        assert!(body["error"].as_str().unwrap().contains("employee name"));
    }

    #[actix_web::test]
    async fn test_predict_returns_formatted_quote_lines() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fitted_state()))
                .configure(app_config("static".into())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/predict")
            .set_json(submission("Jane Doe"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["employee_name"], "Jane Doe");

        // IN submission: USD and INR lines only, local line suppressed
        let lines = body["data"]["lines"].as_array().unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].as_str().unwrap().ends_with("(USD)"));
        assert!(lines[1].as_str().unwrap().ends_with("(INR)"));
    }

    #[actix_web::test]
    async fn test_invalid_field_is_a_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fitted_state()))
                .configure(app_config("static".into())),
        )
        .await;

        let mut payload = submission("Jane Doe");
        payload["remote_ratio"] = serde_json::json!(37);

        let req = test::TestRequest::post()
            .uri("/api/predict")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
