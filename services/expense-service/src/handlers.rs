use crate::errors::ExpenseServiceError;
use crate::metrics;
use crate::models::{ApiResponse, ExpenseRequest};
use crate::services::ExpenseService;
use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use serde_json::json;
use split_core::ValidationErrors;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

/// Health check endpoint
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "expense-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus scrape endpoint
pub async fn metrics_endpoint() -> HttpResponse {
    match metrics::render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(body),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// List expenses, newest first
pub async fn list_expenses(
    service: web::Data<Arc<ExpenseService>>,
) -> Result<HttpResponse, ExpenseServiceError> {
    let expenses = service.list_expenses().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(expenses)))
}

/// Record a new expense
pub async fn create_expense(
    service: web::Data<Arc<ExpenseService>>,
    request: web::Json<ExpenseRequest>,
) -> Result<HttpResponse, ExpenseServiceError> {
    let expense = service.create_expense(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        expense,
        "Expense added successfully",
    )))
}

/// Replace an existing expense
pub async fn update_expense(
    service: web::Data<Arc<ExpenseService>>,
    expense_id: web::Path<Uuid>,
    request: web::Json<ExpenseRequest>,
) -> Result<HttpResponse, ExpenseServiceError> {
    let expense = service
        .update_expense(*expense_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        expense,
        "Expense updated successfully",
    )))
}

pub async fn delete_expense(
    service: web::Data<Arc<ExpenseService>>,
    expense_id: web::Path<Uuid>,
) -> Result<HttpResponse, ExpenseServiceError> {
    service.delete_expense(*expense_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message("Expense deleted successfully")))
}

/// Everyone who paid for or shares in an expense
pub async fn list_people(
    service: web::Data<Arc<ExpenseService>>,
) -> Result<HttpResponse, ExpenseServiceError> {
    let people = service.list_people().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(people)))
}

pub async fn get_balances(
    service: web::Data<Arc<ExpenseService>>,
) -> Result<HttpResponse, ExpenseServiceError> {
    let balances = service.balances().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(balances)))
}

pub async fn get_settlements(
    service: web::Data<Arc<ExpenseService>>,
) -> Result<HttpResponse, ExpenseServiceError> {
    let transactions = service.settlements().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(transactions)))
}

pub async fn get_settlement_summary(
    service: web::Data<Arc<ExpenseService>>,
) -> Result<HttpResponse, ExpenseServiceError> {
    let summary = service.settlement_summary().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(summary)))
}

/// Malformed bodies get the same 400 shape as validation failures
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        let mut errors = ValidationErrors::new();
        errors.add("INVALID_BODY", "body", err.to_string());
        ExpenseServiceError::Validation(errors).into()
    })
}

/// Configure routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health_check))
        .route("/metrics", web::get().to(metrics_endpoint))
        .service(
            web::scope("/api")
                .route("/expenses", web::get().to(list_expenses))
                .route("/expenses", web::post().to(create_expense))
                .route("/expenses/{id}", web::put().to(update_expense))
                .route("/expenses/{id}", web::delete().to(delete_expense))
                .route("/people", web::get().to(list_people))
                .route("/settlements", web::get().to(get_settlements))
                .route("/settlements/balances", web::get().to(get_balances))
                .route("/settlements/summary", web::get().to(get_settlement_summary)),
        );
}
