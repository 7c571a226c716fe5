use actix_web::{HttpResponse, http::header, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{dtos::CreateInvoiceRequest, errors::ApiError};
use crate::application::invoice::{
  CreateInvoiceUseCase, GetInvoiceCommand, GetInvoicePdfCommand, GetInvoicePdfUseCase,
  GetInvoiceUseCase,
};

/// Handler for issuing an invoice
///
/// POST /api/v1/invoices
/// Body: CreateInvoiceRequest (JSON)
/// Response: CreateInvoiceResponse (JSON) with status 201
pub async fn create_invoice_handler(
  request: web::Json<CreateInvoiceRequest>,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let response = use_case.execute(request.into_inner().into()).await?;

  tracing::info!(
    invoice_number = response.invoice_number,
    invoice_id = %response.invoice_id,
    "Invoice issued"
  );

  Ok(HttpResponse::Created().json(response))
}

/// Handler for reading an invoice record
///
/// GET /api/v1/invoices/{id}
pub async fn get_invoice_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = GetInvoiceCommand {
    invoice_id: path.into_inner(),
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Handler for downloading the stored document
///
/// GET /api/v1/invoices/{id}/pdf
/// Response: application/pdf, shown inline as invoice-<n>.pdf
pub async fn get_invoice_pdf_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetInvoicePdfUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = GetInvoicePdfCommand {
    invoice_id: path.into_inner(),
  };

  let response = use_case.execute(command).await?;

  Ok(
    HttpResponse::Ok()
      .content_type(response.content_type)
      .insert_header((
        header::CONTENT_DISPOSITION,
        format!("inline; filename=\"{}\"", response.filename),
      ))
      .body(response.bytes),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::invoice::test_support::memory_pipeline;
  use actix_web::{
    App,
    http::StatusCode,
    test::{self, TestRequest},
  };
  use serde_json::{Value, json};

  fn draft_body() -> Value {
    json!({
      "client_type": "COMPANY",
      "client_name": "EOBO CAFÉ",
      "items": [
        {"description": "Cafe 340 gr", "quantity": "1", "unit_price": 170000}
      ],
      "issue_date": "2025-12-15",
      "payment_terms": "CREDIT",
      "credit_days": 20
    })
  }

  macro_rules! invoice_app {
    () => {{
      let pipeline = memory_pipeline();
      test::init_service(
        App::new()
          .app_data(web::Data::new(Arc::new(CreateInvoiceUseCase::new(
            pipeline.clone(),
          ))))
          .app_data(web::Data::new(Arc::new(GetInvoiceUseCase::new(
            pipeline.clone(),
          ))))
          .app_data(web::Data::new(Arc::new(GetInvoicePdfUseCase::new(
            pipeline,
          ))))
          .route("/invoices", web::post().to(create_invoice_handler))
          .route("/invoices/{id}", web::get().to(get_invoice_handler))
          .route("/invoices/{id}/pdf", web::get().to(get_invoice_pdf_handler)),
      )
      .await
    }};
  }

  #[actix_web::test]
  async fn test_create_then_fetch_invoice() {
    let app = invoice_app!();

    let req = TestRequest::post()
      .uri("/invoices")
      .set_json(draft_body())
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["invoice_number"], 1);
    assert_eq!(created["total_amount"], 170000);
    assert_eq!(created["total_amount_text"], "ciento setenta mil pesos (COP)");
    assert_eq!(created["due_date"], "2026-01-04");

    let id = created["invoice_id"].as_str().unwrap().to_string();

    let req = TestRequest::get()
      .uri(&format!("/invoices/{}", id))
      .to_request();
    let record: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(record["client_name"], "EOBO CAFÉ");
    assert_eq!(record["items"][0]["unit"], "und");

    let req = TestRequest::get()
      .uri(&format!("/invoices/{}/pdf", id))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers().get(header::CONTENT_TYPE).unwrap(),
      "application/pdf"
    );
    assert_eq!(
      resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
      "inline; filename=\"invoice-1.pdf\""
    );
    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"%PDF-1.4"));
  }

  #[actix_web::test]
  async fn test_create_rejects_invalid_request() {
    let app = invoice_app!();

    let mut body = draft_body();
    body["items"] = json!([]);

    let req = TestRequest::post().uri("/invoices").set_json(body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error"], "validation_error");
  }

  #[actix_web::test]
  async fn test_domain_validation_maps_to_bad_request() {
    let app = invoice_app!();

    let mut body = draft_body();
    body["due_date"] = json!("2025-12-01");

    let req = TestRequest::post().uri("/invoices").set_json(body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[actix_web::test]
  async fn test_unknown_invoice_is_not_found() {
    let app = invoice_app!();

    let req = TestRequest::get()
      .uri(&format!("/invoices/{}", Uuid::new_v4()))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error"], "not_found");
  }
}
