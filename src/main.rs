use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cuentas::{
  adapters::http::{configure_health_routes, configure_invoice_routes},
  application::invoice::{CreateInvoiceUseCase, GetInvoicePdfUseCase, GetInvoiceUseCase},
  domain::document::{DocumentComposer, LayoutEngine, PageGeometry},
  domain::invoice::{InvoicePipeline, InvoicePipelineDependencies},
  infrastructure::{config::Config, factory::StoreFactory, pdf::PdfRenderer},
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cuentas=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting cuentas");

  // Load configuration
  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  // Connect stores
  let stores = StoreFactory::create(&config)
    .await
    .context("Failed to initialize stores")?;

  // Initialize pipeline
  let composer = DocumentComposer::new(
    config.issuer.clone(),
    LayoutEngine::new(PageGeometry::letter()),
  );
  let mut deps = InvoicePipelineDependencies::new(
    stores.counter_store,
    stores.invoice_repo,
    stores.blob_store,
    Arc::new(PdfRenderer::new()),
    composer,
  );
  deps.counter_name = config.sequence.counter_name.clone();
  let pipeline = Arc::new(InvoicePipeline::new(deps));

  // Initialize use cases
  let create_invoice_use_case = Arc::new(CreateInvoiceUseCase::new(pipeline.clone()));
  let get_invoice_use_case = Arc::new(GetInvoiceUseCase::new(pipeline.clone()));
  let get_invoice_pdf_use_case = Arc::new(GetInvoicePdfUseCase::new(pipeline));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      .service(web::scope("/api/v1/invoices").configure(|cfg| {
        configure_invoice_routes(
          cfg,
          create_invoice_use_case.clone(),
          get_invoice_use_case.clone(),
          get_invoice_pdf_use_case.clone(),
        )
      }))
      .configure(configure_health_routes)
  })
  .bind((server_host.as_str(), server_port))
  .with_context(|| format!("Failed to bind {}:{}", server_host, server_port))?
  .run()
  .await
  .context("HTTP server failed")?;

  Ok(())
}
