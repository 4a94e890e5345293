mod core;
mod features;
mod shared;

use crate::core::config::{self, Config, DatabaseBackend};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::orders::clients::{CustomerDirectory, HttpCustomerDirectory};
use crate::features::orders::repositories::{
    OrderRepository, PgOrderRepository, SqliteOrderRepository,
};
use crate::features::orders::{routes as orders_routes, OrderService};
use crate::features::products::repositories::{
    PgProductRepository, ProductRepository, SqliteProductRepository,
};
use crate::features::products::{routes as products_routes, ProductService};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = config::tokio_worker_threads().map_err(|e| anyhow::anyhow!(e))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );

    let (product_repository, order_repository) = connect_repositories(&config).await?;

    let customers: Arc<dyn CustomerDirectory> = Arc::new(
        HttpCustomerDirectory::new(&config.customer_service)
            .map_err(|e| anyhow::anyhow!("Failed to create customer service client: {}", e))?,
    );
    tracing::info!(
        "Customer service client initialized: {}",
        config.customer_service.base_url
    );

    let product_service = Arc::new(ProductService::new(product_repository));
    let order_service = Arc::new(OrderService::new(order_repository, customers));
    tracing::info!("Product and order services initialized");

    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(products_routes::routes(product_service))
        .merge(orders_routes::routes(order_service))
        .route("/health", axum::routing::get(health_check))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(&config.app.cors_allowed_origins))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let listener = bind_listener(&addr)?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Connects to the configured backend, creates the schema and returns the
/// repositories bound to it
async fn connect_repositories(
    config: &Config,
) -> anyhow::Result<(Arc<dyn ProductRepository>, Arc<dyn OrderRepository>)> {
    match config.database.backend {
        DatabaseBackend::Postgres => {
            let pool = database::create_pg_pool(&config.database)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            tracing::info!("PostgreSQL connection pool created");

            database::init_pg_schema(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Schema initialization failed: {}", e))?;
            tracing::info!("Database schema ready");

            Ok((
                Arc::new(PgProductRepository::new(pool.clone())),
                Arc::new(PgOrderRepository::new(pool)),
            ))
        }
        DatabaseBackend::Sqlite => {
            let pool = database::create_sqlite_pool(&config.database)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to open SQLite database: {}", e))?;
            tracing::info!("SQLite connection pool created: {}", config.database.url);

            database::init_sqlite_schema(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Schema initialization failed: {}", e))?;
            tracing::info!("Database schema ready");

            Ok((
                Arc::new(SqliteProductRepository::new(pool.clone())),
                Arc::new(SqliteOrderRepository::new(pool)),
            ))
        }
    }
}

fn bind_listener(addr: &str) -> anyhow::Result<tokio::net::TcpListener> {
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    Ok(tokio::net::TcpListener::from_std(socket.into())?)
}
