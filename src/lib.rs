//! Campus food-ordering backend.
//!
//! Customers browse the menu, place an order, get an email confirmation and
//! confirm payment; staff pull a daily dashboard of orders and revenue.
//!
//! # Routes
//! - `GET  /` and `GET /about` - static pages
//! - `GET  /order` - menu partitioned into Main / Side / Extra
//! - `POST /order` - place an order, redirect to its confirmation
//! - `GET/POST /order-confirmation/{id}` - summary / payment callback
//! - `GET  /payment-confirmation` - payment landing page
//! - `GET  /menu`, `GET /menu/search` - browsing and search
//! - `GET  /dashboard` - staff only (bearer token in the `Staff` group)
//!
//! Storage is SQLite via sqlx, confirmation mail goes out over SMTP, and the
//! payment step is a boolean callback flag, not a gateway integration.

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod mail;
pub mod models;
pub mod money;
pub mod routes;
pub mod search;
pub mod state;

use routes::{
    dashboard::dashboard_handler,
    menu::{menu_handler, menu_search_handler},
    orders::{
        confirm_payment_handler, order_confirmation_handler, order_page_handler,
        place_order_handler,
    },
    pages::{about_handler, index_handler, payment_confirmation_handler},
};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(index_handler))
        .route("/about", get(about_handler))
        .route("/order", get(order_page_handler).post(place_order_handler))
        .route(
            "/order-confirmation/{id}",
            get(order_confirmation_handler).post(confirm_payment_handler),
        )
        .route("/payment-confirmation", get(payment_confirmation_handler))
        .route("/menu", get(menu_handler))
        .route("/menu/search", get(menu_search_handler))
        .route("/dashboard", get(dashboard_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");
    let app = router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
