//! Static page payloads: index, about, and the payment-confirmation page
//! customers land on after the payment callback.

use axum::Json;
use serde_json::{Value, json};

pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "page": "index",
        "message": "Welcome to Campus Eats! Browse the menu and place an order.",
    }))
}

pub async fn about_handler() -> Json<Value> {
    Json(json!({
        "page": "about",
        "message": "Campus Eats delivers fresh food to dorms across campus, or have it ready for pickup.",
    }))
}

pub async fn payment_confirmation_handler() -> Json<Value> {
    Json(json!({
        "page": "payment-confirmation",
        "message": "Thank you! Your payment has been received.",
    }))
}
