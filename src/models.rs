use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price_cents: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: i64,
    /// Set once at creation, never updated.
    pub created_on: DateTime<Utc>,
    pub price_cents: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub dorm: Option<String>,
    pub is_pickup: bool,
    pub is_paid: bool,
    /// Flipped by staff tooling, never written here.
    pub is_completed: bool,
}

/// Order fields supplied by the order workflow; the id is assigned on insert.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub created_on: DateTime<Utc>,
    pub price_cents: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub dorm: Option<String>,
    pub is_pickup: bool,
}
