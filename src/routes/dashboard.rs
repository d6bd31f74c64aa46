//! Staff dashboard: today's orders, their count, and total revenue.
//!
//! Read-only; guarded by the [`StaffUser`] capability check.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;

use crate::{auth::StaffUser, database, error::AppError, models::Order, money, state::AppState};

#[derive(Debug, Serialize)]
pub struct DashboardOrder {
    pub id: i64,
    pub created_on: DateTime<Utc>,
    pub price: String,
    pub customer_name: String,
    pub dorm: Option<String>,
    pub is_pickup: bool,
    pub is_paid: bool,
    pub is_completed: bool,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub orders: Vec<DashboardOrder>,
    pub total_orders: usize,
    pub total_revenue: String,
}

/// An order counts toward the dashboard when its creation instant falls on
/// the given local calendar date.
fn created_on_day(order: &Order, day: NaiveDate) -> bool {
    order.created_on.with_timezone(&Local).date_naive() == day
}

pub async fn dashboard_handler(
    _staff: StaffUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardResponse>, AppError> {
    let today = Local::now().date_naive();

    let todays: Vec<Order> = database::list_orders(&state.pool)
        .await?
        .into_iter()
        .filter(|order| created_on_day(order, today))
        .collect();

    let total_orders = todays.len();
    let revenue_cents: i64 = todays.iter().map(|order| order.price_cents).sum();

    let orders = todays
        .into_iter()
        .map(|order| DashboardOrder {
            id: order.id,
            created_on: order.created_on,
            price: money::format_cents(order.price_cents),
            customer_name: order.customer_name,
            dorm: order.dorm,
            is_pickup: order.is_pickup,
            is_paid: order.is_paid,
            is_completed: order.is_completed,
        })
        .collect();

    Ok(Json(DashboardResponse {
        orders,
        total_orders,
        total_revenue: money::format_cents(revenue_cents),
    }))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, Utc};

    use super::created_on_day;
    use crate::models::Order;

    fn order_created(created_on: chrono::DateTime<Utc>) -> Order {
        Order {
            id: 1,
            created_on,
            price_cents: 500,
            customer_name: "Alice".to_string(),
            customer_email: "alice@example.com".to_string(),
            dorm: None,
            is_pickup: true,
            is_paid: false,
            is_completed: false,
        }
    }

    #[test]
    fn test_order_from_now_counts_today() {
        let today = Local::now().date_naive();

        assert!(created_on_day(&order_created(Utc::now()), today));
    }

    #[test]
    fn test_old_order_does_not_count() {
        let today = Local::now().date_naive();
        let last_week = Utc::now() - Duration::days(7);

        assert!(!created_on_day(&order_created(last_week), today));
    }
}
