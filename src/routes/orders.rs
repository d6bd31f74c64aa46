//! Order workflow.
//!
//! - `GET  /order` - catalog partitioned into Main / Side / Extra groups
//! - `POST /order` - place an order (form), mail a confirmation, redirect
//! - `GET  /order-confirmation/{id}` - order summary
//! - `POST /order-confirmation/{id}` - payment callback, redirect
//! - `GET  /payment-confirmation` - static payment page (see `pages`)

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::Redirect,
};
use axum_extra::extract::Form;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    database,
    error::AppError,
    mail::{ORDER_CONFIRMATION_SUBJECT, order_confirmation_body},
    models::{MenuItem, NewOrder},
    money,
    state::AppState,
};

use super::menu::{MenuItemResponse, category_index};

/// The three fixed menu groups shown on the order page.
const GROUPS: [&str; 3] = ["Main", "Side", "Extra"];

#[derive(Debug, Serialize)]
pub struct OrderPageResponse {
    pub main: Vec<MenuItemResponse>,
    pub side: Vec<MenuItemResponse>,
    pub extra: Vec<MenuItemResponse>,
}

#[derive(Debug, Deserialize)]
pub struct OrderForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub dorm: Option<String>,
    /// The form submits the literal string "true"; anything else is false.
    #[serde(default)]
    pub is_pickup: String,
    #[serde(rename = "items[]", default)]
    pub items: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct LineItem {
    pub id: i64,
    pub name: String,
    pub price: String,
}

#[derive(Debug, Serialize)]
pub struct OrderConfirmationResponse {
    pub id: i64,
    pub items: Vec<LineItem>,
    pub price: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentUpdate {
    #[serde(rename = "isPaid")]
    pub is_paid: bool,
}

/// Membership is a case-sensitive substring match on category names, so an
/// item tagged "Mains" lands in the Main group and an untagged item lands
/// nowhere. An item can appear in more than one group.
fn in_group(item_id: i64, index: &HashMap<i64, Vec<String>>, group: &str) -> bool {
    index
        .get(&item_id)
        .is_some_and(|names| names.iter().any(|name| name.contains(group)))
}

fn partition_menu(
    items: Vec<MenuItem>,
    index: &HashMap<i64, Vec<String>>,
) -> [Vec<MenuItemResponse>; 3] {
    GROUPS.map(|group| {
        items
            .iter()
            .filter(|item| in_group(item.id, index, group))
            .map(|item| {
                MenuItemResponse::new(item.clone(), index.get(&item.id).cloned().unwrap_or_default())
            })
            .collect()
    })
}

pub async fn order_page_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<OrderPageResponse>, AppError> {
    let items = database::list_menu_items(&state.pool).await?;
    let index = category_index(database::item_category_names(&state.pool).await?);

    let [main, side, extra] = partition_menu(items, &index);

    Ok(Json(OrderPageResponse { main, side, extra }))
}

pub async fn place_order_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<OrderForm>,
) -> Result<Redirect, AppError> {
    let is_pickup = form.is_pickup == "true";
    let dorm = if is_pickup {
        None
    } else {
        form.dorm.filter(|d| !d.is_empty())
    };

    let mut price_cents: i64 = 0;
    let mut item_ids = Vec::with_capacity(form.items.len());

    // Any unknown id fails the whole request; no partial orders.
    for id in &form.items {
        let item = database::find_menu_item(&state.pool, *id)
            .await?
            .ok_or(AppError::NotFound("menu item"))?;

        price_cents += item.price_cents;
        item_ids.push(item.id);
    }

    let order = NewOrder {
        created_on: Utc::now(),
        price_cents,
        customer_name: form.name,
        customer_email: form.email.clone(),
        dorm,
        is_pickup,
    };

    let order_id = database::insert_order(&state.pool, &order, &item_ids).await?;

    info!(order_id, total = %money::format_cents(price_cents), "Order placed");

    // The order row is already committed; a mail failure aborts the request
    // without rolling it back.
    let body = order_confirmation_body(is_pickup, price_cents);
    state
        .mailer
        .send(&form.email, ORDER_CONFIRMATION_SUBJECT, &body)
        .await?;

    Ok(Redirect::to(&format!("/order-confirmation/{order_id}")))
}

pub async fn order_confirmation_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<OrderConfirmationResponse>, AppError> {
    let order = database::find_order(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound("order"))?;

    let items = database::order_line_items(&state.pool, order.id)
        .await?
        .into_iter()
        .map(|item| LineItem {
            id: item.id,
            name: item.name,
            price: money::format_cents(item.price_cents),
        })
        .collect();

    Ok(Json(OrderConfirmationResponse {
        id: order.id,
        items,
        price: money::format_cents(order.price_cents),
    }))
}

pub async fn confirm_payment_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    payload: Result<Json<PaymentUpdate>, JsonRejection>,
) -> Result<Redirect, AppError> {
    let Json(payload) = payload.map_err(|_| AppError::MalformedPayload)?;

    if payload.is_paid {
        if database::mark_paid(&state.pool, id).await? == 0 {
            return Err(AppError::NotFound("order"));
        }

        info!(order_id = id, "Order marked paid");
    }

    Ok(Redirect::to("/payment-confirmation"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::partition_menu;
    use crate::models::MenuItem;

    fn item(id: i64, name: &str) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            description: String::new(),
            image: String::new(),
            price_cents: 100,
        }
    }

    #[test]
    fn test_partition_by_category_substring() {
        let items = vec![item(1, "Burger"), item(2, "Fries"), item(3, "Water")];
        let index = HashMap::from([
            (1, vec!["Mains".to_string()]),
            (2, vec!["Side".to_string(), "Extra".to_string()]),
        ]);

        let [main, side, extra] = partition_menu(items, &index);

        assert_eq!(main.len(), 1);
        assert_eq!(main[0].name, "Burger");
        // Fries is tagged into both remaining groups.
        assert_eq!(side.len(), 1);
        assert_eq!(extra.len(), 1);
        // Water has no category and lands in no group.
        assert!(!side.iter().any(|i| i.name == "Water"));
    }

    #[test]
    fn test_partition_is_case_sensitive() {
        let items = vec![item(1, "Burger")];
        let index = HashMap::from([(1, vec!["main".to_string()])]);

        let [main, _, _] = partition_menu(items, &index);

        assert!(main.is_empty());
    }
}
