//! Menu browsing and search.
//!
//! - `GET /menu` - full catalog with category tags
//! - `GET /menu/search` - catalog filtered by the `q` query parameter

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{database, error::AppError, models::MenuItem, money, search, state::AppState};

#[derive(Debug, Serialize)]
pub struct MenuItemResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: String,
    pub categories: Vec<String>,
}

impl MenuItemResponse {
    pub fn new(item: MenuItem, categories: Vec<String>) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            image: item.image,
            price: money::format_cents(item.price_cents),
            categories,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub items: Vec<MenuItemResponse>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Groups `(menu_item_id, category_name)` join rows by item id.
pub fn category_index(pairs: Vec<(i64, String)>) -> HashMap<i64, Vec<String>> {
    let mut index: HashMap<i64, Vec<String>> = HashMap::new();

    for (item_id, name) in pairs {
        index.entry(item_id).or_default().push(name);
    }

    index
}

fn to_responses(items: Vec<MenuItem>, index: &mut HashMap<i64, Vec<String>>) -> Vec<MenuItemResponse> {
    items
        .into_iter()
        .map(|item| {
            let categories = index.remove(&item.id).unwrap_or_default();
            MenuItemResponse::new(item, categories)
        })
        .collect()
}

pub async fn menu_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MenuResponse>, AppError> {
    let items = database::list_menu_items(&state.pool).await?;
    let mut index = category_index(database::item_category_names(&state.pool).await?);

    Ok(Json(MenuResponse {
        items: to_responses(items, &mut index),
    }))
}

pub async fn menu_search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<MenuResponse>, AppError> {
    let items = database::list_menu_items(&state.pool).await?;
    let matched = search::search_items(items, &params.q);
    let mut index = category_index(database::item_category_names(&state.pool).await?);

    Ok(Json(MenuResponse {
        items: to_responses(matched, &mut index),
    }))
}

#[cfg(test)]
mod tests {
    use super::category_index;

    #[test]
    fn test_category_index_groups_by_item() {
        let index = category_index(vec![
            (1, "Main".to_string()),
            (2, "Side".to_string()),
            (1, "Extra".to_string()),
        ]);

        assert_eq!(index[&1], vec!["Main", "Extra"]);
        assert_eq!(index[&2], vec!["Side"]);
    }
}
