//! SQLite store for the menu catalog and orders.
//!
//! All many-to-many relations are explicit join-table rows:
//! `menu_item_categories` links items to categories and `order_items` holds
//! one row per selected item on an order (no quantity column).

use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::models::{Category, MenuItem, NewOrder, Order};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS menu_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        image TEXT NOT NULL DEFAULT '',
        price_cents INTEGER NOT NULL CHECK (price_cents >= 0)
    );

    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS menu_item_categories (
        menu_item_id INTEGER NOT NULL REFERENCES menu_items(id),
        category_id INTEGER NOT NULL REFERENCES categories(id),
        PRIMARY KEY (menu_item_id, category_id)
    );

    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        created_on TEXT NOT NULL,
        price_cents INTEGER NOT NULL,
        customer_name TEXT NOT NULL,
        customer_email TEXT NOT NULL,
        dorm TEXT,
        is_pickup INTEGER NOT NULL DEFAULT 0,
        is_paid INTEGER NOT NULL DEFAULT 0,
        is_completed INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS order_items (
        order_id INTEGER NOT NULL REFERENCES orders(id),
        menu_item_id INTEGER NOT NULL REFERENCES menu_items(id)
    );
";

pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;

    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}

pub async fn insert_category(pool: &SqlitePool, name: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
}

pub async fn insert_menu_item(
    pool: &SqlitePool,
    name: &str,
    description: &str,
    image: &str,
    price_cents: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO menu_items (name, description, image, price_cents) \
         VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(description)
    .bind(image)
    .bind(price_cents)
    .fetch_one(pool)
    .await
}

pub async fn assign_category(
    pool: &SqlitePool,
    menu_item_id: i64,
    category_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO menu_item_categories (menu_item_id, category_id) VALUES (?, ?)")
        .bind(menu_item_id)
        .bind(category_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn list_menu_items(pool: &SqlitePool) -> Result<Vec<MenuItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM menu_items ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn find_menu_item(pool: &SqlitePool, id: i64) -> Result<Option<MenuItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM menu_items WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM categories ORDER BY id")
        .fetch_all(pool)
        .await
}

/// Returns `(menu_item_id, category_name)` pairs for the whole catalog.
pub async fn item_category_names(pool: &SqlitePool) -> Result<Vec<(i64, String)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT mic.menu_item_id, c.name \
         FROM menu_item_categories mic \
         JOIN categories c ON c.id = mic.category_id",
    )
    .fetch_all(pool)
    .await
}

/// Inserts the order row and one `order_items` row per selected item in a
/// single transaction, returning the new order id.
pub async fn insert_order(
    pool: &SqlitePool,
    order: &NewOrder,
    item_ids: &[i64],
) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let order_id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (created_on, price_cents, customer_name, customer_email, dorm, is_pickup) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(order.created_on)
    .bind(order.price_cents)
    .bind(&order.customer_name)
    .bind(&order.customer_email)
    .bind(&order.dorm)
    .bind(order.is_pickup)
    .fetch_one(&mut *tx)
    .await?;

    for item_id in item_ids {
        sqlx::query("INSERT INTO order_items (order_id, menu_item_id) VALUES (?, ?)")
            .bind(order_id)
            .bind(item_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(order_id)
}

pub async fn find_order(pool: &SqlitePool, id: i64) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn order_line_items(
    pool: &SqlitePool,
    order_id: i64,
) -> Result<Vec<MenuItem>, sqlx::Error> {
    sqlx::query_as(
        "SELECT m.* FROM order_items oi \
         JOIN menu_items m ON m.id = oi.menu_item_id \
         WHERE oi.order_id = ? \
         ORDER BY m.id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await
}

/// Sets the paid flag; returns the number of rows touched so callers can
/// surface a missing order.
pub async fn mark_paid(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE orders SET is_paid = 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn list_orders(pool: &SqlitePool) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders ORDER BY id")
        .fetch_all(pool)
        .await
}
