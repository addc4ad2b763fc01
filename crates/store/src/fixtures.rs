//! 测试数据写入工具。
//!
//! 生产路径只读；这里的写入仅供测试与本地演示模拟外部采集进程。

use chrono::{DateTime, Utc};
use nedan_core::catalog::entity::Product;
use sqlx::SqlitePool;

/// 构造一个只有必填列的商品，其余字段由调用方按需覆盖。
pub fn product(asin: &str, title: &str) -> Product {
    Product {
        asin: asin.to_string(),
        title: title.to_string(),
        subtitle: None,
        pattern: None,
        style: None,
        image_url: None,
        product_link: None,
        affiliate_link: None,
        price: None,
        price_added: None,
        stock_status: None,
        reviews: None,
        stars: None,
        date_added: None,
        last_checkdate: None,
        last_pricechange: None,
        last_pricechange_percent: None,
        wishlist_name: None,
    }
}

/// 写入一行商品。
pub async fn insert_product(pool: &SqlitePool, p: &Product) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO products (asin, title, subtitle, pattern, style, image_url, product_link,
            affiliate_link, price, price_added, stock_status, reviews, stars, date_added,
            last_checkdate, last_pricechange, last_pricechange_percent, wishlist_name)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&p.asin)
    .bind(&p.title)
    .bind(&p.subtitle)
    .bind(&p.pattern)
    .bind(&p.style)
    .bind(&p.image_url)
    .bind(&p.product_link)
    .bind(&p.affiliate_link)
    .bind(p.price)
    .bind(p.price_added)
    .bind(&p.stock_status)
    .bind(p.reviews)
    .bind(p.stars)
    .bind(p.date_added)
    .bind(p.last_checkdate)
    .bind(p.last_pricechange)
    .bind(p.last_pricechange_percent)
    .bind(&p.wishlist_name)
    .execute(pool)
    .await?;
    Ok(())
}

/// 追加一条调价事件。
pub async fn insert_price_event(
    pool: &SqlitePool,
    asin: &str,
    price: f64,
    updated_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO price_history (asin, price, updated_at) VALUES (?, ?, ?)")
        .bind(asin)
        .bind(price)
        .bind(updated_at)
        .execute(pool)
        .await?;
    Ok(())
}
