//! 目录查询的 SQL 渲染。
//!
//! 这里只产生固定的 SQL 片段，所有来自调用方的值 (分类名、搜索模式、
//! 窗口大小) 一律通过 `push_bind` 作为绑定参数传递。

use nedan_core::catalog::entity::IN_STOCK_TEXT;
use nedan_core::catalog::query::{CatalogFilter, CatalogQuery, Scope, SortOrder};
use sqlx::{QueryBuilder, Sqlite};

pub(crate) const PRODUCT_COLUMNS: &str = "asin, title, subtitle, pattern, style, image_url, \
     product_link, affiliate_link, price, price_added, stock_status, reviews, stars, date_added, \
     last_checkdate, last_pricechange, last_pricechange_percent, wishlist_name";

pub(crate) const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        asin TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        subtitle TEXT,
        pattern TEXT,
        style TEXT,
        image_url TEXT,
        product_link TEXT,
        affiliate_link TEXT,
        price REAL,
        price_added REAL,
        stock_status TEXT,
        reviews INTEGER,
        stars REAL,
        date_added DATETIME,
        last_checkdate DATETIME,
        last_pricechange REAL,
        last_pricechange_percent REAL,
        wishlist_name TEXT
    );

    CREATE INDEX IF NOT EXISTS idx_products_title ON products (title, asin);
    CREATE INDEX IF NOT EXISTS idx_products_wishlist ON products (wishlist_name, title);

    CREATE TABLE IF NOT EXISTS price_history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        asin TEXT NOT NULL,
        price REAL NOT NULL,
        updated_at DATETIME NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_price_history_asin ON price_history (asin, updated_at);
"#;

/// 构建一页商品的查询语句。
pub(crate) fn select_products(query: &CatalogQuery) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM products", PRODUCT_COLUMNS));
    push_filter(&mut qb, &query.filter);
    push_order(&mut qb, query.sort);
    qb.push(" LIMIT ")
        .push_bind(query.window.limit)
        .push(" OFFSET ")
        .push_bind(query.window.offset);
    qb
}

/// 构建与 `select_products` 使用同一过滤逻辑的计数语句。
pub(crate) fn count_products(filter: &CatalogFilter) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products");
    push_filter(&mut qb, filter);
    qb
}

/// # Summary
/// 渲染 WHERE 子句，多个条件以 AND 连接。
///
/// # Logic
/// 1. 基础范围：分类精确匹配，或对 title / asin 的大小写不敏感子串匹配
///    (`REGEXP`，需连接注册 regexp 函数，按 Unicode 折叠大小写)。
/// 2. 仅有货：`stock_status` 等于规范文本。
/// 3. 分类 + 仅有货：额外排除价格为 0 或缺失的行。
fn push_filter(qb: &mut QueryBuilder<'static, Sqlite>, filter: &CatalogFilter) {
    let mut has_clause = false;

    match &filter.scope {
        Scope::All => {}
        Scope::Category(name) => {
            next_clause(qb, &mut has_clause);
            qb.push("wishlist_name = ").push_bind(name.clone());
        }
        Scope::Search(term) => {
            let pattern = search_pattern(term);
            next_clause(qb, &mut has_clause);
            qb.push("(title REGEXP ")
                .push_bind(pattern.clone())
                .push(" OR asin REGEXP ")
                .push_bind(pattern)
                .push(")");
        }
    }

    if filter.in_stock_only {
        next_clause(qb, &mut has_clause);
        qb.push("stock_status = ").push_bind(IN_STOCK_TEXT);
    }

    if filter.excludes_unpriced() {
        next_clause(qb, &mut has_clause);
        qb.push("price IS NOT NULL AND price <> 0");
    }
}

fn next_clause(qb: &mut QueryBuilder<'static, Sqlite>, has_clause: &mut bool) {
    qb.push(if *has_clause { " AND " } else { " WHERE " });
    *has_clause = true;
}

fn push_order(qb: &mut QueryBuilder<'static, Sqlite>, sort: SortOrder) {
    match sort {
        SortOrder::Title => qb.push(" ORDER BY title ASC, asin ASC"),
        // SQLite 默认把 NULL 排在最前，这里显式放到末尾
        SortOrder::PriceDrop => qb.push(
            " ORDER BY last_pricechange_percent IS NULL, last_pricechange_percent ASC, asin ASC",
        ),
    };
}

/// 将搜索词转为大小写不敏感的正则子串模式，所有元字符按字面匹配。
pub(crate) fn search_pattern(term: &str) -> String {
    format!("(?i){}", regex::escape(term))
}
