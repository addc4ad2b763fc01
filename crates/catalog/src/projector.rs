//! # 结果投影
//!
//! 只做字段选择与空值处理，不含业务判断。

use nedan_core::catalog::entity::{
    Price, PriceDropSummary, Product, ProductDetail, ProductSummary, StockStatus,
};

fn stock_status(raw: Option<String>) -> Option<StockStatus> {
    raw.as_deref().map(StockStatus::parse)
}

/// 列表 / 搜索摘要。
pub fn summary(p: Product) -> ProductSummary {
    ProductSummary {
        asin: p.asin,
        title: p.title,
        price: Price::from_column(p.price),
        stars: p.stars,
        stock_status: stock_status(p.stock_status),
        image_url: p.image_url,
        product_link: p.product_link,
    }
}

/// 降价榜摘要：固定摘要 + 最近一次调价。
pub fn price_drop_summary(p: Product) -> PriceDropSummary {
    let last_pricechange = p.last_pricechange;
    let last_pricechange_percent = p.last_pricechange_percent;
    PriceDropSummary {
        summary: summary(p),
        last_pricechange,
        last_pricechange_percent,
    }
}

/// 单品详情。
pub fn detail(p: Product) -> ProductDetail {
    ProductDetail {
        asin: p.asin,
        title: p.title,
        subtitle: p.subtitle,
        pattern: p.pattern,
        style: p.style,
        image_url: p.image_url,
        product_link: p.product_link,
        affiliate_link: p.affiliate_link,
        price: Price::from_column(p.price),
        price_added: Price::from_column(p.price_added),
        stock_status: stock_status(p.stock_status),
        reviews: p.reviews,
        stars: p.stars,
        date_added: p.date_added,
        last_checkdate: p.last_checkdate,
        last_pricechange: p.last_pricechange,
        last_pricechange_percent: p.last_pricechange_percent,
        wishlist_name: p.wishlist_name,
    }
}
