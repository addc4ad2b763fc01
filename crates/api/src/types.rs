//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use nedan_core::catalog::entity::{
    Listing, Price, PriceDropSummary, PricePoint, PriceSeries, ProductDetail, ProductSummary,
    ProductView, StockStatus,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// 价格统一输出为两位小数的字符串，避免前端浮点展示误差。
fn format_amount(value: f64) -> Option<String> {
    Decimal::from_f64_retain(value).map(|d| {
        let mut d = d.round_dp(2);
        d.rescale(2);
        d.to_string()
    })
}

fn format_price(price: Price) -> Option<String> {
    price.amount().and_then(format_amount)
}

// ============================================================
//  查询参数
// ============================================================

/// 列表类接口的公共查询参数
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 页码，从 1 开始；小于 1 按 1 处理
    pub page: Option<i64>,
    /// 每页条数，默认 20，超过上限时截断
    pub page_size: Option<i64>,
    /// 仅返回有货商品
    pub in_stock: Option<bool>,
    /// 排序：`title` (默认) 或 `price_drop`
    pub sort: Option<String>,
    /// 拉取模式：`initial` (默认，附带总数) 或 `incremental`
    pub mode: Option<String>,
}

/// 搜索接口查询参数
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// 关键字，对标题与 ASIN 做不区分大小写的子串匹配
    pub q: String,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub in_stock: Option<bool>,
    pub mode: Option<String>,
}

/// 分类商品接口查询参数
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    /// 仅返回有货且价格非零的商品，默认开启
    pub in_stock: Option<bool>,
    pub mode: Option<String>,
}

// ============================================================
//  列表相关 DTO
// ============================================================

/// 商品摘要 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductSummaryResponse {
    /// 商品 ASIN
    #[schema(example = "B07XJ8C8F5")]
    pub asin: String,
    /// 标题
    #[schema(example = "Stainless Steel Kettle")]
    pub title: String,
    /// 当前价格，null 表示未知 (与 "0.00" 严格区分)
    #[schema(example = "24.99")]
    pub price: Option<String>,
    /// 评分
    #[schema(example = 4.5)]
    pub stars: Option<f64>,
    /// 库存状态原文
    #[schema(example = "In Stock")]
    pub stock_status: Option<String>,
    /// 是否有货
    pub in_stock: bool,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
}

/// 降价榜条目 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriceDropResponse {
    #[serde(flatten)]
    pub product: ProductSummaryResponse,
    /// 最近一次调价差值
    #[schema(example = "-5.00")]
    pub last_pricechange: Option<String>,
    /// 最近一次调价百分比 (负数为降价)
    #[schema(example = -16.7)]
    pub last_pricechange_percent: Option<f64>,
}

/// 商品分页列表 DTO
///
/// 增量模式下 `total` 与 `page_count` 为 null。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub items: Vec<ProductSummaryResponse>,
    #[schema(example = 1)]
    pub page: i64,
    #[schema(example = 20)]
    pub page_size: i64,
    pub total: Option<u64>,
    pub page_count: Option<u64>,
}

/// 降价榜分页列表 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriceDropListResponse {
    pub items: Vec<PriceDropResponse>,
    pub page: i64,
    pub page_size: i64,
    pub total: Option<u64>,
    pub page_count: Option<u64>,
}

// ============================================================
//  详情与价格历史 DTO
// ============================================================

/// 商品详情 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetailResponse {
    pub asin: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub pattern: Option<String>,
    pub style: Option<String>,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
    pub affiliate_link: Option<String>,
    /// 当前价格，null 表示未知
    pub price: Option<String>,
    /// 首次追踪时的价格
    pub price_added: Option<String>,
    pub stock_status: Option<String>,
    pub in_stock: bool,
    pub reviews: Option<i64>,
    pub stars: Option<f64>,
    /// 首次追踪时间 (ISO 8601)
    #[schema(example = "2024-01-01T00:00:00+00:00")]
    pub date_added: Option<String>,
    /// 最近一次观测时间 (ISO 8601)
    pub last_checkdate: Option<String>,
    pub last_pricechange: Option<String>,
    pub last_pricechange_percent: Option<f64>,
    /// 所属分类
    #[schema(example = "Kitchen")]
    pub wishlist_name: Option<String>,
}

/// 价格序列中的一个点
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PricePointResponse {
    #[schema(example = "12.00")]
    pub price: String,
    /// 日粒度日期
    #[schema(example = "2024-02-01")]
    pub date: String,
    /// 完整时间戳 (ISO 8601)
    pub at: String,
}

/// 图表载荷：下标一一对应的价格与日期数组
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriceChartResponse {
    pub prices: Vec<f64>,
    pub dates: Vec<String>,
}

/// 价格历史 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriceHistoryResponse {
    pub asin: String,
    pub points: Vec<PricePointResponse>,
    pub chart: PriceChartResponse,
}

/// 详情页 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductViewResponse {
    pub product: ProductDetailResponse,
    pub history: PriceHistoryResponse,
}

/// 健康检查 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

// ============================================================
//  领域模型 → DTO 惯用转换 (impl From<T>)
// ============================================================

fn stock_fields(status: Option<StockStatus>) -> (Option<String>, bool) {
    match status {
        Some(s) => {
            let in_stock = s.is_in_stock();
            (Some(s.as_str().to_string()), in_stock)
        }
        None => (None, false),
    }
}

impl From<ProductSummary> for ProductSummaryResponse {
    fn from(s: ProductSummary) -> Self {
        let (stock_status, in_stock) = stock_fields(s.stock_status);
        Self {
            asin: s.asin,
            title: s.title,
            price: format_price(s.price),
            stars: s.stars,
            stock_status,
            in_stock,
            image_url: s.image_url,
            product_link: s.product_link,
        }
    }
}

impl From<PriceDropSummary> for PriceDropResponse {
    fn from(s: PriceDropSummary) -> Self {
        Self {
            product: s.summary.into(),
            last_pricechange: s.last_pricechange.and_then(format_amount),
            last_pricechange_percent: s.last_pricechange_percent,
        }
    }
}

impl From<Listing<ProductSummary>> for ProductListResponse {
    fn from(l: Listing<ProductSummary>) -> Self {
        Self {
            items: l.items.into_iter().map(Into::into).collect(),
            page: l.page,
            page_size: l.page_size,
            total: l.total,
            page_count: l.page_count,
        }
    }
}

impl From<Listing<PriceDropSummary>> for PriceDropListResponse {
    fn from(l: Listing<PriceDropSummary>) -> Self {
        Self {
            items: l.items.into_iter().map(Into::into).collect(),
            page: l.page,
            page_size: l.page_size,
            total: l.total,
            page_count: l.page_count,
        }
    }
}

impl From<ProductDetail> for ProductDetailResponse {
    fn from(d: ProductDetail) -> Self {
        let (stock_status, in_stock) = stock_fields(d.stock_status);
        Self {
            asin: d.asin,
            title: d.title,
            subtitle: d.subtitle,
            pattern: d.pattern,
            style: d.style,
            image_url: d.image_url,
            product_link: d.product_link,
            affiliate_link: d.affiliate_link,
            price: format_price(d.price),
            price_added: format_price(d.price_added),
            stock_status,
            in_stock,
            reviews: d.reviews,
            stars: d.stars,
            date_added: d.date_added.map(|t| t.to_rfc3339()),
            last_checkdate: d.last_checkdate.map(|t| t.to_rfc3339()),
            last_pricechange: d.last_pricechange.and_then(format_amount),
            last_pricechange_percent: d.last_pricechange_percent,
            wishlist_name: d.wishlist_name,
        }
    }
}

impl From<&PricePoint> for PricePointResponse {
    fn from(p: &PricePoint) -> Self {
        Self {
            price: format_amount(p.price).unwrap_or_default(),
            date: p.date().format("%Y-%m-%d").to_string(),
            at: p.at.to_rfc3339(),
        }
    }
}

impl From<&PriceSeries> for PriceHistoryResponse {
    fn from(s: &PriceSeries) -> Self {
        let chart = s.chart();
        Self {
            asin: s.asin().to_string(),
            points: s.points().iter().map(Into::into).collect(),
            chart: PriceChartResponse {
                prices: chart.prices,
                dates: chart.dates,
            },
        }
    }
}

impl From<ProductView> for ProductViewResponse {
    fn from(v: ProductView) -> Self {
        Self {
            history: PriceHistoryResponse::from(&v.series),
            product: v.detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_two_decimals() {
        assert_eq!(format_amount(10.0).as_deref(), Some("10.00"));
        assert_eq!(format_amount(24.999).as_deref(), Some("25.00"));
        assert_eq!(format_amount(-5.5).as_deref(), Some("-5.50"));
        assert_eq!(format_amount(f64::NAN), None);
    }

    #[test]
    fn test_unknown_price_is_null_not_zero() {
        let summary = ProductSummary {
            asin: "A1".to_string(),
            title: "Mug".to_string(),
            price: Price::Unknown,
            stars: None,
            stock_status: Some(StockStatus::InStock),
            image_url: None,
            product_link: None,
        };
        let dto = ProductSummaryResponse::from(summary.clone());
        assert_eq!(dto.price, None);
        assert!(dto.in_stock);

        let zero = ProductSummaryResponse::from(ProductSummary {
            price: Price::Known(0.0),
            ..summary
        });
        assert_eq!(zero.price.as_deref(), Some("0.00"));
    }

    #[test]
    fn test_price_drop_flattens_summary() {
        let drop = PriceDropSummary {
            summary: ProductSummary {
                asin: "A2".to_string(),
                title: "Pan".to_string(),
                price: Price::Known(25.0),
                stars: Some(4.0),
                stock_status: Some(StockStatus::Other("Only 1 left".to_string())),
                image_url: None,
                product_link: None,
            },
            last_pricechange: Some(-5.0),
            last_pricechange_percent: Some(-16.7),
        };
        let json = serde_json::to_value(PriceDropResponse::from(drop)).unwrap();
        assert_eq!(json["asin"], "A2");
        assert_eq!(json["price"], "25.00");
        assert_eq!(json["in_stock"], false);
        assert_eq!(json["last_pricechange"], "-5.00");
    }
}
