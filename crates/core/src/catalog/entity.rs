use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 库存状态列中代表 "有货" 的规范文本，采集端写入的就是这一字面值。
pub const IN_STOCK_TEXT: &str = "In Stock";

/// # Summary
/// `products` 表中的一行，即某个被追踪商品的当前快照。
///
/// # Invariants
/// - `asin` 全局唯一且不可变。
/// - 除 `asin` 与 `title` 外所有列均可为 NULL，由投影层负责空值处理。
/// - 本结构是原始行，不做任何业务语义转换。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub asin: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub pattern: Option<String>,
    pub style: Option<String>,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
    pub affiliate_link: Option<String>,
    // 当前价格，NULL 表示未知
    pub price: Option<f64>,
    // 首次追踪时的价格
    pub price_added: Option<f64>,
    pub stock_status: Option<String>,
    pub reviews: Option<i64>,
    pub stars: Option<f64>,
    pub date_added: Option<DateTime<Utc>>,
    pub last_checkdate: Option<DateTime<Utc>>,
    // 相对上一次价格的差值
    pub last_pricechange: Option<f64>,
    // 相对上一次价格的带符号百分比
    pub last_pricechange_percent: Option<f64>,
    pub wishlist_name: Option<String>,
}

/// # Summary
/// `price_history` 表中的一条调价事件。
///
/// # Invariants
/// - 读取顺序不可信，消费方必须按 `updated_at` 自行排序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryEvent {
    pub asin: String,
    pub price: f64,
    pub updated_at: DateTime<Utc>,
}

/// # Summary
/// 详情视图所需的原始数据：商品行及其全部调价事件，由存储层在同一连接内读取。
#[derive(Debug, Clone)]
pub struct ProductHistory {
    pub product: Product,
    pub events: Vec<PriceHistoryEvent>,
}

/// # Summary
/// 库存状态。
///
/// # Invariants
/// - 只有与 [`IN_STOCK_TEXT`] 完全一致的文本才视为有货，其余自由文本一律视为无货。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    Other(String),
}

impl StockStatus {
    /// 从数据库原始文本解析。
    pub fn parse(raw: &str) -> Self {
        if raw == IN_STOCK_TEXT {
            StockStatus::InStock
        } else {
            StockStatus::Other(raw.to_string())
        }
    }

    pub fn is_in_stock(&self) -> bool {
        matches!(self, StockStatus::InStock)
    }

    /// 还原为存储中的原始文本。
    pub fn as_str(&self) -> &str {
        match self {
            StockStatus::InStock => IN_STOCK_TEXT,
            StockStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// # Summary
/// 投影后的价格。缺失价格使用显式的 `Unknown`，与 "价格为 0" 严格区分。
///
/// # Invariants
/// - `Known(0.0)` 是合法值 (分类有货视图会将其排除)，绝不能与 `Unknown` 混用。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "amount", rename_all = "snake_case")]
pub enum Price {
    Known(f64),
    Unknown,
}

impl Price {
    pub fn from_column(value: Option<f64>) -> Self {
        match value {
            Some(v) => Price::Known(v),
            None => Price::Unknown,
        }
    }

    pub fn amount(self) -> Option<f64> {
        match self {
            Price::Known(v) => Some(v),
            Price::Unknown => None,
        }
    }
}

/// # Summary
/// 列表 / 搜索场景下的商品摘要，字段集合固定。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub asin: String,
    pub title: String,
    pub price: Price,
    pub stars: Option<f64>,
    pub stock_status: Option<StockStatus>,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
}

/// # Summary
/// "近期最大降价" 视图的摘要：在固定摘要之外附带最近一次调价信息。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceDropSummary {
    pub summary: ProductSummary,
    pub last_pricechange: Option<f64>,
    pub last_pricechange_percent: Option<f64>,
}

/// # Summary
/// 单品详情记录，包含完整商品字段及 `last_checkdate`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub asin: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub pattern: Option<String>,
    pub style: Option<String>,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
    pub affiliate_link: Option<String>,
    pub price: Price,
    pub price_added: Price,
    pub stock_status: Option<StockStatus>,
    pub reviews: Option<i64>,
    pub stars: Option<f64>,
    pub date_added: Option<DateTime<Utc>>,
    pub last_checkdate: Option<DateTime<Utc>>,
    pub last_pricechange: Option<f64>,
    pub last_pricechange_percent: Option<f64>,
    pub wishlist_name: Option<String>,
}

/// # Summary
/// 价格序列中的一个点。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: f64,
    pub at: DateTime<Utc>,
}

impl PricePoint {
    pub fn new(price: f64, at: DateTime<Utc>) -> Self {
        Self { price, at }
    }

    /// 图表与去重使用的日粒度日期 (UTC)。
    pub fn date(&self) -> NaiveDate {
        self.at.date_naive()
    }
}

/// # Summary
/// 重建后的单品价格时间序列，派生数据，不做持久化。
///
/// # Invariants
/// - `points` 按时间非递减排列。
/// - 每次调用重新生成，构造后不可变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    asin: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(asin: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            asin: asin.into(),
            points,
        }
    }

    pub fn asin(&self) -> &str {
        &self.asin
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// # Summary
    /// 转换为图表使用的两条平行数组。
    ///
    /// # Returns
    /// 价格数组与 `YYYY-MM-DD` 日期数组，下标一一对应。
    pub fn chart(&self) -> ChartSeries {
        ChartSeries {
            prices: self.points.iter().map(|p| p.price).collect(),
            dates: self
                .points
                .iter()
                .map(|p| p.date().format("%Y-%m-%d").to_string())
                .collect(),
        }
    }
}

/// 价格图表载荷。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub prices: Vec<f64>,
    pub dates: Vec<String>,
}

/// # Summary
/// 详情视图的完整结果。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub detail: ProductDetail,
    pub series: PriceSeries,
}

/// # Summary
/// 分页列表结果。
///
/// # Invariants
/// - 首屏模式下 `total` / `page_count` 必有值；增量模式下二者均为 `None`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: Option<u64>,
    pub page_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stock_status_parse() {
        assert!(StockStatus::parse("In Stock").is_in_stock());
        assert!(!StockStatus::parse("in stock").is_in_stock());
        assert_eq!(
            StockStatus::parse("Temporarily out of stock."),
            StockStatus::Other("Temporarily out of stock.".to_string())
        );
        assert_eq!(StockStatus::InStock.to_string(), "In Stock");
    }

    #[test]
    fn test_price_sentinel_is_not_zero() {
        assert_eq!(Price::from_column(None), Price::Unknown);
        assert_eq!(Price::from_column(Some(0.0)), Price::Known(0.0));
        assert_ne!(Price::from_column(Some(0.0)), Price::Unknown);

        let json = serde_json::to_value(Price::Unknown).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "unknown" }));
        let json = serde_json::to_value(Price::Known(9.5)).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "known", "amount": 9.5 }));
    }

    #[test]
    fn test_chart_formats_day_dates() {
        let series = PriceSeries::new(
            "A1",
            vec![
                PricePoint::new(10.0, Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap()),
                PricePoint::new(12.0, Utc.with_ymd_and_hms(2024, 2, 1, 23, 59, 0).unwrap()),
            ],
        );
        let chart = series.chart();
        assert_eq!(chart.prices, vec![10.0, 12.0]);
        assert_eq!(chart.dates, vec!["2024-01-01", "2024-02-01"]);
    }
}
