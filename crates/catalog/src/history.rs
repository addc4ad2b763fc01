//! # 价格历史重建
//!
//! 把 "首次追踪价格"、调价事件表、"当前观测价格" 三个来源合并为一条按时间排序的序列。

use nedan_core::catalog::entity::{PriceHistoryEvent, PricePoint, PriceSeries, Product};

/// # Summary
/// 重建单品价格序列。
///
/// # Logic
/// 1. 调价事件按 `updated_at` 升序稳定排序，不信任存储顺序。
/// 2. `price_added` 与 `date_added` 都存在时，以 `(price_added, date_added)` 作为首点。
/// 3. 依次追加排序后的调价事件。
/// 4. `price` 与 `last_checkdate` 都存在时追加尾点；若最后一条调价事件与尾点同一天则丢弃，
///    二者是同一次观测。没有调价事件时尾点总是保留。
/// 5. 最终按时间稳定排序，保证 `date_added` 异常偏晚时输出依然非递减。
///    去重只比较调价事件，不受排序后相邻位置影响。
///
/// # Arguments
/// * `product` - 商品当前快照。
/// * `events` - 该商品的全部调价事件，顺序任意。
///
/// # Returns
/// * `PriceSeries` - 新生成的价格序列。
pub fn reconstruct_series(product: &Product, mut events: Vec<PriceHistoryEvent>) -> PriceSeries {
    events.sort_by_key(|e| e.updated_at);

    let mut points = Vec::with_capacity(events.len() + 2);

    if let (Some(price), Some(at)) = (product.price_added, product.date_added) {
        points.push(PricePoint::new(price, at));
    }

    points.extend(events.iter().map(|e| PricePoint::new(e.price, e.updated_at)));

    if let (Some(price), Some(at)) = (product.price, product.last_checkdate) {
        let same_day = events
            .last()
            .is_some_and(|last| last.updated_at.date_naive() == at.date_naive());
        if !same_day {
            points.push(PricePoint::new(price, at));
        }
    }

    points.sort_by_key(|p| p.at);
    PriceSeries::new(product.asin.clone(), points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn event(price: f64, at: DateTime<Utc>) -> PriceHistoryEvent {
        PriceHistoryEvent {
            asin: "A1".to_string(),
            price,
            updated_at: at,
        }
    }

    fn product() -> Product {
        Product {
            asin: "A1".to_string(),
            title: "Kettle".to_string(),
            subtitle: None,
            pattern: None,
            style: None,
            image_url: None,
            product_link: None,
            affiliate_link: None,
            price: Some(9.0),
            price_added: Some(10.0),
            stock_status: Some("In Stock".to_string()),
            reviews: None,
            stars: None,
            date_added: Some(day(2024, 1, 1)),
            last_checkdate: Some(day(2024, 3, 1)),
            last_pricechange: None,
            last_pricechange_percent: None,
            wishlist_name: Some("Kitchen".to_string()),
        }
    }

    fn pairs(series: &PriceSeries) -> Vec<(f64, String)> {
        series
            .points()
            .iter()
            .map(|p| (p.price, p.date().to_string()))
            .collect()
    }

    #[test]
    fn test_trailing_point_deduped_against_last_event() {
        let events = vec![event(12.0, day(2024, 2, 1)), event(9.0, day(2024, 3, 1))];
        let series = reconstruct_series(&product(), events);

        assert_eq!(series.asin(), "A1");
        assert_eq!(
            pairs(&series),
            vec![
                (10.0, "2024-01-01".to_string()),
                (12.0, "2024-02-01".to_string()),
                (9.0, "2024-03-01".to_string()),
            ]
        );
    }

    #[test]
    fn test_unsorted_events_are_ordered() {
        let events = vec![
            event(9.0, day(2024, 3, 1)),
            event(11.0, day(2024, 1, 15)),
            event(12.0, day(2024, 2, 1)),
        ];
        let p = Product {
            last_checkdate: Some(day(2024, 4, 1)),
            ..product()
        };
        let series = reconstruct_series(&p, events);

        let prices: Vec<f64> = series.points().iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![10.0, 11.0, 12.0, 9.0, 9.0]);
        assert!(series.points().windows(2).all(|w| w[0].at <= w[1].at));
    }

    #[test]
    fn test_trailing_point_kept_on_new_day() {
        let events = vec![event(12.0, day(2024, 2, 1))];
        let series = reconstruct_series(&product(), events);
        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[2], PricePoint::new(9.0, day(2024, 3, 1)));
    }

    #[test]
    fn test_missing_added_data_omits_leading_point() {
        let events = vec![event(12.0, day(2024, 2, 1))];

        let no_date = Product {
            date_added: None,
            ..product()
        };
        assert_eq!(reconstruct_series(&no_date, events.clone()).points()[0].price, 12.0);

        let no_price = Product {
            price_added: None,
            ..product()
        };
        assert_eq!(reconstruct_series(&no_price, events).len(), 2);
    }

    #[test]
    fn test_missing_checkdate_or_price_omits_trailing_point() {
        let no_check = Product {
            last_checkdate: None,
            ..product()
        };
        let series = reconstruct_series(&no_check, vec![]);
        assert_eq!(pairs(&series), vec![(10.0, "2024-01-01".to_string())]);

        let no_price = Product {
            price: None,
            ..product()
        };
        assert_eq!(reconstruct_series(&no_price, vec![]).len(), 1);
    }

    #[test]
    fn test_no_history_same_day_keeps_current_price() {
        // 当天加入、当天复查且已降价：没有调价事件可供去重
        let p = Product {
            price: Some(8.0),
            date_added: Some(Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()),
            last_checkdate: Some(Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap()),
            ..product()
        };
        let series = reconstruct_series(&p, vec![]);
        let prices: Vec<f64> = series.points().iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![10.0, 8.0]);
    }

    #[test]
    fn test_late_date_added_is_sorted_into_place() {
        let p = Product {
            price_added: Some(11.0),
            date_added: Some(day(2024, 3, 1)),
            last_checkdate: Some(Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap()),
            ..product()
        };
        let series = reconstruct_series(&p, vec![event(12.0, day(2024, 2, 1))]);

        assert_eq!(
            pairs(&series),
            vec![
                (12.0, "2024-02-01".to_string()),
                (11.0, "2024-03-01".to_string()),
                (9.0, "2024-03-01".to_string()),
            ]
        );
        assert!(series.points().windows(2).all(|w| w[0].at <= w[1].at));
    }

    #[test]
    fn test_bare_product_yields_empty_series() {
        let p = Product {
            price: None,
            price_added: None,
            date_added: None,
            last_checkdate: None,
            ..product()
        };
        assert!(reconstruct_series(&p, vec![]).is_empty());
    }
}
