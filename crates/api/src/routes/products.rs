//! # 商品路由控制器
//!
//! 实现 `/api/v1/products` 路径下的 REST 接口：全站列表、降价榜、单品详情与价格历史。
//! 首屏渲染与无限滚动增量拉取共用同一组接口，仅通过拉取模式区分。

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use nedan_catalog::pagination::FetchMode;
use nedan_catalog::query::ViewSpec;
use nedan_core::catalog::query::{CatalogFilter, SortOrder};

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{
    ApiResponse, ListParams, PriceDropListResponse, PriceHistoryResponse, ProductListResponse,
    ProductViewResponse,
};

/// 浏览器无限滚动脚本携带的请求头
const AJAX_HEADER: &str = "x-requested-with";
const AJAX_VALUE: &str = "XMLHttpRequest";

/// # Summary
/// 解析拉取模式。
///
/// # Logic
/// 1. 显式 `mode` 参数优先。
/// 2. 否则带有 `X-Requested-With: XMLHttpRequest` 的请求视为增量拉取。
/// 3. 其余情况为首屏渲染。
pub(crate) fn fetch_mode(mode: Option<&str>, headers: &HeaderMap) -> Result<FetchMode, ApiError> {
    if let Some(mode) = mode {
        return mode.parse().map_err(ApiError::BadRequest);
    }
    let is_ajax = headers
        .get(AJAX_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case(AJAX_VALUE));
    Ok(if is_ajax {
        FetchMode::Incremental
    } else {
        FetchMode::Initial
    })
}

fn sort_order(sort: Option<&str>) -> Result<SortOrder, ApiError> {
    match sort {
        Some(s) => s.parse().map_err(ApiError::BadRequest),
        None => Ok(SortOrder::Title),
    }
}

/// 分页列出商品
///
/// 默认按标题升序；`in_stock=true` 时只返回有货商品。
#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "商品 (Products)",
    params(ListParams),
    responses(
        (status = 200, description = "列表获取成功", body = ApiResponse<ProductListResponse>),
        (status = 400, description = "分页或排序参数非法"),
        (status = 503, description = "目录存储不可用")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<ProductListResponse>>, ApiError> {
    let mode = fetch_mode(params.mode.as_deref(), &headers)?;
    let view = ViewSpec::new(CatalogFilter::all().in_stock(params.in_stock.unwrap_or(false)))
        .sort(sort_order(params.sort.as_deref())?)
        .page(params.page.unwrap_or(1))
        .page_size(params.page_size);

    let listing = state.catalog.list(&view, mode).await?;
    Ok(Json(ApiResponse::ok(listing.into())))
}

/// 近期最大降价榜
///
/// 按最近一次调价百分比升序，降幅最大者在前。
#[utoipa::path(
    get,
    path = "/api/v1/products/price-drops",
    tag = "商品 (Products)",
    params(ListParams),
    responses(
        (status = 200, description = "降价榜获取成功", body = ApiResponse<PriceDropListResponse>),
        (status = 400, description = "分页参数非法"),
        (status = 503, description = "目录存储不可用")
    )
)]
pub async fn list_price_drops(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<PriceDropListResponse>>, ApiError> {
    let mode = fetch_mode(params.mode.as_deref(), &headers)?;
    let view = ViewSpec::new(CatalogFilter::all().in_stock(params.in_stock.unwrap_or(false)))
        .page(params.page.unwrap_or(1))
        .page_size(params.page_size);

    let listing = state.catalog.list_price_drops(&view, mode).await?;
    Ok(Json(ApiResponse::ok(listing.into())))
}

/// 获取单品详情及价格历史
#[utoipa::path(
    get,
    path = "/api/v1/products/{asin}",
    tag = "商品 (Products)",
    params(
        ("asin" = String, Path, description = "商品 ASIN")
    ),
    responses(
        (status = 200, description = "详情获取成功", body = ApiResponse<ProductViewResponse>),
        (status = 404, description = "商品不存在"),
        (status = 503, description = "目录存储不可用")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(asin): Path<String>,
) -> Result<Json<ApiResponse<ProductViewResponse>>, ApiError> {
    let view = state.catalog.product_view(&asin).await?;
    Ok(Json(ApiResponse::ok(view.into())))
}

/// 仅获取单品价格历史 (图表数据)
#[utoipa::path(
    get,
    path = "/api/v1/products/{asin}/history",
    tag = "商品 (Products)",
    params(
        ("asin" = String, Path, description = "商品 ASIN")
    ),
    responses(
        (status = 200, description = "价格历史获取成功", body = ApiResponse<PriceHistoryResponse>),
        (status = 404, description = "商品不存在"),
        (status = 503, description = "目录存储不可用")
    )
)]
pub async fn get_price_history(
    State(state): State<AppState>,
    Path(asin): Path<String>,
) -> Result<Json<ApiResponse<PriceHistoryResponse>>, ApiError> {
    let series = state.catalog.reconstruct(&asin).await?;
    Ok(Json(ApiResponse::ok(PriceHistoryResponse::from(&series))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_fetch_mode_resolution() {
        let mut headers = HeaderMap::new();
        assert_eq!(fetch_mode(None, &headers).unwrap(), FetchMode::Initial);

        headers.insert(AJAX_HEADER, HeaderValue::from_static("XMLHttpRequest"));
        assert_eq!(fetch_mode(None, &headers).unwrap(), FetchMode::Incremental);

        // 显式参数优先于请求头
        assert_eq!(
            fetch_mode(Some("initial"), &headers).unwrap(),
            FetchMode::Initial
        );
        assert!(matches!(
            fetch_mode(Some("bogus"), &headers),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(sort_order(None).unwrap(), SortOrder::Title);
        assert_eq!(sort_order(Some("price_drop")).unwrap(), SortOrder::PriceDrop);
        assert!(sort_order(Some("stars")).is_err());
    }
}
