use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use nedan_catalog::query::ViewSpec;
use nedan_core::catalog::query::CatalogFilter;

use crate::error::ApiError;
use crate::routes::products::fetch_mode;
use crate::server::AppState;
use crate::types::{ApiResponse, ProductListResponse, SearchParams};

/// 按标题或 ASIN 搜索商品
///
/// 不区分大小写的子串匹配；没有命中时返回空列表。
#[utoipa::path(
    get,
    path = "/api/v1/search",
    tag = "商品 (Products)",
    params(SearchParams),
    responses(
        (status = 200, description = "搜索成功", body = ApiResponse<ProductListResponse>),
        (status = 400, description = "关键字为空或分页参数非法"),
        (status = 503, description = "目录存储不可用")
    )
)]
pub async fn search_products(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<ProductListResponse>>, ApiError> {
    let mode = fetch_mode(params.mode.as_deref(), &headers)?;
    let filter = CatalogFilter::search(params.q).in_stock(params.in_stock.unwrap_or(false));
    let view = ViewSpec::new(filter)
        .page(params.page.unwrap_or(1))
        .page_size(params.page_size);

    let listing = state.catalog.list(&view, mode).await?;
    Ok(Json(ApiResponse::ok(listing.into())))
}
