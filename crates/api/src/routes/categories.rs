//! # 分类路由控制器
//!
//! 分类即采集端的 wishlist 名称，一件商品只属于一个分类。

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use nedan_catalog::query::ViewSpec;
use nedan_core::catalog::query::CatalogFilter;

use crate::error::ApiError;
use crate::routes::products::fetch_mode;
use crate::server::AppState;
use crate::types::{ApiResponse, CategoryParams, ProductListResponse};

/// 列出全部分类
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "分类 (Categories)",
    responses(
        (status = 200, description = "分类列表获取成功", body = ApiResponse<Vec<String>>),
        (status = 503, description = "目录存储不可用")
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let categories = state.catalog.categories().await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// 分类下的商品列表
///
/// 默认只返回有货商品，此时价格为 0 或缺失的商品同样被排除。
/// 分类不存在时返回空列表而非 404。
#[utoipa::path(
    get,
    path = "/api/v1/categories/{name}/products",
    tag = "分类 (Categories)",
    params(
        ("name" = String, Path, description = "分类名称，原样匹配"),
        CategoryParams
    ),
    responses(
        (status = 200, description = "列表获取成功", body = ApiResponse<ProductListResponse>),
        (status = 400, description = "参数非法"),
        (status = 503, description = "目录存储不可用")
    )
)]
pub async fn list_category_products(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<ApiResponse<ProductListResponse>>, ApiError> {
    let mode = fetch_mode(params.mode.as_deref(), &headers)?;
    let filter = CatalogFilter::by_category(name).in_stock(params.in_stock.unwrap_or(true));
    let view = ViewSpec::new(filter)
        .page(params.page.unwrap_or(1))
        .page_size(params.page_size);

    let listing = state.catalog.list(&view, mode).await?;
    Ok(Json(ApiResponse::ok(listing.into())))
}
