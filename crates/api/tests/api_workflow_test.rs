use chrono::{TimeZone, Utc};
use nedan_api::server::AppState;
use nedan_api::types::{
    ApiErrorResponse, ApiResponse, PriceDropListResponse, PriceHistoryResponse,
    ProductListResponse, ProductViewResponse,
};
use nedan_catalog::pagination::PagePolicy;
use nedan_catalog::service::CatalogService;
use nedan_core::catalog::entity::Product;
use nedan_core::config::DatabaseConfig;
use nedan_store::catalog::SqliteCatalogStore;
use nedan_store::fixtures::{insert_price_event, insert_product, product};
use reqwest::StatusCode;
use std::sync::Arc;
use tokio::net::TcpListener;

fn kitchen(asin: &str, title: &str, price: f64, stock: &str) -> Product {
    Product {
        price: Some(price),
        stock_status: Some(stock.to_string()),
        wishlist_name: Some("Kitchen".to_string()),
        ..product(asin, title)
    }
}

// 帮助函数：写入测试数据并在随机端口启动测试服务器
async fn spawn_test_server() -> (String, SqliteCatalogStore, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = DatabaseConfig {
        path: tmp_dir.path().join("catalog.db").to_string_lossy().into_owned(),
        max_connections: 4,
        acquire_timeout_secs: 5,
        init_schema: true,
    };
    let store = SqliteCatalogStore::connect(&config).await.unwrap();
    let pool = store.pool();

    insert_product(pool, &kitchen("K1", "Apron", 8.0, "In Stock")).await.unwrap();
    insert_product(pool, &kitchen("K2", "Blender", 40.0, "In Stock")).await.unwrap();
    insert_product(pool, &kitchen("K3", "Colander", 12.0, "In Stock")).await.unwrap();
    insert_product(pool, &kitchen("K0", "Aardvark Mug", 0.0, "In Stock")).await.unwrap();
    insert_product(
        pool,
        &Product {
            price: Some(9.0),
            price_added: Some(10.0),
            date_added: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            last_checkdate: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            last_pricechange: Some(-3.0),
            last_pricechange_percent: Some(-25.0),
            stock_status: Some("In Stock".to_string()),
            wishlist_name: Some("Toys".to_string()),
            ..product("A1", "Wooden Train")
        },
    )
    .await
    .unwrap();
    insert_price_event(pool, "A1", 9.0, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        .await
        .unwrap();
    insert_price_event(pool, "A1", 12.0, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap())
        .await
        .unwrap();

    let catalog = Arc::new(CatalogService::with_policy(
        Arc::new(SqliteCatalogStore::from_pool(pool.clone())),
        PagePolicy::default(),
    ));
    let state = AppState { catalog };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let addr = format!("http://127.0.0.1:{}", port);

    let app = nedan_api::server::build_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, store, tmp_dir)
}

#[tokio::test]
async fn test_full_api_workflow() {
    let _ = tracing_subscriber::fmt().with_env_filter("debug").try_init();

    let (base_url, store, _tmp) = spawn_test_server().await;
    let client = reqwest::Client::new();

    // ============================================
    // Case 1: 分类有货视图排除零价商品
    // ============================================
    let res = client
        .get(format!(
            "{}/api/v1/categories/Kitchen/products?page=1&page_size=2",
            base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: ApiResponse<ProductListResponse> = res.json().await.unwrap();
    let listing = body.data.unwrap();
    let titles: Vec<&str> = listing.items.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Apron", "Blender"]);
    assert_eq!(listing.total, Some(3));
    assert_eq!(listing.page_count, Some(2));
    assert_eq!(listing.items[0].price.as_deref(), Some("8.00"));

    // ============================================
    // Case 2: 无限滚动增量拉取，不返回总数
    // ============================================
    let res = client
        .get(format!(
            "{}/api/v1/categories/Kitchen/products?page=2&page_size=2",
            base_url
        ))
        .header("X-Requested-With", "XMLHttpRequest")
        .send()
        .await
        .unwrap();
    let body: ApiResponse<ProductListResponse> = res.json().await.unwrap();
    let next = body.data.unwrap();
    assert_eq!(next.items.len(), 1);
    assert_eq!(next.items[0].title, "Colander");
    assert_eq!(next.total, None);

    // ============================================
    // Case 3: 搜索不区分大小写，未命中返回空列表
    // ============================================
    let res = client
        .get(format!("{}/api/v1/search?q=TRAIN", base_url))
        .send()
        .await
        .unwrap();
    let body: ApiResponse<ProductListResponse> = res.json().await.unwrap();
    assert_eq!(body.data.unwrap().items[0].asin, "A1");

    let res = client
        .get(format!("{}/api/v1/search?q=toaster", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: ApiResponse<ProductListResponse> = res.json().await.unwrap();
    assert!(body.data.unwrap().items.is_empty());

    // ============================================
    // Case 4: 降价榜
    // ============================================
    let res = client
        .get(format!("{}/api/v1/products/price-drops", base_url))
        .send()
        .await
        .unwrap();
    let body: ApiResponse<PriceDropListResponse> = res.json().await.unwrap();
    let drops = body.data.unwrap();
    assert_eq!(drops.items[0].product.asin, "A1");
    assert_eq!(drops.items[0].last_pricechange.as_deref(), Some("-3.00"));

    // ============================================
    // Case 5: 详情与价格历史
    // ============================================
    let res = client
        .get(format!("{}/api/v1/products/A1", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: ApiResponse<ProductViewResponse> = res.json().await.unwrap();
    let view = body.data.unwrap();
    assert_eq!(view.product.wishlist_name.as_deref(), Some("Toys"));
    assert_eq!(view.history.chart.prices, vec![10.0, 12.0, 9.0]);
    assert_eq!(
        view.history.chart.dates,
        vec!["2024-01-01", "2024-02-01", "2024-03-01"]
    );

    let res = client
        .get(format!("{}/api/v1/products/A1/history", base_url))
        .send()
        .await
        .unwrap();
    let body: ApiResponse<PriceHistoryResponse> = res.json().await.unwrap();
    assert_eq!(body.data.unwrap().points.len(), 3);

    // ============================================
    // Case 6: 错误映射
    // ============================================
    let res = client
        .get(format!("{}/api/v1/products/NOPE", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let err: ApiErrorResponse = res.json().await.unwrap();
    assert!(!err.success);

    let res = client
        .get(format!("{}/api/v1/products?page_size=0", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(format!("{}/api/v1/products?sort=stars", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // ============================================
    // Case 7: 健康检查与 OpenAPI 文档
    // ============================================
    let res = client
        .get(format!("{}/health", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api-docs/openapi.json", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // ============================================
    // Case 8: 存储关闭后报 503，而不是空列表
    // ============================================
    store.close().await;
    let res = client
        .get(format!("{}/api/v1/products", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    let res = client
        .get(format!("{}/health", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}
