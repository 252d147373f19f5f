//! Catalog REST endpoints
//!
//! ## Endpoints
//!
//! - `GET  /api/category` / `GET /api/category/:id` - list / nested detail
//! - `GET  /api/product` / `GET /api/product/:id` - list / nested detail
//! - `GET  /api/article` / `GET /api/article/:id` - rich list / detail
//! - `POST /api/{category,product,article}` - validated create (405 in the
//!   read-only deployment variant)
//! - `POST /api/category/:id/disable`, `/api/product/:id/disable` - disable
//! - `GET  /api/admin/category`, `GET /api/admin/article` - unfiltered lists
//! - `POST /api/admin/article/:id/disable`
//!
//! List endpoints accept `show_inactive`, `category_id` / `product_id`,
//! `page` and `page_size`. List responses use the pagination envelope
//! `{count, next, previous, results}`; detail responses are unwrapped.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::catalog::CatalogService;
use crate::error::CatalogError;
use crate::filter::ListParams;
use crate::models::{NewArticleFields, NewCategoryFields, NewProductFields};
use crate::projection::{ArticleList, ArticleRich, CategoryDetail, CategoryList, ProductDetail, ProductList};

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    /// Observed deployment variant: creates return 405 when set
    pub read_only: bool,
}

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<T, ApiError>;

// ============================================================================
// Query / response types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub show_inactive: Option<String>,
    pub category_id: Option<String>,
    pub product_id: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ListQuery {
    fn filter_params(&self) -> ListParams {
        ListParams {
            show_inactive: self.show_inactive.clone(),
            category_id: self.category_id.clone(),
            product_id: self.product_id.clone(),
        }
    }

    fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// Pagination envelope wrapping every list payload
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

fn paginate<T>(items: Vec<T>, query: &ListQuery) -> Paginated<T> {
    let page = query.page() as usize;
    let page_size = query.page_size() as usize;
    let count = items.len();

    let start = (page - 1).saturating_mul(page_size).min(count);
    let end = (start + page_size).min(count);
    let results = items.into_iter().skip(start).take(end - start).collect();

    let next = if end < count {
        Some(format!("?page={}&page_size={}", page + 1, page_size))
    } else {
        None
    };
    let previous = if page > 1 {
        Some(format!("?page={}&page_size={}", page - 1, page_size))
    } else {
        None
    };

    Paginated {
        count,
        next,
        previous,
        results,
    }
}

fn error_response(err: CatalogError) -> ApiError {
    let status = match &err {
        CatalogError::InvalidValue { .. } | CatalogError::InvalidReference { .. } => {
            StatusCode::BAD_REQUEST
        }
        CatalogError::DuplicateKey { .. } => StatusCode::CONFLICT,
        CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
        CatalogError::Store(e) => {
            tracing::error!("Store failure: {e:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let body = json!({ "error": err.to_string(), "field": err.field() });
    (status, Json(body))
}

fn method_not_allowed() -> ApiError {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "creation is not allowed in the read-only deployment" })),
    )
}

/// Payloads are parsed after the deployment gate so a read-only instance
/// answers 405 even to malformed bodies
fn parse_fields<T: serde::de::DeserializeOwned>(payload: Value) -> Result<T, ApiError> {
    serde_json::from_value(payload).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Invalid payload: {e}") })),
        )
    })
}

// ============================================================================
// Handlers
// ============================================================================

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Paginated<CategoryList>>> {
    let items = state
        .catalog
        .list_categories(&query.filter_params())
        .await
        .map_err(error_response)?;
    Ok(Json(paginate(items, &query)))
}

async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CategoryDetail>> {
    let detail = state
        .catalog
        .category_detail(id)
        .await
        .map_err(error_response)?;
    Ok(Json(detail))
}

async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<CategoryList>)> {
    if state.read_only {
        return Err(method_not_allowed());
    }
    let fields: NewCategoryFields = parse_fields(payload)?;
    let row = state
        .catalog
        .create_category(fields)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(crate::projection::category_list(&row))))
}

async fn disable_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .catalog
        .disable_category(id)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Paginated<ProductList>>> {
    let items = state
        .catalog
        .list_products(&query.filter_params())
        .await
        .map_err(error_response)?;
    Ok(Json(paginate(items, &query)))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ProductDetail>> {
    let detail = state
        .catalog
        .product_detail(id)
        .await
        .map_err(error_response)?;
    Ok(Json(detail))
}

async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<ProductList>)> {
    if state.read_only {
        return Err(method_not_allowed());
    }
    let fields: NewProductFields = parse_fields(payload)?;
    let row = state
        .catalog
        .create_product(fields)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(crate::projection::product_list(&row))))
}

async fn disable_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .catalog
        .disable_product(id)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Paginated<ArticleRich>>> {
    let items = state
        .catalog
        .list_articles(&query.filter_params())
        .await
        .map_err(error_response)?;
    Ok(Json(paginate(items, &query)))
}

async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ArticleRich>> {
    let detail = state
        .catalog
        .article_detail(id)
        .await
        .map_err(error_response)?;
    Ok(Json(detail))
}

async fn create_article(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<ArticleList>)> {
    if state.read_only {
        return Err(method_not_allowed());
    }
    let fields: NewArticleFields = parse_fields(payload)?;
    let row = state
        .catalog
        .create_article(fields)
        .await
        .map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(crate::projection::article_list(&row)),
    ))
}

// Admin variant: lists skip the default active filter entirely
async fn admin_list_categories(
    State(state): State<AppState>,
    Query(mut query): Query<ListQuery>,
) -> ApiResult<Json<Paginated<CategoryList>>> {
    query.show_inactive = Some("true".to_string());
    list_categories(State(state), Query(query)).await
}

async fn admin_list_articles(
    State(state): State<AppState>,
    Query(mut query): Query<ListQuery>,
) -> ApiResult<Json<Paginated<ArticleRich>>> {
    query.show_inactive = Some("true".to_string());
    list_articles(State(state), Query(query)).await
}

async fn admin_disable_article(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .catalog
        .disable_article(id)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Router
// ============================================================================

/// Create the catalog router over the given application state
pub fn create_catalog_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/category", get(list_categories).post(create_category))
        .route("/api/category/:id", get(get_category))
        .route("/api/category/:id/disable", post(disable_category))
        .route("/api/product", get(list_products).post(create_product))
        .route("/api/product/:id", get(get_product))
        .route("/api/product/:id/disable", post(disable_product))
        .route("/api/article", get(list_articles).post(create_article))
        .route("/api/article/:id", get(get_article))
        .route("/api/admin/category", get(admin_list_categories))
        .route("/api/admin/article", get(admin_list_articles))
        .route("/api/admin/article/:id/disable", post(admin_disable_article))
        .with_state(state)
}
