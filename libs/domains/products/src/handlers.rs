//! HTTP handlers for Products API

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    middleware::from_fn_with_state,
    response::{Html, IntoResponse, Response},
    routing::{get, post, put},
};
use axum_helpers::{
    CurrentUser, RequiredRole, ValidatedJson,
    errors::responses::{
        BadRequestParameterResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    require_role,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::{NOT_FOUND_MESSAGE, ProductResult};
use crate::models::{CreateProduct, MessageResponse, Product, UpdateProduct};
use crate::pagination::{ListQuery, PageInfo, PageRequest, SortOrder};
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::views;

pub const CREATED_MESSAGE: &str = "Producto agregado exitosamente";
pub const UPDATED_MESSAGE: &str = "Producto actualizado exitosamente";
pub const DELETED_MESSAGE: &str = "Producto eliminado exitosamente";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        create_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product, CreateProduct, UpdateProduct, PageInfo, SortOrder,
            ListResponse, MessageResponse, ProductNotFound
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestParameterResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalogue. Mutations require the admin role.")
    )
)]
pub struct ApiDoc;

/// JSON body of `GET /api/products`
#[derive(Debug, Serialize, ToSchema)]
pub struct ListResponse {
    /// Always `"success"`
    pub status: String,
    pub payload: Vec<Product>,
    #[serde(flatten)]
    pub page_info: PageInfo,
}

/// Body returned with status 200 when a product id is unknown
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductNotFound {
    pub error: String,
}

/// Create the products router.
///
/// POST, PUT and DELETE pass through [`require_role`] for `admin` before any
/// extractor or store call runs. The caller's identity is expected in the
/// request extensions (see `axum_helpers::identity_middleware`).
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    let admin_routes = Router::new()
        .route("/", post(create_product))
        .route("/{id}", put(update_product).delete(delete_product))
        .route_layer(from_fn_with_state(RequiredRole::ADMIN, require_role));

    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
        .merge(admin_routes)
        .with_state(shared_service)
}

/// Whether the client ranks `text/html` above JSON in its `Accept` header.
/// `*/*` counts as JSON so API clients without preferences get JSON.
fn prefers_html(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let (mut html, mut json) = (0.0_f32, 0.0_f32);
    for range in accept.split(',') {
        let mut parts = range.split(';');
        let media = parts.next().unwrap_or_default().trim();
        let quality = parts
            .find_map(|p| p.trim().strip_prefix("q="))
            .and_then(|q| q.parse::<f32>().ok())
            .unwrap_or(1.0);

        match media {
            "text/html" => html = html.max(quality),
            "application/json" | "*/*" => json = json.max(quality),
            _ => {}
        }
    }

    html > 0.0 && html >= json
}

/// List products, one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of products; HTML when the client prefers it", content(
            (ListResponse = "application/json"),
            (String = "text/html")
        )),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    user: Option<Extension<CurrentUser>>,
    Query(query): Query<ListQuery>,
) -> ProductResult<Response> {
    let request = PageRequest::try_from(query)?;
    let page = service.list(request).await?;

    if prefers_html(&headers) {
        let user = user.as_ref().map(|Extension(user)| user);
        let markup = views::product_list_page(&page.items, user, &page.page_info);
        return Ok(Html(markup.into_string()).into_response());
    }

    Ok(Json(ListResponse {
        status: "success".to_string(),
        payload: page.items,
        page_info: page.page_info,
    })
    .into_response())
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "The product, or `{\"error\": \"Producto no encontrado\"}` when the id is unknown", body = Product),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Response> {
    let response = match service.get_by_id(&id).await? {
        Some(product) => Json(product).into_response(),
        None => Json(ProductNotFound {
            error: NOT_FOUND_MESSAGE.to_string(),
        })
        .into_response(),
    };
    Ok(response)
}

/// Create a new product (admin only)
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    service.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(CREATED_MESSAGE)),
    ))
}

/// Update a product (admin only)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<MessageResponse>> {
    service.update(&id, input).await?;
    Ok(Json(MessageResponse::new(UPDATED_MESSAGE)))
}

/// Delete a product (admin only). Unknown ids also succeed.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<MessageResponse>> {
    service.delete(&id).await?;
    Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
}
