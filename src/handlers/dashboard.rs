// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::time_range::SelectedRange,
    // Importamos os models para referenciar no Swagger
    models::{
        dashboard::{
            DashboardMetrics, DashboardSnapshot, Order, ProductSort, SalesDataPoint,
            StatusFilter, TopProduct,
        },
        time_range::TimeRange,
    },
    services::dashboard_service::DEFAULT_TOP_PRODUCTS,
};

fn default_limit() -> usize {
    DEFAULT_TOP_PRODUCTS
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrdersQuery {
    /// all | pending | shipped | delivered
    #[serde(default)]
    #[param(inline)]
    pub status: StatusFilter,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopProductsQuery {
    #[validate(range(min = 1, max = 10, message = "O limite deve estar entre 1 e 10."))]
    #[serde(default = "default_limit")]
    #[param(example = 5)]
    pub limit: usize,

    #[serde(default)]
    #[param(inline)]
    pub sort: ProductSort,
}

// GET /api/dashboard/metrics
#[utoipa::path(
    get,
    path = "/api/dashboard/metrics",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Cards do topo: vendas, pedidos, clientes e itens vendidos", body = DashboardMetrics),
        (status = 400, description = "Período inválido"),
        (status = 503, description = "Dados indisponíveis")
    ),
    params(
        ("range" = Option<TimeRange>, Query, description = "Período (padrão: this-month)"),
        ("x-time-range" = Option<String>, Header, description = "Período, se não vier na query")
    )
)]
pub async fn get_metrics(
    State(app_state): State<AppState>,
    SelectedRange(range): SelectedRange,
) -> Result<impl IntoResponse, AppError> {

    let metrics = app_state.dashboard_service
        .get_metrics(range)
        .await?;

    Ok((StatusCode::OK, Json(metrics)))
}

// GET /api/dashboard/sales
#[utoipa::path(
    get,
    path = "/api/dashboard/sales",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Vendas diárias do período, terminando ontem", body = Vec<SalesDataPoint>),
        (status = 400, description = "Período inválido"),
        (status = 503, description = "Dados indisponíveis")
    ),
    params(
        ("range" = Option<TimeRange>, Query, description = "Período (padrão: this-month)"),
        ("x-time-range" = Option<String>, Header, description = "Período, se não vier na query")
    )
)]
pub async fn get_sales_chart(
    State(app_state): State<AppState>,
    SelectedRange(range): SelectedRange,
) -> Result<impl IntoResponse, AppError> {

    let chart = app_state.dashboard_service
        .get_sales_series(range)
        .await?;

    Ok((StatusCode::OK, Json(chart)))
}

// GET /api/dashboard/orders
#[utoipa::path(
    get,
    path = "/api/dashboard/orders",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Pedidos recentes, mais novos primeiro", body = Vec<Order>),
        (status = 503, description = "Dados indisponíveis")
    ),
    params(OrdersQuery)
)]
pub async fn get_recent_orders(
    State(app_state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<impl IntoResponse, AppError> {

    let orders = app_state.dashboard_service
        .get_recent_orders(query.status)
        .await?;

    Ok((StatusCode::OK, Json(orders)))
}

// GET /api/dashboard/top-products
#[utoipa::path(
    get,
    path = "/api/dashboard/top-products",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Ranking dos produtos mais vendidos", body = Vec<TopProduct>),
        (status = 400, description = "Limite fora do intervalo"),
        (status = 503, description = "Dados indisponíveis")
    ),
    params(TopProductsQuery)
)]
pub async fn get_top_products(
    State(app_state): State<AppState>,
    Query(query): Query<TopProductsQuery>,
) -> Result<impl IntoResponse, AppError> {

    query.validate()?;

    let products = app_state.dashboard_service
        .get_top_products(query.limit, query.sort)
        .await?;

    Ok((StatusCode::OK, Json(products)))
}

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Painel completo (as quatro consultas de uma vez)", body = DashboardSnapshot),
        (status = 400, description = "Período inválido"),
        (status = 503, description = "Dados indisponíveis")
    ),
    params(
        ("range" = Option<TimeRange>, Query, description = "Período (padrão: this-month)"),
        ("x-time-range" = Option<String>, Header, description = "Período, se não vier na query")
    )
)]
pub async fn get_snapshot(
    State(app_state): State<AppState>,
    SelectedRange(range): SelectedRange,
) -> Result<impl IntoResponse, AppError> {

    let snapshot = app_state.dashboard_service
        .get_snapshot(range)
        .await?;

    Ok((StatusCode::OK, Json(snapshot)))
}

// POST /api/dashboard/refresh
#[utoipa::path(
    post,
    path = "/api/dashboard/refresh",
    tag = "Dashboard",
    responses(
        (status = 204, description = "Cache descartado; as próximas consultas geram dados novos")
    )
)]
pub async fn refresh(State(app_state): State<AppState>) -> impl IntoResponse {
    app_state.dashboard_service.refresh();
    StatusCode::NO_CONTENT
}
