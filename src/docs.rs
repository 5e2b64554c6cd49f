// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Time Ranges ---
        handlers::time_ranges::list_time_ranges,

        // --- Dashboard ---
        handlers::dashboard::get_metrics,
        handlers::dashboard::get_sales_chart,
        handlers::dashboard::get_recent_orders,
        handlers::dashboard::get_top_products,
        handlers::dashboard::get_snapshot,
        handlers::dashboard::refresh,
    ),
    components(
        schemas(
            // --- TIME RANGES ---
            models::time_range::TimeRange,
            models::time_range::TimeRangeOption,

            // --- DASHBOARD ---
            models::dashboard::MetricData,
            models::dashboard::DashboardMetrics,
            models::dashboard::SalesDataPoint,
            models::dashboard::OrderStatus,
            models::dashboard::Order,
            models::dashboard::StatusFilter,
            models::dashboard::TopProduct,
            models::dashboard::ProductSort,
            models::dashboard::DashboardSnapshot,
        )
    ),
    tags(
        (name = "Time Ranges", description = "Períodos do seletor do painel"),
        (name = "Dashboard", description = "Indicadores e Gráficos Gerenciais (dados fictícios)")
    )
)]
pub struct ApiDoc;
