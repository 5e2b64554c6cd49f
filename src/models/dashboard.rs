// src/models/dashboard.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::time_range::TimeRange;

// 1. Cards do topo: valor atual, anterior e variação percentual
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricData {
    #[schema(example = 125000.0)]
    pub current_value: f64,
    #[schema(example = 113636.36)]
    pub previous_value: f64,
    #[schema(example = 10.0)]
    pub percentage_change: f64, // Em pontos percentuais, duas casas decimais
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_sales: MetricData,
    pub total_orders: MetricData,
    pub total_customers: MetricData,
    pub total_items_sold: MetricData,
}

// 2. Gráfico de vendas (um ponto por dia)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesDataPoint {
    #[schema(value_type = String, format = Date, example = "2024-05-01")]
    pub date: NaiveDate,
    #[schema(example = 1450)]
    pub value: u32,
}

// 3. Pedidos recentes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[schema(example = "ORD-10000")]
    pub id: String,
    #[schema(example = "Customer 1")]
    pub customer_name: String,
    #[schema(value_type = String, format = Date, example = "2024-05-01")]
    pub date: NaiveDate,
    #[schema(example = 320)]
    pub total_amount: u32,
    pub status: OrderStatus,
}

// Filtro da lista de pedidos ("all" mostra tudo)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Shipped,
    Delivered,
}

impl StatusFilter {
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == OrderStatus::Pending,
            StatusFilter::Shipped => status == OrderStatus::Shipped,
            StatusFilter::Delivered => status == OrderStatus::Delivered,
        }
    }
}

// 4. Produtos mais vendidos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    #[schema(example = "PRD-1000")]
    pub id: String,
    #[schema(example = "Product 1")]
    pub name: String,
    #[schema(example = "SKU-10000")]
    pub sku: String,
    #[schema(example = "Electronics")]
    pub category: String,
    #[schema(example = 420)]
    pub units_sold: u32,
    #[schema(example = 50400)]
    pub total_revenue: u32,
}

// Critério de ordenação do ranking (sempre decrescente)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ProductSort {
    #[default]
    UnitsSold,
    TotalRevenue,
}

// Tudo de uma vez (GET /api/dashboard)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub time_range: TimeRange,
    #[schema(example = "This Month")]
    pub label: String,
    pub metrics: DashboardMetrics,
    pub sales: Vec<SalesDataPoint>,
    pub orders: Vec<Order>,
    pub top_products: Vec<TopProduct>,
}
