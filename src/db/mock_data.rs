// src/db/mock_data.rs
//
// Geradores de dados fictícios do painel. São funções puras: recebem a fonte
// de aleatoriedade (e a data de "hoje", quando precisam) como argumento.

use chrono::{Days, NaiveDate};
use rand::{Rng, seq::IndexedRandom};

use crate::models::{
    dashboard::{DashboardMetrics, MetricData, Order, OrderStatus, SalesDataPoint, TopProduct},
    time_range::TimeRange,
};

// Valores base das métricas (escala mensal)
pub const BASE_SALES: f64 = 125_000.0;
pub const BASE_ORDERS: f64 = 1_200.0;
pub const BASE_CUSTOMERS: f64 = 450.0;
pub const BASE_ITEMS_SOLD: f64 = 3_200.0;

pub const ORDER_COUNT: usize = 10;
pub const PRODUCT_COUNT: usize = 10;

pub const PRODUCT_CATEGORIES: [&str; 5] = ["Electronics", "Clothing", "Food", "Furniture", "Books"];

/// Variação percentual sorteada em [-10, 20], com duas casas decimais.
fn random_percentage_change<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let raw: f64 = rng.random_range(-10.0..20.0);
    (raw * 100.0).round() / 100.0
}

fn metric_data<R: Rng + ?Sized>(rng: &mut R, current_value: f64) -> MetricData {
    let percentage_change = random_percentage_change(rng);
    MetricData {
        current_value,
        previous_value: current_value / (1.0 + percentage_change / 100.0),
        percentage_change,
    }
}

pub fn generate_metrics<R: Rng + ?Sized>(rng: &mut R, range: TimeRange) -> DashboardMetrics {
    let multiplier = range.metric_multiplier();

    DashboardMetrics {
        total_sales: metric_data(rng, BASE_SALES * multiplier),
        total_orders: metric_data(rng, BASE_ORDERS * multiplier),
        total_customers: metric_data(rng, BASE_CUSTOMERS * multiplier),
        total_items_sold: metric_data(rng, BASE_ITEMS_SOLD * multiplier),
    }
}

/// Série diária terminando em "ontem" (today - 1), em ordem cronológica.
pub fn generate_sales_series<R: Rng + ?Sized>(
    rng: &mut R,
    range: TimeRange,
    today: NaiveDate,
) -> Vec<SalesDataPoint> {
    let days = range.days_in_range();
    let scale = range.series_scale();

    (0..days)
        .filter_map(|i| {
            let date = today.checked_sub_days(Days::new(u64::from(days - i)))?;
            Some(SalesDataPoint {
                date,
                value: rng.random_range(scale..scale * 2),
            })
        })
        .collect()
}

pub fn generate_orders<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Vec<Order> {
    let mut orders: Vec<Order> = (0..ORDER_COUNT)
        .map(|i| {
            let days_ago: u64 = rng.random_range(0..10);
            Order {
                id: format!("ORD-{}", 10_000 + i),
                customer_name: format!("Customer {}", i + 1),
                date: today.checked_sub_days(Days::new(days_ago)).unwrap_or(today),
                total_amount: rng.random_range(50..550),
                status: *OrderStatus::ALL.choose(rng).unwrap_or(&OrderStatus::Pending),
            }
        })
        .collect();

    // Mais recentes primeiro; sort_by é estável, empates mantêm a ordem de geração
    orders.sort_by(|a, b| b.date.cmp(&a.date));
    orders
}

pub fn generate_products<R: Rng + ?Sized>(rng: &mut R) -> Vec<TopProduct> {
    let mut products: Vec<TopProduct> = (0..PRODUCT_COUNT)
        .map(|i| {
            let units_sold: u32 = rng.random_range(100..600);
            let price: u32 = rng.random_range(20..220);
            TopProduct {
                id: format!("PRD-{}", 1_000 + i),
                name: format!("Product {}", i + 1),
                sku: format!("SKU-{}", 10_000 + i),
                category: PRODUCT_CATEGORIES
                    .choose(rng)
                    .copied()
                    .unwrap_or(PRODUCT_CATEGORIES[0])
                    .to_string(),
                units_sold,
                total_revenue: units_sold * price,
            }
        })
        .collect();

    products.sort_by(|a, b| b.units_sold.cmp(&a.units_sold));
    products
}
