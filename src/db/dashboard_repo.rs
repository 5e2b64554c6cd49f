// src/db/dashboard_repo.rs

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    db::mock_data,
    models::{
        dashboard::{DashboardMetrics, Order, SalesDataPoint, TopProduct},
        time_range::TimeRange,
    },
};

// Latências do backend simulado, por operação
pub const METRICS_LATENCY: Duration = Duration::from_millis(800);
pub const SALES_LATENCY: Duration = Duration::from_millis(1000);
pub const ORDERS_LATENCY: Duration = Duration::from_millis(600);
pub const PRODUCTS_LATENCY: Duration = Duration::from_millis(700);

/// Fonte dos dados do painel. Hoje só existe a implementação fictícia;
/// um backend real entraria aqui.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn metrics(&self, range: TimeRange) -> DashboardMetrics;
    async fn sales_series(&self, range: TimeRange) -> Vec<SalesDataPoint>;
    async fn recent_orders(&self) -> Vec<Order>;
    async fn top_products(&self) -> Vec<TopProduct>;
}

#[derive(Clone)]
pub struct MockDashboardRepository {
    seed: Option<u64>,
    // Conta as chamadas para derivar uma semente nova a cada uma
    calls: Arc<AtomicU64>,
    simulate_latency: bool,
    fixed_today: Option<NaiveDate>,
}

impl MockDashboardRepository {
    pub fn new(seed: Option<u64>, simulate_latency: bool) -> Self {
        Self {
            seed,
            calls: Arc::new(AtomicU64::new(0)),
            simulate_latency,
            fixed_today: None,
        }
    }

    /// Fixa a data de "hoje".
    #[cfg(test)]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    fn rng(&self) -> StdRng {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(call)),
            None => StdRng::from_os_rng(),
        }
    }

    fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Utc::now().date_naive())
    }

    async fn latency(&self, operation: &'static str, delay: Duration) {
        if self.simulate_latency {
            tracing::debug!(operation, delay_ms = delay.as_millis() as u64, "simulando latência");
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl DashboardSource for MockDashboardRepository {
    async fn metrics(&self, range: TimeRange) -> DashboardMetrics {
        self.latency("metrics", METRICS_LATENCY).await;
        mock_data::generate_metrics(&mut self.rng(), range)
    }

    async fn sales_series(&self, range: TimeRange) -> Vec<SalesDataPoint> {
        self.latency("sales", SALES_LATENCY).await;
        mock_data::generate_sales_series(&mut self.rng(), range, self.today())
    }

    async fn recent_orders(&self) -> Vec<Order> {
        self.latency("orders", ORDERS_LATENCY).await;
        mock_data::generate_orders(&mut self.rng(), self.today())
    }

    async fn top_products(&self) -> Vec<TopProduct> {
        self.latency("top_products", PRODUCTS_LATENCY).await;
        mock_data::generate_products(&mut self.rng())
    }
}
