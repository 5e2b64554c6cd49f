// src/services/dashboard_service.rs

use std::{future::Future, sync::Arc, time::Duration};

use crate::{
    common::error::AppError,
    db::DashboardSource,
    models::{
        dashboard::{
            DashboardMetrics, DashboardSnapshot, Order, ProductSort, SalesDataPoint,
            StatusFilter, TopProduct,
        },
        time_range::TimeRange,
    },
    services::query_cache::QueryCache,
};

// Quantos produtos o card "Top Performing Items" mostra por padrão
pub const DEFAULT_TOP_PRODUCTS: usize = 5;

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn DashboardSource>,
    fetch_timeout: Duration,
    // Um cache por operação; a chave é o período (ou nada)
    metrics_cache: QueryCache<TimeRange, DashboardMetrics>,
    sales_cache: QueryCache<TimeRange, Arc<Vec<SalesDataPoint>>>,
    orders_cache: QueryCache<(), Arc<Vec<Order>>>,
    products_cache: QueryCache<(), Arc<Vec<TopProduct>>>,
}

impl DashboardService {
    pub fn new(source: Arc<dyn DashboardSource>, stale_time: Duration, fetch_timeout: Duration) -> Self {
        Self {
            source,
            fetch_timeout,
            metrics_cache: QueryCache::new("metrics", stale_time),
            sales_cache: QueryCache::new("sales", stale_time),
            orders_cache: QueryCache::new("recent_orders", stale_time),
            products_cache: QueryCache::new("top_products", stale_time),
        }
    }

    pub async fn get_metrics(&self, range: TimeRange) -> Result<DashboardMetrics, AppError> {
        let source = Arc::clone(&self.source);
        let fetch = self
            .metrics_cache
            .get_or_fetch(range, move || async move { source.metrics(range).await });

        self.bounded("metrics", fetch).await
    }

    pub async fn get_sales_series(&self, range: TimeRange) -> Result<Vec<SalesDataPoint>, AppError> {
        let source = Arc::clone(&self.source);
        let fetch = self
            .sales_cache
            .get_or_fetch(range, move || async move { Arc::new(source.sales_series(range).await) });

        let series = self.bounded("sales", fetch).await?;
        Ok(series.as_ref().clone())
    }

    /// Pedidos recentes, do mais novo para o mais antigo, filtrados por status.
    pub async fn get_recent_orders(&self, filter: StatusFilter) -> Result<Vec<Order>, AppError> {
        let source = Arc::clone(&self.source);
        let fetch = self
            .orders_cache
            .get_or_fetch((), move || async move { Arc::new(source.recent_orders().await) });

        let orders = self.bounded("recent_orders", fetch).await?;
        Ok(orders
            .iter()
            .filter(|order| filter.matches(order.status))
            .cloned()
            .collect())
    }

    /// Os `limit` primeiros do ranking, reordenado pelo critério pedido.
    pub async fn get_top_products(
        &self,
        limit: usize,
        sort: ProductSort,
    ) -> Result<Vec<TopProduct>, AppError> {
        let source = Arc::clone(&self.source);
        let fetch = self
            .products_cache
            .get_or_fetch((), move || async move { Arc::new(source.top_products().await) });

        let products = self.bounded("top_products", fetch).await?;
        let mut ranked = products.as_ref().clone();
        match sort {
            ProductSort::UnitsSold => ranked.sort_by(|a, b| b.units_sold.cmp(&a.units_sold)),
            ProductSort::TotalRevenue => ranked.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue)),
        }
        ranked.truncate(limit);
        Ok(ranked)
    }

    /// As quatro consultas em paralelo, como o painel faz ao abrir.
    pub async fn get_snapshot(&self, range: TimeRange) -> Result<DashboardSnapshot, AppError> {
        let (metrics, sales, orders, top_products) = tokio::try_join!(
            self.get_metrics(range),
            self.get_sales_series(range),
            self.get_recent_orders(StatusFilter::All),
            self.get_top_products(DEFAULT_TOP_PRODUCTS, ProductSort::UnitsSold),
        )?;

        Ok(DashboardSnapshot {
            time_range: range,
            label: range.label().to_string(),
            metrics,
            sales,
            orders,
            top_products,
        })
    }

    /// Descarta tudo o que está em cache; a próxima consulta gera dados novos.
    pub fn refresh(&self) {
        let dropped = self.metrics_cache.invalidate_all()
            + self.sales_cache.invalidate_all()
            + self.orders_cache.invalidate_all()
            + self.products_cache.invalidate_all();
        tracing::info!(dropped, "🔄 Cache do painel invalidado");
    }

    // Quem espera demais recebe DataUnavailable; a busca compartilhada segue para os outros.
    async fn bounded<T>(
        &self,
        operation: &'static str,
        fetch: impl Future<Output = T>,
    ) -> Result<T, AppError> {
        tokio::time::timeout(self.fetch_timeout, fetch)
            .await
            .map_err(|_| {
                tracing::warn!(operation, timeout_ms = self.fetch_timeout.as_millis() as u64, "busca excedeu o tempo limite");
                AppError::DataUnavailable
            })
    }
}
