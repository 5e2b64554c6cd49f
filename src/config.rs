// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{db::MockDashboardRepository, services::dashboard_service::DashboardService};

// Configurações lidas do ambiente (.env incluso)
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_addr: String,
    pub simulate_latency: bool,
    pub seed: Option<u64>,
    pub stale_time: Duration,
    pub fetch_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            simulate_latency: true,
            seed: None,
            stale_time: Duration::from_secs(60), // 1 minuto
            fetch_timeout: Duration::from_millis(5000),
        }
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado do `env` para os testes não mexerem no processo
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let settings = Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            simulate_latency: parse_var(&lookup, "MOCK_LATENCY")?.unwrap_or(defaults.simulate_latency),
            seed: parse_var(&lookup, "MOCK_SEED")?,
            stale_time: parse_var(&lookup, "QUERY_STALE_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.stale_time),
            fetch_timeout: parse_var(&lookup, "FETCH_TIMEOUT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.fetch_timeout),
        };

        // Com tempo limite zero toda busca viraria 503
        if settings.fetch_timeout.is_zero() {
            anyhow::bail!("FETCH_TIMEOUT_MS inválida: deve ser maior que zero");
        }

        Ok(settings)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            let value = raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("{key} inválida: '{raw}'"))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        // --- Monta o gráfico de dependências ---
        let repo = MockDashboardRepository::new(settings.seed, settings.simulate_latency);
        let dashboard_service = DashboardService::new(
            Arc::new(repo),
            settings.stale_time,
            settings.fetch_timeout,
        );

        tracing::info!(
            seed = ?settings.seed,
            latency = settings.simulate_latency,
            stale_secs = settings.stale_time.as_secs(),
            "✅ Fonte de dados fictícia pronta"
        );

        Self { dashboard_service }
    }
}
