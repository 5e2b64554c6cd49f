// src/models/time_range.rs

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

use crate::common::error::AppError;

// Janela de relatório selecionada no painel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TimeRange {
    ThisWeek,
    LastWeek,
    #[default]
    ThisMonth, // Seleção inicial do painel
    LastMonth,
    ThisQuarter,
    LastQuarter,
}

// Tamanho da janela, sem distinguir "atual" de "anterior"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Quarter,
}

impl TimeRange {
    /// Todas as opções, na ordem em que aparecem no seletor.
    pub const ALL: [TimeRange; 6] = [
        TimeRange::ThisWeek,
        TimeRange::LastWeek,
        TimeRange::ThisMonth,
        TimeRange::LastMonth,
        TimeRange::ThisQuarter,
        TimeRange::LastQuarter,
    ];

    pub fn period(self) -> Period {
        match self {
            TimeRange::ThisWeek | TimeRange::LastWeek => Period::Week,
            TimeRange::ThisMonth | TimeRange::LastMonth => Period::Month,
            TimeRange::ThisQuarter | TimeRange::LastQuarter => Period::Quarter,
        }
    }

    /// Quantidade de dias (pontos) na série temporal.
    pub fn days_in_range(self) -> u32 {
        match self.period() {
            Period::Week => 7,
            Period::Month => 30,
            Period::Quarter => 90,
        }
    }

    /// Multiplicador aplicado aos valores base das métricas.
    pub fn metric_multiplier(self) -> f64 {
        match self.period() {
            Period::Quarter => 3.0,
            Period::Month => 1.0,
            Period::Week => 0.25,
        }
    }

    /// Escala das vendas diárias: cada valor cai em [scale, 2 * scale).
    pub fn series_scale(self) -> u32 {
        match self.period() {
            Period::Quarter => 3000,
            Period::Month => 1000,
            Period::Week => 300,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::ThisWeek => "this-week",
            TimeRange::LastWeek => "last-week",
            TimeRange::ThisMonth => "this-month",
            TimeRange::LastMonth => "last-month",
            TimeRange::ThisQuarter => "this-quarter",
            TimeRange::LastQuarter => "last-quarter",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::ThisWeek => "This Week",
            TimeRange::LastWeek => "Last Week",
            TimeRange::ThisMonth => "This Month",
            TimeRange::LastMonth => "Last Month",
            TimeRange::ThisQuarter => "This Quarter",
            TimeRange::LastQuarter => "Last Quarter",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TimeRange::ALL
            .into_iter()
            .find(|range| range.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::InvalidTimeRange(wanted.to_string()))
    }
}

// Item do seletor (GET /api/time-ranges)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeOption {
    pub value: TimeRange,
    #[schema(example = "This Month")]
    pub label: String,
}

impl From<TimeRange> for TimeRangeOption {
    fn from(range: TimeRange) -> Self {
        Self {
            value: range,
            label: range.label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_follow_the_period() {
        assert_eq!(TimeRange::ThisWeek.days_in_range(), 7);
        assert_eq!(TimeRange::LastWeek.days_in_range(), 7);
        assert_eq!(TimeRange::ThisMonth.days_in_range(), 30);
        assert_eq!(TimeRange::LastMonth.days_in_range(), 30);
        assert_eq!(TimeRange::ThisQuarter.days_in_range(), 90);
        assert_eq!(TimeRange::LastQuarter.days_in_range(), 90);
    }

    #[test]
    fn multipliers_and_scales() {
        assert_eq!(TimeRange::LastQuarter.metric_multiplier(), 3.0);
        assert_eq!(TimeRange::ThisMonth.metric_multiplier(), 1.0);
        assert_eq!(TimeRange::LastWeek.metric_multiplier(), 0.25);

        assert_eq!(TimeRange::ThisQuarter.series_scale(), 3000);
        assert_eq!(TimeRange::LastMonth.series_scale(), 1000);
        assert_eq!(TimeRange::ThisWeek.series_scale(), 300);
    }

    #[test]
    fn parses_and_prints_kebab_case() {
        for range in TimeRange::ALL {
            assert_eq!(range.to_string().parse::<TimeRange>().unwrap(), range);
        }
        assert_eq!("  This-Quarter ".parse::<TimeRange>().unwrap(), TimeRange::ThisQuarter);
        assert!(matches!(
            "next-year".parse::<TimeRange>(),
            Err(AppError::InvalidTimeRange(ref s)) if s == "next-year"
        ));
    }

    #[test]
    fn serde_uses_the_same_names() {
        let json = serde_json::to_string(&TimeRange::LastMonth).unwrap();
        assert_eq!(json, "\"last-month\"");
        let back: TimeRange = serde_json::from_str("\"this-week\"").unwrap();
        assert_eq!(back, TimeRange::ThisWeek);
    }

    #[test]
    fn default_is_this_month() {
        assert_eq!(TimeRange::default(), TimeRange::ThisMonth);
    }
}
