// src/middleware/time_range.rs

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use crate::{common::error::AppError, models::time_range::TimeRange};

// Cabeçalho alternativo ao parâmetro ?range=
pub const TIME_RANGE_HEADER: &str = "x-time-range";

// Lê os valores de ?range=. Query malformada ou range repetido é erro,
// nunca uma queda silenciosa para o cabeçalho.
fn range_from_query(parts: &Parts) -> Result<Option<String>, AppError> {
    let raw_query = parts.uri.query().unwrap_or_default();
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
        .map_err(|_| AppError::InvalidTimeRange(raw_query.to_string()))?;

    let mut values: Vec<String> = pairs
        .into_iter()
        .filter(|(key, _)| key == "range")
        .map(|(_, value)| value)
        .collect();

    match values.len() {
        0 => Ok(None),
        1 => Ok(values.pop()),
        _ => Err(AppError::InvalidTimeRange(values.join(","))),
    }
}

// O período selecionado no painel, explícito em cada requisição.
// Ordem: ?range=, depois X-Time-Range, depois o padrão (this-month).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedRange(pub TimeRange);

impl<S> FromRequestParts<S> for SelectedRange
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let from_query = range_from_query(parts)?;

        let from_header = || {
            parts
                .headers
                .get(TIME_RANGE_HEADER)
                .map(|value| {
                    value
                        .to_str()
                        .map(str::to_string)
                        .map_err(|_| AppError::InvalidTimeRange("<bytes inválidos>".to_string()))
                })
                .transpose()
        };

        let raw = match from_query {
            Some(value) => Some(value),
            None => from_header()?,
        };

        match raw {
            Some(value) => Ok(SelectedRange(value.parse()?)),
            None => Ok(SelectedRange(TimeRange::default())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    async fn extract(request: Request<()>) -> Result<SelectedRange, AppError> {
        let (mut parts, _) = request.into_parts();
        SelectedRange::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn defaults_to_this_month() {
        let req = Request::builder().uri("/api/dashboard/metrics").body(()).unwrap();
        assert_eq!(extract(req).await.unwrap(), SelectedRange(TimeRange::ThisMonth));
    }

    #[tokio::test]
    async fn query_wins_over_header() {
        let req = Request::builder()
            .uri("/api/dashboard/metrics?range=last-quarter")
            .header(TIME_RANGE_HEADER, "this-week")
            .body(())
            .unwrap();
        assert_eq!(extract(req).await.unwrap(), SelectedRange(TimeRange::LastQuarter));
    }

    #[tokio::test]
    async fn header_is_used_without_query() {
        let req = Request::builder()
            .uri("/api/dashboard/sales?foo=bar")
            .header(TIME_RANGE_HEADER, "last-week")
            .body(())
            .unwrap();
        assert_eq!(extract(req).await.unwrap(), SelectedRange(TimeRange::LastWeek));
    }

    #[tokio::test]
    async fn rejects_unknown_ranges() {
        let req = Request::builder()
            .uri("/api/dashboard/sales?range=forever")
            .body(())
            .unwrap();
        assert!(matches!(
            extract(req).await,
            Err(AppError::InvalidTimeRange(ref v)) if v == "forever"
        ));
    }

    #[tokio::test]
    async fn repeated_range_is_rejected_instead_of_falling_back() {
        let req = Request::builder()
            .uri("/api/dashboard/sales?range=last-quarter&range=bogus")
            .header(TIME_RANGE_HEADER, "this-week")
            .body(())
            .unwrap();
        assert!(matches!(
            extract(req).await,
            Err(AppError::InvalidTimeRange(ref v)) if v == "last-quarter,bogus"
        ));
    }

    #[tokio::test]
    async fn header_with_invalid_bytes_is_rejected() {
        let req = Request::builder()
            .uri("/api/dashboard/metrics")
            .header(TIME_RANGE_HEADER, HeaderValue::from_bytes(b"this-w\xffeek").unwrap())
            .body(())
            .unwrap();
        assert!(matches!(extract(req).await, Err(AppError::InvalidTimeRange(_))));
    }

    #[tokio::test]
    async fn empty_range_is_rejected() {
        let req = Request::builder()
            .uri("/api/dashboard/metrics?range=")
            .header(TIME_RANGE_HEADER, "last-week")
            .body(())
            .unwrap();
        assert!(matches!(extract(req).await, Err(AppError::InvalidTimeRange(_))));
    }
}
