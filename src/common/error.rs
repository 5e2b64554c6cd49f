use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Período inválido: '{0}'")]
    InvalidTimeRange(String),

    // Os geradores não falham; isso só acontece quando a busca estoura o tempo limite.
    #[error("Dados indisponíveis no momento")]
    DataUnavailable,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidTimeRange(value) => {
                let body = Json(json!({
                    "error": format!("Período inválido: '{}'.", value),
                    "allowed": crate::models::time_range::TimeRange::ALL,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::DataUnavailable => {
                tracing::warn!("Dados indisponíveis: tempo limite de busca esgotado");
                (StatusCode::SERVICE_UNAVAILABLE, "Dados indisponíveis no momento. Tente novamente.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(
            AppError::InvalidTimeRange("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::DataUnavailable.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
