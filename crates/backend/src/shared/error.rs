use axum::http::StatusCode;
use contracts::shared::priority::ClassifierError;
use thiserror::Error;

/// Ошибки прикладных сервисов, которые должны дойти до клиента
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid ID: {0}")]
    InvalidId(String),
}

/// HTTP-статус для ошибки сервиса; всё прочее — 500
pub fn status_code(err: &anyhow::Error) -> StatusCode {
    match err.downcast_ref::<ServiceError>() {
        Some(ServiceError::Classifier(_)) => StatusCode::BAD_REQUEST,
        Some(ServiceError::Validation(_)) => StatusCode::BAD_REQUEST,
        Some(ServiceError::InvalidId(_)) => StatusCode::BAD_REQUEST,
        Some(ServiceError::NotFound { .. }) => StatusCode::NOT_FOUND,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Записать ошибку обработчика в лог и вернуть статус ответа
pub fn into_status(operation: &str, err: anyhow::Error) -> StatusCode {
    let status = status_code(&err);
    if status.is_server_error() {
        tracing::error!("{} failed: {:#}", operation, err);
    } else {
        tracing::warn!("{} rejected: {}", operation, err);
    }
    status
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        let err: anyhow::Error =
            ServiceError::from(ClassifierError::InvalidCriterion("Brand".into())).into();
        assert_eq!(status_code(&err), StatusCode::BAD_REQUEST);

        let err: anyhow::Error = ServiceError::NotFound {
            entity: "attribute_rule",
            id: "x".into(),
        }
        .into();
        assert_eq!(status_code(&err), StatusCode::NOT_FOUND);

        let err = anyhow::anyhow!("storage failure");
        assert_eq!(status_code(&err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
