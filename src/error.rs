use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, RuntimeErr, SqlErr, TransactionError};
use serde::Serialize;
use sqlx::postgres::PgDatabaseError;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

/// SQLSTATE raised by PostgreSQL for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Product with {0} not found")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("Unexpected error, check server logs")]
    InternalWrite,

    #[error("ORM error")]
    OrmError(#[from] DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Duplicate(_) => StatusCode::BAD_REQUEST,
            AppError::InternalWrite => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::OrmError(err) => {
                tracing::error!(error = %err, "catalog read failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = self.to_string();
        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData { error: message }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Maps a failed write onto the caller-facing taxonomy.
///
/// Unique violations keep the constraint detail; everything else is logged here
/// and replaced with an opaque error.
pub fn classify_write_error(err: DbErr) -> AppError {
    if let Some(detail) = unique_violation_detail(&err) {
        tracing::warn!(detail = %detail, "duplicate catalog entry rejected");
        return AppError::Duplicate(detail);
    }
    tracing::error!(error = ?err, "catalog write failed");
    AppError::InternalWrite
}

/// Same as [`classify_write_error`] for errors coming out of a transaction block.
/// By the time this runs the transaction has already been rolled back.
pub fn classify_transaction_error(err: TransactionError<DbErr>) -> AppError {
    match err {
        TransactionError::Connection(err) | TransactionError::Transaction(err) => {
            classify_write_error(err)
        }
    }
}

fn unique_violation_detail(err: &DbErr) -> Option<String> {
    if let DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(db_err)))
    | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(db_err))) = err
    {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let detail = db_err
                .try_downcast_ref::<PgDatabaseError>()
                .and_then(|pg| pg.detail())
                .unwrap_or_else(|| db_err.message());
            return Some(detail.to_string());
        }
    }

    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => Some(detail),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_write_errors_become_opaque() {
        let err = classify_write_error(DbErr::Custom(
            "relation \"products\" does not exist".into(),
        ));
        assert!(matches!(err, AppError::InternalWrite));
        assert_eq!(err.to_string(), "Unexpected error, check server logs");
    }

    #[test]
    fn rolled_back_transaction_errors_are_classified() {
        let err =
            classify_transaction_error(TransactionError::Transaction(DbErr::RecordNotInserted));
        assert!(matches!(err, AppError::InternalWrite));

        let err = classify_transaction_error(TransactionError::Connection(DbErr::Custom(
            "connection reset".into(),
        )));
        assert!(matches!(err, AppError::InternalWrite));
    }

    #[test]
    fn not_found_echoes_the_term() {
        let err = AppError::NotFound("red-shoe".into());
        assert_eq!(err.to_string(), "Product with red-shoe not found");
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            AppError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Duplicate("Key (slug)=(x) already exists.".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InternalWrite.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
