//! Mapping of sqlx failures into [`AppError`].

use coursehub_core::error::{AppError, ErrorKind};

/// Build a `map_err` closure that wraps any sqlx error as a database error.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// Name of the violated constraint, if `err` is a unique or foreign-key violation.
pub(crate) fn violated_constraint(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() =>
        {
            db_err.constraint().map(str::to_string)
        }
        _ => None,
    }
}

/// Map a write failure: constraint violations become conflicts, the rest database errors.
pub(crate) fn write_error(
    context: &'static str,
    conflict_message: String,
) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match violated_constraint(&e) {
        Some(constraint) => {
            tracing::debug!(constraint = %constraint, "Constraint violation");
            AppError::conflict(conflict_message)
        }
        None => AppError::with_source(ErrorKind::Database, context, e),
    }
}
