use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("error with sqlx")]
    DatabaseError(#[from] sqlx::Error),

    #[error("error running migrations")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("the resource already exists")]
    OnConflict,

    #[error("the row violates a table constraint")]
    ConstraintViolation,
}

impl Error {
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        if let Some(database_error) = err.as_database_error() {
            if database_error.is_unique_violation() {
                return Error::OnConflict;
            }
            if database_error.is_check_violation() {
                return Error::ConstraintViolation;
            }
        }

        Error::DatabaseError(err)
    }
}
