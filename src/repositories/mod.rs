use sqlx::PgPool;

pub mod blog_repo;
pub mod certificates_repo;
pub mod logo_repo;
#[cfg(test)]
pub mod memory;
pub mod user_repo;

#[derive(Clone)]
pub struct PostgresRepo {
    pool: PgPool,
}

impl PostgresRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Postgres SQLSTATE of a failed statement, if the error came from the server.
pub(crate) fn db_error_code(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|db_err| db_err.code())
        .map(|code| code.into_owned())
}
