use crate::outbound::db::connection::Db;
use sqlx::PgPool;

/// Postgres adapter for both the assignment store and the work hierarchy.
#[derive(Clone)]
pub struct Repository {
    pub(crate) pool: PgPool,
}

impl Repository {
    pub fn new(db: &Db) -> Self {
        Self { pool: db.pool() }
    }
}
