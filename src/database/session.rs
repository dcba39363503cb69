use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use sqlx::{Sqlite, SqliteConnection, Transaction};

use crate::database::manager::DatabaseError;
use crate::error::ApiError;
use crate::state::AppState;

/// Per-request storage session.
///
/// Opened when a handler extracts it and backed by a transaction. `commit`
/// makes the work durable; every other exit path (error return, rejection of
/// a later extractor, panic) drops the transaction, which rolls it back.
pub struct DbSession {
    tx: Transaction<'static, Sqlite>,
}

impl DbSession {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx }
    }

    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    pub async fn commit(self) -> Result<(), DatabaseError> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for DbSession {
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(state.db.begin().await?)
    }
}
