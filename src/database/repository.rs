use sqlx::SqliteConnection;

use crate::database::manager::DatabaseError;
use crate::database::models::{Satellite, SatelliteCreate, SatelliteUpdate};

/// CRUD over the satellites table.
///
/// Every operation runs on the caller's connection, normally the scoped
/// per-request session, so the caller decides when work is committed.
pub struct SatelliteRepository;

impl SatelliteRepository {
    /// Insert a new record and return its storage-assigned id
    pub async fn insert(conn: &mut SqliteConnection, body: &SatelliteCreate) -> Result<i64, DatabaseError> {
        let result = sqlx::query("INSERT INTO satellites (acronym, mass, power) VALUES (?, ?, ?)")
            .bind(&body.acronym)
            .bind(body.mass)
            .bind(body.power)
            .execute(conn)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn select_one(conn: &mut SqliteConnection, id: i64) -> Result<Option<Satellite>, DatabaseError> {
        let satellite = sqlx::query_as::<_, Satellite>(
            "SELECT id, acronym, mass, power FROM satellites WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(satellite)
    }

    pub async fn select_404(conn: &mut SqliteConnection, id: i64) -> Result<Satellite, DatabaseError> {
        Self::select_one(conn, id)
            .await?
            .ok_or(DatabaseError::SatelliteNotFound(id))
    }

    pub async fn select_all(conn: &mut SqliteConnection) -> Result<Vec<Satellite>, DatabaseError> {
        let satellites = sqlx::query_as::<_, Satellite>(
            "SELECT id, acronym, mass, power FROM satellites ORDER BY id",
        )
        .fetch_all(conn)
        .await?;

        Ok(satellites)
    }

    /// Overwrite all fields of an existing record.
    ///
    /// Replace and patch are each one statement, so the first access in the
    /// session is a write and concurrent writers wait on the busy timeout.
    pub async fn replace(
        conn: &mut SqliteConnection,
        id: i64,
        body: SatelliteCreate,
    ) -> Result<Satellite, DatabaseError> {
        sqlx::query_as::<_, Satellite>(
            "UPDATE satellites SET acronym = ?, mass = ?, power = ? WHERE id = ? \
             RETURNING id, acronym, mass, power",
        )
        .bind(body.acronym)
        .bind(body.mass)
        .bind(body.power)
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or(DatabaseError::SatelliteNotFound(id))
    }

    /// Overwrite only the supplied fields of an existing record
    pub async fn patch(
        conn: &mut SqliteConnection,
        id: i64,
        patch: SatelliteUpdate,
    ) -> Result<Satellite, DatabaseError> {
        sqlx::query_as::<_, Satellite>(
            "UPDATE satellites SET acronym = COALESCE(?, acronym), mass = COALESCE(?, mass), \
             power = COALESCE(?, power) WHERE id = ? RETURNING id, acronym, mass, power",
        )
        .bind(patch.acronym)
        .bind(patch.mass)
        .bind(patch.power)
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or(DatabaseError::SatelliteNotFound(id))
    }

    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM satellites WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::SatelliteNotFound(id));
        }
        Ok(())
    }
}
