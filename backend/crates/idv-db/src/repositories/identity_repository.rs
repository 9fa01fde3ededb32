use crate::{DbError, Result as DbErrorResult, StoreOutcome};

use idv_core::{
    CardType, ErrorLocation, ExtractedDetails, FaceEmbedding, IdType, IdentityRecord,
};

use std::panic::Location;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS user_id_details (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        card_type TEXT,
        name TEXT,
        dob TEXT,
        aadhaar_no TEXT UNIQUE,
        pan_no TEXT UNIQUE,
        license_no TEXT UNIQUE,
        voter_id_number TEXT UNIQUE,
        expiration_date TEXT,
        father_mother_name TEXT,
        face_embedding TEXT,
        registration_timestamp INTEGER NOT NULL
    )
"#;

const SELECT_COLUMNS: &str = "id, card_type, name, dob, aadhaar_no, pan_no, license_no, \
     voter_id_number, expiration_date, father_mother_name, face_embedding, \
     registration_timestamp";

/// Persists verified identities in `user_id_details`.
///
/// Each of the four ID columns is independently unique. The card type picks
/// which one a write conflicts on; the others are never overwritten with NULL.
pub struct IdentityRepository {
    pool: SqlitePool,
}

impl IdentityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the identity table if it does not exist yet.
    pub async fn ensure_schema(&self) -> DbErrorResult<()> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        debug!("Table 'user_id_details' checked/created");
        Ok(())
    }

    /// Round-trip to the database, for readiness probes.
    pub async fn ping(&self) -> DbErrorResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Insert or update the identity described by `details`.
    ///
    /// Nothing is written when the details are empty, the embedding is
    /// missing, the card type is unknown or its identifier is absent.
    pub async fn store(
        &self,
        details: &ExtractedDetails,
        embedding: Option<&FaceEmbedding>,
    ) -> StoreOutcome {
        if details.is_empty() {
            return StoreOutcome::failed("No valid details to store.");
        }

        let Some(embedding) = embedding else {
            return StoreOutcome::failed("Cannot store: ID face embedding is missing.");
        };

        let Some(card_type) = details.card_type() else {
            let label = details.card_type.as_deref().unwrap_or("none");
            warn!("Refusing to store identity with unrecognized card type '{label}'");
            return StoreOutcome::failed(format!(
                "Cannot store: unrecognized card type '{label}'."
            ));
        };

        let conflict_column = card_type.id_type();
        if details.normalized_id(conflict_column).is_none() {
            warn!(
                "Refusing to store {} without a {} value",
                card_type,
                conflict_column.column()
            );
            return StoreOutcome::failed(format!(
                "Cannot store: {} has no {} value.",
                card_type,
                conflict_column.column()
            ));
        }

        let embedding_json = match embedding.to_json() {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize face embedding: {e}");
                return StoreOutcome::failed(format!("Cannot store: {e}"));
            }
        };

        match self
            .upsert(details, card_type, conflict_column, &embedding_json)
            .await
        {
            Ok(id) => {
                let name = details.name.as_deref().unwrap_or("unknown");
                info!("Identity '{name}' (ID: {id}) stored/updated on {conflict_column}");
                StoreOutcome::stored(
                    id,
                    format!("User details for '{name}' (ID: {id}) stored/updated successfully."),
                )
            }
            Err(e) => {
                error!("Database error during identity storage: {e}");
                StoreOutcome::failed(format!("Database error: {e}"))
            }
        }
    }

    async fn upsert(
        &self,
        details: &ExtractedDetails,
        card_type: CardType,
        conflict_column: IdType,
        embedding_json: &str,
    ) -> DbErrorResult<i64> {
        // Column names come from IdType, never from input
        let sql = format!(
            r#"
            INSERT INTO user_id_details (
                card_type, name, dob, aadhaar_no, pan_no, license_no, voter_id_number,
                expiration_date, father_mother_name, face_embedding, registration_timestamp
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT({conflict}) DO UPDATE SET
                card_type = excluded.card_type,
                name = excluded.name,
                dob = excluded.dob,
                aadhaar_no = COALESCE(excluded.aadhaar_no, user_id_details.aadhaar_no),
                pan_no = COALESCE(excluded.pan_no, user_id_details.pan_no),
                license_no = COALESCE(excluded.license_no, user_id_details.license_no),
                voter_id_number = COALESCE(excluded.voter_id_number, user_id_details.voter_id_number),
                expiration_date = excluded.expiration_date,
                father_mother_name = excluded.father_mother_name,
                face_embedding = excluded.face_embedding,
                registration_timestamp = excluded.registration_timestamp
            RETURNING id
            "#,
            conflict = conflict_column.column()
        );

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query_scalar::<_, i64>(&sql)
            .bind(card_type.as_str())
            .bind(details.name.as_deref())
            .bind(details.dob.as_deref())
            .bind(details.normalized_id(IdType::Aadhaar))
            .bind(details.normalized_id(IdType::Pan))
            .bind(details.normalized_id(IdType::License))
            .bind(details.normalized_id(IdType::VoterId))
            .bind(details.expiration_date.as_deref())
            .bind(details.father_mother_name.as_deref())
            .bind(embedding_json)
            .bind(Utc::now().timestamp())
            .fetch_one(&mut *tx)
            .await;

        match result {
            Ok(id) => {
                tx.commit().await?;
                Ok(id)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!("Rollback after failed identity upsert also failed: {rollback_err}");
                }
                Err(e.into())
            }
        }
    }

    /// Look up an identity, treating lookup errors as "not found".
    pub async fn find_by_identifier(&self, value: &str, id_type: IdType) -> Option<IdentityRecord> {
        match self.fetch_by_identifier(value, id_type).await {
            Ok(record) => record,
            Err(e) => {
                error!("Identity lookup on {id_type} failed: {e}");
                None
            }
        }
    }

    /// Look up an identity by one of the four ID columns.
    /// The value is normalized the same way `store` normalizes it.
    pub async fn fetch_by_identifier(
        &self,
        value: &str,
        id_type: IdType,
    ) -> DbErrorResult<Option<IdentityRecord>> {
        let Some(normalized) = id_type.normalize(value) else {
            return Ok(None);
        };

        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM user_id_details WHERE {} = ?",
            id_type.column()
        );

        let row = sqlx::query(&sql)
            .bind(&normalized)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(record_from_row).transpose()
    }
}

#[track_caller]
fn record_from_row(row: &SqliteRow) -> DbErrorResult<IdentityRecord> {
    let face_embedding = row
        .try_get::<Option<String>, _>("face_embedding")?
        .map(|json| FaceEmbedding::from_json(&json))
        .transpose()?;

    let timestamp: i64 = row.try_get("registration_timestamp")?;
    let registered_at =
        DateTime::<Utc>::from_timestamp(timestamp, 0).ok_or_else(|| DbError::InvalidRow {
            message: format!("Invalid registration_timestamp: {timestamp}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(IdentityRecord {
        id: row.try_get("id")?,
        card_type: row.try_get("card_type")?,
        name: row.try_get("name")?,
        dob: row.try_get("dob")?,
        aadhaar_no: row.try_get("aadhaar_no")?,
        pan_no: row.try_get("pan_no")?,
        license_no: row.try_get("license_no")?,
        voter_id_number: row.try_get("voter_id_number")?,
        expiration_date: row.try_get("expiration_date")?,
        father_mother_name: row.try_get("father_mother_name")?,
        face_embedding,
        registered_at,
    })
}
