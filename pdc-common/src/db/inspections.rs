//! Inspection record store
//!
//! Records are owned by exactly one user and addressed by the composite key
//! (owner, record id). Every query filters on both columns, so a record
//! belonging to another user behaves identically to a missing one; no
//! existence information leaks across owners.

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::users::parse_timestamp;
use crate::model::{Inspection, InspectionPatch, InspectionStatus};
use crate::{Error, Result};

/// All records for an owner, in storage order
pub async fn list(pool: &SqlitePool, owner: Uuid) -> Result<Vec<Inspection>> {
    let rows = sqlx::query(
        r#"
        SELECT id, vehicle_details, exterior_condition, engine_conditions,
               additional_checks, images, status, created_at, updated_at
        FROM inspections
        WHERE user_id = ?
        ORDER BY rowid ASC
        "#,
    )
    .bind(owner.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_inspection).collect()
}

/// One record by id, scoped to its owner
pub async fn get(pool: &SqlitePool, owner: Uuid, id: Uuid) -> Result<Option<Inspection>> {
    let row = sqlx::query(
        r#"
        SELECT id, vehicle_details, exterior_condition, engine_conditions,
               additional_checks, images, status, created_at, updated_at
        FROM inspections
        WHERE user_id = ? AND id = ?
        "#,
    )
    .bind(owner.to_string())
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(row_to_inspection(&row)?)),
        None => Ok(None),
    }
}

/// Create a record: caller-supplied fields merged over defaults, status
/// defaulting to Draft, both timestamps stamped to now. Returns the stored
/// record including its newly assigned id.
pub async fn create(
    pool: &SqlitePool,
    owner: Uuid,
    patch: &InspectionPatch,
) -> Result<Inspection> {
    let record = Inspection::new_draft(Utc::now()).merged(patch);

    sqlx::query(
        r#"
        INSERT INTO inspections (
            id, user_id, vehicle_details, exterior_condition, engine_conditions,
            additional_checks, images, status, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(record.id.to_string())
    .bind(owner.to_string())
    .bind(to_json(&record.vehicle_details)?)
    .bind(to_json(&record.exterior_condition)?)
    .bind(to_json(&record.engine_conditions)?)
    .bind(to_json(&record.additional_checks)?)
    .bind(to_json(&record.images)?)
    .bind(record.status.to_string())
    .bind(record.created_at.to_rfc3339())
    .bind(record.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(record)
}

/// Shallow-merge the patch into the stored record and stamp `updated_at`.
///
/// Read-merge-write runs inside one transaction, so two concurrent updates to
/// the same record cannot interleave into a lost update within a single call.
/// Returns None when the record does not exist for this owner.
pub async fn update(
    pool: &SqlitePool,
    owner: Uuid,
    id: Uuid,
    patch: &InspectionPatch,
) -> Result<Option<Inspection>> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        r#"
        SELECT id, vehicle_details, exterior_condition, engine_conditions,
               additional_checks, images, status, created_at, updated_at
        FROM inspections
        WHERE user_id = ? AND id = ?
        "#,
    )
    .bind(owner.to_string())
    .bind(id.to_string())
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut record = row_to_inspection(&row)?.merged(patch);
    record.updated_at = Utc::now();

    sqlx::query(
        r#"
        UPDATE inspections
        SET vehicle_details = ?, exterior_condition = ?, engine_conditions = ?,
            additional_checks = ?, images = ?, status = ?, updated_at = ?
        WHERE user_id = ? AND id = ?
        "#,
    )
    .bind(to_json(&record.vehicle_details)?)
    .bind(to_json(&record.exterior_condition)?)
    .bind(to_json(&record.engine_conditions)?)
    .bind(to_json(&record.additional_checks)?)
    .bind(to_json(&record.images)?)
    .bind(record.status.to_string())
    .bind(record.updated_at.to_rfc3339())
    .bind(owner.to_string())
    .bind(id.to_string())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Some(record))
}

/// Delete a record. Returns false when it does not exist for this owner.
pub async fn delete(pool: &SqlitePool, owner: Uuid, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM inspections WHERE user_id = ? AND id = ?")
        .bind(owner.to_string())
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| Error::Internal(format!("failed to serialize record field: {}", e)))
}

fn from_json<T: serde::de::DeserializeOwned>(value: &str) -> Result<T> {
    serde_json::from_str(value)
        .map_err(|e| Error::Internal(format!("invalid record field in database: {}", e)))
}

fn row_to_inspection(row: &sqlx::sqlite::SqliteRow) -> Result<Inspection> {
    let id: String = row.get("id");
    let vehicle_details: String = row.get("vehicle_details");
    let exterior_condition: String = row.get("exterior_condition");
    let engine_conditions: String = row.get("engine_conditions");
    let additional_checks: String = row.get("additional_checks");
    let images: String = row.get("images");
    let status: String = row.get("status");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    let status = match status.as_str() {
        "Draft" => InspectionStatus::Draft,
        "Completed" => InspectionStatus::Completed,
        other => {
            return Err(Error::Internal(format!(
                "invalid inspection status in database: {}",
                other
            )))
        }
    };

    Ok(Inspection {
        id: Uuid::parse_str(&id)
            .map_err(|e| Error::Internal(format!("invalid inspection id in database: {}", e)))?,
        vehicle_details: from_json(&vehicle_details)?,
        exterior_condition: from_json(&exterior_condition)?,
        engine_conditions: from_json(&engine_conditions)?,
        additional_checks: from_json(&additional_checks)?,
        images: from_json(&images)?,
        status,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
