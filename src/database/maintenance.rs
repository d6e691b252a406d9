use sqlx::SqlitePool;

use crate::error::Result;

/// Child tables first so the statements also succeed with foreign keys on.
const CLEAR_ORDER: [&str; 6] = [
    "details_dossier_candidats",
    "dossier_candidats",
    "admins",
    "secretariats",
    "resp_recrutements",
    "users",
];

/// Empties every table in one transaction. On failure nothing is removed.
pub async fn clear_all(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;

    for table in CLEAR_ORDER {
        let sql = format!("DELETE FROM {}", table);
        let result = sqlx::query(&sql).execute(&mut *tx).await;
        if let Err(err) = result {
            tracing::error!(table, error = %err, "failed to empty table, rolling back");
            tx.rollback().await?;
            return Err(err.into());
        }
    }

    tx.commit().await?;
    tracing::info!("database emptied");
    Ok(())
}
