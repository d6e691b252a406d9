use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::error::{Error, Result};
use crate::i18n::Notice;
use crate::models::details::{DetailsInput, DossierDetails};

const DETAILS_COLUMNS: &str = "id, dossier_id, date_cloture, date_reception, dossier_complet, \
    date_transmission_commission, date_reunion_commission, candidature_non_retenue, \
    confirmation_information, date_entendu, position_classement, date_soumission_autorites, \
    date_transmission_autorites, date_entree_fonction, date_suppression_dossier";

#[derive(Clone)]
pub struct DetailsService {
    pool: SqlitePool,
}

impl DetailsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, dossier_id: &str) -> Result<Option<DossierDetails>> {
        let sql = format!(
            "SELECT {} FROM details_dossier_candidats WHERE dossier_id = ?",
            DETAILS_COLUMNS
        );
        let details = sqlx::query_as::<_, DossierDetails>(&sql)
            .bind(dossier_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(details)
    }

    pub async fn get(&self, dossier_id: &str) -> Result<DossierDetails> {
        self.find(dossier_id)
            .await?
            .ok_or(Error::NotFound(Notice::DetailsNotFound))
    }

    /// Details of every listed dossier, keyed by dossier id.
    pub async fn for_dossiers(&self, dossier_ids: &[String]) -> Result<HashMap<String, DossierDetails>> {
        if dossier_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = vec!["?"; dossier_ids.len()].join(", ");
        let sql = format!(
            "SELECT {} FROM details_dossier_candidats WHERE dossier_id IN ({})",
            DETAILS_COLUMNS, placeholders
        );
        let mut query = sqlx::query_as::<_, DossierDetails>(&sql);
        for id in dossier_ids {
            query = query.bind(id);
        }
        let rows = query.fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|d| (d.dossier_id.clone(), d))
            .collect())
    }

    /// Attaches a details record. A dossier carries at most one.
    pub async fn create(&self, dossier_id: &str, input: &DetailsInput) -> Result<DossierDetails> {
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM dossier_candidats WHERE id = ?")
            .bind(dossier_id)
            .fetch_one(&self.pool)
            .await?;
        if exists == 0 {
            return Err(Error::NotFound(Notice::DossierNotFound));
        }
        if self.find(dossier_id).await?.is_some() {
            return Err(Error::Conflict(Notice::DetailsAlreadyExist));
        }

        sqlx::query(
            r#"
            INSERT INTO details_dossier_candidats (
                dossier_id, date_cloture, date_reception, dossier_complet,
                date_transmission_commission, date_reunion_commission, candidature_non_retenue,
                confirmation_information, date_entendu, position_classement,
                date_soumission_autorites, date_transmission_autorites,
                date_entree_fonction, date_suppression_dossier
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(dossier_id)
        .bind(input.date_cloture)
        .bind(input.date_reception)
        .bind(input.dossier_complet)
        .bind(input.date_transmission_commission)
        .bind(input.date_reunion_commission)
        .bind(input.candidature_non_retenue)
        .bind(input.confirmation_information)
        .bind(input.date_entendu)
        .bind(input.position_classement)
        .bind(input.date_soumission_autorites)
        .bind(input.date_transmission_autorites)
        .bind(input.date_entree_fonction)
        .bind(input.date_suppression_dossier)
        .execute(&self.pool)
        .await?;

        tracing::info!(dossier_id, "details created");
        self.get(dossier_id).await
    }

    /// Overwrites every field of the record. When `contact` is given, the
    /// dossier's e-mail and phone are updated in the same transaction.
    pub async fn update(
        &self,
        dossier_id: &str,
        input: &DetailsInput,
        contact: Option<(String, String)>,
    ) -> Result<DossierDetails> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE details_dossier_candidats SET
                date_cloture = ?, date_reception = ?, dossier_complet = ?,
                date_transmission_commission = ?, date_reunion_commission = ?,
                candidature_non_retenue = ?, confirmation_information = ?,
                date_entendu = ?, position_classement = ?,
                date_soumission_autorites = ?, date_transmission_autorites = ?,
                date_entree_fonction = ?, date_suppression_dossier = ?
            WHERE dossier_id = ?
            "#,
        )
        .bind(input.date_cloture)
        .bind(input.date_reception)
        .bind(input.dossier_complet)
        .bind(input.date_transmission_commission)
        .bind(input.date_reunion_commission)
        .bind(input.candidature_non_retenue)
        .bind(input.confirmation_information)
        .bind(input.date_entendu)
        .bind(input.position_classement)
        .bind(input.date_soumission_autorites)
        .bind(input.date_transmission_autorites)
        .bind(input.date_entree_fonction)
        .bind(input.date_suppression_dossier)
        .bind(dossier_id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(Notice::DetailsNotFound));
        }

        if let Some((mail, phone)) = contact {
            sqlx::query("UPDATE dossier_candidats SET mail = ?, phonenumber = ? WHERE id = ?")
                .bind(mail)
                .bind(phone)
                .bind(dossier_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        tracing::info!(dossier_id, "details updated");
        self.get(dossier_id).await
    }
}
