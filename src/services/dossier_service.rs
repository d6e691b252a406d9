use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::dossier_dto::DossierPayload;
use crate::error::{Error, Result};
use crate::i18n::Notice;
use crate::models::dossier::{Dossier, DossierPage, DossierView};
use crate::models::user::User;
use crate::services::details_service::DetailsService;
use crate::utils::validation;

const DOSSIER_COLUMNS: &str =
    "id, username, name, mail, postereference, profref, phonenumber, image, user_id, created_at";

/// Exact match on any of the searchable columns.
const SEARCH_FILTER: &str = "(mail = ? OR phonenumber = ? OR postereference = ? OR name = ?)";
const OWNED_FILTER: &str = "(user_id = ? OR mail = ?)";

#[derive(Clone)]
pub struct DossierService {
    pool: SqlitePool,
    details: DetailsService,
}

impl DossierService {
    pub fn new(pool: SqlitePool) -> Self {
        let details = DetailsService::new(pool.clone());
        Self { pool, details }
    }

    /// Owner of a new dossier. Candidates own what they submit; staff
    /// submissions go to the account registered under the dossier e-mail,
    /// falling back to the submitter.
    pub async fn owner_for(&self, submitter: &User, mail: &str) -> Result<String> {
        if !submitter.is_staff() {
            return Ok(submitter.id.clone());
        }
        let owner = sqlx::query_scalar::<_, String>("SELECT id FROM users WHERE email = ?")
            .bind(mail.trim())
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner.unwrap_or_else(|| submitter.id.clone()))
    }

    pub async fn create(
        &self,
        owner_id: &str,
        payload: &DossierPayload,
        image: Option<String>,
    ) -> Result<Dossier> {
        validation::validate(payload)?;

        let id = Uuid::new_v4().to_string();
        sqlx::query(
            r#"
            INSERT INTO dossier_candidats (id, username, name, mail, postereference, profref, phonenumber, image, user_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(payload.username.trim())
        .bind(payload.name.trim())
        .bind(payload.mail.trim())
        .bind(payload.postereference.trim())
        .bind(payload.profref.trim())
        .bind(payload.phonenumber.trim())
        .bind(image)
        .bind(owner_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        tracing::info!(dossier_id = %id, owner_id, "dossier created");
        self.get(&id).await
    }

    pub async fn find(&self, id: &str) -> Result<Option<Dossier>> {
        let sql = format!("SELECT {} FROM dossier_candidats WHERE id = ?", DOSSIER_COLUMNS);
        let dossier = sqlx::query_as::<_, Dossier>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(dossier)
    }

    pub async fn get(&self, id: &str) -> Result<Dossier> {
        self.find(id)
            .await?
            .ok_or(Error::NotFound(Notice::DossierNotFound))
    }

    pub async fn get_view(&self, id: &str) -> Result<DossierView> {
        let dossier = self.get(id).await?;
        let details = self.details.find(id).await?;
        Ok(DossierView { dossier, details })
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<DossierPage> {
        self.page("", &[], page, per_page).await
    }

    pub async fn list_for_candidate(&self, user: &User, page: i64, per_page: i64) -> Result<DossierPage> {
        let filter = format!("WHERE {}", OWNED_FILTER);
        self.page(&filter, &[user.id.as_str(), user.email.as_str()], page, per_page)
            .await
    }

    /// Exact search over e-mail, phone, post reference and name. A blank
    /// keyword lists everything.
    pub async fn search(&self, keyword: &str, page: i64, per_page: i64) -> Result<DossierPage> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list(page, per_page).await;
        }
        let filter = format!("WHERE {}", SEARCH_FILTER);
        self.page(&filter, &[keyword; 4], page, per_page).await
    }

    pub async fn search_for_candidate(
        &self,
        user: &User,
        keyword: &str,
        page: i64,
        per_page: i64,
    ) -> Result<DossierPage> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list_for_candidate(user, page, per_page).await;
        }
        let filter = format!("WHERE {} AND {}", OWNED_FILTER, SEARCH_FILTER);
        let binds = [user.id.as_str(), user.email.as_str(), keyword, keyword, keyword, keyword];
        self.page(&filter, &binds, page, per_page).await
    }

    /// Every dossier, in listing order.
    pub async fn list_all(&self) -> Result<Vec<Dossier>> {
        let sql = format!(
            "SELECT {} FROM dossier_candidats ORDER BY created_at, id",
            DOSSIER_COLUMNS
        );
        let dossiers = sqlx::query_as::<_, Dossier>(&sql).fetch_all(&self.pool).await?;
        Ok(dossiers)
    }

    pub async fn update(&self, id: &str, payload: &DossierPayload) -> Result<Dossier> {
        validation::validate(payload)?;

        let result = sqlx::query(
            r#"
            UPDATE dossier_candidats
            SET username = ?, name = ?, mail = ?, postereference = ?, profref = ?, phonenumber = ?
            WHERE id = ?
            "#,
        )
        .bind(payload.username.trim())
        .bind(payload.name.trim())
        .bind(payload.mail.trim())
        .bind(payload.postereference.trim())
        .bind(payload.profref.trim())
        .bind(payload.phonenumber.trim())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(Notice::DossierNotFound));
        }

        tracing::info!(dossier_id = %id, "dossier updated");
        self.get(id).await
    }

    /// Removes the dossier. Its details go with it through the cascade.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM dossier_candidats WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(Notice::DossierNotFound));
        }
        tracing::info!(dossier_id = %id, "dossier deleted");
        Ok(())
    }

    async fn page(&self, filter: &str, binds: &[&str], page: i64, per_page: i64) -> Result<DossierPage> {
        let count_sql = format!("SELECT COUNT(*) FROM dossier_candidats {}", filter);
        let mut count = sqlx::query_scalar::<_, i64>(&count_sql);
        for value in binds {
            count = count.bind(*value);
        }
        let total = count.fetch_one(&self.pool).await?;

        let sql = format!(
            "SELECT {} FROM dossier_candidats {} ORDER BY created_at, id LIMIT ? OFFSET ?",
            DOSSIER_COLUMNS, filter
        );
        let mut query = sqlx::query_as::<_, Dossier>(&sql);
        for value in binds {
            query = query.bind(*value);
        }
        let offset = (page.max(1) - 1).saturating_mul(per_page);
        let dossiers = query
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<String> = dossiers.iter().map(|d| d.id.clone()).collect();
        let mut details = self.details.for_dossiers(&ids).await?;
        let items = dossiers
            .into_iter()
            .map(|dossier| {
                let details = details.remove(&dossier.id);
                DossierView { dossier, details }
            })
            .collect();

        Ok(DossierPage::new(items, total, page, per_page))
    }
}
