use sqlx::SqlitePool;

use crate::error::{Error, Result};
use crate::i18n::Notice;
use crate::models::user::User;
use crate::services::dossier_service::DossierService;
use crate::services::user_service::UserService;

pub const MAX_MESSAGE_CHARS: usize = 255;

/// In-app notifications. Each user holds a single message slot; sending
/// overwrites it and reading leaves it in place.
#[derive(Clone)]
pub struct NotificationService {
    pool: SqlitePool,
    dossiers: DossierService,
    users: UserService,
}

impl NotificationService {
    pub fn new(pool: SqlitePool) -> Self {
        let dossiers = DossierService::new(pool.clone());
        let users = UserService::new(pool.clone());
        Self {
            pool,
            dossiers,
            users,
        }
    }

    /// Account that receives notifications about the dossier.
    pub async fn recipient(&self, dossier_id: &str) -> Result<User> {
        let dossier = self.dossiers.get(dossier_id).await?;
        self.users
            .find_by_id(&dossier.user_id)
            .await?
            .ok_or(Error::NotFound(Notice::AssociatedUserNotFound))
    }

    pub async fn send(&self, dossier_id: &str, message: &str) -> Result<User> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::BadRequest(Notice::MessageEmpty));
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(Error::BadRequest(Notice::MessageTooLong));
        }

        let recipient = self.recipient(dossier_id).await?;
        sqlx::query("UPDATE users SET notification = ? WHERE id = ?")
            .bind(message)
            .bind(&recipient.id)
            .execute(&self.pool)
            .await?;

        tracing::info!(dossier_id, user_id = %recipient.id, "notification sent");
        self.users.get(&recipient.id).await
    }

    pub async fn latest(&self, user_id: &str) -> Result<Option<String>> {
        let message = sqlx::query_scalar::<_, String>("SELECT notification FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(message.filter(|m| !m.trim().is_empty()))
    }
}
