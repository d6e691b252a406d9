use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::account_dto::{PasswordChangeForm, ProfileForm, RegisterForm};
use crate::error::{Error, Result};
use crate::i18n::Notice;
use crate::models::user::{Role, User, MEMBERSHIP_TABLES};
use crate::utils::{crypto, validation};

const USER_COLUMNS: &str =
    "id, username, name, surname, password_hash, email, role, whitelist, notification, created_at";

/// Account to insert. The password is hashed before it is stored.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub name: &'a str,
    pub surname: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: Role,
    pub whitelist: bool,
    pub notification: &'a str,
}

#[derive(Clone)]
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username.trim())
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn get(&self, id: &str) -> Result<User> {
        self.find_by_id(id)
            .await?
            .ok_or(Error::NotFound(Notice::UserNotFound))
    }

    pub async fn list_all(&self) -> Result<Vec<User>> {
        let sql = format!(
            "SELECT {} FROM users ORDER BY created_at, username",
            USER_COLUMNS
        );
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(users)
    }

    pub async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// Inserts the account together with the membership row of its role.
    pub async fn create(&self, new: NewUser<'_>) -> Result<User> {
        let password_hash = crypto::hash_password(new.password)?;
        let id = Uuid::new_v4().to_string();

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO users (id, username, name, surname, password_hash, email, role, whitelist, notification, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(new.username.trim())
        .bind(new.name.trim())
        .bind(new.surname.trim())
        .bind(&password_hash)
        .bind(new.email.trim())
        .bind(new.role.as_str())
        .bind(new.whitelist)
        .bind(new.notification)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        if let Some(table) = new.role.membership_table() {
            let sql = format!("INSERT INTO {} (user_id) VALUES (?)", table);
            sqlx::query(&sql).bind(&id).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        self.get(&id).await
    }

    /// Self-registration. New accounts are active candidates. Nothing is
    /// written unless every check passes.
    pub async fn register(&self, form: &RegisterForm) -> Result<User> {
        if self.find_by_email(&form.email).await?.is_some() {
            return Err(Error::Conflict(Notice::EmailTaken));
        }
        if self.find_by_username(&form.username).await?.is_some() {
            return Err(Error::Conflict(Notice::UsernameTaken));
        }
        if form.password != form.password_confirm {
            return Err(Error::BadRequest(Notice::PasswordMismatch));
        }
        validation::validate(form)?;

        let user = self
            .create(NewUser {
                username: &form.username,
                name: &form.name,
                surname: &form.surname,
                email: &form.email,
                password: &form.password,
                role: Role::Candidat,
                whitelist: true,
                notification: "",
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(Error::Unauthorized(Notice::BadCredentials))?;

        if !crypto::verify_password(password, &user.password_hash) {
            tracing::warn!(user_id = %user.id, "failed login attempt");
            return Err(Error::Unauthorized(Notice::BadCredentials));
        }
        if !user.whitelist {
            return Err(Error::Forbidden(Notice::UserBlocked));
        }
        Ok(user)
    }

    /// The stored hash is only replaced once the old password verified and
    /// the new one passed every rule.
    pub async fn change_password(&self, user: &User, form: &PasswordChangeForm) -> Result<()> {
        if !crypto::verify_password(&form.old_pwd, &user.password_hash) {
            return Err(Error::BadRequest(Notice::OldPasswordIncorrect));
        }
        if form.new_pwd != form.new_pwd_confirm {
            return Err(Error::BadRequest(Notice::PasswordMismatch));
        }
        validation::validate(form)?;

        let password_hash = crypto::hash_password(&form.new_pwd)?;
        let result = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(&password_hash)
            .bind(&user.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(Notice::UserNotFound));
        }

        tracing::info!(user_id = %user.id, "password changed");
        Ok(())
    }

    pub async fn update_profile(&self, id: &str, form: &ProfileForm) -> Result<User> {
        validation::validate(form)?;
        if let Some(other) = self.find_by_username(&form.username).await? {
            if other.id != id {
                return Err(Error::Conflict(Notice::UsernameTaken));
            }
        }

        let result = sqlx::query("UPDATE users SET username = ?, name = ?, surname = ? WHERE id = ?")
            .bind(form.username.trim())
            .bind(form.name.trim())
            .bind(form.surname.trim())
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(Notice::UserNotFound));
        }
        self.get(id).await
    }

    /// Switches the user to `role`. Exactly one membership row remains, the
    /// one matching the new role (none for candidates).
    pub async fn set_role(&self, id: &str, role: Role) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE users SET role = ? WHERE id = ?")
            .bind(role.as_str())
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(Notice::UserNotFound));
        }

        let keep = role.membership_table();
        for table in MEMBERSHIP_TABLES {
            if Some(table) == keep {
                continue;
            }
            let sql = format!("DELETE FROM {} WHERE user_id = ?", table);
            sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
        }
        if let Some(table) = keep {
            let sql = format!("INSERT OR IGNORE INTO {} (user_id) VALUES (?)", table);
            sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
        }

        tx.commit().await?;
        tracing::info!(user_id = %id, role = role.as_str(), "role changed");
        Ok(())
    }

    pub async fn set_whitelist(&self, id: &str, enabled: bool) -> Result<()> {
        let result = sqlx::query("UPDATE users SET whitelist = ? WHERE id = ?")
            .bind(enabled)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(Notice::UserNotFound));
        }
        tracing::info!(user_id = %id, whitelist = enabled, "whitelist updated");
        Ok(())
    }

    /// Roles for which the user currently holds a membership row.
    pub async fn memberships(&self, id: &str) -> Result<Vec<Role>> {
        let mut roles = Vec::new();
        for role in Role::ALL {
            let Some(table) = role.membership_table() else {
                continue;
            };
            let sql = format!("SELECT COUNT(*) FROM {} WHERE user_id = ?", table);
            let count = sqlx::query_scalar::<_, i64>(&sql)
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
            if count > 0 {
                roles.push(role);
            }
        }
        Ok(roles)
    }
}
