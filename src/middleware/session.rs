//! Cookie-backed sessions.
//!
//! A successful login stores an HS256 JWT in the `access-token` cookie. The
//! extractors below decode it on every request, reload the user and enforce
//! the role gates, redirecting instead of failing so browsers land on a
//! usable page.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, PageError, Result};
use crate::i18n::{Lang, Notice};
use crate::models::user::User;
use crate::AppState;

pub const SESSION_COOKIE: &str = "access-token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

pub fn issue_token(config: &Config, user: &User) -> Result<String> {
    let exp = Utc::now() + Duration::minutes(config.session_ttl_minutes);
    let claims = Claims {
        sub: user.id.clone(),
        exp: exp.timestamp().max(0) as usize,
        role: Some(user.role.clone()),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn decode_token(secret: &str, token: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

pub fn session_cookie(config: &Config, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

/// Landing page after login.
pub fn home_path(lang: Lang, user: &User) -> String {
    if user.is_staff() {
        lang.path("/accueilResponsable")
    } else {
        lang.path("/accueil")
    }
}

fn request_lang(parts: &Parts) -> Lang {
    parts.extensions.get::<Lang>().copied().unwrap_or_default()
}

fn to_login(lang: Lang) -> Response {
    Redirect::to(&lang.path("/login")).into_response()
}

/// The logged-in, non-blocked user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> std::result::Result<Self, Self::Rejection> {
        let lang = request_lang(parts);
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
            return Err(to_login(lang));
        };
        let claims = match decode_token(&state.config.jwt_secret, &token) {
            Ok(claims) => claims,
            Err(err) => {
                tracing::debug!(error = %err, "rejected session token");
                return Err(to_login(lang));
            }
        };

        let user = match state.user_service.find_by_id(&claims.sub).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(to_login(lang)),
            Err(err) => return Err(PageError::new(lang, lang.path("/login"), err).into_response()),
        };

        if !user.whitelist {
            let err = Error::Forbidden(Notice::UserBlocked);
            return Err(PageError::new(lang, lang.path("/login"), err).into_response());
        }

        Ok(CurrentUser(user))
    }
}

/// A secretariat, recruitment officer or admin. Candidates are sent back to
/// their own dossier list.
#[derive(Debug, Clone)]
pub struct StaffUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for StaffUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> std::result::Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if user.is_staff() {
            Ok(StaffUser(user))
        } else {
            let lang = request_lang(parts);
            tracing::warn!(user_id = %user.id, path = %parts.uri.path(), "candidate denied staff page");
            Err(Redirect::to(&lang.path("/dossiercandidat")).into_response())
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> std::result::Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if user.is_admin() {
            Ok(AdminUser(user))
        } else {
            let lang = request_lang(parts);
            let back = home_path(lang, &user);
            Err(PageError::new(lang, back, Error::Forbidden(Notice::AccessForbidden)).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: "sqlite::memory:".into(),
            jwt_secret: "session-test-secret".into(),
            session_ttl_minutes: 5,
            uploads_dir: "./static/images".into(),
            seed_demo_data: false,
            reset_on_shutdown: false,
            secure_cookies: false,
        }
    }

    fn user(role: &str) -> User {
        User {
            id: "u-1".into(),
            username: "User3".into(),
            name: "Doe".into(),
            surname: "John".into(),
            password_hash: String::new(),
            email: "secretariat@gmail.com".into(),
            role: role.into(),
            whitelist: true,
            notification: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trip_keeps_subject_and_role() {
        let cfg = config();
        let token = issue_token(&cfg, &user("secretariat")).unwrap();
        let claims = decode_token(&cfg.jwt_secret, &token).unwrap();
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.role.as_deref(), Some("secretariat"));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token(&config(), &user("admin")).unwrap();
        assert!(decode_token("another-secret", &token).is_err());
    }

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = session_cookie(&config(), "abc".into());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn home_depends_on_role() {
        assert_eq!(home_path(Lang::En, &user("admin")), "/en/accueilResponsable");
        assert_eq!(home_path(Lang::Fr, &user("candidat")), "/fr/accueil");
    }
}
