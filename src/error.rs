use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::i18n::{Lang, Notice};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(Notice),

    #[error("Unauthorized: {0}")]
    Unauthorized(Notice),

    #[error("Forbidden: {0}")]
    Forbidden(Notice),

    #[error("Not found: {0}")]
    NotFound(Notice),

    #[error("Conflict: {0}")]
    Conflict(Notice),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Excel export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) | Error::Multipart(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) | Error::Token(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message in the given locale. Server-side causes are
    /// never echoed back.
    pub fn message(&self, lang: Lang) -> String {
        match self {
            Error::BadRequest(n)
            | Error::Unauthorized(n)
            | Error::Forbidden(n)
            | Error::NotFound(n)
            | Error::Conflict(n) => n.text(lang).to_string(),
            Error::Token(_) => Notice::LoginRequired.text(lang).to_string(),
            Error::Multipart(_) => Notice::MissingField.text(lang).to_string(),
            Error::Validation(errs) => crate::i18n::validation_text(lang, errs),
            _ => Notice::Unexpected.text(lang).to_string(),
        }
    }

    /// "Erreur 409 : ..." / "Error 409: ..." as shown on the error page.
    pub fn describe(&self, lang: Lang) -> String {
        let code = self.status().as_u16();
        match lang {
            Lang::Fr => format!("Erreur {} : {}", code, self.message(lang)),
            Lang::En => format!("Error {}: {}", code, self.message(lang)),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound(Notice::ResourceNotFound),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Error::Conflict(Notice::AlreadyExists)
            }
            other => Error::Database(other),
        }
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        Error::PasswordHash(err.to_string())
    }
}

/// An error raised while serving a page. Rendered as a redirect to the
/// localized error page, carrying a link back to `back`.
#[derive(Debug)]
pub struct PageError {
    lang: Lang,
    back: String,
    error: Error,
}

pub type PageResult = std::result::Result<Response, PageError>;

impl PageError {
    pub fn new(lang: Lang, back: impl Into<String>, error: impl Into<Error>) -> Self {
        Self {
            lang,
            back: back.into(),
            error: error.into(),
        }
    }

    pub fn location(&self) -> String {
        error_page_url(self.lang, &self.error.describe(self.lang), &self.back)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        if status.is_server_error() {
            tracing::error!(error = %self.error, back = %self.back, "request failed");
        } else {
            tracing::warn!(error = %self.error, status = status.as_u16(), "request rejected");
        }
        Redirect::to(&self.location()).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let lang = Lang::default();
        PageError::new(lang, lang.path(""), self).into_response()
    }
}

pub trait OrPage<T> {
    fn or_page(self, lang: Lang, back: &str) -> std::result::Result<T, PageError>;
}

impl<T, E: Into<Error>> OrPage<T> for std::result::Result<T, E> {
    fn or_page(self, lang: Lang, back: &str) -> std::result::Result<T, PageError> {
        self.map_err(|e| PageError::new(lang, back, e))
    }
}

pub fn error_page_url(lang: Lang, description: &str, back: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("description", description)
        .append_pair("url", back)
        .finish();
    format!("{}?{}", lang.path("/error"), query)
}
