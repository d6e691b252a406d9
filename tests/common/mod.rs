#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request},
    response::Response,
    Router,
};
use dossier_portal::{
    config::Config,
    database::pool,
    dto::dossier_dto::DossierPayload,
    models::dossier::Dossier,
    models::user::{Role, User},
    routes,
    services::user_service::NewUser,
    AppState,
};
use tower::ServiceExt;

pub const PASSWORD: &str = "Password!123";

pub fn test_config() -> Config {
    let uploads = std::env::temp_dir().join(format!("dossier-portal-{}", uuid::Uuid::new_v4()));
    Config {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: "sqlite::memory:".into(),
        jwt_secret: "test_secret_key".into(),
        session_ttl_minutes: 30,
        uploads_dir: uploads.to_string_lossy().into_owned(),
        seed_demo_data: false,
        reset_on_shutdown: false,
        secure_cookies: false,
    }
}

pub async fn setup_app() -> (Router, AppState) {
    let db = pool::create_memory_pool().await.expect("pool");
    pool::run_migrations(&db).await.expect("migrations");
    let state = AppState::new(db, test_config());
    (routes::router(state.clone()), state)
}

pub async fn create_user(state: &AppState, username: &str, email: &str, role: Role) -> User {
    state
        .user_service
        .create(NewUser {
            username,
            name: "Doe",
            surname: "John",
            email,
            password: PASSWORD,
            role,
            whitelist: true,
            notification: "",
        })
        .await
        .expect("create user")
}

pub async fn create_dossier(state: &AppState, owner: &User, username: &str, mail: &str, phone: &str) -> Dossier {
    let payload = DossierPayload {
        username: username.into(),
        name: "Candidate".into(),
        mail: mail.into(),
        postereference: "Z50007300".into(),
        profref: "Mr.Schumacher".into(),
        phonenumber: phone.into(),
    };
    state
        .dossier_service
        .create(&owner.id, &payload, None)
        .await
        .expect("create dossier")
}

pub fn form(pairs: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        serializer.append_pair(k, v);
    }
    serializer.finish()
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut req = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(req.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, uri: &str, cookie: Option<&str>, body: String) -> Response {
    let mut req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    app.clone().oneshot(req.body(Body::from(body)).unwrap()).await.unwrap()
}

pub fn location(resp: &Response) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// `name=value` of the first `Set-Cookie` for `name`.
pub fn set_cookie(resp: &Response, name: &str) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{}=", name)))
        .map(str::to_string)
}

pub async fn login(app: &Router, email: &str, password: &str) -> Response {
    let body = form(&[("email", email), ("password", password)]);
    post_form(app, "/en/login", None, body).await
}

/// Logs in and returns the session cookie to send back.
pub async fn session(app: &Router, email: &str) -> String {
    let resp = login(app, email, PASSWORD).await;
    assert_eq!(resp.status(), 303, "login redirects");
    set_cookie(&resp, "access-token").expect("session cookie")
}

pub async fn body_text(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), 10 * 1024 * 1024).await.unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}
