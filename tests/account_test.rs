mod common;

use axum::http::{header, StatusCode};
use common::*;
use dossier_portal::models::user::Role;

#[tokio::test]
async fn register_then_login_lands_on_candidate_home() {
    let (app, state) = setup_app().await;

    let body = form(&[
        ("username", "newcomer"),
        ("name", "Martin"),
        ("surname", "Paul"),
        ("email", "paul@example.com"),
        ("password", "Str0ng!Pass"),
        ("password_confirm", "Str0ng!Pass"),
    ]);
    let resp = post_form(&app, "/en/register", None, body).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("User successfully added: newcomer"));

    let user = state
        .user_service
        .find_by_email("paul@example.com")
        .await
        .unwrap()
        .expect("registered");
    assert_eq!(user.role(), Role::Candidat);
    assert!(user.whitelist);

    let resp = login(&app, "paul@example.com", "Str0ng!Pass").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/en/accueil");
    let cookie = set_cookie(&resp, "access-token").expect("session cookie");

    let resp = get(&app, "/en/accueil", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("No notifications."));
}

#[tokio::test]
async fn duplicate_email_registration_changes_nothing() {
    let (app, state) = setup_app().await;
    create_user(&state, "User2", "user@gmail.com", Role::Candidat).await;
    let before = state.user_service.count().await.unwrap();

    let body = form(&[
        ("username", "someone-else"),
        ("name", "Doe"),
        ("surname", "Jane"),
        ("email", "user@gmail.com"),
        ("password", "Str0ng!Pass"),
        ("password_confirm", "Str0ng!Pass"),
    ]);
    let resp = post_form(&app, "/fr/register", None, body).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let target = location(&resp);
    assert!(target.starts_with("/fr/error?description=Erreur+409"), "{}", target);
    assert!(target.contains("url=%2Ffr%2Fregister"));

    assert_eq!(state.user_service.count().await.unwrap(), before);
    assert!(state.user_service.find_by_username("someone-else").await.unwrap().is_none());
}

#[tokio::test]
async fn wrong_password_and_blocked_accounts_cannot_log_in() {
    let (app, state) = setup_app().await;
    let user = create_user(&state, "User5", "user2@gmail.com", Role::Candidat).await;

    let resp = login(&app, "user2@gmail.com", "Wrong!pass1").await;
    assert!(location(&resp).contains("401"));
    assert!(set_cookie(&resp, "access-token").is_none());

    state.user_service.set_whitelist(&user.id, false).await.unwrap();
    let resp = login(&app, "user2@gmail.com", PASSWORD).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(location(&resp).contains("403"));
    assert!(set_cookie(&resp, "access-token").is_none());
}

#[tokio::test]
async fn blocking_ends_an_existing_session() {
    let (app, state) = setup_app().await;
    let user = create_user(&state, "User6", "user1@gmail.com", Role::Candidat).await;
    let cookie = session(&app, "user1@gmail.com").await;

    state.user_service.set_whitelist(&user.id, false).await.unwrap();
    let resp = get(&app, "/en/dossiercandidat", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(location(&resp).starts_with("/en/error"));
}

#[tokio::test]
async fn weak_new_password_keeps_the_old_hash() {
    let (app, state) = setup_app().await;
    let user = create_user(&state, "User7", "user3@gmail.com", Role::Candidat).await;
    let cookie = session(&app, "user3@gmail.com").await;

    let body = form(&[
        ("old_pwd", PASSWORD),
        ("new_pwd", "weakpass"),
        ("new_pwd_confirm", "weakpass"),
    ]);
    let resp = post_form(&app, "/en/new_mdp", Some(&cookie), body).await;
    assert!(location(&resp).contains("422"));

    let after = state.user_service.get(&user.id).await.unwrap();
    assert_eq!(after.password_hash, user.password_hash);

    let body = form(&[
        ("old_pwd", PASSWORD),
        ("new_pwd", "Better!Pass9"),
        ("new_pwd_confirm", "Better!Pass9"),
    ]);
    let resp = post_form(&app, "/en/new_mdp", Some(&cookie), body).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Password successfully updated!"));
    assert_eq!(login(&app, "user3@gmail.com", "Better!Pass9").await.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn anonymous_password_change_needs_a_known_email() {
    let (app, _state) = setup_app().await;
    let body = form(&[
        ("email", "nobody@example.com"),
        ("old_pwd", PASSWORD),
        ("new_pwd", "Better!Pass9"),
        ("new_pwd_confirm", "Better!Pass9"),
    ]);
    let resp = post_form(&app, "/en/new_mdp", None, body).await;
    assert!(location(&resp).contains("404"));
}

#[tokio::test]
async fn anonymous_visitors_are_sent_to_login() {
    let (app, _state) = setup_app().await;

    let resp = get(&app, "/fr/dossier", None).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/fr/login");

    let resp = get(&app, "/en/profile", None).await;
    assert_eq!(location(&resp), "/en/login");
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let (app, state) = setup_app().await;
    create_user(&state, "User2", "user@gmail.com", Role::Candidat).await;
    let cookie = session(&app, "user@gmail.com").await;

    let resp = post_form(&app, "/en/logout", Some(&cookie), String::new()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(set_cookie(&resp, "access-token").as_deref(), Some("access-token="));
    assert!(body_text(resp).await.contains("You have been logged out!"));
}

#[tokio::test]
async fn root_uses_language_query_then_cookie() {
    let (app, _state) = setup_app().await;

    let resp = get(&app, "/", None).await;
    assert_eq!(location(&resp), "/fr/login");

    let resp = get(&app, "/?lang=en", None).await;
    assert_eq!(location(&resp), "/en/login");

    let resp = get(&app, "/", Some("language=en")).await;
    assert_eq!(location(&resp), "/en/login");
}

#[tokio::test]
async fn localized_pages_remember_the_language() {
    let (app, _state) = setup_app().await;

    let resp = get(&app, "/en/login", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(set_cookie(&resp, "language").as_deref(), Some("language=en"));

    let resp = get(&app, "/en/login", Some("language=en")).await;
    assert!(set_cookie(&resp, "language").is_none());
}

#[tokio::test]
async fn switch_lang_follows_the_referer() {
    let (app, _state) = setup_app().await;
    let req = axum::http::Request::builder()
        .uri("/fr/switch_lang")
        .header(header::REFERER, "http://localhost:8000/fr/register")
        .body(axum::body::Body::empty())
        .unwrap();
    let resp = tower::ServiceExt::oneshot(app.clone(), req).await.unwrap();
    assert_eq!(location(&resp), "/en/register");

    let resp = get(&app, "/en/switch_lang", None).await;
    assert_eq!(location(&resp), "/fr/login");
}

#[tokio::test]
async fn unknown_pages_go_to_the_error_page() {
    let (app, _state) = setup_app().await;
    let resp = get(&app, "/en/does-not-exist", None).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(location(&resp).starts_with("/en/error?description=Error+404"));

    let resp = get(&app, &location(&resp), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Page not found"));
}

#[tokio::test]
async fn health_reports_database() {
    let (app, _state) = setup_app().await;
    let resp = get(&app, "/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn profile_update_saves_names() {
    let (app, state) = setup_app().await;
    let user = create_user(&state, "User2", "user@gmail.com", Role::Candidat).await;
    let cookie = session(&app, "user@gmail.com").await;

    let body = form(&[("username", "User2b"), ("name", "Martin"), ("surname", "Anne")]);
    let resp = post_form(&app, "/en/profile", Some(&cookie), body).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Profile updated."));

    let stored = state.user_service.get(&user.id).await.unwrap();
    assert_eq!(stored.username, "User2b");
    assert_eq!(stored.name, "Martin");
    assert_eq!(stored.surname, "Anne");
}

#[tokio::test]
async fn profile_update_rejects_a_taken_username() {
    let (app, state) = setup_app().await;
    let user = create_user(&state, "User2", "user@gmail.com", Role::Candidat).await;
    create_user(&state, "User5", "user2@gmail.com", Role::Candidat).await;
    let cookie = session(&app, "user@gmail.com").await;

    let body = form(&[("username", "User5"), ("name", "Martin"), ("surname", "Anne")]);
    let resp = post_form(&app, "/en/profile", Some(&cookie), body).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let target = location(&resp);
    assert!(target.starts_with("/en/error?description=Error+409"), "{}", target);
    assert!(target.contains("url=%2Fen%2Fprofile"));

    let stored = state.user_service.get(&user.id).await.unwrap();
    assert_eq!(stored.username, "User2");
    assert_eq!(stored.name, "Doe");
}
