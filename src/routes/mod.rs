pub mod account;
pub mod admin;
pub mod details;
pub mod dossiers;
pub mod export;
pub mod health;
pub mod notifications;
pub mod pages;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Extension, Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::i18n::Lang;
use crate::middleware::language;
use crate::utils::upload::IMAGES_ROUTE;
use crate::AppState;

/// Photos can be a few megabytes; everything else is a small form.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Full application: one copy of the page routes per locale, the health
/// probe and the uploaded photos.
pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(language::root_redirect))
        .route("/health", get(health::health));

    for lang in Lang::ALL {
        app = app.nest(&lang.path(""), locale_routes().layer(Extension(lang)));
    }

    tracing::info!(dir = %state.config.uploads_dir, "serving uploaded photos");

    app.nest_service(IMAGES_ROUTE, ServeDir::new(&state.config.uploads_dir))
        .fallback(pages::not_found)
        .layer(middleware::from_fn(language::remember_language))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

fn locale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::locale_index))
        .route("/error", get(pages::error))
        .route("/switch_lang", get(pages::switch_lang))
        .route("/accueil", get(pages::candidate_home))
        .route("/accueilResponsable", get(pages::staff_home))
        // accounts
        .route("/login", get(account::login_page).post(account::login))
        .route("/logout", post(account::logout))
        .route("/register", get(account::register_page).post(account::register))
        .route("/new_mdp", get(account::password_page).post(account::change_password))
        .route("/profile", get(account::profile_page).post(account::update_profile))
        // dossiers
        .route("/dossier", get(dossiers::list))
        .route("/dossier/search", post(dossiers::search))
        .route("/dossiercandidat", get(dossiers::candidate_list))
        .route("/dossier/searchcandidat", post(dossiers::candidate_search))
        .route("/dossier/new/add", get(dossiers::new_page).post(dossiers::create))
        .route("/dossier/:id", get(dossiers::detail))
        .route("/edit_dossier/:id", get(dossiers::edit_page))
        .route("/edit/:id", post(dossiers::update))
        .route("/dossier/supp/candidat", get(dossiers::deletion_list))
        .route("/dossier/delete/search", post(dossiers::deletion_search))
        .route("/dossier/candidat/delete/:id", post(dossiers::delete))
        .route("/dossier/export/excel", get(export::export_dossiers))
        // details
        .route("/details/add/:id", get(details::add_page).post(details::create))
        .route("/modify_detail/:id", get(details::edit_page).post(details::update))
        // notifications
        .route("/notif/dossier", get(notifications::list))
        .route("/notif/:id/notification", get(notifications::form))
        .route("/dossier/:id/notification", post(notifications::send))
        // administration
        .route("/administration", get(admin::administration))
        .route("/administration/whitelist", post(admin::update_whitelist))
        .route("/admin/users", get(admin::roles))
        .route("/admin/users/update", post(admin::update_role))
}
