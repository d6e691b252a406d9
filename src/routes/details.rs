use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
    Extension, Form,
};

use crate::dto::dossier_dto::DetailsForm;
use crate::error::{OrPage, PageResult};
use crate::i18n::Lang;
use crate::middleware::session::StaffUser;
use crate::views;
use crate::AppState;

fn dossier_path(lang: Lang, id: &str) -> String {
    lang.path(&format!("/dossier/{}", id))
}

/// `GET /details/add/:id`. Dossiers that already have details go to the
/// edit form instead.
pub async fn add_page(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(user): StaffUser,
    Path(id): Path<String>,
) -> PageResult {
    let back = lang.path("/dossier");
    let dossier = state.dossier_service.get(&id).await.or_page(lang, &back)?;
    if state.details_service.find(&id).await.or_page(lang, &back)?.is_some() {
        return Ok(Redirect::to(&lang.path(&format!("/modify_detail/{}", id))).into_response());
    }
    Ok(views::details::details_form(lang, &user, &dossier, None).into_response())
}

pub async fn create(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(user): StaffUser,
    Path(id): Path<String>,
    Form(form): Form<DetailsForm>,
) -> PageResult {
    let back = lang.path(&format!("/details/add/{}", id));
    let input = form.to_input().or_page(lang, &back)?;
    state
        .details_service
        .create(&id, &input)
        .await
        .or_page(lang, &back)?;
    tracing::info!(dossier_id = %id, by = %user.id, "dossier details added");
    Ok(Redirect::to(&dossier_path(lang, &id)).into_response())
}

/// `GET /modify_detail/:id`
pub async fn edit_page(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(user): StaffUser,
    Path(id): Path<String>,
) -> PageResult {
    let back = lang.path("/dossier");
    let dossier = state.dossier_service.get(&id).await.or_page(lang, &back)?;
    let details = state.details_service.get(&id).await.or_page(lang, &back)?;
    Ok(views::details::details_form(lang, &user, &dossier, Some(&details)).into_response())
}

pub async fn update(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(user): StaffUser,
    Path(id): Path<String>,
    Form(form): Form<DetailsForm>,
) -> PageResult {
    let back = lang.path(&format!("/modify_detail/{}", id));
    let input = form.to_input().or_page(lang, &back)?;
    state
        .details_service
        .update(&id, &input, form.contact())
        .await
        .or_page(lang, &back)?;
    tracing::info!(dossier_id = %id, by = %user.id, "dossier details updated");
    Ok(Redirect::to(&dossier_path(lang, &id)).into_response())
}
