use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use chrono::Utc;

use crate::dto::dossier_dto::{DossierPayload, PageQuery, SearchForm};
use crate::error::{Error, OrPage, PageError, PageResult};
use crate::i18n::{Lang, Notice};
use crate::middleware::session::{home_path, CurrentUser, StaffUser};
use crate::utils::{upload, validation};
use crate::views;
use crate::views::dossiers::{Listing, RowActions};
use crate::AppState;

const PER_PAGE: i64 = 10;
const CANDIDATE_PER_PAGE: i64 = 5;

fn staff_listing(keyword: Option<&str>) -> Listing<'_> {
    Listing {
        here: "/dossier",
        title_key: "dossiers_title",
        search_path: Some("/dossier/search"),
        actions: RowActions::Staff,
        keyword,
        intro: None,
    }
}

fn candidate_listing(keyword: Option<&str>) -> Listing<'_> {
    Listing {
        here: "/dossiercandidat",
        title_key: "my_dossiers_title",
        search_path: Some("/dossier/searchcandidat"),
        actions: RowActions::Candidate,
        keyword,
        intro: None,
    }
}

fn deletion_listing(keyword: Option<&str>) -> Listing<'_> {
    Listing {
        here: "/dossier/supp/candidat",
        title_key: "delete_title",
        search_path: Some("/dossier/delete/search"),
        actions: RowActions::Delete,
        keyword,
        intro: None,
    }
}

/// `GET /dossier`
pub async fn list(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(user): StaffUser,
    Query(query): Query<PageQuery>,
) -> PageResult {
    let (page, per_page) = query.resolve(PER_PAGE);
    let dossiers = state
        .dossier_service
        .list(page, per_page)
        .await
        .or_page(lang, &home_path(lang, &user))?;
    Ok(views::dossiers::listing_page(lang, &user, &staff_listing(None), &dossiers).into_response())
}

/// `POST /dossier/search`
pub async fn search(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(user): StaffUser,
    Query(query): Query<PageQuery>,
    Form(form): Form<SearchForm>,
) -> PageResult {
    let (page, per_page) = query.resolve(PER_PAGE);
    let dossiers = state
        .dossier_service
        .search(&form.keyword, page, per_page)
        .await
        .or_page(lang, &lang.path("/dossier"))?;
    let listing = staff_listing(Some(&form.keyword));
    Ok(views::dossiers::listing_page(lang, &user, &listing, &dossiers).into_response())
}

/// `GET /dossiercandidat`
pub async fn candidate_list(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PageQuery>,
) -> PageResult {
    let (page, per_page) = query.resolve(CANDIDATE_PER_PAGE);
    let dossiers = state
        .dossier_service
        .list_for_candidate(&user, page, per_page)
        .await
        .or_page(lang, &home_path(lang, &user))?;
    Ok(views::dossiers::listing_page(lang, &user, &candidate_listing(None), &dossiers).into_response())
}

/// `POST /dossier/searchcandidat`
pub async fn candidate_search(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PageQuery>,
    Form(form): Form<SearchForm>,
) -> PageResult {
    let (page, per_page) = query.resolve(CANDIDATE_PER_PAGE);
    let dossiers = state
        .dossier_service
        .search_for_candidate(&user, &form.keyword, page, per_page)
        .await
        .or_page(lang, &lang.path("/dossiercandidat"))?;
    let listing = candidate_listing(Some(&form.keyword));
    Ok(views::dossiers::listing_page(lang, &user, &listing, &dossiers).into_response())
}

/// `GET /dossier/:id`. Staff are sent to the details form while the dossier
/// has none; candidates only reach dossiers they own.
pub async fn detail(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> PageResult {
    let back = home_path(lang, &user);
    let view = state.dossier_service.get_view(&id).await.or_page(lang, &back)?;

    if !view.dossier.is_visible_to(&user) {
        tracing::warn!(user_id = %user.id, dossier_id = %id, "dossier access denied");
        return Err(PageError::new(lang, back, Error::Forbidden(Notice::AccessForbidden)));
    }
    if user.is_staff() && view.details.is_none() {
        return Ok(Redirect::to(&lang.path(&format!("/details/add/{}", id))).into_response());
    }

    let today = Utc::now().date_naive();
    Ok(views::dossiers::dossier_detail(lang, &user, &view, today).into_response())
}

/// `GET /dossier/new/add`
pub async fn new_page(Extension(lang): Extension<Lang>, CurrentUser(user): CurrentUser) -> Response {
    views::dossiers::new_dossier_page(lang, &user).into_response()
}

/// `POST /dossier/new/add`. Multipart form with an optional `image` file.
pub async fn create(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> PageResult {
    let back = lang.path("/dossier/new/add");
    let mut payload = DossierPayload::default();
    let mut photo = None;

    while let Some(field) = multipart.next_field().await.or_page(lang, &back)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await.or_page(lang, &back)?;
            if !filename.is_empty() && !data.is_empty() {
                photo = Some((filename, data));
            }
        } else {
            let value = field.text().await.or_page(lang, &back)?;
            payload.set_field(&name, value);
        }
    }

    // Reject bad input before anything lands on disk.
    validation::validate(&payload).or_page(lang, &back)?;
    let image = match photo {
        Some((filename, data)) => Some(
            upload::save_image(&state.config.uploads_dir, &filename, &data)
                .await
                .or_page(lang, &back)?,
        ),
        None => None,
    };

    let owner = state
        .dossier_service
        .owner_for(&user, &payload.mail)
        .await
        .or_page(lang, &back)?;
    let dossier = state
        .dossier_service
        .create(&owner, &payload, image)
        .await
        .or_page(lang, &back)?;
    tracing::info!(dossier_id = %dossier.id, owner = %owner, "dossier submitted");

    let next = if user.is_staff() {
        lang.path(&format!("/details/add/{}", dossier.id))
    } else {
        lang.path("/dossiercandidat")
    };
    Ok(Redirect::to(&next).into_response())
}

/// `GET /edit_dossier/:id`
pub async fn edit_page(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(user): StaffUser,
    Path(id): Path<String>,
) -> PageResult {
    let dossier = state
        .dossier_service
        .get(&id)
        .await
        .or_page(lang, &lang.path("/dossier"))?;
    Ok(views::dossiers::edit_dossier_page(lang, &user, &dossier).into_response())
}

/// `POST /edit/:id`
pub async fn update(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(_user): StaffUser,
    Path(id): Path<String>,
    Form(payload): Form<DossierPayload>,
) -> PageResult {
    let dossier = state
        .dossier_service
        .update(&id, &payload)
        .await
        .or_page(lang, &lang.path(&format!("/edit_dossier/{}", id)))?;
    Ok(Redirect::to(&lang.path(&format!("/dossier/{}", dossier.id))).into_response())
}

/// `GET /dossier/supp/candidat`
pub async fn deletion_list(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(user): StaffUser,
    Query(query): Query<PageQuery>,
) -> PageResult {
    let (page, per_page) = query.resolve(PER_PAGE);
    let dossiers = state
        .dossier_service
        .list(page, per_page)
        .await
        .or_page(lang, &home_path(lang, &user))?;
    Ok(views::dossiers::listing_page(lang, &user, &deletion_listing(None), &dossiers).into_response())
}

/// `POST /dossier/delete/search`
pub async fn deletion_search(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(user): StaffUser,
    Query(query): Query<PageQuery>,
    Form(form): Form<SearchForm>,
) -> PageResult {
    let (page, per_page) = query.resolve(PER_PAGE);
    let dossiers = state
        .dossier_service
        .search(&form.keyword, page, per_page)
        .await
        .or_page(lang, &lang.path("/dossier/supp/candidat"))?;
    let listing = deletion_listing(Some(&form.keyword));
    Ok(views::dossiers::listing_page(lang, &user, &listing, &dossiers).into_response())
}

/// `POST /dossier/candidat/delete/:id`. Details go with the dossier.
pub async fn delete(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(user): StaffUser,
    Path(id): Path<String>,
) -> PageResult {
    let back = lang.path("/dossier/supp/candidat");
    state.dossier_service.delete(&id).await.or_page(lang, &back)?;
    tracing::info!(dossier_id = %id, by = %user.id, "dossier deleted");
    Ok(Redirect::to(&back).into_response())
}
