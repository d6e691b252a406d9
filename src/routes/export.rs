use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension,
};

use crate::error::{OrPage, PageResult};
use crate::i18n::Lang;
use crate::middleware::session::StaffUser;
use crate::services::export_service::{ExportService, EXPORT_FILENAME, XLSX_CONTENT_TYPE};
use crate::AppState;

/// Export every dossier as XLSX
pub async fn export_dossiers(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(user): StaffUser,
) -> PageResult {
    let back = lang.path("/dossier");
    let dossiers = state.dossier_service.list_all().await.or_page(lang, &back)?;
    let buffer = ExportService::dossiers_xlsx(&dossiers, lang).or_page(lang, &back)?;

    tracing::info!(rows = dossiers.len(), by = %user.id, "dossiers exported");
    let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILENAME);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    )
        .into_response())
}
