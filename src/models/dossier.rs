use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::i18n::Lang;
use crate::models::details::DossierDetails;
use crate::models::user::User;

/// Shown for dossiers submitted without a photo.
pub const DEFAULT_IMAGE: &str = "/static/images/incognito.png";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Dossier {
    pub id: String,
    pub username: String,
    pub name: String,
    pub mail: String,
    pub postereference: String,
    pub profref: String,
    pub phonenumber: String,
    pub image: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Dossier {
    pub fn image_url(&self) -> &str {
        self.image.as_deref().unwrap_or(DEFAULT_IMAGE)
    }

    /// Staff see every dossier. Candidates see the ones they own or that
    /// were filed under their e-mail address.
    pub fn is_visible_to(&self, user: &User) -> bool {
        user.is_staff() || self.user_id == user.id || self.mail == user.email
    }
}

/// Where a dossier stands in the hiring workflow. Derived from its details
/// record, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DossierStatus {
    MissingDetails,
    Open,
    Rejected,
    Appointed,
}

impl DossierStatus {
    pub fn derive(details: Option<&DossierDetails>) -> Self {
        match details {
            None => DossierStatus::MissingDetails,
            Some(d) if d.candidature_non_retenue => DossierStatus::Rejected,
            Some(d) if d.date_entree_fonction.is_some() => DossierStatus::Appointed,
            Some(_) => DossierStatus::Open,
        }
    }

    pub fn label(self, lang: Lang) -> &'static str {
        match self {
            DossierStatus::MissingDetails => lang.t("status_missing_details"),
            DossierStatus::Open => lang.t("status_open"),
            DossierStatus::Rejected => lang.t("status_rejected"),
            DossierStatus::Appointed => lang.t("status_appointed"),
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            DossierStatus::MissingDetails => "status-missing",
            DossierStatus::Open => "status-open",
            DossierStatus::Rejected => "status-rejected",
            DossierStatus::Appointed => "status-appointed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DossierView {
    pub dossier: Dossier,
    pub details: Option<DossierDetails>,
}

impl DossierView {
    pub fn status(&self) -> DossierStatus {
        DossierStatus::derive(self.details.as_ref())
    }

    pub fn has_missing_details(&self) -> bool {
        self.details.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DossierPage {
    pub items: Vec<DossierView>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl DossierPage {
    pub fn new(items: Vec<DossierView>, total: i64, page: i64, per_page: i64) -> Self {
        let total_pages = if total == 0 { 1 } else { (total + per_page - 1) / per_page };
        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }

    pub fn has_missing_details(&self) -> bool {
        self.items.iter().any(DossierView::has_missing_details)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::details::DossierDetails;

    fn details() -> DossierDetails {
        DossierDetails {
            id: 1,
            dossier_id: "d1".into(),
            ..DossierDetails::default()
        }
    }

    #[test]
    fn status_precedence() {
        assert_eq!(DossierStatus::derive(None), DossierStatus::MissingDetails);

        let mut d = details();
        assert_eq!(DossierStatus::derive(Some(&d)), DossierStatus::Open);

        d.date_entree_fonction = chrono::NaiveDate::from_ymd_opt(2024, 9, 1);
        assert_eq!(DossierStatus::derive(Some(&d)), DossierStatus::Appointed);

        d.candidature_non_retenue = true;
        assert_eq!(DossierStatus::derive(Some(&d)), DossierStatus::Rejected);
    }

    #[test]
    fn page_counts_round_up() {
        let page = DossierPage::new(Vec::new(), 11, 1, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(!page.has_previous());
        assert!(!page.has_missing_details());

        let empty = DossierPage::new(Vec::new(), 0, 1, 10);
        assert_eq!(empty.total_pages, 1);
    }
}
