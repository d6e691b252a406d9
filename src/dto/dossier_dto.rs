use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::error::{Error, Result};
use crate::i18n::Notice;
use crate::models::details::DetailsInput;

/// Base information of a dossier, shared by submission and edit.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DossierPayload {
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub mail: String,
    #[validate(length(min = 1, max = 255))]
    pub postereference: String,
    #[validate(length(min = 1, max = 255))]
    pub profref: String,
    #[validate(length(min = 1, max = 50))]
    pub phonenumber: String,
}

impl DossierPayload {
    /// Assigns a text field received from a multipart body. Unknown names are
    /// ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        let value = value.trim().to_string();
        match name {
            "username" => self.username = value,
            "name" => self.name = value,
            "mail" => self.mail = value,
            "postereference" => self.postereference = value,
            "profref" => self.profref = value,
            "phonenumber" => self.phonenumber = value,
            _ => {}
        }
    }
}

/// Raw details form. Dates arrive as `YYYY-MM-DD` strings (empty when not
/// set) and checkboxes are only present when ticked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailsForm {
    #[serde(default)]
    pub mail: Option<String>,
    #[serde(default)]
    pub phonenumber: Option<String>,
    #[serde(default)]
    pub date_cloture: Option<String>,
    #[serde(default)]
    pub date_reception: Option<String>,
    #[serde(default)]
    pub dossier_complet: Option<String>,
    #[serde(default)]
    pub date_transmission_commission: Option<String>,
    #[serde(default)]
    pub date_reunion_commission: Option<String>,
    #[serde(default)]
    pub candidature_non_retenue: Option<String>,
    #[serde(default)]
    pub confirmation_information: Option<String>,
    #[serde(default)]
    pub date_entendu: Option<String>,
    #[serde(default)]
    pub position_classement: Option<String>,
    #[serde(default)]
    pub date_soumission_autorites: Option<String>,
    #[serde(default)]
    pub date_transmission_autorites: Option<String>,
    #[serde(default)]
    pub date_entree_fonction: Option<String>,
    #[serde(default)]
    pub date_suppression_dossier: Option<String>,
}

impl DetailsForm {
    pub fn to_input(&self) -> Result<DetailsInput> {
        Ok(DetailsInput {
            date_cloture: parse_date(&self.date_cloture)?,
            date_reception: parse_date(&self.date_reception)?,
            dossier_complet: parse_checkbox(&self.dossier_complet),
            date_transmission_commission: parse_date(&self.date_transmission_commission)?,
            date_reunion_commission: parse_date(&self.date_reunion_commission)?,
            candidature_non_retenue: parse_checkbox(&self.candidature_non_retenue),
            confirmation_information: parse_checkbox(&self.confirmation_information),
            date_entendu: parse_date(&self.date_entendu)?,
            position_classement: parse_ranking(&self.position_classement)?,
            date_soumission_autorites: parse_date(&self.date_soumission_autorites)?,
            date_transmission_autorites: parse_date(&self.date_transmission_autorites)?,
            date_entree_fonction: parse_date(&self.date_entree_fonction)?,
            date_suppression_dossier: parse_date(&self.date_suppression_dossier)?,
        })
    }

    /// Contact fields edited alongside the details, when provided.
    pub fn contact(&self) -> Option<(String, String)> {
        let mail = non_empty(&self.mail)?;
        let phone = non_empty(&self.phonenumber)?;
        Some((mail.to_string(), phone.to_string()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageQuery {
    pub const MAX_PER_PAGE: i64 = 100;

    /// Highest page number accepted; keeps the row offset within `i64`.
    pub const MAX_PAGE: i64 = i64::MAX / Self::MAX_PER_PAGE;

    /// `(page, per_page)` clamped to sane bounds.
    pub fn resolve(&self, default_per_page: i64) -> (i64, i64) {
        let page = self.page.unwrap_or(1).clamp(1, Self::MAX_PAGE);
        let per_page = self
            .per_page
            .unwrap_or(default_per_page)
            .clamp(1, Self::MAX_PER_PAGE);
        (page, per_page)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationForm {
    pub message: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(value: &Option<String>) -> Result<Option<NaiveDate>> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| Error::BadRequest(Notice::InvalidDate)),
    }
}

fn parse_checkbox(value: &Option<String>) -> bool {
    matches!(
        non_empty(value).map(str::to_ascii_lowercase).as_deref(),
        Some("on" | "true" | "1")
    )
}

fn parse_ranking(value: &Option<String>) -> Result<Option<i64>> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .ok()
            .filter(|n| *n >= 0)
            .map(Some)
            .ok_or(Error::BadRequest(Notice::InvalidRanking)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn huge_page_numbers_are_capped() {
        let query = PageQuery { page: Some(i64::MAX), per_page: Some(100) };
        let (page, per_page) = query.resolve(10);
        assert_eq!(page, PageQuery::MAX_PAGE);
        assert!((page - 1).checked_mul(per_page).is_some());

        let query = PageQuery { page: Some(-4), per_page: Some(0) };
        assert_eq!(query.resolve(10), (1, 1));
    }

    #[test]
    fn blank_dates_become_none() {
        let form = DetailsForm {
            date_cloture: Some(String::new()),
            date_reception: Some("2025-01-01".into()),
            dossier_complet: Some("on".into()),
            position_classement: Some(" 2 ".into()),
            ..DetailsForm::default()
        };
        let input = form.to_input().unwrap();
        assert_eq!(input.date_cloture, None);
        assert_eq!(input.date_reception, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert!(input.dossier_complet);
        assert!(!input.candidature_non_retenue);
        assert_eq!(input.position_classement, Some(2));
    }

    #[test]
    fn malformed_values_are_rejected() {
        let form = DetailsForm {
            date_entendu: Some("01/04/2025".into()),
            ..DetailsForm::default()
        };
        assert!(matches!(
            form.to_input(),
            Err(Error::BadRequest(Notice::InvalidDate))
        ));

        let form = DetailsForm {
            position_classement: Some("first".into()),
            ..DetailsForm::default()
        };
        assert!(matches!(
            form.to_input(),
            Err(Error::BadRequest(Notice::InvalidRanking))
        ));
    }

    #[test]
    fn page_query_is_clamped() {
        let q = PageQuery { page: Some(0), per_page: Some(1000) };
        assert_eq!(q.resolve(10), (1, 100));
        assert_eq!(PageQuery::default().resolve(5), (1, 5));
    }

    #[test]
    fn multipart_fields_are_trimmed() {
        let mut payload = DossierPayload::default();
        payload.set_field("mail", " a@b.be ".into());
        payload.set_field("unknown", "x".into());
        assert_eq!(payload.mail, "a@b.be");
    }
}
