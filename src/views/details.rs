use axum::response::Html;

use super::{checked, e, layout};
use crate::i18n::Lang;
use crate::models::details::{DossierDetails, Milestone};
use crate::models::dossier::Dossier;
use crate::models::user::User;

/// Add form when `details` is `None`, edit form otherwise. The edit form also
/// carries the dossier's e-mail and phone.
pub fn details_form(lang: Lang, user: &User, dossier: &Dossier, details: Option<&DossierDetails>) -> Html<String> {
    let (title_key, action, here) = match details {
        None => (
            "details_add_title",
            format!("{}/{}", lang.path("/details/add"), e(&dossier.id)),
            format!("/details/add/{}", dossier.id),
        ),
        Some(_) => (
            "details_edit_title",
            format!("{}/{}", lang.path("/modify_detail"), e(&dossier.id)),
            format!("/modify_detail/{}", dossier.id),
        ),
    };

    let contact = match details {
        None => String::new(),
        Some(_) => format!(
            r#"<label for="mail">{mail_l}</label>
<input type="email" id="mail" name="mail" value="{mail}" required>
<label for="phonenumber">{phone_l}</label>
<input type="text" id="phonenumber" name="phonenumber" value="{phone}" required>"#,
            mail_l = lang.t("col_email"),
            mail = e(&dossier.mail),
            phone_l = lang.t("col_phone"),
            phone = e(&dossier.phonenumber),
        ),
    };

    let dates: Vec<String> = Milestone::ALL
        .into_iter()
        .map(|m| {
            let value = details
                .and_then(|d| d.milestone(m))
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            format!(
                r#"<label for="{field}">{label}</label>
<input type="date" id="{field}" name="{field}" value="{value}">"#,
                field = m.field(),
                label = m.label(lang),
                value = value,
            )
        })
        .collect();

    let flag = |name: &str, key: &'static str, on: bool| {
        format!(
            r#"<label><input type="checkbox" name="{}" value="on"{}> {}</label>"#,
            name,
            checked(on),
            lang.t(key)
        )
    };
    let ranking = details
        .and_then(|d| d.position_classement)
        .map(|p| p.to_string())
        .unwrap_or_default();

    let body = format!(
        r#"<p>{username} {name} ({post})</p>
<form method="post" action="{action}">
{contact}
{dates}
{complete}
{rejected}
{confirmed}
<label for="position_classement">{ranking_l}</label>
<input type="number" min="0" id="position_classement" name="position_classement" value="{ranking}">
<button type="submit">{save}</button>
</form>"#,
        username = e(&dossier.username),
        name = e(&dossier.name),
        post = e(&dossier.postereference),
        action = action,
        contact = contact,
        dates = dates.join("\n"),
        complete = flag("dossier_complet", "complete", details.is_some_and(|d| d.dossier_complet)),
        rejected = flag(
            "candidature_non_retenue",
            "rejected",
            details.is_some_and(|d| d.candidature_non_retenue)
        ),
        confirmed = flag(
            "confirmation_information",
            "confirmed",
            details.is_some_and(|d| d.confirmation_information)
        ),
        ranking_l = lang.t("ranking"),
        ranking = ranking,
        save = lang.t("save"),
    );
    layout(lang, Some(user), &here, lang.t(title_key), &body)
}
