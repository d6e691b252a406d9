use axum::response::Html;
use chrono::NaiveDate;

use super::{e, layout, message_box, pager, yes_no};
use crate::i18n::Lang;
use crate::models::dossier::{Dossier, DossierPage, DossierView};
use crate::models::user::User;

/// What each row of a dossier table links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowActions {
    Staff,
    Candidate,
    Delete,
    Notify,
}

/// A paginated dossier listing with its search box.
pub struct Listing<'a> {
    pub here: &'a str,
    pub title_key: &'static str,
    /// Target of the search box, if the listing has one.
    pub search_path: Option<&'a str>,
    pub actions: RowActions,
    pub keyword: Option<&'a str>,
    /// Rendered above the search box.
    pub intro: Option<String>,
}

pub fn listing_page(lang: Lang, user: &User, listing: &Listing<'_>, page: &DossierPage) -> Html<String> {
    let search_action = listing.search_path.map(|p| lang.path(p));
    let search_form = match &search_action {
        Some(action) => format!(
            r#"<form method="post" action="{action}">
<input type="text" name="keyword" value="{keyword}" placeholder="{placeholder}">
<button type="submit">{search}</button>
</form>"#,
            action = action,
            keyword = e(listing.keyword.unwrap_or_default()),
            placeholder = lang.t("search_placeholder"),
            search = lang.t("search"),
        ),
        None => String::new(),
    };
    let warning = if page.has_missing_details() && listing.actions != RowActions::Candidate {
        format!(r#"<p class="warning">{}</p>"#, lang.t("missing_details_warning"))
    } else {
        String::new()
    };
    let results = match listing.keyword.filter(|k| !k.trim().is_empty()) {
        Some(k) => format!("<p>{} « {} »</p>", lang.t("results_for"), e(k)),
        None => String::new(),
    };
    let pager_action = match (listing.keyword, search_action) {
        (Some(_), Some(action)) => action,
        _ => lang.path(listing.here),
    };

    let body = format!(
        r#"{intro}
{search_form}
{results}
{warning}
{table}
{pager}"#,
        intro = listing.intro.as_deref().unwrap_or_default(),
        search_form = search_form,
        results = results,
        warning = warning,
        table = dossier_table(lang, page, listing.actions),
        pager = pager(lang, page, &pager_action, listing.keyword),
    );
    layout(lang, Some(user), listing.here, lang.t(listing.title_key), &body)
}

pub fn dossier_table(lang: Lang, page: &DossierPage, actions: RowActions) -> String {
    if page.items.is_empty() {
        return format!("<p>{}</p>", lang.t("no_dossiers"));
    }

    let rows: Vec<String> = page
        .items
        .iter()
        .map(|view| {
            let d = &view.dossier;
            let status = view.status();
            format!(
                r#"<tr>
<td>{username} {name}</td>
<td>{mail}</td>
<td>{phone}</td>
<td>{post}</td>
<td>{prof}</td>
<td class="{class}">{status}</td>
<td>{actions}</td>
</tr>"#,
                username = e(&d.username),
                name = e(&d.name),
                mail = e(&d.mail),
                phone = e(&d.phonenumber),
                post = e(&d.postereference),
                prof = e(&d.profref),
                class = status.css_class(),
                status = status.label(lang),
                actions = row_actions(lang, d, actions),
            )
        })
        .collect();

    format!(
        r#"<table>
<thead><tr><th>{name}</th><th>{email}</th><th>{phone}</th><th>{post}</th><th>{prof}</th><th>{status}</th><th>{actions}</th></tr></thead>
<tbody>
{rows}
</tbody>
</table>"#,
        name = lang.t("col_name"),
        email = lang.t("col_email"),
        phone = lang.t("col_phone"),
        post = lang.t("col_post_ref"),
        prof = lang.t("col_prof_ref"),
        status = lang.t("col_status"),
        actions = lang.t("col_actions"),
        rows = rows.join("\n"),
    )
}

fn row_actions(lang: Lang, d: &Dossier, actions: RowActions) -> String {
    let id = e(&d.id);
    let view = format!(
        r#"<a href="{}/{}">{}</a>"#,
        lang.path("/dossier"),
        id,
        lang.t("view")
    );
    match actions {
        RowActions::Candidate => view,
        RowActions::Staff => format!(
            r#"{} | <a href="{}/{}">{}</a>"#,
            view,
            lang.path("/edit_dossier"),
            id,
            lang.t("edit")
        ),
        RowActions::Notify => format!(
            r#"<a href="{}/{}/notification">{}</a>"#,
            lang.path("/notif"),
            id,
            lang.t("notify")
        ),
        RowActions::Delete => format!(
            r#"<form class="inline" method="post" action="{}/{}" onsubmit="return confirm('{}');"><button class="danger" type="submit">{}</button></form>"#,
            lang.path("/dossier/candidat/delete"),
            id,
            e(lang.t("confirm_delete")),
            lang.t("delete")
        ),
    }
}

pub fn staff_home(lang: Lang, user: &User, page: &DossierPage) -> Html<String> {
    let listing = Listing {
        here: "/accueilResponsable",
        title_key: "nav_home",
        search_path: Some("/dossier/search"),
        actions: RowActions::Staff,
        keyword: None,
        intro: Some(format!("<p>{} {}</p>", lang.t("welcome"), e(&user.display_name()))),
    };
    listing_page(lang, user, &listing, page)
}

pub fn candidate_home(lang: Lang, user: &User, page: &DossierPage, notification: Option<&str>) -> Html<String> {
    let notification = match notification {
        Some(n) => format!(r#"<p class="message">{}</p>"#, e(n)),
        None => format!("<p>{}</p>", lang.t("no_notification")),
    };
    let body = format!(
        r#"<p>{welcome} {name}</p>
<h2>{notification_title}</h2>
{notification}
<h2>{my_dossiers}</h2>
{table}
{pager}
<p><a class="button" href="{new}">{new_label}</a></p>"#,
        welcome = lang.t("welcome"),
        name = e(&user.display_name()),
        notification_title = lang.t("notification_title"),
        notification = notification,
        my_dossiers = lang.t("my_dossiers_title"),
        table = dossier_table(lang, page, RowActions::Candidate),
        pager = pager(lang, page, &lang.path("/accueil"), None),
        new = lang.path("/dossier/new/add"),
        new_label = lang.t("nav_new_dossier"),
    );
    layout(lang, Some(user), "/accueil", lang.t("nav_home"), &body)
}

pub fn dossier_detail(lang: Lang, user: &User, view: &DossierView, today: NaiveDate) -> Html<String> {
    let d = &view.dossier;
    let status = view.status();

    let details_html = match &view.details {
        None => format!(r#"<p class="warning">{}</p>"#, lang.t("status_missing_details")),
        Some(details) => {
            let timeline = details.timeline();
            let items = if timeline.is_empty() {
                format!("<p>{}</p>", lang.t("no_milestones"))
            } else {
                let lis: Vec<String> = timeline
                    .iter()
                    .map(|entry| {
                        let (class, mark) = if entry.date < today {
                            ("past", lang.t("past"))
                        } else {
                            ("upcoming", lang.t("upcoming"))
                        };
                        format!(
                            r#"<li class="{}"><strong>{}</strong> : {} <em>({})</em></li>"#,
                            class,
                            entry.milestone.label(lang),
                            lang.format_date(entry.date),
                            mark
                        )
                    })
                    .collect();
                format!(r#"<ul class="timeline">{}</ul>"#, lis.join("\n"))
            };
            let ranking = details
                .position_classement
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string());
            format!(
                r#"<h2>{timeline_title}</h2>
{items}
<table>
<tr><th>{complete}</th><td>{complete_v}</td></tr>
<tr><th>{confirmed}</th><td>{confirmed_v}</td></tr>
<tr><th>{rejected}</th><td>{rejected_v}</td></tr>
<tr><th>{ranking}</th><td>{ranking_v}</td></tr>
</table>"#,
                timeline_title = lang.t("timeline"),
                items = items,
                complete = lang.t("complete"),
                complete_v = yes_no(lang, details.dossier_complet),
                confirmed = lang.t("confirmed"),
                confirmed_v = yes_no(lang, details.confirmation_information),
                rejected = lang.t("rejected"),
                rejected_v = yes_no(lang, details.candidature_non_retenue),
                ranking = lang.t("ranking"),
                ranking_v = ranking,
            )
        }
    };

    let staff_links = if user.is_staff() {
        format!(
            r#"<p><a class="button" href="{}/{id}">{}</a> <a class="button" href="{}/{id}">{}</a></p>"#,
            lang.path("/edit_dossier"),
            lang.t("edit_dossier"),
            lang.path(if view.details.is_some() { "/modify_detail" } else { "/details/add" }),
            lang.t(if view.details.is_some() { "edit_details" } else { "details_add_title" }),
            id = e(&d.id),
        )
    } else {
        String::new()
    };

    let body = format!(
        r#"<img class="photo" src="{image}" alt="{photo}">
<table>
<tr><th>{name_l}</th><td>{username} {name}</td></tr>
<tr><th>{mail_l}</th><td>{mail}</td></tr>
<tr><th>{phone_l}</th><td>{phone}</td></tr>
<tr><th>{post_l}</th><td>{post}</td></tr>
<tr><th>{prof_l}</th><td>{prof}</td></tr>
<tr><th>{status_l}</th><td class="{class}">{status}</td></tr>
</table>
{details}
{staff_links}"#,
        image = e(d.image_url()),
        photo = lang.t("photo"),
        name_l = lang.t("col_name"),
        username = e(&d.username),
        name = e(&d.name),
        mail_l = lang.t("col_email"),
        mail = e(&d.mail),
        phone_l = lang.t("col_phone"),
        phone = e(&d.phonenumber),
        post_l = lang.t("col_post_ref"),
        post = e(&d.postereference),
        prof_l = lang.t("col_prof_ref"),
        prof = e(&d.profref),
        status_l = lang.t("col_status"),
        class = status.css_class(),
        status = status.label(lang),
        details = details_html,
        staff_links = staff_links,
    );
    let here = format!("/dossier/{}", d.id);
    layout(lang, Some(user), &here, lang.t("dossier_title"), &body)
}

fn dossier_fields(lang: Lang, d: Option<&Dossier>) -> String {
    let field = |name: &str, key: &'static str, kind: &str, v: Option<&String>| {
        format!(
            r#"<label for="{name}">{label}</label>
<input type="{kind}" id="{name}" name="{name}" value="{v}" required>"#,
            name = name,
            label = lang.t(key),
            kind = kind,
            v = v.map(|v| e(v)).unwrap_or_default(),
        )
    };
    [
        field("username", "candidate_username", "text", d.map(|d| &d.username)),
        field("name", "col_name", "text", d.map(|d| &d.name)),
        field("mail", "col_email", "email", d.map(|d| &d.mail)),
        field("postereference", "col_post_ref", "text", d.map(|d| &d.postereference)),
        field("profref", "col_prof_ref", "text", d.map(|d| &d.profref)),
        field("phonenumber", "col_phone", "text", d.map(|d| &d.phonenumber)),
    ]
    .join("\n")
}

pub fn new_dossier_page(lang: Lang, user: &User) -> Html<String> {
    let body = format!(
        r#"<form method="post" action="{action}" enctype="multipart/form-data">
{fields}
<label for="image">{photo}</label>
<input type="file" id="image" name="image" accept=".jpg,.jpeg,.png">
<button type="submit">{create}</button>
</form>"#,
        action = lang.path("/dossier/new/add"),
        fields = dossier_fields(lang, None),
        photo = lang.t("photo"),
        create = lang.t("create"),
    );
    layout(lang, Some(user), "/dossier/new/add", lang.t("new_dossier_title"), &body)
}

pub fn edit_dossier_page(lang: Lang, user: &User, dossier: &Dossier) -> Html<String> {
    let body = format!(
        r#"<form method="post" action="{action}/{id}">
{fields}
<button type="submit">{save}</button>
</form>"#,
        action = lang.path("/edit"),
        id = e(&dossier.id),
        fields = dossier_fields(lang, Some(dossier)),
        save = lang.t("save"),
    );
    let here = format!("/edit_dossier/{}", dossier.id);
    layout(lang, Some(user), &here, lang.t("edit_dossier"), &body)
}

pub fn notification_form(
    lang: Lang,
    user: &User,
    dossier: &Dossier,
    recipient: &User,
    message: Option<&str>,
) -> Html<String> {
    let body = format!(
        r#"{message}
<p><strong>{dossier_l}</strong> : {username} {name} ({post})</p>
<p><strong>{recipient_l}</strong> : {recipient} &lt;{recipient_mail}&gt;</p>
<form method="post" action="{action}/{id}/notification">
<label for="message">{message_l}</label>
<textarea id="message" name="message" maxlength="255" rows="4" required>{current}</textarea>
<button type="submit">{send}</button>
</form>"#,
        message = message_box(message),
        dossier_l = lang.t("dossier_title"),
        username = e(&dossier.username),
        name = e(&dossier.name),
        post = e(&dossier.postereference),
        recipient_l = lang.t("recipient"),
        recipient = e(&recipient.display_name()),
        recipient_mail = e(&recipient.email),
        action = lang.path("/dossier"),
        id = e(&dossier.id),
        message_l = lang.t("message"),
        current = e(&recipient.notification),
        send = lang.t("send"),
    );
    let here = format!("/notif/{}/notification", dossier.id);
    layout(lang, Some(user), &here, lang.t("notifications_title"), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::details::DossierDetails;
    use chrono::Utc;

    fn user(role: &str) -> User {
        User {
            id: "u".into(),
            username: "User2".into(),
            name: "Doe".into(),
            surname: "John".into(),
            password_hash: String::new(),
            email: "user@gmail.com".into(),
            role: role.into(),
            whitelist: true,
            notification: String::new(),
            created_at: Utc::now(),
        }
    }

    fn view(details: Option<DossierDetails>) -> DossierView {
        DossierView {
            dossier: Dossier {
                id: "d-1".into(),
                username: "John".into(),
                name: "<Doe>".into(),
                mail: "candidate1@gmail.com".into(),
                postereference: "Z50007300".into(),
                profref: "Mr.Schumacher".into(),
                phonenumber: "+32472456891".into(),
                image: None,
                user_id: "u".into(),
                created_at: Utc::now(),
            },
            details,
        }
    }

    #[test]
    fn detail_lists_milestones_in_date_order() {
        let details = DossierDetails {
            date_cloture: NaiveDate::from_ymd_opt(2025, 12, 31),
            date_reception: NaiveDate::from_ymd_opt(2025, 1, 1),
            ..DossierDetails::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let Html(page) = dossier_detail(Lang::En, &user("secretariat"), &view(Some(details)), today);

        let reception = page.find("Reception date").unwrap();
        let closing = page.find("Closing date").unwrap();
        assert!(reception < closing);
        assert!(page.contains("&lt;Doe&gt;"));
        assert!(page.contains("/en/modify_detail/d-1"));
    }

    #[test]
    fn candidates_get_no_staff_links() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let Html(page) = dossier_detail(Lang::Fr, &user("candidat"), &view(None), today);
        assert!(!page.contains("/fr/edit_dossier/"));
        assert!(page.contains("Détails manquants"));
    }
}
