//! Server-rendered pages. Every value coming from users or the database goes
//! through [`e`] before it is interpolated.

pub mod account;
pub mod admin;
pub mod details;
pub mod dossiers;

use axum::response::Html;

use crate::i18n::Lang;
use crate::models::dossier::DossierPage;
use crate::models::user::User;
use crate::utils::html::escape as e;

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; margin: 0; background: #f4f6fa; color: #1f2937; }
    header { background: #1e3a5f; color: #fff; padding: 12px 24px; display: flex; flex-wrap: wrap; align-items: center; gap: 16px; }
    header a, header button { color: #fff; text-decoration: none; background: none; border: none; font: inherit; cursor: pointer; }
    header .brand { font-weight: 600; margin-right: auto; }
    main { max-width: 1100px; margin: 24px auto; background: #fff; border-radius: 8px; padding: 24px 32px; }
    table { width: 100%; border-collapse: collapse; margin: 16px 0; }
    th, td { border-bottom: 1px solid #e5e7eb; padding: 8px; text-align: left; vertical-align: middle; }
    th { background: #f1f5f9; }
    form.inline { display: inline; }
    label { display: block; margin-top: 12px; font-weight: 500; }
    input[type=text], input[type=email], input[type=password], input[type=date], input[type=number], select, textarea { width: 100%; max-width: 420px; padding: 6px; }
    button, .button { margin-top: 12px; padding: 6px 14px; background: #1e40af; color: #fff; border: none; border-radius: 4px; cursor: pointer; text-decoration: none; }
    .danger { background: #b91c1c; }
    .message { padding: 10px 14px; background: #ecfdf5; border: 1px solid #10b981; border-radius: 4px; }
    .warning { padding: 10px 14px; background: #fffbeb; border: 1px solid #f59e0b; border-radius: 4px; }
    .error { padding: 10px 14px; background: #fef2f2; border: 1px solid #ef4444; border-radius: 4px; }
    .status-missing { color: #b45309; } .status-open { color: #1d4ed8; }
    .status-rejected { color: #b91c1c; } .status-appointed { color: #047857; }
    .timeline li.past { color: #6b7280; }
    .pager { display: flex; gap: 12px; align-items: center; }
    img.photo { max-width: 160px; border-radius: 6px; }
"#;

/// Wraps a page body in the shared chrome. `here` is the current path
/// without its locale prefix, used by the language switch.
pub fn layout(lang: Lang, user: Option<&User>, here: &str, title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="{code}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {app}</title>
<style>{style}</style>
</head>
<body>
<header>
<span class="brand">{app}</span>
{nav}
<a href="/{other}{here}">{switch}</a>
</header>
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        code = lang.code(),
        title = e(title),
        app = lang.t("app_title"),
        style = STYLE,
        nav = nav(lang, user),
        other = lang.other().code(),
        here = e(here),
        switch = lang.t("switch_lang"),
        body = body,
    ))
}

fn nav(lang: Lang, user: Option<&User>) -> String {
    let link = |path: &str, key: &'static str| {
        format!(r#"<a href="{}">{}</a>"#, lang.path(path), lang.t(key))
    };

    let Some(user) = user else {
        return [link("/login", "nav_login"), link("/register", "nav_register")].join("\n");
    };

    let mut items = Vec::new();
    if user.is_staff() {
        items.push(link("/accueilResponsable", "nav_home"));
        items.push(link("/dossier", "nav_dossiers"));
        items.push(link("/dossier/new/add", "nav_new_dossier"));
        items.push(link("/notif/dossier", "nav_notifications"));
        items.push(link("/dossier/supp/candidat", "nav_delete"));
        items.push(link("/dossier/export/excel", "nav_export"));
    } else {
        items.push(link("/accueil", "nav_home"));
        items.push(link("/dossiercandidat", "nav_my_dossiers"));
        items.push(link("/dossier/new/add", "nav_new_dossier"));
    }
    if user.is_admin() {
        items.push(link("/administration", "nav_admin"));
        items.push(link("/admin/users", "nav_roles"));
    }
    items.push(link("/profile", "nav_profile"));
    items.push(format!(
        r#"<form class="inline" method="post" action="{}"><button type="submit">{}</button></form>"#,
        lang.path("/logout"),
        lang.t("nav_logout")
    ));
    items.join("\n")
}

pub fn message_box(message: Option<&str>) -> String {
    match message {
        Some(m) if !m.trim().is_empty() => format!(r#"<p class="message">{}</p>"#, e(m)),
        _ => String::new(),
    }
}

/// Previous / next controls. Search results are re-posted with their
/// keyword, plain listings use links.
pub fn pager(lang: Lang, page: &DossierPage, action: &str, keyword: Option<&str>) -> String {
    let target = |n: i64| format!("{}?page={}&per_page={}", action, n, page.per_page);
    let control = |n: i64, key: &'static str| match keyword {
        Some(k) => format!(
            r#"<form class="inline" method="post" action="{}"><input type="hidden" name="keyword" value="{}"><button type="submit">{}</button></form>"#,
            target(n),
            e(k),
            lang.t(key)
        ),
        None => format!(r#"<a href="{}">{}</a>"#, target(n), lang.t(key)),
    };

    let mut out = String::from(r#"<div class="pager">"#);
    if page.has_previous() {
        out.push_str(&control(page.page - 1, "previous"));
    }
    out.push_str(&format!(
        "<span>{} {} / {} ({}: {})</span>",
        lang.t("page"),
        page.page,
        page.total_pages,
        lang.t("total"),
        page.total
    ));
    if page.has_next() {
        out.push_str(&control(page.page + 1, "next"));
    }
    out.push_str("</div>");
    out
}

fn checked(flag: bool) -> &'static str {
    if flag {
        " checked"
    } else {
        ""
    }
}

fn yes_no(lang: Lang, flag: bool) -> &'static str {
    if flag {
        lang.t("yes")
    } else {
        lang.t("no")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_escapes_title_and_links_other_locale() {
        let Html(page) = layout(Lang::Fr, None, "/register", "<x>", "<p>body</p>");
        assert!(page.contains("&lt;x&gt;"));
        assert!(page.contains(r#"href="/en/register""#));
        assert!(page.contains("<p>body</p>"));
    }

    #[test]
    fn pager_reposts_keyword() {
        let page = DossierPage::new(Vec::new(), 25, 2, 10);
        let html = pager(Lang::En, &page, "/en/dossier/search", Some("+32"));
        assert!(html.contains(r#"action="/en/dossier/search?page=1&per_page=10""#));
        assert!(html.contains(r#"action="/en/dossier/search?page=3&per_page=10""#));
        assert!(html.contains(r#"value="+32""#));
    }
}
