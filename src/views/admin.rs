use axum::response::Html;

use super::{e, layout};
use crate::i18n::Lang;
use crate::models::user::{Role, User};

/// User list with block / unblock toggles.
pub fn administration_page(lang: Lang, admin: &User, users: &[User]) -> Html<String> {
    let rows: Vec<String> = users
        .iter()
        .map(|u| {
            let (state, toggle_key, next) = if u.whitelist {
                (lang.t("active"), "block", "false")
            } else {
                (lang.t("blocked"), "unblock", "true")
            };
            format!(
                r#"<tr><td>{username}</td><td>{surname} {name}</td><td>{email}</td><td>{role}</td><td>{state}</td>
<td><form class="inline" method="post" action="{action}">
<input type="hidden" name="user_id" value="{id}">
<input type="hidden" name="whitelist" value="{next}">
<button type="submit">{toggle}</button>
</form></td></tr>"#,
                username = e(&u.username),
                surname = e(&u.surname),
                name = e(&u.name),
                email = e(&u.email),
                role = u.role().label(lang),
                state = state,
                action = lang.path("/administration/whitelist"),
                id = e(&u.id),
                next = next,
                toggle = lang.t(toggle_key),
            )
        })
        .collect();

    let body = format!(
        r#"<table>
<thead><tr><th>{username}</th><th>{name}</th><th>{email}</th><th>{role}</th><th>{whitelist}</th><th></th></tr></thead>
<tbody>
{rows}
</tbody>
</table>"#,
        username = lang.t("username"),
        name = lang.t("name"),
        email = lang.t("email"),
        role = lang.t("role"),
        whitelist = lang.t("whitelist"),
        rows = rows.join("\n"),
    );
    layout(lang, Some(admin), "/administration", lang.t("admin_title"), &body)
}

/// User list with a role selector per row.
pub fn roles_page(lang: Lang, admin: &User, users: &[User]) -> Html<String> {
    let rows: Vec<String> = users
        .iter()
        .map(|u| {
            let current = u.role();
            let options: Vec<String> = Role::ALL
                .into_iter()
                .map(|r| {
                    let selected = if r == current { " selected" } else { "" };
                    format!(
                        r#"<option value="{}"{}>{}</option>"#,
                        r.as_str(),
                        selected,
                        r.label(lang)
                    )
                })
                .collect();
            format!(
                r#"<tr><td>{username}</td><td>{email}</td>
<td><form class="inline" method="post" action="{action}">
<input type="hidden" name="user_id" value="{id}">
<select name="role">{options}</select>
<button type="submit">{change}</button>
</form></td></tr>"#,
                username = e(&u.username),
                email = e(&u.email),
                action = lang.path("/admin/users/update"),
                id = e(&u.id),
                options = options.join(""),
                change = lang.t("change_role"),
            )
        })
        .collect();

    let body = format!(
        r#"<table>
<thead><tr><th>{username}</th><th>{email}</th><th>{role}</th></tr></thead>
<tbody>
{rows}
</tbody>
</table>"#,
        username = lang.t("username"),
        email = lang.t("email"),
        role = lang.t("role"),
        rows = rows.join("\n"),
    );
    layout(lang, Some(admin), "/admin/users", lang.t("roles_title"), &body)
}
