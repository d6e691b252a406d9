use axum::response::Html;

use super::{e, layout, message_box};
use crate::i18n::Lang;
use crate::models::user::{Role, User};

pub fn login_page(lang: Lang, message: Option<&str>) -> Html<String> {
    let body = format!(
        r#"{message}
<form method="post" action="{action}">
<label for="email">{email}</label>
<input type="email" id="email" name="email" required>
<label for="password">{password}</label>
<input type="password" id="password" name="password" required>
<button type="submit">{submit}</button>
</form>
<p>{no_account} <a href="{register}">{register_label}</a></p>
<p><a href="{new_mdp}">{change_password}</a></p>"#,
        message = message_box(message),
        action = lang.path("/login"),
        email = lang.t("email"),
        password = lang.t("password"),
        submit = lang.t("login_submit"),
        no_account = lang.t("no_account"),
        register = lang.path("/register"),
        register_label = lang.t("nav_register"),
        new_mdp = lang.path("/new_mdp"),
        change_password = lang.t("change_password_title"),
    );
    layout(lang, None, "/login", lang.t("login_title"), &body)
}

pub fn register_page(lang: Lang) -> Html<String> {
    let body = format!(
        r#"<form method="post" action="{action}">
<label for="username">{username}</label>
<input type="text" id="username" name="username" required>
<label for="name">{name}</label>
<input type="text" id="name" name="name" required>
<label for="surname">{surname}</label>
<input type="text" id="surname" name="surname" required>
<label for="email">{email}</label>
<input type="email" id="email" name="email" required>
<label for="password">{password}</label>
<input type="password" id="password" name="password" required>
<label for="password_confirm">{password_confirm}</label>
<input type="password" id="password_confirm" name="password_confirm" required>
<p><small>{rule}</small></p>
<button type="submit">{submit}</button>
</form>"#,
        action = lang.path("/register"),
        username = lang.t("username"),
        name = lang.t("name"),
        surname = lang.t("surname"),
        email = lang.t("email"),
        password = lang.t("password"),
        password_confirm = lang.t("password_confirm"),
        rule = e(lang.t("password_rule")),
        submit = lang.t("register_submit"),
    );
    layout(lang, None, "/register", lang.t("register_title"), &body)
}

/// Password change. Anonymous visitors identify the account by e-mail.
pub fn password_page(lang: Lang, user: Option<&User>, message: Option<&str>) -> Html<String> {
    let email_field = match user {
        Some(_) => String::new(),
        None => format!(
            r#"<label for="email">{}</label>
<input type="email" id="email" name="email" required>"#,
            lang.t("email")
        ),
    };
    let body = format!(
        r#"{message}
<form method="post" action="{action}">
{email_field}
<label for="old_pwd">{old}</label>
<input type="password" id="old_pwd" name="old_pwd" required>
<label for="new_pwd">{new}</label>
<input type="password" id="new_pwd" name="new_pwd" required>
<label for="new_pwd_confirm">{confirm}</label>
<input type="password" id="new_pwd_confirm" name="new_pwd_confirm" required>
<p><small>{rule}</small></p>
<button type="submit">{submit}</button>
</form>"#,
        message = message_box(message),
        action = lang.path("/new_mdp"),
        email_field = email_field,
        old = lang.t("old_password"),
        new = lang.t("new_password"),
        confirm = lang.t("new_password_confirm"),
        rule = e(lang.t("password_rule")),
        submit = lang.t("submit"),
    );
    layout(lang, user, "/new_mdp", lang.t("change_password_title"), &body)
}

pub fn profile_page(lang: Lang, user: &User, memberships: &[Role], message: Option<&str>) -> Html<String> {
    let roles = if memberships.is_empty() {
        user.role().label(lang).to_string()
    } else {
        memberships
            .iter()
            .map(|r| r.label(lang))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let body = format!(
        r#"{message}
<p><strong>{email_label}</strong> : {email}</p>
<p><strong>{role_label}</strong> : {roles}</p>
<form method="post" action="{action}">
<label for="username">{username_label}</label>
<input type="text" id="username" name="username" value="{username}" required>
<label for="name">{name_label}</label>
<input type="text" id="name" name="name" value="{name}" required>
<label for="surname">{surname_label}</label>
<input type="text" id="surname" name="surname" value="{surname}" required>
<button type="submit">{save}</button>
</form>
<p><a href="{new_mdp}">{change_password}</a></p>"#,
        message = message_box(message),
        email_label = lang.t("email"),
        email = e(&user.email),
        role_label = lang.t("role"),
        roles = e(&roles),
        action = lang.path("/profile"),
        username_label = lang.t("username"),
        username = e(&user.username),
        name_label = lang.t("name"),
        name = e(&user.name),
        surname_label = lang.t("surname"),
        surname = e(&user.surname),
        save = lang.t("save"),
        new_mdp = lang.path("/new_mdp"),
        change_password = lang.t("change_password_title"),
    );
    layout(lang, Some(user), "/profile", lang.t("profile_title"), &body)
}

/// `back` is only honoured when it points inside the site.
pub fn error_page(lang: Lang, user: Option<&User>, description: &str, back: &str) -> Html<String> {
    let back = if back.starts_with('/') && !back.starts_with("//") {
        back.to_string()
    } else {
        lang.path("/login")
    };
    let body = format!(
        r#"<p class="error">{description}</p>
<p><a class="button" href="{back}">{back_label}</a></p>"#,
        description = e(description),
        back = e(&back),
        back_label = lang.t("back"),
    );
    layout(lang, user, "/error", lang.t("error_title"), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::PASSWORD_SPECIALS;

    #[test]
    fn error_page_refuses_external_back_links() {
        let Html(page) = error_page(Lang::En, None, "Error 404: Page not found.", "https://evil.example");
        assert!(page.contains(r#"href="/en/login""#));
        assert!(page.contains("Error 404: Page not found."));
    }

    #[test]
    fn password_rule_lists_specials() {
        let Html(page) = register_page(Lang::Fr);
        assert!(page.contains(&e(PASSWORD_SPECIALS)));
    }
}
