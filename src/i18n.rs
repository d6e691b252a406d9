//! Locales, UI strings and user-facing notices.
//!
//! Every page is served under both `/fr` and `/en`; the router attaches the
//! active [`Lang`] to each request as an extension.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const LANGUAGE_COOKIE: &str = "language";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Fr,
    En,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Fr, Lang::En];

    pub fn code(self) -> &'static str {
        match self {
            Lang::Fr => "fr",
            Lang::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Lang> {
        match code.trim().to_ascii_lowercase().as_str() {
            "fr" => Some(Lang::Fr),
            "en" => Some(Lang::En),
            _ => None,
        }
    }

    /// Locale named by the first segment of a request path, if any.
    pub fn from_path(path: &str) -> Option<Lang> {
        let first = path.trim_start_matches('/').split('/').next()?;
        Lang::from_code(first)
    }

    pub fn other(self) -> Lang {
        match self {
            Lang::Fr => Lang::En,
            Lang::En => Lang::Fr,
        }
    }

    /// `/fr{rest}` or `/en{rest}`.
    pub fn path(self, rest: &str) -> String {
        format!("/{}{}", self.code(), rest)
    }

    /// Translated UI string. Unknown keys fall back to the key itself so a
    /// missing entry shows up on screen instead of failing the request.
    pub fn t(self, key: &'static str) -> &'static str {
        match lookup(key) {
            Some((fr, en)) => match self {
                Lang::Fr => fr,
                Lang::En => en,
            },
            None => key,
        }
    }

    pub fn format_date(self, date: chrono::NaiveDate) -> String {
        match self {
            Lang::Fr => date.format("%d/%m/%Y").to_string(),
            Lang::En => date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Client-facing reasons a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    EmailTaken,
    UsernameTaken,
    PasswordMismatch,
    BadCredentials,
    UserBlocked,
    UserNotFound,
    OldPasswordIncorrect,
    AccessForbidden,
    LoginRequired,
    DossierNotFound,
    DetailsNotFound,
    DetailsAlreadyExist,
    AssociatedUserNotFound,
    InvalidDate,
    InvalidRanking,
    InvalidImage,
    InvalidRole,
    MissingField,
    MessageEmpty,
    MessageTooLong,
    PageNotFound,
    ResourceNotFound,
    AlreadyExists,
    Unexpected,
}

impl Notice {
    pub fn text(self, lang: Lang) -> &'static str {
        let (fr, en) = match self {
            Notice::EmailTaken => ("Adresse e-mail déjà utilisée.", "Email already in use."),
            Notice::UsernameTaken => ("Nom d'utilisateur déjà utilisé.", "Username already in use."),
            Notice::PasswordMismatch => (
                "Les mots de passe ne correspondent pas.",
                "Passwords do not match.",
            ),
            Notice::BadCredentials => (
                "Adresse e-mail ou mot de passe incorrect.",
                "Incorrect email or password.",
            ),
            Notice::UserBlocked => ("Utilisateur bloqué.", "User blocked."),
            Notice::UserNotFound => ("Utilisateur non trouvé.", "User not found."),
            Notice::OldPasswordIncorrect => (
                "L'ancien mot de passe est incorrect.",
                "Old password is incorrect.",
            ),
            Notice::AccessForbidden => ("Accès interdit.", "Access forbidden."),
            Notice::LoginRequired => ("Veuillez vous connecter.", "Please log in."),
            Notice::DossierNotFound => ("Dossier non trouvé.", "Dossier not found."),
            Notice::DetailsNotFound => (
                "Détails du dossier non trouvés.",
                "Dossier details not found.",
            ),
            Notice::DetailsAlreadyExist => (
                "Ce dossier possède déjà des détails.",
                "This dossier already has details.",
            ),
            Notice::AssociatedUserNotFound => (
                "Utilisateur associé non trouvé.",
                "Associated user not found.",
            ),
            Notice::InvalidDate => (
                "Date invalide (format attendu AAAA-MM-JJ).",
                "Invalid date (expected YYYY-MM-DD).",
            ),
            Notice::InvalidRanking => (
                "Position de classement invalide.",
                "Invalid ranking position.",
            ),
            Notice::InvalidImage => (
                "Format de fichier invalide. Seuls .jpg, .jpeg et .png sont acceptés.",
                "Invalid file format. Only .jpg, .jpeg, and .png are allowed.",
            ),
            Notice::InvalidRole => ("Rôle inconnu.", "Unknown role."),
            Notice::MissingField => ("Champ obligatoire manquant.", "A required field is missing."),
            Notice::MessageEmpty => (
                "Le message ne peut pas être vide.",
                "The message cannot be empty.",
            ),
            Notice::MessageTooLong => (
                "Le message dépasse 255 caractères.",
                "The message exceeds 255 characters.",
            ),
            Notice::PageNotFound => ("Page non trouvée.", "Page not found."),
            Notice::ResourceNotFound => ("Ressource introuvable.", "Resource not found."),
            Notice::AlreadyExists => (
                "Cet enregistrement existe déjà.",
                "This record already exists.",
            ),
            Notice::Unexpected => (
                "Une erreur inattendue est survenue.",
                "An unexpected error occurred.",
            ),
        };
        match lang {
            Lang::Fr => fr,
            Lang::En => en,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text(Lang::En))
    }
}

const VALIDATION_PRECEDENCE: [&str; 3] = ["length", "email", "password_complexity"];

/// Message for the most relevant failed validation rule.
pub fn validation_text(lang: Lang, errors: &validator::ValidationErrors) -> String {
    let codes: Vec<String> = errors
        .field_errors()
        .into_values()
        .flat_map(|errs| errs.iter().map(|e| e.code.to_string()))
        .collect();

    let code = VALIDATION_PRECEDENCE
        .iter()
        .find(|c| codes.iter().any(|code| code == *c))
        .copied()
        .or_else(|| codes.first().map(String::as_str))
        .unwrap_or_default();

    let (fr, en) = match code {
        "password_complexity" => (
            "Le mot de passe doit contenir au moins une majuscule, une minuscule, un chiffre, un caractère spécial et faire au moins 8 caractères.",
            "The password must contain at least one uppercase letter, one lowercase letter, one digit, one special character and be at least 8 characters long.",
        ),
        "email" => ("Adresse e-mail invalide.", "Invalid email address."),
        "length" => (
            "Un champ obligatoire est vide ou trop long.",
            "A required field is empty or too long.",
        ),
        _ => ("Données invalides.", "Invalid data."),
    };
    match lang {
        Lang::Fr => fr.to_string(),
        Lang::En => en.to_string(),
    }
}

fn lookup(key: &str) -> Option<(&'static str, &'static str)> {
    let pair = match key {
        "app_title" => ("Suivi des dossiers de candidature", "Candidate dossier tracking"),
        "switch_lang" => ("English", "Français"),

        "nav_home" => ("Accueil", "Home"),
        "nav_dossiers" => ("Dossiers", "Dossiers"),
        "nav_my_dossiers" => ("Mes dossiers", "My dossiers"),
        "nav_new_dossier" => ("Nouveau dossier", "New dossier"),
        "nav_notifications" => ("Notifications", "Notifications"),
        "nav_delete" => ("Suppression", "Deletion"),
        "nav_export" => ("Exporter (Excel)", "Export (Excel)"),
        "nav_admin" => ("Administration", "Administration"),
        "nav_roles" => ("Rôles", "Roles"),
        "nav_profile" => ("Profil", "Profile"),
        "nav_logout" => ("Déconnexion", "Log out"),
        "nav_login" => ("Connexion", "Log in"),
        "nav_register" => ("Inscription", "Register"),

        "login_title" => ("Connexion", "Login"),
        "email" => ("Adresse e-mail", "Email"),
        "password" => ("Mot de passe", "Password"),
        "login_submit" => ("Se connecter", "Log in"),
        "no_account" => ("Pas encore de compte ?", "No account yet?"),
        "logged_out" => ("Vous avez été déconnecté !", "You have been logged out!"),
        "user_added" => ("Utilisateur ajouté avec succès :", "User successfully added:"),

        "register_title" => ("Inscription", "Registration"),
        "username" => ("Nom d'utilisateur", "Username"),
        "name" => ("Nom", "Name"),
        "surname" => ("Prénom", "Surname"),
        "password_confirm" => ("Confirmer le mot de passe", "Confirm password"),
        "register_submit" => ("S'inscrire", "Register"),
        "password_rule" => (
            "Au moins 8 caractères, une majuscule, une minuscule, un chiffre et un caractère spécial (!@#$%^&*()-+).",
            "At least 8 characters, one uppercase, one lowercase, one digit and one special character (!@#$%^&*()-+).",
        ),

        "change_password_title" => ("Changer le mot de passe", "Change password"),
        "old_password" => ("Ancien mot de passe", "Old password"),
        "new_password" => ("Nouveau mot de passe", "New password"),
        "new_password_confirm" => ("Confirmer le nouveau mot de passe", "Confirm new password"),
        "submit" => ("Valider", "Submit"),
        "password_updated" => ("Mot de passe mis à jour avec succès !", "Password successfully updated!"),

        "profile_title" => ("Mon profil", "My profile"),
        "role" => ("Rôle", "Role"),
        "save" => ("Enregistrer", "Save"),
        "profile_updated" => ("Profil mis à jour.", "Profile updated."),

        "error_title" => ("Erreur", "Error"),
        "back" => ("Retour", "Back"),

        "dossiers_title" => ("Liste des dossiers", "Dossier list"),
        "my_dossiers_title" => ("Mes dossiers", "My dossiers"),
        "search_placeholder" => (
            "E-mail, téléphone, référence du poste ou nom",
            "Email, phone, post reference or name",
        ),
        "search" => ("Rechercher", "Search"),
        "results_for" => ("Résultats pour", "Results for"),
        "col_name" => ("Nom", "Name"),
        "col_email" => ("E-mail", "Email"),
        "col_phone" => ("Téléphone", "Phone"),
        "col_post_ref" => ("Référence du poste", "Post reference"),
        "col_prof_ref" => ("Professeur référent", "Referring professor"),
        "col_status" => ("Statut", "Status"),
        "col_actions" => ("Actions", "Actions"),
        "view" => ("Voir", "View"),
        "edit" => ("Modifier", "Edit"),
        "delete" => ("Supprimer", "Delete"),
        "notify" => ("Notifier", "Notify"),
        "missing_details_warning" => (
            "Certains dossiers n'ont pas encore de détails.",
            "Some dossiers have no details yet.",
        ),
        "no_dossiers" => ("Aucun dossier.", "No dossiers."),
        "previous" => ("Précédent", "Previous"),
        "next" => ("Suivant", "Next"),
        "page" => ("Page", "Page"),
        "total" => ("Total", "Total"),

        "welcome" => ("Bienvenue", "Welcome"),
        "notification_title" => ("Dernière notification", "Latest notification"),
        "no_notification" => ("Aucune notification.", "No notifications."),

        "dossier_title" => ("Dossier de candidature", "Application dossier"),
        "timeline" => ("Chronologie", "Timeline"),
        "no_milestones" => ("Aucune date renseignée.", "No dates recorded."),
        "complete" => ("Dossier complet", "Dossier complete"),
        "confirmed" => ("Informations confirmées", "Information confirmed"),
        "rejected" => ("Candidature non retenue", "Application not retained"),
        "ranking" => ("Position de classement", "Ranking position"),
        "yes" => ("Oui", "Yes"),
        "no" => ("Non", "No"),
        "edit_details" => ("Modifier les détails", "Edit details"),
        "edit_dossier" => ("Modifier le dossier", "Edit dossier"),
        "upcoming" => ("à venir", "upcoming"),
        "past" => ("passée", "past"),

        "new_dossier_title" => ("Nouveau dossier", "New dossier"),
        "candidate_username" => ("Prénom du candidat", "Candidate first name"),
        "photo" => ("Photo", "Photo"),
        "create" => ("Créer", "Create"),

        "details_add_title" => ("Ajouter les détails du dossier", "Add dossier details"),
        "details_edit_title" => ("Modifier les détails du dossier", "Edit dossier details"),

        "notifications_title" => ("Envoyer une notification", "Send a notification"),
        "recipient" => ("Destinataire", "Recipient"),
        "message" => ("Message", "Message"),
        "send" => ("Envoyer", "Send"),
        "notification_sent" => ("Notification envoyée.", "Notification sent."),

        "delete_title" => ("Supprimer des dossiers", "Delete dossiers"),
        "confirm_delete" => (
            "Supprimer définitivement ce dossier ?",
            "Permanently delete this dossier?",
        ),

        "admin_title" => ("Administration des utilisateurs", "User administration"),
        "whitelist" => ("Liste blanche", "Whitelist"),
        "active" => ("Actif", "Active"),
        "blocked" => ("Bloqué", "Blocked"),
        "block" => ("Bloquer", "Block"),
        "unblock" => ("Débloquer", "Unblock"),
        "roles_title" => ("Gestion des rôles", "Role management"),
        "change_role" => ("Changer", "Change"),

        "export_title" => ("Liste des dossiers", "List of Dossiers"),

        "status_missing_details" => ("Détails manquants", "Missing details"),
        "status_open" => ("En cours", "Open"),
        "status_rejected" => ("Non retenu", "Rejected"),
        "status_appointed" => ("Entrée en fonction", "Appointed"),

        "role_admin" => ("Administrateur", "Administrator"),
        "role_secretariat" => ("Secrétariat", "Secretariat"),
        "role_resp_recrutement" => ("Responsable du recrutement", "Recruitment officer"),
        "role_candidat" => ("Candidat", "Candidate"),

        "ms_date_cloture" => ("Date de clôture", "Closing date"),
        "ms_date_reception" => ("Date de réception", "Reception date"),
        "ms_date_transmission_commission" => (
            "Date de transmission à la commission",
            "Date sent to the committee",
        ),
        "ms_date_reunion_commission" => ("Date de réunion de la commission", "Committee meeting date"),
        "ms_date_entendu" => (
            "Date où le candidat sera entendu",
            "Date when the candidate will be interviewed",
        ),
        "ms_date_soumission_autorites" => (
            "Date de soumission aux autorités facultaires",
            "Date submitted to faculty authorities",
        ),
        "ms_date_transmission_autorites" => (
            "Date de transmission aux autorités",
            "Date sent to authorities",
        ),
        "ms_date_entree_fonction" => ("Date prévue de l'entrée en fonction", "Expected start date"),
        "ms_date_suppression_dossier" => ("Date de suppression du dossier", "File deletion date"),
        _ => return None,
    };
    Some(pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lang_from_path_reads_first_segment() {
        assert_eq!(Lang::from_path("/en/dossier/42"), Some(Lang::En));
        assert_eq!(Lang::from_path("/fr"), Some(Lang::Fr));
        assert_eq!(Lang::from_path("/static/images/a.png"), None);
        assert_eq!(Lang::from_path("/"), None);
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(Lang::En.t("no_such_key"), "no_such_key");
        assert_eq!(Lang::Fr.t("nav_logout"), "Déconnexion");
        assert_eq!(Lang::En.t("nav_logout"), "Log out");
    }

    #[test]
    fn other_and_path_round_trip() {
        assert_eq!(Lang::Fr.other(), Lang::En);
        assert_eq!(Lang::En.path("/login"), "/en/login");
    }

    #[test]
    fn validation_text_prefers_password_rule_over_unknown_codes() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("password", validator::ValidationError::new("password_complexity"));
        let text = validation_text(Lang::En, &errors);
        assert!(text.contains("at least 8 characters"));
    }
}
