use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::i18n::Lang;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: String,
    pub surname: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub role: String,
    pub whitelist: bool,
    pub notification: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Unknown tags are treated as the least privileged role.
    pub fn role(&self) -> Role {
        Role::parse(&self.role).unwrap_or(Role::Candidat)
    }

    pub fn is_staff(&self) -> bool {
        self.role().is_staff()
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.surname, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "secretariat")]
    Secretariat,
    #[serde(rename = "respRecrutement")]
    RespRecrutement,
    #[serde(rename = "candidat")]
    Candidat,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::Secretariat,
        Role::RespRecrutement,
        Role::Candidat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Secretariat => "secretariat",
            Role::RespRecrutement => "respRecrutement",
            Role::Candidat => "candidat",
        }
    }

    pub fn parse(raw: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.as_str() == raw.trim())
    }

    pub fn is_staff(self) -> bool {
        !matches!(self, Role::Candidat)
    }

    /// Table holding the membership rows for this role. Candidates have none.
    pub fn membership_table(self) -> Option<&'static str> {
        match self {
            Role::Admin => Some("admins"),
            Role::Secretariat => Some("secretariats"),
            Role::RespRecrutement => Some("resp_recrutements"),
            Role::Candidat => None,
        }
    }

    pub fn label(self, lang: Lang) -> &'static str {
        match self {
            Role::Admin => lang.t("role_admin"),
            Role::Secretariat => lang.t("role_secretariat"),
            Role::RespRecrutement => lang.t("role_resp_recrutement"),
            Role::Candidat => lang.t("role_candidat"),
        }
    }
}

pub const MEMBERSHIP_TABLES: [&str; 3] = ["admins", "secretariats", "resp_recrutements"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_tags_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("client"), None);
    }

    #[test]
    fn only_candidates_are_not_staff() {
        assert!(Role::Secretariat.is_staff());
        assert!(Role::RespRecrutement.is_staff());
        assert!(!Role::Candidat.is_staff());
        assert_eq!(Role::Candidat.membership_table(), None);
    }
}
