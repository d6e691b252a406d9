use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::dto::dossier_dto::DossierPayload;
use crate::error::Result;
use crate::models::details::DetailsInput;
use crate::models::user::{Role, User};
use crate::services::details_service::DetailsService;
use crate::services::dossier_service::DossierService;
use crate::services::user_service::{NewUser, UserService};

const ADMIN_PASSWORD: &str = "Admin!123";
const DEFAULT_PASSWORD: &str = "Password!123";

struct SeedUser {
    username: &'static str,
    name: &'static str,
    surname: &'static str,
    email: &'static str,
    role: Role,
    notification: &'static str,
}

const USERS: [SeedUser; 7] = [
    SeedUser { username: "admin", name: "admin", surname: "admin", email: "admin@juice-sh.op", role: Role::Admin, notification: "" },
    SeedUser { username: "User2", name: "Doe", surname: "John", email: "user@gmail.com", role: Role::Candidat, notification: "Vous avez été sélectionné pour le poste de secrétaire !" },
    SeedUser { username: "User3", name: "Doe", surname: "John", email: "secretariat@gmail.com", role: Role::Secretariat, notification: "" },
    SeedUser { username: "User4", name: "Elice", surname: "Simon", email: "resp@gmail.com", role: Role::RespRecrutement, notification: "" },
    SeedUser { username: "User5", name: "Michael", surname: "John", email: "user2@gmail.com", role: Role::Candidat, notification: "" },
    SeedUser { username: "User6", name: "Eve", surname: "Williams", email: "user1@gmail.com", role: Role::Candidat, notification: "" },
    SeedUser { username: "User7", name: "Charlie", surname: "Brown", email: "user3@gmail.com", role: Role::Candidat, notification: "" },
];

/// (owner index in USERS, first name, last name, mail, post reference, professor, phone, with details)
type SeedDossier = (usize, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str, Option<i64>);

const DOSSIERS: [SeedDossier; 6] = [
    (1, "John", "Doe", "candidate1@gmail.com", "Z50007300", "Mr.Schumacher", "+32472456891", Some(1)),
    (1, "John", "Doe", "elicesimon06@gmail.com", "Z50007301", "Mr.Frenay", "+32472456891", Some(2)),
    (5, "Eve", "Williams", "candidate1@gmail.com", "Z50007303", "Mr.Elice", "+32477129438", None),
    (6, "Charlie", "Brown", "candidate2@gmail.com", "50001235", "Mr.Englebert", "+32489567024", None),
    (1, "John", "Doe", "candidate1@gmail.com", "50001235", "Mr.Benoit", "+32472456891", None),
    (1, "John", "Doe", "candidate2@gmail.com", "50001232", "Mr.Xavier", "+32472456891", None),
];

/// Loads the demo accounts and dossiers into an empty database. Returns
/// whether anything was inserted.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<bool> {
    let users = UserService::new(pool.clone());
    if users.count().await? > 0 {
        tracing::debug!("users already present, skipping demo data");
        return Ok(false);
    }

    let mut created: Vec<User> = Vec::with_capacity(USERS.len());
    for seed in &USERS {
        let password = if seed.role == Role::Admin { ADMIN_PASSWORD } else { DEFAULT_PASSWORD };
        let user = users
            .create(NewUser {
                username: seed.username,
                name: seed.name,
                surname: seed.surname,
                email: seed.email,
                password,
                role: seed.role,
                whitelist: true,
                notification: seed.notification,
            })
            .await?;
        created.push(user);
    }

    let dossiers = DossierService::new(pool.clone());
    let details = DetailsService::new(pool.clone());
    for (owner, username, name, mail, post, prof, phone, ranking) in DOSSIERS {
        let payload = DossierPayload {
            username: username.into(),
            name: name.into(),
            mail: mail.into(),
            postereference: post.into(),
            profref: prof.into(),
            phonenumber: phone.into(),
        };
        let dossier = dossiers.create(&created[owner].id, &payload, None).await?;

        if let Some(position) = ranking {
            details.create(&dossier.id, &full_timeline(position)).await?;
        }
    }

    tracing::info!(users = USERS.len(), dossiers = DOSSIERS.len(), "demo data seeded");
    Ok(true)
}

fn full_timeline(position: i64) -> DetailsInput {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
    DetailsInput {
        date_cloture: date(2025, 12, 31),
        date_reception: date(2025, 1, 1),
        dossier_complet: true,
        date_transmission_commission: date(2025, 2, 1),
        date_reunion_commission: date(2025, 3, 1),
        candidature_non_retenue: false,
        confirmation_information: true,
        date_entendu: date(2025, 4, 1),
        position_classement: Some(position),
        date_soumission_autorites: date(2025, 5, 1),
        date_transmission_autorites: date(2025, 6, 1),
        date_entree_fonction: date(2025, 7, 1),
        date_suppression_dossier: date(2026, 1, 1),
    }
}
