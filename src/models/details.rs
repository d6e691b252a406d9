use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::i18n::Lang;

/// Hiring-timeline record attached to a dossier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct DossierDetails {
    pub id: i64,
    pub dossier_id: String,
    pub date_cloture: Option<NaiveDate>,
    pub date_reception: Option<NaiveDate>,
    pub dossier_complet: bool,
    pub date_transmission_commission: Option<NaiveDate>,
    pub date_reunion_commission: Option<NaiveDate>,
    pub candidature_non_retenue: bool,
    pub confirmation_information: bool,
    pub date_entendu: Option<NaiveDate>,
    pub position_classement: Option<i64>,
    pub date_soumission_autorites: Option<NaiveDate>,
    pub date_transmission_autorites: Option<NaiveDate>,
    pub date_entree_fonction: Option<NaiveDate>,
    pub date_suppression_dossier: Option<NaiveDate>,
}

/// Writable part of a details record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsInput {
    pub date_cloture: Option<NaiveDate>,
    pub date_reception: Option<NaiveDate>,
    pub dossier_complet: bool,
    pub date_transmission_commission: Option<NaiveDate>,
    pub date_reunion_commission: Option<NaiveDate>,
    pub candidature_non_retenue: bool,
    pub confirmation_information: bool,
    pub date_entendu: Option<NaiveDate>,
    pub position_classement: Option<i64>,
    pub date_soumission_autorites: Option<NaiveDate>,
    pub date_transmission_autorites: Option<NaiveDate>,
    pub date_entree_fonction: Option<NaiveDate>,
    pub date_suppression_dossier: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    Cloture,
    Reception,
    TransmissionCommission,
    ReunionCommission,
    Entendu,
    SoumissionAutorites,
    TransmissionAutorites,
    EntreeFonction,
    SuppressionDossier,
}

impl Milestone {
    pub const ALL: [Milestone; 9] = [
        Milestone::Cloture,
        Milestone::Reception,
        Milestone::TransmissionCommission,
        Milestone::ReunionCommission,
        Milestone::Entendu,
        Milestone::SoumissionAutorites,
        Milestone::TransmissionAutorites,
        Milestone::EntreeFonction,
        Milestone::SuppressionDossier,
    ];

    /// Column name, also used as the form field name.
    pub fn field(self) -> &'static str {
        match self {
            Milestone::Cloture => "date_cloture",
            Milestone::Reception => "date_reception",
            Milestone::TransmissionCommission => "date_transmission_commission",
            Milestone::ReunionCommission => "date_reunion_commission",
            Milestone::Entendu => "date_entendu",
            Milestone::SoumissionAutorites => "date_soumission_autorites",
            Milestone::TransmissionAutorites => "date_transmission_autorites",
            Milestone::EntreeFonction => "date_entree_fonction",
            Milestone::SuppressionDossier => "date_suppression_dossier",
        }
    }

    pub fn label(self, lang: Lang) -> &'static str {
        let key = match self {
            Milestone::Cloture => "ms_date_cloture",
            Milestone::Reception => "ms_date_reception",
            Milestone::TransmissionCommission => "ms_date_transmission_commission",
            Milestone::ReunionCommission => "ms_date_reunion_commission",
            Milestone::Entendu => "ms_date_entendu",
            Milestone::SoumissionAutorites => "ms_date_soumission_autorites",
            Milestone::TransmissionAutorites => "ms_date_transmission_autorites",
            Milestone::EntreeFonction => "ms_date_entree_fonction",
            Milestone::SuppressionDossier => "ms_date_suppression_dossier",
        };
        lang.t(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEntry {
    pub milestone: Milestone,
    pub date: NaiveDate,
}

impl DossierDetails {
    pub fn milestone(&self, milestone: Milestone) -> Option<NaiveDate> {
        match milestone {
            Milestone::Cloture => self.date_cloture,
            Milestone::Reception => self.date_reception,
            Milestone::TransmissionCommission => self.date_transmission_commission,
            Milestone::ReunionCommission => self.date_reunion_commission,
            Milestone::Entendu => self.date_entendu,
            Milestone::SoumissionAutorites => self.date_soumission_autorites,
            Milestone::TransmissionAutorites => self.date_transmission_autorites,
            Milestone::EntreeFonction => self.date_entree_fonction,
            Milestone::SuppressionDossier => self.date_suppression_dossier,
        }
    }

    /// Recorded milestones in ascending date order. Equal dates keep their
    /// declaration order.
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        let mut entries: Vec<TimelineEntry> = Milestone::ALL
            .into_iter()
            .filter_map(|milestone| {
                self.milestone(milestone)
                    .map(|date| TimelineEntry { milestone, date })
            })
            .collect();
        entries.sort_by_key(|e| e.date);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn timeline_skips_missing_and_sorts_ascending() {
        let details = DossierDetails {
            date_cloture: ymd(2024, 3, 1),
            date_reception: ymd(2024, 1, 15),
            date_entendu: ymd(2024, 2, 10),
            ..DossierDetails::default()
        };

        let timeline = details.timeline();
        let order: Vec<Milestone> = timeline.iter().map(|e| e.milestone).collect();
        assert_eq!(
            order,
            vec![Milestone::Reception, Milestone::Entendu, Milestone::Cloture]
        );
    }

    #[test]
    fn empty_details_have_empty_timeline() {
        assert!(DossierDetails::default().timeline().is_empty());
    }

    #[test]
    fn labels_follow_locale() {
        assert_eq!(Milestone::Cloture.label(Lang::Fr), "Date de clôture");
        assert_eq!(Milestone::Cloture.label(Lang::En), "Closing date");
    }
}
