//! LuxuryEstate lead notifications (English or Italian template).

use std::sync::OnceLock;

use crate::models::LeadFields;
use crate::parser::rules::{LeadField, RuleSet, RuleTable};

const RULES: &RuleTable = &[
    (
        LeadField::Name,
        &[
            r"(?mi)^[ \t]*Name[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Nome(?: e cognome)?[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Email,
        &[r"(?mi)^[ \t]*E-?mail[ \t]*:[ \t]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})"],
    ),
    (
        LeadField::Phone,
        &[
            r"(?mi)^[ \t]*Phone[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
            r"(?mi)^[ \t]*Telefono[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
        ],
    ),
    (
        LeadField::PropertyReference,
        &[
            r"(?mi)^[ \t]*Property code[ \t]*:[ \t]*(\S+)",
            r"(?mi)^[ \t]*Codice(?: annuncio)?[ \t]*:[ \t]*(\S+)",
            r"(?mi)^[ \t]*Reference[ \t]*:[ \t]*(\S+)",
        ],
    ),
    (
        LeadField::ExternalId,
        &[r"(?i)luxuryestate\.com/p(\d+)"],
    ),
    (
        LeadField::PropertyType,
        &[
            r"(?mi)^[ \t]*Property type[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Tipologia[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::DesiredLocation,
        &[
            r"(?mi)^[ \t]*Location[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Localit[àa][ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Country,
        &[
            r"(?mi)^[ \t]*Country[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Nazione[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Budget,
        &[
            r"(?mi)^[ \t]*Price[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Prezzo[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Message,
        &[
            r"(?msi)^[ \t]*Message[ \t]*:[ \t]*(.+?)(?:\r?\n[ \t]*\r?\n|\z)",
            r"(?msi)^[ \t]*Messaggio[ \t]*:[ \t]*(.+?)(?:\r?\n[ \t]*\r?\n|\z)",
        ],
    ),
];

static RULE_SET: OnceLock<RuleSet> = OnceLock::new();

pub(crate) fn rules() -> &'static RuleSet {
    RULE_SET.get_or_init(|| RuleSet::compile("luxury_estate", RULES))
}

/// Extract lead fields from a LuxuryEstate notification.
pub fn parse_luxury_estate_email(raw: &str) -> LeadFields {
    rules().extract(raw)
}
