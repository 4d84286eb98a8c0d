//! Belles Demeures lead notifications.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::LeadFields;
use crate::parser::rules::{LeadField, RuleSet, RuleTable, cached, capture};
use crate::parser::text::{format_budget, split_list};

const RULES: &RuleTable = &[
    (
        LeadField::Name,
        &[
            r"(?mi)^[ \t]*Nom[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Contact[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Email,
        &[r"(?mi)^[ \t]*(?:E-?mail|Courriel)[ \t]*:[ \t]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})"],
    ),
    (
        LeadField::Phone,
        &[r"(?mi)^[ \t]*T[ée]l(?:[ée]phone)?\.?[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)"],
    ),
    (
        LeadField::PropertyReference,
        &[r"(?mi)^[ \t]*R[ée]f[ée]rence[ \t]*:[ \t]*(\S+)"],
    ),
    (
        LeadField::ExternalId,
        &[r"(?i)bellesdemeures\.com/[^\s]*?(\d{5,})"],
    ),
    (
        LeadField::PropertyType,
        &[r"(?mi)^[ \t]*(?:Type de bien|Bien)[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::DesiredLocation,
        &[
            r"(?mi)^[ \t]*Ville[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Secteur[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Country,
        &[r"(?mi)^[ \t]*Pays[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::Budget,
        &[r"(?mi)^[ \t]*Budget[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::LivingArea,
        &[r"(?mi)^[ \t]*Surface[ \t]*:[ \t]*(\d(?:[\d \t.,]*\d)?)"],
    ),
    (
        LeadField::Bedrooms,
        &[r"(?mi)^[ \t]*Chambres[ \t]*:[ \t]*(\d+)"],
    ),
    (
        LeadField::Message,
        &[
            r"(?msi)^[ \t]*Demande[ \t]*:[ \t]*(.+?)(?:\r?\n[ \t]*\r?\n|\z)",
            r"(?msi)^[ \t]*Message[ \t]*:[ \t]*(.+?)(?:\r?\n[ \t]*\r?\n|\z)",
        ],
    ),
];

static RULE_SET: OnceLock<RuleSet> = OnceLock::new();
static AMENITIES_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn rules() -> &'static RuleSet {
    RULE_SET.get_or_init(|| RuleSet::compile("belles_demeures", RULES))
}

/// Extract lead fields from a Belles Demeures notification.
pub fn parse_belles_demeures_email(raw: &str) -> LeadFields {
    let mut lead = rules().extract(raw);

    if let Some(list) = capture(
        cached(&AMENITIES_REGEX, r"(?mi)^[ \t]*Prestations[ \t]*:[ \t]*(\S.*)$"),
        raw,
    ) {
        let amenities = split_list(list);
        if !amenities.is_empty() {
            lead.amenities = Some(amenities);
        }
    }

    if let Some(budget) = lead.budget.take() {
        lead.budget = format_budget(&budget);
    }

    lead
}
