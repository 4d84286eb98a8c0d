//! SeLoger lead notifications.
//!
//! The contact form splits the name into `Prénom` and `Nom`; both are joined
//! back into one display name. The buyer's project (purchase, rental...) and
//! the room count (`pièces`, which is not the bedroom count) are kept in the
//! extras bag.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::LeadFields;
use crate::parser::rules::{LeadField, RuleSet, RuleTable, cached, capture};
use crate::parser::text::format_budget;

const RULES: &RuleTable = &[
    (
        LeadField::Name,
        &[
            r"(?mi)^[ \t]*Nom[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Nom et pr[ée]nom[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Email,
        &[
            r"(?mi)^[ \t]*(?:E-?mail|Adresse e-?mail)[ \t]*:[ \t]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
        ],
    ),
    (
        LeadField::Phone,
        &[
            r"(?mi)^[ \t]*T[ée]l[ée]phone[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
            r"(?mi)^[ \t]*T[ée]l\.?[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
        ],
    ),
    (
        LeadField::PropertyReference,
        &[
            r"(?mi)^[ \t]*R[ée]f[ée]rence(?: de l'annonce)?[ \t]*:[ \t]*(\S+)",
            r"(?mi)^[ \t]*R[ée]f\.? annonce[ \t]*:[ \t]*(\S+)",
        ],
    ),
    (
        LeadField::ExternalId,
        &[r"(?i)seloger\.com/annonces/[^\s]*?/(\d+)\.htm"],
    ),
    (
        LeadField::PropertyType,
        &[r"(?mi)^[ \t]*Type de bien[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::DesiredLocation,
        &[
            r"(?mi)^[ \t]*Localisation[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Ville[ \t]*:[ \t]*(\S.*)$",
        ],
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
        LeadField::ExtraInteger("rooms"),
        &[r"(?mi)^[ \t]*(?:Nombre de )?Pi[èe]ces[ \t]*:[ \t]*(\d+)"],
    ),
    (
        LeadField::Extra("project"),
        &[r"(?mi)^[ \t]*Projet[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::Message,
        &[r"(?msi)^[ \t]*Message[ \t]*:[ \t]*(.+?)(?:\r?\n[ \t]*\r?\n|\z)"],
    ),
];

static RULE_SET: OnceLock<RuleSet> = OnceLock::new();
static FIRST_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn rules() -> &'static RuleSet {
    RULE_SET.get_or_init(|| RuleSet::compile("seloger", RULES))
}

/// Extract lead fields from a SeLoger notification.
pub fn parse_seloger_email(raw: &str) -> LeadFields {
    let mut lead = rules().extract(raw);

    let first_name = capture(
        cached(&FIRST_NAME_REGEX, r"(?mi)^[ \t]*Pr[ée]nom[ \t]*:[ \t]*(\S.*)$"),
        raw,
    );
    lead.name = match (first_name, lead.name.take()) {
        (Some(first), Some(last)) => Some(format!("{first} {last}")),
        (Some(first), None) => Some(first.to_string()),
        (None, last) => last,
    };

    if let Some(budget) = lead.budget.take() {
        lead.budget = format_budget(&budget);
    }

    lead
}
