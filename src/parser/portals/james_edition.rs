//! JamesEdition buyer requests.
//!
//! Buyer details use `Buyer …` labels. The listing title and asking price
//! describe the advertised property rather than the buyer, so they go to the
//! extras bag instead of `property_type`/`budget`.

use std::sync::OnceLock;

use crate::models::LeadFields;
use crate::parser::rules::{LeadField, RuleSet, RuleTable};

const RULES: &RuleTable = &[
    (
        LeadField::Name,
        &[
            r"(?mi)^[ \t]*Buyer name[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Name[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Email,
        &[
            r"(?mi)^[ \t]*Buyer e-?mail[ \t]*:[ \t]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
            r"(?mi)^[ \t]*E-?mail[ \t]*:[ \t]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
        ],
    ),
    (
        LeadField::Phone,
        &[
            r"(?mi)^[ \t]*Buyer phone[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
            r"(?mi)^[ \t]*Phone[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
        ],
    ),
    (
        LeadField::Country,
        &[
            r"(?mi)^[ \t]*Buyer country[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Country[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::ExternalId,
        &[
            r"(?mi)^[ \t]*Listing ID[ \t]*:[ \t]*(\S+)",
            r"(?i)jamesedition\.com/[^\s]*?-(\d+)\b",
        ],
    ),
    (
        LeadField::PropertyReference,
        &[r"(?mi)^[ \t]*(?:Your reference|Agent reference)[ \t]*:[ \t]*(\S+)"],
    ),
    (
        LeadField::Extra("listing_title"),
        &[r"(?mi)^[ \t]*Listing[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::Extra("listing_price"),
        &[r"(?mi)^[ \t]*(?:Price|Asking price)[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::Message,
        &[r"(?msi)^[ \t]*Message[ \t]*:[ \t]*(.+?)(?:\r?\n[ \t]*\r?\n|\z)"],
    ),
];

static RULE_SET: OnceLock<RuleSet> = OnceLock::new();

pub(crate) fn rules() -> &'static RuleSet {
    RULE_SET.get_or_init(|| RuleSet::compile("james_edition", RULES))
}

/// Extract lead fields from a JamesEdition buyer request.
pub fn parse_james_edition_email(raw: &str) -> LeadFields {
    rules().extract(raw)
}
