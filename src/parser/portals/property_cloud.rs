//! Property Cloud lead notifications.
//!
//! Same shape as Properstar's (contact block, reference line, suffixed
//! units) but every label is prefixed or worded differently, so the table is
//! kept separate.

use std::sync::OnceLock;

use crate::models::LeadFields;
use crate::parser::rules::{LeadField, RuleSet, RuleTable};

const RULES: &RuleTable = &[
    (
        LeadField::Name,
        &[
            r"(?mi)^[ \t]*Contact name[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Enquirer[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Name[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Email,
        &[
            r"(?mi)^[ \t]*Contact e-?mail[ \t]*:[ \t]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
            r"(?mi)^[ \t]*E-?mail[ \t]*:[ \t]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
        ],
    ),
    (
        LeadField::Phone,
        &[
            r"(?mi)^[ \t]*Contact (?:phone|number)[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
            r"(?mi)^[ \t]*(?:Phone|Mobile)[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
        ],
    ),
    (
        LeadField::PropertyReference,
        &[
            r"(?mi)^[ \t]*Listing ref(?:erence)?\.?[ \t]*:[ \t]*(\S+)",
            r"(?mi)^[ \t]*Agent ref(?:erence)?\.?[ \t]*:[ \t]*(\S+)",
        ],
    ),
    (
        LeadField::ExternalId,
        &[
            r"(?mi)^[ \t]*Listing ID[ \t]*:[ \t]*(\S+)",
            r"(?i)propertycloud\.[a-z.]+/(?:property|listing)/(\d+)",
        ],
    ),
    (
        LeadField::PropertyType,
        &[r"(?mi)^[ \t]*(?:Property|Type)[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::DesiredLocation,
        &[r"(?mi)^[ \t]*(?:Area|Region)[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::Country,
        &[r"(?mi)^[ \t]*Country[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::Budget,
        &[r"(?mi)^[ \t]*(?:Max(?:imum)? budget|Budget)[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::LivingArea,
        &[
            r"(?mi)^[ \t]*(?:Size|Internal area)[ \t]*:[ \t]*(\d(?:[\d \t.,]*\d)?)",
            r"(?i)\b(\d(?:[\d.,]*\d)?)[ \t]*(?:m²|m2|sqm|sq\.? ?m)",
        ],
    ),
    (
        LeadField::Bedrooms,
        &[
            r"(?mi)^[ \t]*Beds[ \t]*:[ \t]*(\d+)",
            r"(?i)\b(\d+)[ \t]*(?:-[ \t]*)?bed(?:room)?s?\b",
        ],
    ),
    (
        LeadField::Message,
        &[
            r"(?msi)^[ \t]*Enquiry[ \t]*:[ \t]*(.+?)(?:\r?\n[ \t]*\r?\n|\z)",
            r"(?msi)^[ \t]*Comments[ \t]*:[ \t]*(.+?)(?:\r?\n[ \t]*\r?\n|\z)",
        ],
    ),
];

static RULE_SET: OnceLock<RuleSet> = OnceLock::new();

pub(crate) fn rules() -> &'static RuleSet {
    RULE_SET.get_or_init(|| RuleSet::compile("property_cloud", RULES))
}

/// Extract lead fields from a Property Cloud notification.
pub fn parse_property_cloud_email(raw: &str) -> LeadFields {
    rules().extract(raw)
}
