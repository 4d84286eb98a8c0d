//! idealista lead notifications.
//!
//! idealista sends the same template in Spanish, French or English depending
//! on the advertiser's locale, so every field lists its label in all three
//! languages, Spanish first.

use std::sync::OnceLock;

use crate::models::LeadFields;
use crate::parser::rules::{LeadField, RuleSet, RuleTable};
use crate::parser::text::format_budget;

const RULES: &RuleTable = &[
    (
        LeadField::Name,
        &[
            r"(?mi)^[ \t]*Nombre[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Nom[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Name[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Email,
        &[
            r"(?mi)^[ \t]*Correo(?: electr[óo]nico)?[ \t]*:[ \t]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
            r"(?mi)^[ \t]*(?:Courriel|Adresse e-?mail)[ \t]*:[ \t]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
            r"(?mi)^[ \t]*E-?mail[ \t]*:[ \t]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
        ],
    ),
    (
        LeadField::Phone,
        &[
            r"(?mi)^[ \t]*Tel[ée]fono[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
            r"(?mi)^[ \t]*T[ée]l[ée]phone[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
            r"(?mi)^[ \t]*(?:Phone|Telephone)[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
        ],
    ),
    (
        LeadField::PropertyReference,
        &[
            r"(?mi)^[ \t]*Referencia(?: del anuncio)?[ \t]*:[ \t]*(\S+)",
            r"(?mi)^[ \t]*R[ée]f[ée]rence(?: de l'annonce)?[ \t]*:[ \t]*(\S+)",
            r"(?mi)^[ \t]*(?:Property )?Reference[ \t]*:[ \t]*(\S+)",
        ],
    ),
    (
        LeadField::ExternalId,
        &[r"(?i)idealista\.com/(?:[a-z]{2}/)?inmueble/(\d+)"],
    ),
    (
        LeadField::PropertyType,
        &[
            r"(?mi)^[ \t]*Tipo(?: de inmueble)?[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Type de bien[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Property type[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::DesiredLocation,
        &[
            r"(?mi)^[ \t]*(?:Zona|Ubicaci[óo]n)[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*(?:Localisation|Ville)[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*(?:Location|Area)[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Country,
        &[
            r"(?mi)^[ \t]*Pa[íi]s[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Country[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Budget,
        &[
            r"(?mi)^[ \t]*Presupuesto[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Budget[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*(?:Precio|Prix|Price)[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Bedrooms,
        &[
            r"(?mi)^[ \t]*Habitaciones[ \t]*:[ \t]*(\d+)",
            r"(?mi)^[ \t]*Chambres[ \t]*:[ \t]*(\d+)",
            r"(?mi)^[ \t]*Bedrooms[ \t]*:[ \t]*(\d+)",
        ],
    ),
    (
        LeadField::LivingArea,
        &[
            r"(?mi)^[ \t]*(?:Superficie|Surface|Size)[ \t]*:[ \t]*(\d(?:[\d \t.,]*\d)?)",
        ],
    ),
    (
        LeadField::Message,
        &[
            r"(?msi)^[ \t]*Mensaje[ \t]*:[ \t]*(.+?)(?:\r?\n[ \t]*\r?\n|\z)",
            r"(?msi)^[ \t]*Message[ \t]*:[ \t]*(.+?)(?:\r?\n[ \t]*\r?\n|\z)",
        ],
    ),
];

static RULE_SET: OnceLock<RuleSet> = OnceLock::new();

pub(crate) fn rules() -> &'static RuleSet {
    RULE_SET.get_or_init(|| RuleSet::compile("idealista", RULES))
}

/// Extract lead fields from an idealista notification.
pub fn parse_idealista_email(raw: &str) -> LeadFields {
    let mut lead = rules().extract(raw);
    if let Some(budget) = lead.budget.take() {
        lead.budget = format_budget(&budget);
    }
    lead
}
