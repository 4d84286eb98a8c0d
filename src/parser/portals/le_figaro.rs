//! Le Figaro Propriétés lead notifications.
//!
//! Client details arrive as a bulleted list (`• Nom : Jean Dupont`), the
//! buyer's note sits between `Message du client` and a `---` line, and the
//! listing link encodes the transaction, property type and country as path
//! segments: `/annonces/vente-villa/france/cannes/12345`.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

use crate::models::LeadFields;
use crate::parser::rules::{LeadField, RuleSet, RuleTable, cached, fill};
use crate::parser::text::{format_budget, title_from_slug};

const RULES: &RuleTable = &[
    (
        LeadField::Name,
        &[
            r"(?mi)^[ \t]*(?:•[ \t]*)?Nom(?: complet)?[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*(?:•[ \t]*)?Name[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Email,
        &[
            r"(?mi)^[ \t]*(?:•[ \t]*)?(?:E-?mail|Courriel)[ \t]*:[ \t]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
        ],
    ),
    (
        LeadField::Phone,
        &[
            r"(?mi)^[ \t]*(?:•[ \t]*)?T[ée]l[ée]phone[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
            r"(?mi)^[ \t]*(?:•[ \t]*)?T[ée]l\.?[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
        ],
    ),
    (
        LeadField::Country,
        &[
            r"(?mi)^[ \t]*(?:•[ \t]*)?Pays[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*(?:•[ \t]*)?Country[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::DesiredLocation,
        &[
            r"(?mi)^[ \t]*(?:•[ \t]*)?Localisation(?: souhaitée)?[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*(?:•[ \t]*)?Ville[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*(?:•[ \t]*)?Lieu[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Budget,
        &[r"(?mi)^[ \t]*(?:•[ \t]*)?Budget(?: maximum)?[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::PropertyReference,
        &[
            r"(?mi)^[ \t]*(?:•[ \t]*)?R[ée]f[ée]rence(?: de l'annonce)?[ \t]*:[ \t]*(\S+)",
            r"(?mi)^[ \t]*(?:•[ \t]*)?R[ée]f\.?[ \t]*:[ \t]*(\S+)",
        ],
    ),
    (
        LeadField::PropertyType,
        &[r"(?mi)^[ \t]*(?:•[ \t]*)?Type(?: de bien)?[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::LivingArea,
        &[r"(?mi)^[ \t]*(?:•[ \t]*)?Surface(?: habitable)?[ \t]*:[ \t]*(\d(?:[\d \t.,]*\d)?)"],
    ),
    (
        LeadField::Bedrooms,
        &[
            r"(?mi)^[ \t]*(?:•[ \t]*)?Chambres?[ \t]*:[ \t]*(\d+)",
            r"(?i)\b(\d+)[ \t]*chambres?\b",
        ],
    ),
    (
        LeadField::Message,
        &[
            r"(?msi)^[ \t]*(?:•[ \t]*)?Message du client[ \t]*:?[ \t]*\r?\n(.*?)\r?\n[ \t]*-{3,}",
            r"(?msi)^[ \t]*(?:•[ \t]*)?Description[ \t]*:?[ \t]*\r?\n(.*?)\r?\n[ \t]*-{3,}",
        ],
    ),
];

static RULE_SET: OnceLock<RuleSet> = OnceLock::new();
static LOCATION_COUNTRY_REGEX: OnceLock<Regex> = OnceLock::new();
static SEA_VIEW_REGEX: OnceLock<Regex> = OnceLock::new();
static LISTING_LINK_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn rules() -> &'static RuleSet {
    RULE_SET.get_or_init(|| RuleSet::compile("le_figaro", RULES))
}

/// Extract lead fields from a Le Figaro notification.
pub fn parse_le_figaro_email(raw: &str) -> LeadFields {
    let mut lead = rules().extract(raw);

    split_location_country(&mut lead);

    if let Some(budget) = lead.budget.take() {
        lead.budget = format_budget(&budget);
    }

    // Only the sea view phrase is recognised.
    if cached(&SEA_VIEW_REGEX, r"(?i)\bvue\s+(?:sur\s+(?:la\s+)?)?mer\b").is_match(raw) {
        lead.views = Some(vec!["Mer".to_string()]);
    }

    if let Some(link) = cached(
        &LISTING_LINK_REGEX,
        r#"(?i)https?://[^\s<>"')]*lefigaro\.fr\b[^\s<>"')]*"#,
    )
    .find(raw)
    {
        apply_listing_link(link.as_str(), &mut lead);
    }

    lead
}

/// `Cannes (France)` → location `Cannes`, country `France`. A country found
/// under its own label takes precedence.
fn split_location_country(lead: &mut LeadFields) {
    let Some(location) = lead.desired_location.clone() else {
        return;
    };
    let pattern = cached(&LOCATION_COUNTRY_REGEX, r"^(.+?)[ \t]*\(([^()]+)\)$");
    if let Some(caps) = pattern.captures(&location) {
        let place = caps[1].trim();
        if !place.is_empty() {
            lead.desired_location = Some(place.to_string());
        }
        fill(&mut lead.country, &caps[2]);
    }
}

fn apply_listing_link(link: &str, lead: &mut LeadFields) {
    let url = match Url::parse(link) {
        Ok(url) => url,
        Err(e) => {
            log::debug!("le_figaro: ignoring malformed listing link `{}`: {}", link, e);
            return;
        }
    };

    let Some(segments) = url.path_segments() else {
        return;
    };
    let segments: Vec<&str> = segments.filter(|s| !s.is_empty()).collect();

    if let Some(idx) = segments
        .iter()
        .position(|s| s.eq_ignore_ascii_case("annonces") || s.eq_ignore_ascii_case("annonce"))
    {
        if let Some((_, kind)) = segments.get(idx + 1).and_then(|s| s.split_once('-')) {
            if let Some(kind) = title_from_slug(kind) {
                fill(&mut lead.property_type, &kind);
            }
        }
        if let Some(country) = segments.get(idx + 2).and_then(|s| title_from_slug(s)) {
            fill(&mut lead.country, &country);
        }
    }

    if let Some(last) = segments.last() {
        let id = last.trim_end_matches(".html");
        if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
            fill(&mut lead.external_id, id);
        }
    }
}
