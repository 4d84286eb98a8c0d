//! Fallback extractor for emails from unknown senders.
//!
//! Tries a broad multilingual label table first. Whatever is still missing
//! afterwards is recovered heuristically: the first email-shaped substring,
//! the first phone-shaped substring, and finally a display name built from
//! the email's local part.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::LeadFields;
use crate::parser::rules::{LeadField, RuleSet, RuleTable, cached, fill};
use crate::parser::text::{digits, format_budget, name_from_email};

/// Minimum digit count for a loose phone match; shorter runs are usually
/// prices or references.
const MIN_PHONE_DIGITS: usize = 8;
/// Without a `+`, `0` or `(` prefix a loose match needs this many digits;
/// eight-digit runs are mostly dates.
const MIN_UNPREFIXED_PHONE_DIGITS: usize = 9;

const RULES: &RuleTable = &[
    (
        LeadField::Name,
        &[
            r"(?mi)^[ \t]*(?:Full name|Name|Contact name)[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*(?:Nom(?: complet)?|Nombre)[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Email,
        &[
            r"(?mi)^[ \t]*(?:E-?mail(?: address)?|Courriel|Correo)[ \t]*:[ \t]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
        ],
    ),
    (
        LeadField::Phone,
        &[
            r"(?mi)^[ \t]*(?:Phone|Telephone|Mobile|Tel)[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
            r"(?mi)^[ \t]*(?:T[ée]l[ée]phone|T[ée]l\.?|Portable|Tel[ée]fono)[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
        ],
    ),
    (
        LeadField::PropertyReference,
        &[
            r"(?mi)^[ \t]*(?:Property reference|Reference|Ref\.?)[ \t]*:[ \t]*(\S+)",
            r"(?mi)^[ \t]*(?:R[ée]f[ée]rence|R[ée]f\.?|Referencia)[ \t]*:[ \t]*(\S+)",
        ],
    ),
    (
        LeadField::PropertyType,
        &[r"(?mi)^[ \t]*(?:Property type|Type de bien)[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::DesiredLocation,
        &[r"(?mi)^[ \t]*(?:Location|Localisation|Ville|City)[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::Country,
        &[r"(?mi)^[ \t]*(?:Country|Pays)[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::Budget,
        &[r"(?mi)^[ \t]*Budget[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::LivingArea,
        &[r"(?mi)^[ \t]*(?:Living area|Surface|Area)[ \t]*:[ \t]*(\d(?:[\d \t.,]*\d)?)"],
    ),
    (
        LeadField::Bedrooms,
        &[r"(?mi)^[ \t]*(?:Bedrooms|Chambres)[ \t]*:[ \t]*(\d+)"],
    ),
    (
        LeadField::Message,
        &[r"(?msi)^[ \t]*(?:Message|Comments?)[ \t]*:[ \t]*(.+?)(?:\r?\n[ \t]*\r?\n|\z)"],
    ),
];

static RULE_SET: OnceLock<RuleSet> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
static DATE_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn rules() -> &'static RuleSet {
    RULE_SET.get_or_init(|| RuleSet::compile("generic", RULES))
}

/// Extract whatever can be found in an email from an unknown sender.
pub fn parse_generic_email(raw: &str) -> LeadFields {
    let mut lead = rules().extract(raw);

    if lead.email.is_none() {
        if let Some(found) = find_email(raw) {
            fill(&mut lead.email, found);
        }
    }

    if lead.phone.is_none() {
        if let Some(found) = find_phone(raw) {
            fill(&mut lead.phone, found);
        }
    }

    if lead.name.is_none() {
        if let Some(name) = lead.email.as_deref().and_then(name_from_email) {
            lead.name = Some(name);
        }
    }

    if let Some(budget) = lead.budget.take() {
        lead.budget = format_budget(&budget);
    }

    lead
}

fn find_email(raw: &str) -> Option<&str> {
    cached(
        &EMAIL_REGEX,
        r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
    )
    .find(raw)
    .map(|m| m.as_str())
}

fn find_phone(raw: &str) -> Option<&str> {
    cached(&PHONE_REGEX, r"\+?\(?\d[\d \t().-]{6,}\d")
        .find_iter(raw)
        .map(|m| m.as_str().trim())
        .find(|candidate| looks_like_phone(candidate))
}

fn looks_like_phone(candidate: &str) -> bool {
    let count = digits(candidate).len();
    if count < MIN_PHONE_DIGITS {
        return false;
    }
    if cached(&DATE_REGEX, r"^(?:\d{4}[-./]\d{1,2}[-./]\d{1,2}|\d{1,2}[-./]\d{1,2}[-./]\d{4})$")
        .is_match(candidate)
    {
        return false;
    }
    candidate.starts_with(['+', '0', '(']) || count >= MIN_UNPREFIXED_PHONE_DIGITS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_email_yields_email_and_name() {
        let lead = parse_generic_email("Please get back to me at contact@example.com, thanks");
        assert_eq!(lead.email.as_deref(), Some("contact@example.com"));
        assert_eq!(lead.name.as_deref(), Some("Contact"));
    }

    #[test]
    fn labelled_fields_take_priority() {
        let raw = "Name: Laura Palmer\nEmail: laura@example.com\nsecond: other@example.com\nPhone: +1 555 010 9999\n";
        let lead = parse_generic_email(raw);
        assert_eq!(lead.name.as_deref(), Some("Laura Palmer"));
        assert_eq!(lead.email.as_deref(), Some("laura@example.com"));
        assert_eq!(lead.phone.as_deref(), Some("+1 555 010 9999"));
    }

    #[test]
    fn loose_phone_is_found() {
        let lead = parse_generic_email("Call me on +33 6 12 34 56 78 after 6pm");
        assert_eq!(lead.phone.as_deref(), Some("+33 6 12 34 56 78"));
    }

    #[test]
    fn short_numbers_are_not_phones() {
        let lead = parse_generic_email("Visit on 12/05 at 14.30, budget 350000");
        assert!(lead.phone.is_none());
    }

    #[test]
    fn name_synthesised_from_dotted_local_part() {
        let lead = parse_generic_email("reply to pierre_andre.durand@example.org");
        assert_eq!(lead.name.as_deref(), Some("Pierre Andre Durand"));
    }

    #[test]
    fn message_label_inside_subject_is_ignored() {
        let raw = "Subject: Message: website contact\n\nEmail: a@example.com\nMessage: I would like a visit\n";
        let lead = parse_generic_email(raw);
        assert_eq!(lead.message.as_deref(), Some("I would like a visit"));
    }

    #[test]
    fn dates_are_not_phones() {
        let lead = parse_generic_email("Visit requested for 2024-05-12, reply to a@example.com");
        assert!(lead.phone.is_none());

        let lead = parse_generic_email("Available from 12.05.2024 onwards");
        assert!(lead.phone.is_none());
    }

    #[test]
    fn national_and_long_numbers_are_phones() {
        let lead = parse_generic_email("call 06 12 34 56 78 please");
        assert_eq!(lead.phone.as_deref(), Some("06 12 34 56 78"));

        let lead = parse_generic_email("cell 555 010 9999");
        assert_eq!(lead.phone.as_deref(), Some("555 010 9999"));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_generic_email("").is_empty());
    }
}
