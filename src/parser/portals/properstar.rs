//! Properstar lead notifications.
//!
//! Contact block first, then the listing reference and an optional summary
//! line carrying suffixed units (`180 m²`, `4 bedrooms`).

use std::sync::OnceLock;

use crate::models::LeadFields;
use crate::parser::rules::{LeadField, RuleSet, RuleTable};

const RULES: &RuleTable = &[
    (
        LeadField::Name,
        &[
            r"(?mi)^[ \t]*Name[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Full name[ \t]*:[ \t]*(\S.*)$",
            r"(?mi)^[ \t]*Nom[ \t]*:[ \t]*(\S.*)$",
        ],
    ),
    (
        LeadField::Email,
        &[r"(?mi)^[ \t]*E-?mail(?: address)?[ \t]*:[ \t]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})"],
    ),
    (
        LeadField::Phone,
        &[
            r"(?mi)^[ \t]*Phone(?: number)?[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
            r"(?mi)^[ \t]*(?:Telephone|T[ée]l[ée]phone)[ \t]*:[ \t]*(\+?\d[\d \t().-]*\d)",
        ],
    ),
    (
        LeadField::PropertyReference,
        &[
            r"(?mi)^[ \t]*Property reference[ \t]*:[ \t]*(\S+)",
            r"(?mi)^[ \t]*Reference[ \t]*:[ \t]*(\S+)",
            r"(?mi)^[ \t]*R[ée]f[ée]rence[ \t]*:[ \t]*(\S+)",
        ],
    ),
    (
        LeadField::ExternalId,
        &[r"(?i)properstar\.[a-z.]+/listing/(\d+)"],
    ),
    (
        LeadField::PropertyType,
        &[r"(?mi)^[ \t]*Property type[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::DesiredLocation,
        &[r"(?mi)^[ \t]*(?:Location|City)[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::Country,
        &[r"(?mi)^[ \t]*Country[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::Budget,
        &[r"(?mi)^[ \t]*(?:Budget|Price)[ \t]*:[ \t]*(\S.*)$"],
    ),
    (
        LeadField::LivingArea,
        &[
            r"(?mi)^[ \t]*Living area[ \t]*:[ \t]*(\d(?:[\d \t.,]*\d)?)",
            r"(?i)\b(\d(?:[\d.,]*\d)?)[ \t]*(?:m²|m2|sqm)",
        ],
    ),
    (
        LeadField::Bedrooms,
        &[
            r"(?mi)^[ \t]*Bedrooms[ \t]*:[ \t]*(\d+)",
            r"(?i)\b(\d+)[ \t]*(?:bedrooms?|beds?)\b",
        ],
    ),
    (
        LeadField::Message,
        &[r"(?msi)^[ \t]*Message[ \t]*:[ \t]*(.+?)(?:\r?\n[ \t]*\r?\n|\z)"],
    ),
];

static RULE_SET: OnceLock<RuleSet> = OnceLock::new();

pub(crate) fn rules() -> &'static RuleSet {
    RULE_SET.get_or_init(|| RuleSet::compile("properstar", RULES))
}

/// Extract lead fields from a Properstar notification.
pub fn parse_properstar_email(raw: &str) -> LeadFields {
    rules().extract(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Properstar - New request for your property

Contact details
Name: John Smith
Email: john.smith@example.com
Phone: +44 7700 900123

Property reference: PS-998877
Villa, 180 m², 4 bedrooms
https://www.properstar.co.uk/listing/5550123

Message: I would like to arrange a viewing next week.
";

    #[test]
    fn extracts_contact_block() {
        let lead = parse_properstar_email(SAMPLE);
        assert_eq!(lead.name.as_deref(), Some("John Smith"));
        assert_eq!(lead.email.as_deref(), Some("john.smith@example.com"));
        assert_eq!(lead.phone.as_deref(), Some("+44 7700 900123"));
        assert_eq!(lead.property_reference.as_deref(), Some("PS-998877"));
        assert_eq!(lead.external_id.as_deref(), Some("5550123"));
    }

    #[test]
    fn suffixed_units_fill_area_and_bedrooms() {
        let lead = parse_properstar_email(SAMPLE);
        assert_eq!(lead.living_area.as_deref(), Some("180"));
        assert_eq!(lead.bedrooms, Some(4));
    }

    #[test]
    fn labelled_area_wins_over_suffix() {
        let raw = "Properstar\nLiving area: 95\nPlot 1200 m2\n";
        let lead = parse_properstar_email(raw);
        assert_eq!(lead.living_area.as_deref(), Some("95"));
    }

    #[test]
    fn message_runs_to_blank_line() {
        let lead = parse_properstar_email(SAMPLE);
        assert_eq!(
            lead.message.as_deref(),
            Some("I would like to arrange a viewing next week.")
        );
    }
}
