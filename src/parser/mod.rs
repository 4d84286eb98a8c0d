//! Lead email parsing.
//!
//! Turns the text of a portal lead notification into a [`ParsedLeadData`]
//! record. The pipeline is a chain of total functions:
//!
//! 1. **Detection** ([`detect_portal_source`]): classify the email by sender
//!    signature. Unknown senders map to `Generic`.
//! 2. **Extraction** ([`portals::extractor_for`]): the portal's rule table
//!    runs top to bottom, first match wins per field. The result is a
//!    partial record holding only the fields that were found.
//! 3. **Merge** ([`parse_email_content`]): the partial record is merged into
//!    a base record that already carries `integration_source`,
//!    `portal_name`, `source` and `raw_content`.
//!
//! Normalization (currency and unit suffixes, phone spacing) is deliberately
//! not part of this chain; callers run [`crate::normalizer::normalize_lead_data`]
//! themselves once they have inspected the raw values.
//!
//! Nothing here fails. A field the extractor cannot find is simply absent.

pub mod detector;
pub mod portals;
pub mod rules;
pub mod text;

pub use detector::detect_portal_source;
pub use portals::extractor_for;

use crate::models::{LeadFields, ParsedLeadData, PortalType};

/// Parse one lead-notification email.
pub fn parse_email_content(raw: &str) -> ParsedLeadData {
    let portal = detect_portal_source(raw);
    log::debug!("detected portal {} ({} bytes)", portal, raw.len());

    let fields = extract_fields(raw, portal);
    let mut record = ParsedLeadData::new(raw, portal);
    record.fields.merge(fields);

    log::trace!(
        "parsed {} lead: name={:?} email={:?}",
        record.portal_name,
        record.fields.name,
        record.fields.email
    );

    record
}

/// Run the extractor registered for `portal` without detection.
pub fn extract_fields(raw: &str, portal: PortalType) -> LeadFields {
    extractor_for(portal)(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::INTEGRATION_SOURCE;

    #[test]
    fn empty_input_is_tagged_generic() {
        let record = parse_email_content("");
        assert_eq!(record.integration_source, INTEGRATION_SOURCE);
        assert_eq!(record.portal_name, PortalType::Generic);
        assert_eq!(record.source, PortalType::Generic);
        assert_eq!(record.raw_content.as_deref(), Some(""));
        assert!(record.fields.is_empty());
    }

    #[test]
    fn le_figaro_scenario() {
        let raw = "Nouvelle demande via Le Figaro Propriétés\nNom : Jean Dupont\nPays : France\n";
        let record = parse_email_content(raw);

        assert_eq!(record.portal_name, PortalType::LeFigaro);
        assert_eq!(record.source, PortalType::LeFigaro);
        assert_eq!(record.integration_source, "Email Parser");
        assert_eq!(record.fields.name.as_deref(), Some("Jean Dupont"));
        assert_eq!(record.fields.country.as_deref(), Some("France"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["portal_name"], "Le Figaro");
        assert_eq!(json["source"], "Le Figaro");
    }

    #[test]
    fn unknown_sender_uses_generic_fallback() {
        let record = parse_email_content("Write to contact@example.com");
        assert_eq!(record.portal_name, PortalType::Generic);
        assert_eq!(record.fields.email.as_deref(), Some("contact@example.com"));
        assert_eq!(record.fields.name.as_deref(), Some("Contact"));
    }

    #[test]
    fn raw_content_is_verbatim() {
        let raw = "  idealista\r\nNombre: Ana  \r\n";
        let record = parse_email_content(raw);
        assert_eq!(record.raw_content.as_deref(), Some(raw));
        assert_eq!(record.fields.name.as_deref(), Some("Ana"));
    }

    #[test]
    fn parsing_does_not_normalize() {
        let record = parse_email_content("Budget: 300000\nEmail: a@example.com\n");
        assert_eq!(record.fields.budget.as_deref(), Some("300000"));
    }
}
