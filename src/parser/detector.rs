//! Portal detection.
//!
//! Classifies an email by looking for sender signatures (brand names and
//! outbound mail host fragments) in its lower-cased text. Portals are checked
//! in a fixed order and the first hit wins, so adding a signature can never
//! silently reclassify emails owned by an earlier portal.

use crate::models::PortalType;

/// Lower-case signatures per portal, in detection priority order.
pub const PORTAL_SIGNATURES: &[(PortalType, &[&str])] = &[
    (
        PortalType::LeFigaro,
        &["lefigaro", "le figaro", "figaro immobilier"],
    ),
    (PortalType::Idealista, &["idealista"]),
    (PortalType::Properstar, &["properstar"]),
    (PortalType::PropertyCloud, &["propertycloud", "property cloud"]),
    (PortalType::SeLoger, &["seloger"]),
    (PortalType::LuxuryEstate, &["luxuryestate", "luxury estate"]),
    (PortalType::JamesEdition, &["jamesedition", "james edition"]),
    (
        PortalType::BellesDemeures,
        &["bellesdemeures", "belles demeures"],
    ),
];

/// Classify raw email text. Never fails: unknown senders map to `Generic`.
pub fn detect_portal_source(raw: &str) -> PortalType {
    let lowered = raw.to_lowercase();

    PORTAL_SIGNATURES
        .iter()
        .find(|(_, signatures)| signatures.iter().any(|sig| lowered.contains(sig)))
        .map(|(portal, _)| *portal)
        .unwrap_or(PortalType::Generic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_portal() {
        let samples = [
            ("De : Le Figaro Propriétés", PortalType::LeFigaro),
            ("noreply@idealista.com", PortalType::Idealista),
            ("New lead via Properstar", PortalType::Properstar),
            ("leads@propertycloud.io", PortalType::PropertyCloud),
            ("contact@ml.seloger.com", PortalType::SeLoger),
            ("LuxuryEstate.com inquiry", PortalType::LuxuryEstate),
            ("James Edition buyer request", PortalType::JamesEdition),
            ("www.bellesdemeures.com", PortalType::BellesDemeures),
        ];

        for (text, expected) in samples {
            assert_eq!(detect_portal_source(text), expected, "{text}");
        }
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert_eq!(detect_portal_source("IDEALISTA"), PortalType::Idealista);
    }

    #[test]
    fn unknown_and_empty_are_generic() {
        assert_eq!(detect_portal_source(""), PortalType::Generic);
        assert_eq!(
            detect_portal_source("Hello, please call me back"),
            PortalType::Generic
        );
    }

    #[test]
    fn earlier_portal_wins_on_overlap() {
        let text = "Annonce relayée par Le Figaro, également sur SeLoger";
        assert_eq!(detect_portal_source(text), PortalType::LeFigaro);
    }

    #[test]
    fn signature_table_covers_every_named_portal() {
        for portal in PortalType::ALL {
            let listed = PORTAL_SIGNATURES.iter().any(|(p, _)| *p == portal);
            assert_eq!(listed, portal != PortalType::Generic, "{portal}");
        }
    }
}
