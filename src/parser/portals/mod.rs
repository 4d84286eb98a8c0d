//! Per-portal extractors.
//!
//! Each submodule owns one rule table plus whatever post-processing its
//! layout needs. [`extractor_for`] is the dispatch table used by the
//! orchestrator; adding a portal means adding a module and a row here.

pub mod belles_demeures;
pub mod generic;
pub mod idealista;
pub mod james_edition;
pub mod le_figaro;
pub mod luxury_estate;
pub mod properstar;
pub mod property_cloud;
pub mod seloger;

pub use belles_demeures::parse_belles_demeures_email;
pub use generic::parse_generic_email;
pub use idealista::parse_idealista_email;
pub use james_edition::parse_james_edition_email;
pub use le_figaro::parse_le_figaro_email;
pub use luxury_estate::parse_luxury_estate_email;
pub use properstar::parse_properstar_email;
pub use property_cloud::parse_property_cloud_email;
pub use seloger::parse_seloger_email;

use crate::models::{LeadFields, PortalType};

/// Signature shared by every extractor: raw email text in, partial record out.
pub type Extractor = fn(&str) -> LeadFields;

/// Extractor responsible for emails detected as `portal`.
pub fn extractor_for(portal: PortalType) -> Extractor {
    match portal {
        PortalType::LeFigaro => parse_le_figaro_email,
        PortalType::Idealista => parse_idealista_email,
        PortalType::Properstar => parse_properstar_email,
        PortalType::PropertyCloud => parse_property_cloud_email,
        PortalType::SeLoger => parse_seloger_email,
        PortalType::LuxuryEstate => parse_luxury_estate_email,
        PortalType::JamesEdition => parse_james_edition_email,
        PortalType::BellesDemeures => parse_belles_demeures_email,
        PortalType::Generic => parse_generic_email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::rules::RuleSet;

    fn all_rule_sets() -> Vec<&'static RuleSet> {
        vec![
            le_figaro::rules(),
            idealista::rules(),
            properstar::rules(),
            property_cloud::rules(),
            seloger::rules(),
            luxury_estate::rules(),
            james_edition::rules(),
            belles_demeures::rules(),
            generic::rules(),
        ]
    }

    #[test]
    fn every_table_compiles() {
        let names: Vec<&str> = all_rule_sets().iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn extractors_never_write_empty_values() {
        let blank_labels = "Name: \nNom : \nEmail: \nPhone: \nBudget: \nMessage: \n\n";
        for portal in PortalType::ALL {
            let lead = extractor_for(portal)(blank_labels);
            let json = serde_json::to_value(&lead).unwrap();
            for (key, value) in json.as_object().unwrap() {
                assert_ne!(value, "", "{portal} wrote empty {key}");
            }
        }
    }

    #[test]
    fn every_extractor_handles_empty_input() {
        for portal in PortalType::ALL {
            assert!(extractor_for(portal)("").is_empty(), "{portal}");
        }
    }
}
