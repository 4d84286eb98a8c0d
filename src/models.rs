use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fixed tag stamped on every record produced by this crate.
pub const INTEGRATION_SOURCE: &str = "Email Parser";

// ===== Portal Models =====

/// Known origin of a lead-notification email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PortalType {
    #[serde(rename = "Le Figaro")]
    LeFigaro,
    #[serde(rename = "Idealista")]
    Idealista,
    #[serde(rename = "Properstar")]
    Properstar,
    #[serde(rename = "Property Cloud")]
    PropertyCloud,
    #[serde(rename = "SeLoger")]
    SeLoger,
    #[serde(rename = "Luxury Estate")]
    LuxuryEstate,
    #[serde(rename = "James Edition")]
    JamesEdition,
    #[serde(rename = "Belles Demeures")]
    BellesDemeures,
    #[serde(rename = "Generic")]
    Generic,
}

impl PortalType {
    /// Every portal, in detection priority order, followed by `Generic`.
    pub const ALL: [PortalType; 9] = [
        PortalType::LeFigaro,
        PortalType::Idealista,
        PortalType::Properstar,
        PortalType::PropertyCloud,
        PortalType::SeLoger,
        PortalType::LuxuryEstate,
        PortalType::JamesEdition,
        PortalType::BellesDemeures,
        PortalType::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PortalType::LeFigaro => "Le Figaro",
            PortalType::Idealista => "Idealista",
            PortalType::Properstar => "Properstar",
            PortalType::PropertyCloud => "Property Cloud",
            PortalType::SeLoger => "SeLoger",
            PortalType::LuxuryEstate => "Luxury Estate",
            PortalType::JamesEdition => "James Edition",
            PortalType::BellesDemeures => "Belles Demeures",
            PortalType::Generic => "Generic",
        }
    }
}

impl fmt::Display for PortalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== Lead Models =====

/// Value stored in the portal-specific extras bag. Counts such as the
/// SeLoger room count are `Integer` so they serialize as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Integer(i64),
    Text(String),
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        ExtraValue::Text(value)
    }
}

impl From<i64> for ExtraValue {
    fn from(value: i64) -> Self {
        ExtraValue::Integer(value)
    }
}

/// Fields an extractor may discover. Everything is optional; absent fields
/// are skipped on serialization so consumers can test for key presence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub living_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(flatten)]
    pub extras: BTreeMap<String, ExtraValue>,
}

impl LeadFields {
    /// Copy every field present in `other` into `self`. Fields `other` does
    /// not carry are left untouched.
    pub fn merge(&mut self, other: LeadFields) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.name, other.name);
        take(&mut self.email, other.email);
        take(&mut self.phone, other.phone);
        take(&mut self.message, other.message);
        take(&mut self.property_reference, other.property_reference);
        take(&mut self.external_id, other.external_id);
        take(&mut self.property_type, other.property_type);
        take(&mut self.country, other.country);
        take(&mut self.desired_location, other.desired_location);
        take(&mut self.budget, other.budget);
        take(&mut self.living_area, other.living_area);
        take(&mut self.bedrooms, other.bedrooms);
        take(&mut self.views, other.views);
        take(&mut self.amenities, other.amenities);
        self.extras.extend(other.extras);
    }

    pub fn is_empty(&self) -> bool {
        *self == LeadFields::default()
    }
}

/// Complete lead record handed to the lead-creation API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLeadData {
    pub integration_source: String,
    pub portal_name: PortalType,
    pub source: PortalType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,
    #[serde(flatten)]
    pub fields: LeadFields,
}

impl ParsedLeadData {
    /// Base record for one inbound email, before any extractor has run.
    pub fn new(raw: &str, portal: PortalType) -> Self {
        Self {
            integration_source: INTEGRATION_SOURCE.to_string(),
            portal_name: portal,
            source: portal,
            raw_content: Some(raw.to_string()),
            fields: LeadFields::default(),
        }
    }
}
