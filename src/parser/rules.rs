//! Table-driven field extraction.
//!
//! Each portal describes its email layout as an ordered table of
//! `(field, patterns)` rows. A [`RuleSet`] compiles such a table once and
//! evaluates it against raw email text:
//!
//! - rows are visited top to bottom
//! - within a row, patterns are tried in order and the first one whose first
//!   capture group is non-empty after trimming wins
//! - a field that already holds a value is never overwritten, so a later row
//!   for the same field only acts as a fallback
//!
//! Integer fields only accept captures that parse as integers; anything else
//! counts as "no match" and the next pattern is tried.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{ExtraValue, LeadFields};

/// A lead attribute a rule can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadField {
    Name,
    Email,
    Phone,
    Message,
    PropertyReference,
    ExternalId,
    PropertyType,
    Country,
    DesiredLocation,
    Budget,
    LivingArea,
    Bedrooms,
    /// Portal-specific attribute stored in the extras bag under this key.
    Extra(&'static str),
    /// Like `Extra`, but only integer captures are accepted.
    ExtraInteger(&'static str),
}

/// Static description of a portal's rules: field plus ordered patterns.
pub type RuleTable = [(LeadField, &'static [&'static str])];

#[derive(Debug)]
struct FieldRule {
    field: LeadField,
    patterns: Vec<Regex>,
}

/// Compiled rule table for one portal.
#[derive(Debug)]
pub struct RuleSet {
    name: &'static str,
    rules: Vec<FieldRule>,
}

impl RuleSet {
    /// Compile a table, reporting the first invalid pattern.
    pub fn try_compile(name: &'static str, table: &RuleTable) -> Result<Self, regex::Error> {
        let mut rules = Vec::with_capacity(table.len());
        for (field, patterns) in table {
            let compiled = patterns
                .iter()
                .map(|pattern| Regex::new(pattern))
                .collect::<Result<Vec<_>, _>>()?;
            rules.push(FieldRule {
                field: *field,
                patterns: compiled,
            });
        }
        Ok(Self { name, rules })
    }

    /// Compile a built-in table. Tables are literals covered by tests, so an
    /// invalid pattern is a programming error.
    pub fn compile(name: &'static str, table: &RuleTable) -> Self {
        Self::try_compile(name, table)
            .unwrap_or_else(|e| panic!("invalid {name} extraction pattern: {e}"))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run every rule against `raw` into a fresh record.
    pub fn extract(&self, raw: &str) -> LeadFields {
        let mut lead = LeadFields::default();
        self.extract_into(raw, &mut lead);
        lead
    }

    /// Run every rule against `raw`, filling only fields `lead` lacks.
    pub fn extract_into(&self, raw: &str, lead: &mut LeadFields) {
        for rule in &self.rules {
            if is_set(lead, rule.field) {
                continue;
            }

            for pattern in &rule.patterns {
                let Some(value) = capture(pattern, raw) else {
                    continue;
                };
                if set_field(lead, rule.field, value) {
                    log::trace!(
                        "{}: {:?} matched by `{}`",
                        self.name,
                        rule.field,
                        pattern.as_str()
                    );
                    break;
                }
            }
        }
    }
}

/// First capture group of `pattern` in `text`, trimmed, if non-empty.
pub fn capture<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|value| !value.is_empty())
}

/// Lazily compile a module-level regex held in a `OnceLock`.
pub fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern).unwrap_or_else(|e| panic!("invalid pattern `{pattern}`: {e}"))
    })
}

/// Store a trimmed value in an empty text slot. Empty values are dropped.
pub fn fill(slot: &mut Option<String>, value: &str) -> bool {
    let value = value.trim();
    if slot.is_some() || value.is_empty() {
        return false;
    }
    *slot = Some(value.to_string());
    true
}

fn text_slot(lead: &mut LeadFields, field: LeadField) -> Option<&mut Option<String>> {
    let slot = match field {
        LeadField::Name => &mut lead.name,
        LeadField::Email => &mut lead.email,
        LeadField::Phone => &mut lead.phone,
        LeadField::Message => &mut lead.message,
        LeadField::PropertyReference => &mut lead.property_reference,
        LeadField::ExternalId => &mut lead.external_id,
        LeadField::PropertyType => &mut lead.property_type,
        LeadField::Country => &mut lead.country,
        LeadField::DesiredLocation => &mut lead.desired_location,
        LeadField::Budget => &mut lead.budget,
        LeadField::LivingArea => &mut lead.living_area,
        LeadField::Bedrooms | LeadField::Extra(_) | LeadField::ExtraInteger(_) => return None,
    };
    Some(slot)
}

fn is_set(lead: &LeadFields, field: LeadField) -> bool {
    match field {
        LeadField::Name => lead.name.is_some(),
        LeadField::Email => lead.email.is_some(),
        LeadField::Phone => lead.phone.is_some(),
        LeadField::Message => lead.message.is_some(),
        LeadField::PropertyReference => lead.property_reference.is_some(),
        LeadField::ExternalId => lead.external_id.is_some(),
        LeadField::PropertyType => lead.property_type.is_some(),
        LeadField::Country => lead.country.is_some(),
        LeadField::DesiredLocation => lead.desired_location.is_some(),
        LeadField::Budget => lead.budget.is_some(),
        LeadField::LivingArea => lead.living_area.is_some(),
        LeadField::Bedrooms => lead.bedrooms.is_some(),
        LeadField::Extra(key) | LeadField::ExtraInteger(key) => lead.extras.contains_key(key),
    }
}

fn set_field(lead: &mut LeadFields, field: LeadField, value: &str) -> bool {
    match field {
        LeadField::Bedrooms => match value.parse::<u32>() {
            Ok(count) => {
                lead.bedrooms = Some(count);
                true
            }
            Err(_) => false,
        },
        LeadField::Extra(key) => {
            lead.extras
                .insert(key.to_string(), ExtraValue::from(value.to_string()));
            true
        }
        LeadField::ExtraInteger(key) => match value.parse::<i64>() {
            Ok(number) => {
                lead.extras.insert(key.to_string(), ExtraValue::from(number));
                true
            }
            Err(_) => false,
        },
        _ => match text_slot(lead, field) {
            Some(slot) => fill(slot, value),
            None => false,
        },
    }
}
