//! Structured lead extraction from real-estate portal notification emails.
//!
//! Portals such as Le Figaro, idealista, SeLoger or JamesEdition notify
//! agencies of a prospect's enquiry by email, each in its own loosely
//! structured template. This crate detects which portal sent an email, pulls
//! the prospect's contact details and property interest out of it, and
//! produces one uniform [`ParsedLeadData`] record per email.
//!
//! ```no_run
//! use lead_parser::{normalize_lead_data, parse_email_content};
//!
//! let lead = normalize_lead_data(parse_email_content("..."));
//! println!("{}", serde_json::to_string(&lead).unwrap());
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod mime;
pub mod models;
pub mod normalizer;
pub mod parser;

pub use batch::{BatchOutcome, BatchStats, parse_all_parallel};
pub use config::ParserConfig;
pub use error::{LeadParserError, Result};
pub use models::{ExtraValue, INTEGRATION_SOURCE, LeadFields, ParsedLeadData, PortalType};
pub use normalizer::normalize_lead_data;
pub use parser::{detect_portal_source, parse_email_content};

use env_logger::Env;
use std::sync::Once;

static LOGGER: Once = Once::new();

/// Install the `env_logger` backend once per process. `RUST_LOG` overrides
/// the default `info` filter.
pub fn init_logger() {
    LOGGER.call_once(|| {
        env_logger::Builder::from_env(Env::default().default_filter_or("info"))
            .format_timestamp(None)
            .init();
    });
}
