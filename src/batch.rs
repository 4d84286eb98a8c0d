//! Parallel parsing of many lead emails.
//!
//! Parsing is CPU-bound and each email is independent, so a batch is spread
//! over a dedicated Rayon pool. Results keep the order of the inputs; the
//! per-portal counters are gathered with atomics while the workers run.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{LeadParserError, Result};
use crate::models::{ParsedLeadData, PortalType};
use crate::parser::parse_email_content;

/// Counters for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub total: usize,
    pub by_portal: BTreeMap<PortalType, usize>,
    pub with_email: usize,
    pub with_phone: usize,
    /// Leads with neither an email nor a phone; nobody can follow these up.
    pub without_contact: usize,
}

impl BatchStats {
    /// Add the counts of `other` to `self`.
    pub fn merge(&mut self, other: &BatchStats) {
        self.total += other.total;
        self.with_email += other.with_email;
        self.with_phone += other.with_phone;
        self.without_contact += other.without_contact;
        for (portal, count) in &other.by_portal {
            *self.by_portal.entry(*portal).or_insert(0) += count;
        }
    }

    /// Fold one parsed lead into the counters.
    pub fn record(&mut self, lead: &ParsedLeadData) {
        self.total += 1;
        *self.by_portal.entry(lead.portal_name).or_insert(0) += 1;
        let has_email = lead.fields.email.is_some();
        let has_phone = lead.fields.phone.is_some();
        if has_email {
            self.with_email += 1;
        }
        if has_phone {
            self.with_phone += 1;
        }
        if !has_email && !has_phone {
            self.without_contact += 1;
        }
    }
}

/// Parsed leads in input order plus the batch counters.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub leads: Vec<ParsedLeadData>,
    pub stats: BatchStats,
}

/// Parse every `(label, text)` pair on a pool of `threads` workers.
///
/// Only pool construction can fail; parsing itself is total.
pub fn parse_all_parallel(inputs: Vec<(String, String)>, threads: usize) -> Result<BatchOutcome> {
    let total = inputs.len();
    let threads = threads.max(1);
    log::info!("parsing {} emails with {} threads", total, threads);

    let thread_pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| LeadParserError::ThreadPool(e.to_string()))?;

    let portal_counts: Vec<AtomicUsize> =
        PortalType::ALL.iter().map(|_| AtomicUsize::new(0)).collect();
    let with_email = AtomicUsize::new(0);
    let with_phone = AtomicUsize::new(0);
    let without_contact = AtomicUsize::new(0);

    let leads: Vec<ParsedLeadData> = thread_pool.install(|| {
        inputs
            .par_iter()
            .map(|(label, text)| {
                let lead = parse_email_content(text);
                log::debug!("{}: {}", label, lead.portal_name);

                if let Some(slot) = PortalType::ALL.iter().position(|p| *p == lead.portal_name) {
                    portal_counts[slot].fetch_add(1, Ordering::Relaxed);
                }
                let has_email = lead.fields.email.is_some();
                let has_phone = lead.fields.phone.is_some();
                if has_email {
                    with_email.fetch_add(1, Ordering::Relaxed);
                }
                if has_phone {
                    with_phone.fetch_add(1, Ordering::Relaxed);
                }
                if !has_email && !has_phone {
                    without_contact.fetch_add(1, Ordering::Relaxed);
                    log::warn!("{}: no email or phone found", label);
                }

                lead
            })
            .collect()
    });

    let by_portal = PortalType::ALL
        .iter()
        .zip(&portal_counts)
        .map(|(portal, count)| (*portal, count.load(Ordering::Relaxed)))
        .filter(|(_, count)| *count > 0)
        .collect();

    let stats = BatchStats {
        total,
        by_portal,
        with_email: with_email.load(Ordering::Relaxed),
        with_phone: with_phone.load(Ordering::Relaxed),
        without_contact: without_contact.load(Ordering::Relaxed),
    };

    log::info!(
        "parsing complete: {} leads, {} with email, {} with phone, {} without contact",
        stats.total,
        stats.with_email,
        stats.with_phone,
        stats.without_contact
    );

    Ok(BatchOutcome { leads, stats })
}
