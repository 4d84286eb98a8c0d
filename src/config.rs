use std::env;

/// Default per-input size limit (1 MiB); lead notifications are a few KiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

fn lookup_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

fn lookup_usize(value: Option<String>, default: usize) -> usize {
    value
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

/// Runtime configuration for the command-line front end and batch parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub worker_threads: usize,
    pub normalize: bool,
    pub max_input_bytes: usize,
}

impl ParserConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let worker_threads = lookup_usize(lookup("LEAD_PARSER_THREADS"), num_cpus::get()).max(1);
        let normalize = lookup_bool(lookup("LEAD_PARSER_NORMALIZE"), false);
        let max_input_bytes = lookup_usize(
            lookup("LEAD_PARSER_MAX_INPUT_BYTES"),
            DEFAULT_MAX_INPUT_BYTES,
        );

        Self {
            worker_threads,
            normalize,
            max_input_bytes,
        }
    }
}
