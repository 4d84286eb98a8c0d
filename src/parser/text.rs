//! Small text utilities shared by the portal extractors.

use regex::Regex;
use std::sync::OnceLock;

use super::rules::cached;

static AMOUNT_REGEX: OnceLock<Regex> = OnceLock::new();
static MAGNITUDE_REGEX: OnceLock<Regex> = OnceLock::new();
static RANGE_GAP_REGEX: OnceLock<Regex> = OnceLock::new();
static DECIMAL_TAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Keep only ASCII digits.
pub fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Turn a captured budget into its display form.
///
/// A range such as `1 500 000 à 2 000 000 €` becomes `1500000 - 2000000`, a
/// single amount such as `300 000,00 €` becomes `300000` (cents dropped).
/// Values without any digits (`Sur demande`) and values written with a
/// magnitude suffix (`1,5 M€`, `800k`) are kept as written. Currency is left
/// to the normalizer.
pub fn format_budget(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if cached(&MAGNITUDE_REGEX, r"(?i)\d[ \t]*(?:k|m|mio|millions?)(?:[^a-z]|$)").is_match(raw) {
        return Some(raw.to_string());
    }

    let amounts: Vec<_> = cached(
        &AMOUNT_REGEX,
        r"\d{1,3}(?:[ .,\x{a0}\x{202f}]\d{3})+(?:[.,]\d{1,2})?|\d+(?:[.,]\d{1,2})?",
    )
    .find_iter(raw)
    .collect();

    match amounts.as_slice() {
        [] => Some(raw.to_string()),
        [min, max] if is_range_gap(&raw[min.end()..max.start()]) => Some(format!(
            "{} - {}",
            whole_units(min.as_str()),
            whole_units(max.as_str())
        )),
        [amount, ..] => Some(whole_units(amount.as_str())),
    }
}

/// Text between two amounts that reads as a range separator, optionally
/// preceded by a currency: ` € à `, ` - `, ` to `.
fn is_range_gap(gap: &str) -> bool {
    cached(
        &RANGE_GAP_REGEX,
        r"(?i)^\s*(?:€|eur|euros)?\s*(?:à|a|to|et|and|-|–)\s*$",
    )
    .is_match(gap)
}

/// Digits of an amount with any cents part removed.
fn whole_units(amount: &str) -> String {
    digits(&cached(&DECIMAL_TAIL_REGEX, r"[.,]\d{1,2}$").replace(amount, ""))
}

/// Upper-case the first letter of `word` and lower-case the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// `costa-rica` → `Costa Rica`; used for slug tokens found in URLs.
pub fn title_from_slug(slug: &str) -> Option<String> {
    let words: Vec<String> = slug
        .split(['-', '_', '+'])
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Build a display name from an email's local part: `jean.dupont@x` →
/// `Jean Dupont`. Digits and `+tag` suffixes are dropped.
pub fn name_from_email(email: &str) -> Option<String> {
    let local = email.split('@').next()?.trim();
    let local = local.split('+').next().unwrap_or(local);

    let tokens: Vec<String> = local
        .split(['.', '_', '-'])
        .map(|token| token.chars().filter(|c| !c.is_ascii_digit()).collect::<String>())
        .filter(|token| !token.is_empty())
        .map(|token| capitalize(&token))
        .collect();

    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

/// Split a comma or semicolon separated list into trimmed, non-empty items.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split([',', ';'])
        .map(|s| s.trim().trim_end_matches('.').trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_range_is_joined() {
        assert_eq!(
            format_budget("1 500 000 à 2 000 000 €").as_deref(),
            Some("1500000 - 2000000")
        );
        assert_eq!(
            format_budget("300.000 € - 450.000 €").as_deref(),
            Some("300000 - 450000")
        );
    }

    #[test]
    fn single_budget_keeps_digits() {
        assert_eq!(format_budget("300 000 €").as_deref(), Some("300000"));
        assert_eq!(format_budget("300000").as_deref(), Some("300000"));
    }

    #[test]
    fn cents_are_dropped() {
        assert_eq!(format_budget("300 000,00 €").as_deref(), Some("300000"));
        assert_eq!(format_budget("2 500 000,00 €").as_deref(), Some("2500000"));
        assert_eq!(format_budget("1,250,000.50 USD").as_deref(), Some("1250000"));
    }

    #[test]
    fn magnitude_suffix_keeps_text() {
        assert_eq!(format_budget("1,5 M€").as_deref(), Some("1,5 M€"));
        assert_eq!(format_budget("800k").as_deref(), Some("800k"));
    }

    #[test]
    fn unrelated_trailing_number_is_not_a_range() {
        assert_eq!(
            format_budget("300 000 € à négocier, 2 parkings").as_deref(),
            Some("300000")
        );
        assert_eq!(
            format_budget("entre 1 500 000 et 2 000 000 €").as_deref(),
            Some("1500000 - 2000000")
        );
    }

    #[test]
    fn budget_without_digits_is_kept() {
        assert_eq!(format_budget("Sur demande").as_deref(), Some("Sur demande"));
        assert_eq!(format_budget("   "), None);
    }

    #[test]
    fn name_from_email_local_part() {
        assert_eq!(name_from_email("contact@example.com").as_deref(), Some("Contact"));
        assert_eq!(
            name_from_email("jean.dupont42@example.fr").as_deref(),
            Some("Jean Dupont")
        );
        assert_eq!(
            name_from_email("MARIE_CLAIRE+leads@example.fr").as_deref(),
            Some("Marie Claire")
        );
        assert_eq!(name_from_email("1234@example.com"), None);
    }

    #[test]
    fn slug_is_titled() {
        assert_eq!(title_from_slug("costa-rica").as_deref(), Some("Costa Rica"));
        assert_eq!(title_from_slug("--"), None);
    }

    #[test]
    fn list_is_split_and_trimmed() {
        assert_eq!(
            split_list("Piscine, jardin ; garage."),
            vec!["Piscine", "jardin", "garage"]
        );
    }
}
