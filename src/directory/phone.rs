//! Phone Normalization Module
//!
//! Reduces phone numbers to comparable forms. Two numbers are considered
//! the same contact point if, after stripping everything but digits and a
//! leading `+`, they are identical, or one is the other prefixed with `+`
//! or `+1` (US numbers recorded with or without a country code).

use std::collections::HashSet;

use crate::cache::ContactsSnapshot;

// == Form Generation ==
/// Expands a raw query number into the set of equivalent representations
/// to search for: bare digits, `+digits`, `+1digits`, and for 11-digit
/// numbers with a leading 1 also the 10-digit national form.
///
/// Returns an empty set when the input carries no digits at all.
pub fn normalize_forms(raw: &str) -> Vec<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Vec::new();
    }

    let mut forms = vec![
        digits.clone(),
        format!("+{digits}"),
        format!("+1{digits}"),
    ];
    if digits.len() == 11 && digits.starts_with('1') {
        let national = digits[1..].to_string();
        forms.push(format!("+{national}"));
        forms.push(national);
    }

    let mut seen = HashSet::new();
    forms.retain(|form| seen.insert(form.clone()));
    forms
}

// == Matching ==
/// Checks whether two phone strings denote the same number under the
/// `+`/`+1` prefix equivalence. Symmetric: both directions are tried.
pub fn numbers_match(a: &str, b: &str) -> bool {
    let ca = canonical(a);
    let cb = canonical(b);
    if ca.is_empty() || cb.is_empty() || ca == "+" || cb == "+" {
        return false;
    }

    ca == cb
        || ca == format!("+{cb}")
        || cb == format!("+{ca}")
        || ca == format!("+1{cb}")
        || cb == format!("+1{ca}")
}

/// Finds the first contact in the snapshot carrying a number matching any
/// of the given forms, in snapshot iteration order.
pub fn match_in_snapshot<'a>(
    snapshot: &'a ContactsSnapshot,
    forms: &[String],
) -> Option<(&'a str, &'a Vec<String>)> {
    snapshot.iter().find_map(|(name, phones)| {
        let hit = phones
            .iter()
            .any(|number| forms.iter().any(|form| numbers_match(number, form)));
        hit.then_some((name.as_str(), phones))
    })
}

/// Strips a number down to its digits, keeping a leading `+` if present.
fn canonical(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    if trimmed.starts_with('+') {
        format!("+{digits}")
    } else {
        digits
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forms_for_bare_digits() {
        let forms = normalize_forms("5551234567");
        assert_eq!(forms, vec!["5551234567", "+5551234567", "+15551234567"]);
    }

    #[test]
    fn test_forms_strip_formatting() {
        assert_eq!(
            normalize_forms("(555) 123-4567"),
            normalize_forms("555.123.4567")
        );
    }

    #[test]
    fn test_forms_for_eleven_digit_number() {
        let forms = normalize_forms("+1 555 123 4567");
        assert!(forms.contains(&"15551234567".to_string()));
        assert!(forms.contains(&"+15551234567".to_string()));
        assert!(forms.contains(&"5551234567".to_string()));
        assert!(forms.contains(&"+5551234567".to_string()));
        // Deduplicated.
        let unique: std::collections::HashSet<_> = forms.iter().collect();
        assert_eq!(unique.len(), forms.len());
    }

    #[test]
    fn test_no_digits_yields_no_forms() {
        assert!(normalize_forms("call me maybe").is_empty());
        assert!(normalize_forms("").is_empty());
    }

    #[test]
    fn test_match_identical() {
        assert!(numbers_match("5551234", "555-1234"));
    }

    #[test]
    fn test_match_plus_prefix_both_directions() {
        assert!(numbers_match("+5551234567", "5551234567"));
        assert!(numbers_match("5551234567", "+5551234567"));
    }

    #[test]
    fn test_match_country_code_both_directions() {
        assert!(numbers_match("+15551234567", "5551234567"));
        assert!(numbers_match("(555) 123-4567", "+15551234567"));
    }

    #[test]
    fn test_distinct_numbers_do_not_match() {
        assert!(!numbers_match("5551234567", "5559876543"));
        assert!(!numbers_match("+25551234567", "5551234567"));
    }

    #[test]
    fn test_empty_never_matches() {
        assert!(!numbers_match("", ""));
        assert!(!numbers_match("+", "+"));
        assert!(!numbers_match("555", ""));
    }

    #[test]
    fn test_match_in_snapshot_first_in_order() {
        let snapshot: ContactsSnapshot = [
            ("Alice".to_string(), vec!["555-0001".to_string()]),
            ("Bob".to_string(), vec!["555-0002".to_string(), "555-0001".to_string()]),
        ]
        .into_iter()
        .collect();

        let forms = normalize_forms("5550001");
        let (name, _) = match_in_snapshot(&snapshot, &forms).unwrap();
        assert_eq!(name, "Alice");
    }

    #[test]
    fn test_match_in_snapshot_absent() {
        let snapshot: ContactsSnapshot =
            [("Alice".to_string(), vec!["555-0001".to_string()])]
                .into_iter()
                .collect();

        assert!(match_in_snapshot(&snapshot, &normalize_forms("5559999")).is_none());
    }
}
