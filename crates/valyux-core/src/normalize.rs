//! Text canonicalization for match keys and cache keys.

/// Lowercases `text`, drops everything except ASCII letters, digits, and
/// whitespace, then collapses whitespace runs into single spaces and trims.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
#[must_use]
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let kept: String = lower
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize("India Gate Basmati Rice - Super"),
            "india gate basmati rice super"
        );
    }

    #[test]
    fn collapses_internal_whitespace_and_trims() {
        assert_eq!(normalize("  Amul \t Taaza\n\nMilk  "), "amul taaza milk");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(normalize("Nestle a+ 500ML"), "nestle a 500ml");
    }

    #[test]
    fn drops_non_ascii_letters() {
        assert_eq!(normalize("Café Crème"), "caf crme");
    }

    #[test]
    fn empty_and_symbol_only_inputs_become_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!! --- ???"), "");
    }

    #[test]
    fn is_idempotent() {
        for input in [
            "Amul Taaza Toned Fresh Milk",
            "  Mother   Dairy!! ",
            "Aashirvaad Superior MP Atta (5 kg)",
            "Café",
            "",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }
}
