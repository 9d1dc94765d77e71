/// Canonical form used for every guess/answer and suggestion comparison:
/// lower-cased, with everything outside `[a-z0-9]` removed.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

pub trait Normalize {
    fn normalize(&self) -> String;

    fn matches_normalized(&self, other: &str) -> bool {
        self.normalize() == normalize(other)
    }
}

impl Normalize for str {
    fn normalize(&self) -> String {
        normalize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_case_punctuation_and_spacing() {
        assert_eq!(normalize("  CARRIE!!"), "carrie");
        assert_eq!(normalize("I, Tonya"), "itonya");
        assert_eq!(normalize("Rosemary's Baby"), "rosemarysbaby");
        assert_eq!(normalize("Se7en"), "se7en");
    }

    #[test]
    fn test_normalize_drops_non_ascii_letters() {
        assert_eq!(normalize("Amélie"), "amlie");
        assert_eq!(normalize("🎬🍿"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for s in [
            "The Lord of the Rings",
            "  CARRIE!!",
            "Amélie",
            "Eternal Sunshine of the Spotless Mind",
            "ÀÉÎ 123 -_- ok",
            "",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "normalize not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_matches_normalized() {
        assert!("the departed".matches_normalized("The Departed"));
        assert_eq!("Spinal-Tap".normalize(), "spinaltap");
        assert!(!"Heat".matches_normalized("Hereditary"));
    }
}
