//! Comma-separated tag list helpers.
//!
//! Management forms collect list-valued fields (suitable crops, seed
//! varieties) as a single comma-separated text input. These helpers define
//! the one splitting/joining rule used everywhere.

/// Split a comma-separated input into a list of trimmed tags.
///
/// Each segment is trimmed, but empty segments are kept: a trailing comma
/// produces a trailing empty tag. Consumers render and match tags verbatim,
/// so the quirk is preserved rather than auto-corrected.
///
/// ```
/// use agrilink_core::split_tags;
///
/// assert_eq!(split_tags("Wheat, Maize"), vec!["Wheat", "Maize"]);
/// assert_eq!(split_tags("Wheat, Maize,"), vec!["Wheat", "Maize", ""]);
/// ```
#[must_use]
pub fn split_tags(input: &str) -> Vec<String> {
    input.split(',').map(|tag| tag.trim().to_owned()).collect()
}

/// Join a tag list back into the comma-separated form representation.
#[must_use]
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trims_segments() {
        assert_eq!(
            split_tags("  Wheat ,Maize,  Rice"),
            vec!["Wheat", "Maize", "Rice"]
        );
    }

    #[test]
    fn test_split_keeps_trailing_empty_segment() {
        // Documented quirk: trailing commas are not filtered out.
        assert_eq!(split_tags("Wheat, Maize,"), vec!["Wheat", "Maize", ""]);
    }

    #[test]
    fn test_split_empty_input() {
        assert_eq!(split_tags(""), vec![""]);
    }

    #[test]
    fn test_join_round_trip() {
        let tags = vec!["Wheat".to_owned(), "Maize".to_owned()];
        assert_eq!(join_tags(&tags), "Wheat, Maize");
        assert_eq!(split_tags(&join_tags(&tags)), tags);
    }

    #[test]
    fn test_join_empty() {
        assert_eq!(join_tags(&[]), "");
    }
}
