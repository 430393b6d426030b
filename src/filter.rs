//! Chain filtering: descend the area tree one level per name token.

use tracing::debug;

use crate::models::Area;

/// Normalize a region name or filter token for comparison.
///
/// Underscores become spaces, whitespace runs collapse to one space,
/// and the result is lowercased, so `"united_STATES "` matches `"United States"`.
pub fn normalize_name(name: &str) -> String {
    name.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Walk down from `root`, selecting the child named by each token in turn.
///
/// Returns the subtree matched by the last token, or `None` if any token
/// fails to match at its level. An empty token list returns the root.
pub fn chain_filter<S: AsRef<str>>(root: Area, tokens: &[S]) -> Option<Area> {
    let mut current = root;

    for (depth, token) in tokens.iter().enumerate() {
        let wanted = normalize_name(token.as_ref());
        let index = current
            .areas
            .iter()
            .position(|child| normalize_name(&child.name) == wanted);

        match index {
            Some(i) => {
                // Move the matched child out; its siblings are dropped
                current = current.areas.swap_remove(i);
            }
            None => {
                debug!(
                    "No child named '{}' under '{}' (level {})",
                    token.as_ref(),
                    current.name,
                    depth + 1
                );
                return None;
            }
        }
    }

    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_world() -> Area {
        Area::new("world")
            .with_child(
                Area::new("United States")
                    .with_child(Area::new("California").with_child(Area::new("Los Angeles")))
                    .with_child(Area::new("New York")),
            )
            .with_child(Area::new("Canada").with_child(Area::new("Ontario")))
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("United_States"), "united states");
        assert_eq!(normalize_name("  New   York "), "new york");
        assert_eq!(normalize_name("Côte_d'Ivoire"), "côte d'ivoire");
    }

    #[test]
    fn test_empty_chain_returns_root() {
        let tokens: [&str; 0] = [];
        let result = chain_filter(sample_world(), &tokens).unwrap();
        assert_eq!(result, sample_world());
    }

    #[test]
    fn test_single_token_matches_one_level_down() {
        let result = chain_filter(sample_world(), &["Canada"]).unwrap();
        assert_eq!(result.name, "Canada");
        assert_eq!(result.child_names(), vec!["Ontario"]);
    }

    #[test]
    fn test_chain_descends_in_order() {
        let result = chain_filter(sample_world(), &["United States", "California"]).unwrap();
        assert_eq!(result.name, "California");
        assert_eq!(result.child_names(), vec!["Los Angeles"]);
    }

    #[test]
    fn test_case_insensitive_match() {
        let result = chain_filter(sample_world(), &["united states", "NEW YORK"]).unwrap();
        assert_eq!(result.name, "New York");
    }

    #[test]
    fn test_missing_token_fails_whole_chain() {
        assert!(chain_filter(sample_world(), &["United States", "Texas"]).is_none());
        assert!(chain_filter(sample_world(), &["Mexico"]).is_none());
    }

    #[test]
    fn test_tokens_do_not_skip_levels() {
        // California is a grandchild of the root, not a child
        assert!(chain_filter(sample_world(), &["California"]).is_none());
    }

    #[test]
    fn test_empty_token_never_matches() {
        assert!(chain_filter(sample_world(), &["United States", ""]).is_none());
    }

    #[test]
    fn test_first_match_wins_on_duplicate_names() {
        let root = Area::new("world")
            .with_child(Area::new("Georgia").with_stat("kind", "country"))
            .with_child(Area::new("Georgia").with_stat("kind", "state"));

        let result = chain_filter(root, &["Georgia"]).unwrap();
        assert_eq!(result.stats.get("kind").and_then(|v| v.as_str()), Some("country"));
    }
}
