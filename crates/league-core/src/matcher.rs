//! Fuzzy name matching for safe team lookup
//!
//! Used whenever operator input should merge with an existing team
//! rather than silently create a duplicate. Query-only: never creates
//! or mutates teams.

use crate::team::Team;

/// Candidate names for the given input
///
/// A name is a candidate when the input is a case-insensitive
/// substring of it, or it is a case-insensitive substring of the
/// input. The symmetric check catches both abbreviations and typos
/// with extra characters. `exclude` drops one name from the result,
/// for two-team operations where the first team is already chosen.
pub fn suggest<'a>(teams: &'a [Team], input: &str, exclude: Option<&str>) -> Vec<&'a str> {
    let needle = input.to_lowercase();
    teams
        .iter()
        .filter(|t| exclude != Some(t.name()))
        .filter(|t| {
            let existing = t.name().to_lowercase();
            existing.contains(&needle) || needle.contains(&existing)
        })
        .map(|t| t.name())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams(names: &[&str]) -> Vec<Team> {
        names.iter().map(|name| Team::new(*name)).collect()
    }

    #[test]
    fn test_suggest_matches_both_directions() {
        let teams = teams(&["Arsenal", "Arsenal FC", "Chelsea"]);

        let hits = suggest(&teams, "Arsenal", None);
        assert_eq!(hits, ["Arsenal", "Arsenal FC"]);

        // input longer than the stored names
        let hits = suggest(&teams, "Arsenal FC London", None);
        assert_eq!(hits, ["Arsenal", "Arsenal FC"]);
    }

    #[test]
    fn test_suggest_is_case_insensitive() {
        let teams = teams(&["Arsenal", "Chelsea"]);
        let hits = suggest(&teams, "aRSENAL", None);
        assert_eq!(hits, ["Arsenal"]);
    }

    #[test]
    fn test_suggest_exclude() {
        let teams = teams(&["Arsenal", "Arsenal FC", "Chelsea"]);
        let hits = suggest(&teams, "Arsenal", Some("Arsenal"));
        assert_eq!(hits, ["Arsenal FC"]);
    }

    #[test]
    fn test_suggest_no_match() {
        let teams = teams(&["Arsenal", "Chelsea"]);
        assert!(suggest(&teams, "Leeds", None).is_empty());
    }
}
