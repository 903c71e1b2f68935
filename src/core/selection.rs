//! Free-text selection parsing.
//!
//! The reasoning service replies in prose; candidates are recovered by
//! case-insensitive substring match on their identifying name. When nothing
//! matches, the parser deliberately falls back to positional defaults (the
//! first candidate, or the first six for multi-selection) instead of
//! erroring. That silent masking is a documented contract of the demo, not a
//! bug to fix: callers always get a deterministic selection.

use crate::types::{ActivityOption, FlightOption, HotelOption};

/// Maximum number of activities a response may select.
pub const MAX_ACTIVITY_SELECTIONS: usize = 6;

/// Pick the single candidate whose name appears in the response text.
///
/// Candidates are scanned in input order; the first substring match wins.
/// No match → the first candidate. Empty candidates → `None`.
pub fn select_single<'a, T>(
    response: &str,
    candidates: &'a [T],
    name_of: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    let response_lower = response.to_lowercase();
    candidates
        .iter()
        .find(|candidate| response_lower.contains(&name_of(candidate).to_lowercase()))
        .or_else(|| candidates.first())
}

/// Pick every candidate named in the response, up to
/// [`MAX_ACTIVITY_SELECTIONS`], in candidate order.
///
/// Zero matches → the first six candidates unfiltered. Empty candidates →
/// empty.
pub fn select_multiple<'a, T>(
    response: &str,
    candidates: &'a [T],
    name_of: impl Fn(&T) -> &str,
) -> Vec<&'a T> {
    let response_lower = response.to_lowercase();

    let mut selected = Vec::new();
    for candidate in candidates {
        if response_lower.contains(&name_of(candidate).to_lowercase()) {
            selected.push(candidate);
            if selected.len() >= MAX_ACTIVITY_SELECTIONS {
                break;
            }
        }
    }

    if selected.is_empty() {
        candidates.iter().take(MAX_ACTIVITY_SELECTIONS).collect()
    } else {
        selected
    }
}

/// Flight selection keyed on the airline name.
pub fn select_flight<'a>(response: &str, flights: &'a [FlightOption]) -> Option<&'a FlightOption> {
    select_single(response, flights, |f| &f.airline)
}

/// Hotel selection keyed on the hotel name.
pub fn select_hotel<'a>(response: &str, hotels: &'a [HotelOption]) -> Option<&'a HotelOption> {
    select_single(response, hotels, |h| &h.name)
}

/// Activity selection keyed on the activity name.
pub fn select_activities<'a>(
    response: &str,
    activities: &'a [ActivityOption],
) -> Vec<&'a ActivityOption> {
    select_multiple(response, activities, |a| &a.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn named_candidate_beats_position() {
        let candidates = named(&["Japan Airlines", "ANA", "United Airlines"]);
        let chosen = select_single(
            "After weighing cost, I recommend United Airlines for the value.",
            &candidates,
            |s| s,
        );
        assert_eq!(chosen.map(String::as_str), Some("United Airlines"));
    }

    #[test]
    fn match_is_case_insensitive() {
        let candidates = named(&["Shibuya Grand Hotel", "Shinjuku Budget Inn"]);
        let chosen = select_single("book the SHINJUKU BUDGET INN", &candidates, |s| s);
        assert_eq!(chosen.map(String::as_str), Some("Shinjuku Budget Inn"));
    }

    #[test]
    fn no_match_falls_back_to_first() {
        let candidates = named(&["ANA", "United Airlines"]);
        let chosen = select_single("I could not decide on anything.", &candidates, |s| s);
        assert_eq!(chosen.map(String::as_str), Some("ANA"));
    }

    #[test]
    fn empty_candidates_yield_none() {
        let candidates: Vec<String> = Vec::new();
        assert!(select_single("anything", &candidates, |s| s).is_none());
    }

    #[test]
    fn multiple_collects_in_candidate_order() {
        let candidates = named(&["Skytree", "Ramen Class", "Temple Tour", "Fuji Trip"]);
        let chosen = select_multiple("Do the Fuji Trip and the Ramen Class.", &candidates, |s| s);
        let names: Vec<&str> = chosen.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["Ramen Class", "Fuji Trip"]);
    }

    #[test]
    fn multiple_stops_at_six_matches() {
        let candidates = named(&["a1", "a2", "a3", "a4", "a5", "a6", "a7"]);
        let response = "a1 a2 a3 a4 a5 a6 a7";
        let chosen = select_multiple(response, &candidates, |s| s);
        assert_eq!(chosen.len(), 6);
    }

    #[test]
    fn multiple_falls_back_to_first_six() {
        let candidates = named(&["a1", "a2", "a3", "a4", "a5", "a6", "a7"]);
        let chosen = select_multiple("nothing recognizable here", &candidates, |s| s);
        assert_eq!(chosen.len(), 6);
        assert_eq!(chosen[0], "a1");
    }

    #[test]
    fn multiple_on_empty_candidates_is_empty() {
        let candidates: Vec<String> = Vec::new();
        assert!(select_multiple("anything", &candidates, |s| s).is_empty());
    }
}
