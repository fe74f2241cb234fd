use quicklaunch_core::app_index::AppIndex;
use quicklaunch_core::config::MatchStrategy;
use quicklaunch_core::model::AppEntry;
use quicklaunch_core::search::Matcher;

fn browser_index() -> AppIndex {
    let mut index = AppIndex::new();
    index.upsert(AppEntry::new("Firefox", "firefox"));
    index.upsert(AppEntry::new("Chromium", "chromium"));
    index.upsert(AppEntry::new("Vim", "vim"));
    index.upsert(AppEntry::new("VIM (again)", "vim -g"));
    index
}

#[test]
fn empty_query_returns_every_entry_in_index_order() {
    let index = browser_index();
    let mut matcher = Matcher::new(MatchStrategy::Substring);

    let first = matcher.match_query(&index, "");
    let second = matcher.match_query(&index, "");

    assert_eq!(first, vec![0, 1, 2, 3]);
    assert_eq!(first, second);
}

#[test]
fn blank_query_counts_as_empty() {
    let index = browser_index();
    let mut matcher = Matcher::new(MatchStrategy::Substring);

    assert_eq!(matcher.match_query(&index, "  \t "), vec![0, 1, 2, 3]);
}

#[test]
fn query_matches_case_insensitively() {
    let index = browser_index();
    let mut matcher = Matcher::new(MatchStrategy::Substring);

    let slots = matcher.match_query(&index, "FIRE");

    assert_eq!(slots.len(), 1);
    assert_eq!(index.get(slots[0]).unwrap().name, "Firefox");
}

#[test]
fn results_keep_index_order_not_quality_order() {
    let index = browser_index();
    let mut matcher = Matcher::new(MatchStrategy::Substring);

    // "i" appears in every name; the filter must not re-sort
    assert_eq!(matcher.match_query(&index, "i"), vec![0, 1, 2, 3]);
}

#[test]
fn literal_parenthesis_query_is_escaped_not_fatal() {
    let index = browser_index();
    let mut matcher = Matcher::new(MatchStrategy::Substring);

    let slots = matcher.match_query(&index, "(again)");

    assert_eq!(slots.len(), 1);
    assert_eq!(index.get(slots[0]).unwrap().name, "VIM (again)");
}

#[test]
fn nul_padded_query_matches_after_sanitization() {
    let index = browser_index();
    let mut matcher = Matcher::new(MatchStrategy::Substring);

    let slots = matcher.match_query(&index, "fire\0\0\0");

    assert_eq!(slots.len(), 1);
    assert_eq!(index.get(slots[0]).unwrap().name, "Firefox");
}

#[test]
fn unmatched_query_returns_nothing() {
    let index = browser_index();
    let mut matcher = Matcher::new(MatchStrategy::Substring);

    assert!(matcher.match_query(&index, "libreoffice").is_empty());
}

#[test]
fn fuzzy_ranks_closest_name_first() {
    let mut index = AppIndex::new();
    index.upsert(AppEntry::new("Firefox", "firefox"));
    index.upsert(AppEntry::new("Chromium", "chromium"));
    index.upsert(AppEntry::new("Vim", "vim"));
    let mut matcher = Matcher::new(MatchStrategy::Fuzzy);

    let slots = matcher.match_query(&index, "Firefo");

    assert_eq!(slots.len(), 3);
    assert_eq!(index.get(slots[0]).unwrap().name, "Firefox");
}

#[test]
fn fuzzy_empty_query_still_returns_index_order() {
    let index = browser_index();
    let mut matcher = Matcher::new(MatchStrategy::Fuzzy);

    assert_eq!(matcher.match_query(&index, ""), vec![0, 1, 2, 3]);
}

#[test]
fn fuzzy_ties_fall_back_to_index_order() {
    let mut index = AppIndex::new();
    index.upsert(AppEntry::new("abc", "first"));
    index.upsert(AppEntry::new("abd", "second"));
    let mut matcher = Matcher::new(MatchStrategy::Fuzzy);

    // equal distance to both names; earlier slot must come first
    assert_eq!(matcher.match_query(&index, "abz"), vec![0, 1]);
}

#[test]
fn reset_forces_a_recompute_against_the_current_index() {
    let mut index = AppIndex::new();
    index.upsert(AppEntry::new("Firefox", "firefox"));
    let mut matcher = Matcher::new(MatchStrategy::Substring);

    assert_eq!(matcher.match_query(&index, "vim").len(), 0);

    index.upsert(AppEntry::new("Vim", "vim"));
    matcher.reset();

    assert_eq!(matcher.match_query(&index, "vim").len(), 1);
}
