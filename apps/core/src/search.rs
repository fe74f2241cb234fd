use regex::RegexBuilder;

use crate::app_index::AppIndex;
use crate::config::MatchStrategy;
use crate::logging;

// Queries arrive from a fixed-size shell input buffer.
pub const MAX_QUERY_BYTES: usize = 128;

const ESCAPED: &str = r"\|()[]^${}*+?";

/// Filters or ranks index slots for the current query. Carries the previous
/// query text so an unchanged query returns the cached result without a
/// recompute; `reset` must follow every index rebuild.
#[derive(Debug)]
pub struct Matcher {
    strategy: MatchStrategy,
    previous: Option<String>,
    cached: Vec<usize>,
}

impl Matcher {
    pub fn new(strategy: MatchStrategy) -> Self {
        Self {
            strategy,
            previous: None,
            cached: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.previous = None;
        self.cached.clear();
    }

    pub fn match_query(&mut self, index: &AppIndex, raw_query: &str) -> Vec<usize> {
        let query = sanitize_query(raw_query);
        if self.previous.as_deref() == Some(query.as_str()) {
            return self.cached.clone();
        }

        let slots = if query.is_empty() {
            all_slots(index)
        } else {
            match self.strategy {
                MatchStrategy::Substring => substring_filter(index, &query),
                MatchStrategy::Fuzzy => fuzzy_rank(index, &query),
            }
        };

        self.previous = Some(query);
        self.cached = slots.clone();
        slots
    }
}

pub fn sanitize_query(raw: &str) -> String {
    let mut stripped: String = raw.chars().filter(|c| *c != '\0').collect();
    if stripped.len() > MAX_QUERY_BYTES {
        let mut cut = MAX_QUERY_BYTES;
        while !stripped.is_char_boundary(cut) {
            cut -= 1;
        }
        stripped.truncate(cut);
    }

    stripped.trim().to_string()
}

fn all_slots(index: &AppIndex) -> Vec<usize> {
    (0..index.len()).collect()
}

pub fn escape_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if ESCAPED.contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// Anchored wrapper around the escaped query: behaves as a case-insensitive
// substring test over the whole name.
fn substring_filter(index: &AppIndex, query: &str) -> Vec<usize> {
    let pattern = format!("^(.*){}(.*)$", escape_pattern(query));
    let regex = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(regex) => regex,
        Err(error) => {
            logging::warn(&format!(
                "query pattern rejected, showing all entries: {error}"
            ));
            return all_slots(index);
        }
    };

    index
        .iter()
        .filter(|(_, entry)| regex.is_match(&entry.name))
        .map(|(slot, _)| slot)
        .collect()
}

fn fuzzy_rank(index: &AppIndex, query: &str) -> Vec<usize> {
    let folded = query.to_lowercase();
    let mut scored: Vec<(f64, usize)> = index
        .iter()
        .map(|(slot, entry)| (similarity(&folded, entry.normalized_name()), slot))
        .collect();

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });

    scored.into_iter().map(|(_, slot)| slot).collect()
}

/// Normalized edit-distance score in 0.0..=1.0; 1.0 means identical.
pub fn similarity(query: &str, name: &str) -> f64 {
    let longest = query.chars().count().max(name.chars().count());
    if longest == 0 {
        return 1.0;
    }

    (longest - levenshtein(query, name)) as f64 / longest as f64
}

pub fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, a_char) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let substitution = diagonal + usize::from(a_char != *b_char);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b_chars.len()]
}
