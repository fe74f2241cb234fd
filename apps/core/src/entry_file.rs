use std::collections::HashMap;

pub const GLOBAL_SECTION: &str = "global";

const TRIMMED: [char; 3] = [' ', '\t', '\n'];

pub type Section = HashMap<String, String>;

/// Tolerant reader for shortcut files: sections of key/value lines.
/// Malformed lines are skipped, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFile {
    sections: HashMap<String, Section>,
}

impl Default for EntryFile {
    fn default() -> Self {
        let mut sections = HashMap::new();
        sections.insert(GLOBAL_SECTION.to_string(), Section::new());
        Self { sections }
    }
}

impl EntryFile {
    pub fn parse(text: &str) -> Self {
        let mut parsed = Self::default();
        let mut current = GLOBAL_SECTION.to_string();

        for line in text.lines() {
            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') {
                current = section_name(line);
                parsed.sections.entry(current.clone()).or_default();
                continue;
            }

            let Some((key, value)) = key_value(line) else {
                continue;
            };
            // last write wins within a file
            parsed
                .sections
                .entry(current.clone())
                .or_default()
                .insert(key, value);
        }

        parsed
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key).map(String::as_str)
    }
}

// The closing bracket is assumed, not validated: the name is everything
// between the leading '[' and the line's final character.
fn section_name(line: &str) -> String {
    let body = &line[1..];
    match body.chars().next_back() {
        Some(last) => body[..body.len() - last.len_utf8()].to_string(),
        None => String::new(),
    }
}

fn key_value(line: &str) -> Option<(String, String)> {
    let (raw_key, raw_value) = match line.split_once('=') {
        Some(split) => split,
        None => (line, ""),
    };

    let key = raw_key.trim_matches(TRIMMED);
    let value = raw_value.trim_matches(TRIMMED);
    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key.to_string(), value.to_string()))
}
