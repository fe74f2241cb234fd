use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::entry_file::EntryFile;
use crate::logging;
use crate::model::AppEntry;

pub const ENTRY_SECTION: &str = "Desktop Entry";

// Placeholder tokens a full desktop environment would substitute with
// runtime arguments; this core strips every occurrence instead.
pub const FIELD_CODES: [&str; 9] = ["%f", "%F", "%d", "%D", "%u", "%U", "%N", "%k", "%v"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ProviderError {}

pub trait EntrySource: Send + Sync {
    fn source_name(&self) -> &'static str;
    fn discover(&self) -> Result<Vec<AppEntry>, ProviderError>;
}

/// Scans one directory of shortcut files, non-recursively. A missing or
/// unreadable directory yields zero entries; unreadable or malformed files
/// are skipped without failing the scan.
pub struct DesktopDirSource {
    dir: PathBuf,
}

impl DesktopDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl EntrySource for DesktopDirSource {
    fn source_name(&self) -> &'static str {
        "desktop-dir"
    }

    fn discover(&self) -> Result<Vec<AppEntry>, ProviderError> {
        if !self.dir.is_dir() {
            logging::warn(&format!(
                "entry directory unavailable: {}",
                self.dir.display()
            ));
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for file in WalkDir::new(&self.dir)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
        {
            let Ok(text) = std::fs::read_to_string(file.path()) else {
                continue;
            };
            if let Some(entry) = entry_from_text(&text) {
                entries.push(entry);
            }
        }

        Ok(entries)
    }
}

pub struct StaticSource {
    entries: Vec<AppEntry>,
}

impl StaticSource {
    pub fn from_entries(entries: Vec<AppEntry>) -> Self {
        Self { entries }
    }

    pub fn deterministic_fixture() -> Self {
        Self {
            entries: vec![
                AppEntry::new("Firefox", "firefox --new-instance"),
                AppEntry::new("Files", "nautilus --new-window"),
            ],
        }
    }
}

impl EntrySource for StaticSource {
    fn source_name(&self) -> &'static str {
        "static"
    }

    fn discover(&self) -> Result<Vec<AppEntry>, ProviderError> {
        Ok(self.entries.clone())
    }
}

fn entry_from_text(text: &str) -> Option<AppEntry> {
    let parsed = EntryFile::parse(text);
    let name = parsed.get(ENTRY_SECTION, "Name")?;
    let exec = strip_field_codes(parsed.get(ENTRY_SECTION, "Exec")?);
    if name.is_empty() || exec.is_empty() {
        return None;
    }

    Some(AppEntry::new(name, &exec))
}

pub fn strip_field_codes(exec: &str) -> String {
    let mut stripped = exec.to_string();
    for code in FIELD_CODES {
        stripped = stripped.replace(code, "");
    }
    stripped
}
