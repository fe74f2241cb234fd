use crate::app_index::AppIndex;
use crate::config::{validate, Config};
use crate::contract::{
    CoreRequest, CoreResponse, LaunchResponse, ReloadResponse, SearchResponse, SearchRow,
};
use crate::discovery::{DesktopDirSource, EntrySource};
use crate::logging;
use crate::search::Matcher;

#[derive(Debug)]
pub enum ServiceError {
    Config(String),
    ItemNotFound(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::ItemNotFound(name) => write!(f, "entry not found: {name}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Owns the application index and the matcher. The index mutates only inside
/// `rebuild_index`; everything else reads it.
pub struct CoreService {
    config: Config,
    index: AppIndex,
    sources: Vec<Box<dyn EntrySource>>,
    matcher: Matcher,
}

impl CoreService {
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        let matcher = Matcher::new(config.match_strategy);
        Ok(Self {
            config,
            index: AppIndex::new(),
            sources: Vec::new(),
            matcher,
        })
    }

    pub fn with_sources(mut self, sources: Vec<Box<dyn EntrySource>>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_configured_sources(mut self) -> Self {
        self.sources = self
            .config
            .entry_dirs
            .iter()
            .map(|dir| Box::new(DesktopDirSource::new(dir.clone())) as Box<dyn EntrySource>)
            .collect();
        self
    }

    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    /// Clears and refills the index from every source, in configuration
    /// order; later sources win on name collisions. A failing source is
    /// logged and skipped, the rest still run.
    pub fn rebuild_index(&mut self) -> usize {
        self.index.clear();
        for source in &self.sources {
            let discovered = match source.discover() {
                Ok(discovered) => discovered,
                Err(error) => {
                    logging::warn(&format!(
                        "source {} failed, skipping: {error}",
                        source.source_name()
                    ));
                    continue;
                }
            };

            for entry in discovered {
                self.index.upsert(entry);
            }
        }

        self.matcher.reset();
        self.index.len()
    }

    pub fn search(&mut self, query: &str) -> Vec<SearchRow> {
        let slots = self.matcher.match_query(&self.index, query);
        slots
            .iter()
            .filter_map(|slot| self.index.get(*slot))
            .map(SearchRow::from)
            .collect()
    }

    /// Resolves a confirmed selection to its launch command. The shell owns
    /// process creation; this core never spawns.
    pub fn launch_command(&self, name: &str) -> Result<&str, ServiceError> {
        self.index
            .slot_of(name)
            .and_then(|slot| self.index.get(slot))
            .map(|entry| entry.exec.as_str())
            .ok_or_else(|| ServiceError::ItemNotFound(name.to_string()))
    }

    pub fn handle_command(&mut self, request: CoreRequest) -> Result<CoreResponse, ServiceError> {
        match request {
            CoreRequest::Search(request) => {
                let mut rows = self.search(&request.query);
                if let Some(limit) = request.limit {
                    rows.truncate(limit);
                }
                Ok(CoreResponse::Search(SearchResponse { rows }))
            }
            CoreRequest::Launch(request) => {
                let command = self.launch_command(&request.name)?.to_string();
                Ok(CoreResponse::Launch(LaunchResponse { command }))
            }
            CoreRequest::Reload => {
                let indexed = self.rebuild_index();
                Ok(CoreResponse::Reload(ReloadResponse { indexed }))
            }
        }
    }
}
