use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::config::{self, ConfigError, MatchStrategy};
use crate::contract::{CoreRequest, SearchRequest};
use crate::core_service::{CoreService, ServiceError};
use crate::logging;
use crate::transport;

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Service(ServiceError),
    Io(std::io::Error),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Service(error) => write!(f, "service error: {error}"),
            Self::Io(error) => write!(f, "io error: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ServiceError> for RuntimeError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCommand {
    Serve,
    Query(String),
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    pub strategy_override: Option<MatchStrategy>,
    pub command: RuntimeCommand,
}

pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, String> {
    let mut options = RuntimeOptions {
        config_path: None,
        strategy_override: None,
        command: RuntimeCommand::Serve,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().ok_or_else(|| "--config requires a path".to_string())?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--strategy" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--strategy requires a value".to_string())?;
                let strategy = MatchStrategy::parse(value)
                    .ok_or_else(|| format!("unknown match strategy '{value}'"))?;
                options.strategy_override = Some(strategy);
            }
            "--query" => {
                let value = iter.next().ok_or_else(|| "--query requires text".to_string())?;
                options.command = RuntimeCommand::Query(value.clone());
            }
            "--list" => options.command = RuntimeCommand::List,
            other => return Err(format!("unknown argument '{other}'")),
        }
    }

    Ok(options)
}

pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    if let Err(error) = logging::init() {
        eprintln!("[quicklaunch-core] logging unavailable: {error}");
    }

    let mut config = config::load(options.config_path.as_deref())?;
    if let Some(strategy) = options.strategy_override {
        config.match_strategy = strategy;
    }
    if !config.config_path.exists() {
        config::save(&config)?;
        logging::info(&format!(
            "wrote default config to {}",
            config.config_path.display()
        ));
    }

    let mut service = CoreService::new(config)?.with_configured_sources();
    let indexed = service.rebuild_index();
    logging::info(&format!("startup indexed_entries={indexed}"));

    match options.command {
        RuntimeCommand::Query(query) => run_query(&mut service, &query),
        RuntimeCommand::List => run_query(&mut service, ""),
        RuntimeCommand::Serve => serve(&mut service),
    }
}

fn run_query(service: &mut CoreService, query: &str) -> Result<(), RuntimeError> {
    let request = CoreRequest::Search(SearchRequest {
        query: query.to_string(),
        limit: None,
    });
    let response = transport::handle_request(service, request);
    println!("{}", transport::to_json(&response));
    Ok(())
}

// One JSON request per stdin line, one JSON response per stdout line. The
// shell collaborator drives this loop per keystroke event and on its
// reload signal.
fn serve(service: &mut CoreService) -> Result<(), RuntimeError> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let reply = transport::handle_json(service, trimmed);
        let mut out = stdout.lock();
        writeln!(out, "{reply}")?;
        out.flush()?;
    }

    Ok(())
}
