use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use quicklaunch_core::config::Config;
use quicklaunch_core::contract::{CoreRequest, CoreResponse, SearchRequest};
use quicklaunch_core::core_service::{CoreService, ServiceError};
use quicklaunch_core::discovery::{DesktopDirSource, EntrySource, ProviderError, StaticSource};
use quicklaunch_core::model::AppEntry;

fn unique_dir(label: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("quicklaunch-{label}-{unique}"))
}

fn service_with(sources: Vec<Box<dyn EntrySource>>) -> CoreService {
    CoreService::new(Config::default())
        .unwrap()
        .with_sources(sources)
}

struct FailingSource;

impl EntrySource for FailingSource {
    fn source_name(&self) -> &'static str {
        "failing"
    }

    fn discover(&self) -> Result<Vec<AppEntry>, ProviderError> {
        Err(ProviderError::new("scan exploded"))
    }
}

#[test]
fn two_directories_with_distinct_names_index_two_records() {
    let dir_a = unique_dir("dirs-a");
    let dir_b = unique_dir("dirs-b");
    std::fs::create_dir_all(&dir_a).unwrap();
    std::fs::create_dir_all(&dir_b).unwrap();
    std::fs::write(
        dir_a.join("vim.desktop"),
        "[Desktop Entry]\nName=Vim\nExec=vim\n",
    )
    .unwrap();
    std::fs::write(
        dir_b.join("vim-again.desktop"),
        "[Desktop Entry]\nName=VIM (again)\nExec=vim\n",
    )
    .unwrap();

    let mut service = service_with(vec![
        Box::new(DesktopDirSource::new(dir_a.clone())),
        Box::new(DesktopDirSource::new(dir_b.clone())),
    ]);

    assert_eq!(service.rebuild_index(), 2);

    // redefining Vim's exec updates the record without duplicating it
    std::fs::write(
        dir_a.join("vim.desktop"),
        "[Desktop Entry]\nName=Vim\nExec=gvim\n",
    )
    .unwrap();
    assert_eq!(service.rebuild_index(), 2);
    assert_eq!(service.index_len(), 2);
    assert_eq!(service.launch_command("Vim").unwrap(), "gvim");

    std::fs::remove_dir_all(&dir_a).unwrap();
    std::fs::remove_dir_all(&dir_b).unwrap();
}

#[test]
fn later_sources_win_on_name_collision() {
    let mut service = service_with(vec![
        Box::new(StaticSource::from_entries(vec![AppEntry::new(
            "Editor", "vi",
        )])),
        Box::new(StaticSource::from_entries(vec![AppEntry::new(
            "Editor", "emacs",
        )])),
    ]);

    assert_eq!(service.rebuild_index(), 1);
    assert_eq!(service.launch_command("Editor").unwrap(), "emacs");
}

#[test]
fn failing_source_does_not_block_the_others() {
    let mut service = service_with(vec![
        Box::new(FailingSource),
        Box::new(StaticSource::deterministic_fixture()),
    ]);

    assert_eq!(service.rebuild_index(), 2);
    assert!(service.launch_command("Firefox").is_ok());
}

#[test]
fn launch_command_resolves_the_selected_entry() {
    let mut service = service_with(vec![Box::new(StaticSource::deterministic_fixture())]);
    service.rebuild_index();

    assert_eq!(
        service.launch_command("Firefox").unwrap(),
        "firefox --new-instance"
    );
}

#[test]
fn launch_command_unknown_name_is_a_typed_error() {
    let mut service = service_with(vec![Box::new(StaticSource::deterministic_fixture())]);
    service.rebuild_index();

    match service.launch_command("Missing") {
        Err(ServiceError::ItemNotFound(name)) => assert_eq!(name, "Missing"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn search_returns_name_and_exec_rows() {
    let mut service = service_with(vec![Box::new(StaticSource::deterministic_fixture())]);
    service.rebuild_index();

    let rows = service.search("fire");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Firefox");
    assert_eq!(rows[0].exec, "firefox --new-instance");
}

#[test]
fn reload_refreshes_results_for_an_unchanged_query() {
    let dir = unique_dir("reload");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("firefox.desktop"),
        "[Desktop Entry]\nName=Firefox\nExec=firefox\n",
    )
    .unwrap();

    let mut service = service_with(vec![Box::new(DesktopDirSource::new(dir.clone()))]);
    service.rebuild_index();
    assert!(service.search("vim").is_empty());

    std::fs::write(
        dir.join("vim.desktop"),
        "[Desktop Entry]\nName=Vim\nExec=vim\n",
    )
    .unwrap();
    let reloaded = service.handle_command(CoreRequest::Reload).unwrap();
    match reloaded {
        CoreResponse::Reload(response) => assert_eq!(response.indexed, 2),
        other => panic!("unexpected response: {other:?}"),
    }

    // same query text as before the reload; a stale cache would miss Vim
    assert_eq!(service.search("vim").len(), 1);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn search_command_applies_the_requested_limit() {
    let mut service = service_with(vec![Box::new(StaticSource::deterministic_fixture())]);
    service.rebuild_index();

    let response = service
        .handle_command(CoreRequest::Search(SearchRequest {
            query: String::new(),
            limit: Some(1),
        }))
        .unwrap();

    match response {
        CoreResponse::Search(response) => {
            assert_eq!(response.rows.len(), 1);
            assert_eq!(response.rows[0].name, "Firefox");
        }
        other => panic!("unexpected response: {other:?}"),
    }
}
