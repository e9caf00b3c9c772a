//! Integration tests for group order persistence across sessions.

use std::sync::Arc;

use super::helpers::{board_view, january, label, service_for, view};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use taskboard::{
    board::{adapters::memory::InMemoryTaskStore, services::CreateTasksRequest},
    config::BoardConfig,
    local_store::{adapters::file::FileKeyValueStore, ports::KeyValueStore},
};
use tempfile::TempDir;

struct Workspace {
    _root: TempDir,
    path: Utf8PathBuf,
    store: Arc<InMemoryTaskStore>,
}

impl Workspace {
    fn open_local(&self) -> Result<Arc<FileKeyValueStore>, eyre::Report> {
        Ok(Arc::new(FileKeyValueStore::open(&self.path)?))
    }
}

#[fixture]
fn workspace() -> Workspace {
    let root = tempfile::tempdir().expect("temp dir");
    let path = Utf8PathBuf::from_path_buf(root.path().join("local")).expect("utf-8 path");
    Workspace {
        _root: root,
        path,
        store: Arc::new(InMemoryTaskStore::new()),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn group_order_survives_a_new_session(workspace: Workspace) -> Result<(), eyre::Report> {
    let config = BoardConfig::default();
    let first = service_for(&workspace.store, &workspace.open_local()?, "user-1", &config)?;
    for group in ["todo", "doing", "done"] {
        first
            .create_tasks(CreateTasksRequest::new(group, january()?).with_title(group))
            .await?;
    }
    first.create_empty_group("later")?;
    first.reorder_groups(vec![label("done")?, label("later")?, label("todo")?])?;

    let second = service_for(&workspace.store, &workspace.open_local()?, "user-1", &config)?;
    second.fetch_tasks().await?;

    eyre::ensure!(
        board_view(&second)
            == view(&[
                ("done", &["done"]),
                ("later", &[]),
                ("todo", &["todo"]),
                ("doing", &["doing"]),
            ]),
        "unexpected board {:?}",
        board_view(&second)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn each_identity_keeps_its_own_order(workspace: Workspace) -> Result<(), eyre::Report> {
    let config = BoardConfig::default();
    let local = workspace.open_local()?;
    let alice = service_for(&workspace.store, &local, "alice", &config)?;
    let bob = service_for(&workspace.store, &local, "bob", &config)?;

    alice.create_empty_group("one")?;
    alice.create_empty_group("two")?;
    bob.create_empty_group("two")?;
    bob.create_empty_group("one")?;

    eyre::ensure!(
        local.get("groupOrder_alice")?.as_deref() == Some(r#"["one","two"]"#),
        "alice's order not stored"
    );
    eyre::ensure!(
        local.get("groupOrder_bob")?.as_deref() == Some(r#"["two","one"]"#),
        "bob's order not stored"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreadable_stored_order_falls_back_to_load_order(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let config = BoardConfig::default();
    let local = workspace.open_local()?;
    let service = service_for(&workspace.store, &local, "user-1", &config)?;
    for group in ["b", "a"] {
        service
            .create_tasks(CreateTasksRequest::new(group, january()?).with_title(group))
            .await?;
    }
    local.set("groupOrder_user-1", "{not json")?;

    let reopened = service_for(&workspace.store, &local, "user-1", &config)?;
    reopened.fetch_tasks().await?;

    eyre::ensure!(
        board_view(&reopened) == view(&[("b", &["b"]), ("a", &["a"])]),
        "unexpected board {:?}",
        board_view(&reopened)
    );
    eyre::ensure!(reopened.error().is_none(), "fallback is not an error");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn provider_shaped_identity_keeps_its_group_order(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let config = BoardConfig::default();
    let owner = "auth0|alice@example.com";
    let service = service_for(&workspace.store, &workspace.open_local()?, owner, &config)?;

    service.create_empty_group("L1")?;
    service.create_empty_group("L2")?;
    service.reorder_groups(vec![label("L2")?, label("L1")?])?;
    eyre::ensure!(service.error().is_none(), "storing the order should succeed");

    let reopened = service_for(&workspace.store, &workspace.open_local()?, owner, &config)?;
    reopened.fetch_tasks().await?;
    eyre::ensure!(
        board_view(&reopened) == view(&[("L2", &[]), ("L1", &[])]),
        "unexpected board {:?}",
        board_view(&reopened)
    );
    Ok(())
}
