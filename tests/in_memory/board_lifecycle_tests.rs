//! In-memory integration tests for task and group management.

use std::sync::Arc;

use super::helpers::{TestService, board_view, january, label, service_for, view};
use rstest::{fixture, rstest};
use taskboard::{
    board::{
        adapters::memory::InMemoryTaskStore,
        domain::{BoardDomainError, Position},
        services::{BoardServiceError, CreateTasksRequest, UpdateTaskRequest},
    },
    config::BoardConfig,
    local_store::adapters::memory::InMemoryKeyValueStore,
};

type Service = TestService<InMemoryKeyValueStore>;

#[fixture]
fn store() -> Arc<InMemoryTaskStore> {
    Arc::new(InMemoryTaskStore::new())
}

#[fixture]
fn service(store: Arc<InMemoryTaskStore>) -> Service {
    service_for(
        &store,
        &Arc::new(InMemoryKeyValueStore::new()),
        "user-1",
        &BoardConfig::default(),
    )
    .expect("service builds")
}

async fn seed(service: &Service, group: &str, titles: &[&str]) -> Result<(), eyre::Report> {
    let request = CreateTasksRequest::new(group, january()?).with_titles(titles.iter().copied());
    service.create_tasks(request).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_batches_append_in_title_order(service: Service) -> Result<(), eyre::Report> {
    seed(&service, "todo", &["A", "B"]).await?;
    seed(&service, "done", &["C"]).await?;
    seed(&service, "todo", &["D"]).await?;

    eyre::ensure!(
        board_view(&service) == view(&[("todo", &["A", "B", "D"]), ("done", &["C"])]),
        "unexpected board {:?}",
        board_view(&service)
    );
    let positions: Vec<Option<u32>> = service
        .board()
        .snapshot()
        .group_tasks(&label("todo")?)
        .iter()
        .map(|task| task.position().map(Position::value))
        .collect();
    eyre::ensure!(
        positions == vec![Some(1), Some(2), Some(3)],
        "unexpected positions {positions:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_batch_writes_nothing(
    store: Arc<InMemoryTaskStore>,
) -> Result<(), eyre::Report> {
    let service = service_for(
        &store,
        &Arc::new(InMemoryKeyValueStore::new()),
        "user-1",
        &BoardConfig::default(),
    )?;
    let request = CreateTasksRequest::new("todo", january()?).with_titles(["ok", "  "]);

    let result = service.create_tasks(request).await;

    let Err(BoardServiceError::Validation(errors)) = result else {
        eyre::bail!("expected a validation error, got {result:?}");
    };
    eyre::ensure!(
        errors.get("title_2") == Some(&BoardDomainError::EmptyTitle),
        "blank row should be reported as title_2"
    );
    service.fetch_tasks().await?;
    eyre::ensure!(service.groups().is_empty(), "nothing should be stored");
    eyre::ensure!(service.error().is_none(), "validation never reaches the slot");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_a_task_by_edit_appends_it(service: Service) -> Result<(), eyre::Report> {
    seed(&service, "todo", &["A", "B"]).await?;
    seed(&service, "done", &["C"]).await?;
    let task = service
        .board()
        .snapshot()
        .group_tasks(&label("todo")?)
        .first()
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("todo is empty"))?;

    service
        .update_task(
            task,
            UpdateTaskRequest::new().with_title("A2").with_label("done"),
        )
        .await?;

    eyre::ensure!(
        board_view(&service) == view(&[("todo", &["B"]), ("done", &["C", "A2"])]),
        "unexpected board {:?}",
        board_view(&service)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rename_then_delete_group(service: Service) -> Result<(), eyre::Report> {
    seed(&service, "todo", &["A", "B"]).await?;
    seed(&service, "done", &["C"]).await?;

    service.rename_group(&label("todo")?, "doing").await?;
    eyre::ensure!(
        board_view(&service) == view(&[("doing", &["A", "B"]), ("done", &["C"])]),
        "rename should keep rank and members, got {:?}",
        board_view(&service)
    );

    service.delete_group(&label("doing")?).await?;
    service.delete_group(&label("doing")?).await?;
    eyre::ensure!(
        board_view(&service) == view(&[("done", &["C"])]),
        "unexpected board {:?}",
        board_view(&service)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rename_onto_existing_group_is_rejected(service: Service) -> Result<(), eyre::Report> {
    seed(&service, "todo", &["A"]).await?;
    seed(&service, "done", &["C"]).await?;

    let result = service.rename_group(&label("todo")?, "done").await;

    eyre::ensure!(
        matches!(
            result,
            Err(BoardServiceError::Domain(BoardDomainError::DuplicateGroup(_)))
        ),
        "expected a collision, got {result:?}"
    );
    eyre::ensure!(
        board_view(&service) == view(&[("todo", &["A"]), ("done", &["C"])]),
        "board should be untouched"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owners_see_only_their_tasks(store: Arc<InMemoryTaskStore>) -> Result<(), eyre::Report> {
    let local = Arc::new(InMemoryKeyValueStore::new());
    let config = BoardConfig::default();
    let alice = service_for(&store, &local, "alice", &config)?;
    let bob = service_for(&store, &local, "bob", &config)?;

    seed(&alice, "todo", &["A"]).await?;
    seed(&bob, "todo", &["B"]).await?;
    alice.fetch_tasks().await?;

    eyre::ensure!(
        board_view(&alice) == view(&[("todo", &["A"])]),
        "alice sees {:?}",
        board_view(&alice)
    );
    eyre::ensure!(
        board_view(&bob) == view(&[("todo", &["B"])]),
        "bob sees {:?}",
        board_view(&bob)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_without_optional_columns_orders_by_creation(
    store: Arc<InMemoryTaskStore>,
) -> Result<(), eyre::Report> {
    let config = BoardConfig::from_toml_str(
        "[store]\nposition_column = false\nowner_column = false\n",
    )?;
    let local = Arc::new(InMemoryKeyValueStore::new());
    let service = service_for(&store, &local, "user-1", &config)?;

    seed(&service, "todo", &["A", "B", "C"]).await?;

    eyre::ensure!(
        board_view(&service) == view(&[("todo", &["A", "B", "C"])]),
        "unexpected board {:?}",
        board_view(&service)
    );
    let snapshot = service.board().snapshot();
    eyre::ensure!(
        snapshot
            .tasks()
            .iter()
            .all(|task| task.position().is_none() && task.owner().is_none()),
        "untracked columns must stay empty"
    );
    Ok(())
}
