//! Shared world state for board drag-and-drop scenarios.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    board::{
        adapters::memory::InMemoryTaskStore,
        domain::{
            Axis, BoardLayout, BoardState, GroupLabel, GroupZone, NewTask, OwnerId, Point, Rect,
            Task, TaskChanges, TaskId,
        },
        ports::{OwnerFilter, TaskStore, TaskStoreError, TaskStoreResult},
        services::{BoardService, BoardServiceResult, DropOutcome},
    },
    config::BoardConfig,
    local_store::adapters::memory::InMemoryKeyValueStore,
};

/// In-memory row-store that can be told to reject updates.
#[derive(Debug, Default)]
pub struct SwitchableStore {
    inner: InMemoryTaskStore,
    reject_updates: AtomicBool,
}

impl SwitchableStore {
    /// Makes every later update fail.
    pub fn reject_updates(&self) {
        self.reject_updates.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl TaskStore for SwitchableStore {
    async fn insert_batch(&self, tasks: Vec<NewTask>) -> TaskStoreResult<()> {
        self.inner.insert_batch(tasks).await
    }

    async fn update(&self, id: TaskId, changes: TaskChanges) -> TaskStoreResult<()> {
        if self.reject_updates.load(Ordering::SeqCst) {
            return Err(TaskStoreError::persistence(std::io::Error::other(
                "row-store rejected the update",
            )));
        }
        self.inner.update(id, changes).await
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        self.inner.delete(id).await
    }

    async fn select_all(&self, filter: OwnerFilter) -> TaskStoreResult<Vec<Task>> {
        self.inner.select_all(filter).await
    }
}

/// Service type used by the BDD world.
pub type WorldService = BoardService<SwitchableStore, InMemoryKeyValueStore, DefaultClock>;

/// Scenario world for board drag-and-drop behaviour tests.
pub struct BoardWorld {
    pub store: Arc<SwitchableStore>,
    pub service: WorldService,
    pub last_outcome: Option<DropOutcome>,
    pub last_persist: Option<BoardServiceResult<()>>,
}

impl BoardWorld {
    /// Creates a world with an empty board for a single identity.
    ///
    /// # Panics
    ///
    /// Panics if the fixed owner identifier is rejected.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(SwitchableStore::default());
        let owner = OwnerId::new("scenario-user").expect("valid owner");
        let service = BoardService::new(
            Arc::clone(&store),
            Arc::new(InMemoryKeyValueStore::new()),
            Arc::new(DefaultClock),
            owner,
            &BoardConfig::default(),
        );
        Self {
            store,
            service,
            last_outcome: None,
            last_persist: None,
        }
    }

    /// Returns the titles of `label` on the board, in display order.
    pub fn board_titles(&self, label: &GroupLabel) -> Vec<String> {
        titles_in(&self.service.board().snapshot(), label)
    }

    /// Returns the titles of `label` as stored, in display order.
    pub fn stored_titles(&self, label: &GroupLabel) -> Result<Vec<String>, eyre::Report> {
        let rows = run_async(self.store.select_all(OwnerFilter::Any))
            .map_err(|err| eyre::eyre!("reading stored rows failed: {err}"))?;
        Ok(titles_in(&BoardState::new(rows, Vec::new()), label))
    }

    /// Looks a task up on the board by title.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.service
            .board()
            .snapshot()
            .tasks()
            .iter()
            .find(|task| task.title().as_str() == title)
            .map(Task::id)
            .ok_or_else(|| eyre::eyre!("no task titled {title} on the board"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated step argument.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

fn titles_in(state: &BoardState, label: &GroupLabel) -> Vec<String> {
    state
        .group_tasks(label)
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect()
}

const COLUMN_PITCH: f64 = 220.0;
const COLUMN_WIDTH: f64 = 200.0;
const COLUMN_HEIGHT: f64 = 600.0;
const CARD_TOP: f64 = 40.0;
const CARD_PITCH: f64 = 60.0;
const CARD_HEIGHT: f64 = 50.0;

/// Measures `state` as side-by-side columns of stacked cards.
pub fn layout_for(state: &BoardState) -> BoardLayout {
    let zones = (0_u32..)
        .zip(state.groups())
        .map(|(column, group)| {
            let left = f64::from(column) * COLUMN_PITCH;
            let zone = GroupZone::new(
                group.label,
                Rect::new(left, 0.0, COLUMN_WIDTH, COLUMN_HEIGHT),
            );
            (0_u32..).zip(&group.tasks).fold(zone, |built, (row, member)| {
                built.with_item(
                    member.id(),
                    Rect::new(
                        left,
                        CARD_TOP + f64::from(row) * CARD_PITCH,
                        COLUMN_WIDTH,
                        CARD_HEIGHT,
                    ),
                )
            })
        })
        .collect();
    BoardLayout::new(zones)
}

/// Returns the card bounds of `task` in `layout`.
pub fn card_bounds(layout: &BoardLayout, task: TaskId) -> Result<Rect, eyre::Report> {
    layout
        .groups
        .iter()
        .flat_map(|zone| zone.items.iter())
        .find(|item| item.task_id == task)
        .map(|item| item.bounds)
        .ok_or_else(|| eyre::eyre!("task {task} is not laid out"))
}

/// Returns a pointer that targets insertion slot `slot` of `label`, the
/// dragged card excluded.
pub fn slot_pointer(
    layout: &BoardLayout,
    label: &GroupLabel,
    dragged: TaskId,
    slot: usize,
) -> Result<Point, eyre::Report> {
    let zone = layout
        .groups
        .iter()
        .find(|zone| &zone.label == label)
        .ok_or_else(|| eyre::eyre!("group {label} is not laid out"))?;
    let x = zone.bounds.center(Axis::Horizontal);
    let target = zone
        .items
        .iter()
        .filter(|item| item.task_id != dragged)
        .nth(slot);
    let y = target.map_or(zone.bounds.top + COLUMN_HEIGHT - 10.0, |item| {
        item.bounds.center(Axis::Vertical) - 5.0
    });
    Ok(Point::new(x, y))
}

/// Returns a pointer just right of the column of `label`.
pub fn after_column(layout: &BoardLayout, label: &GroupLabel) -> Result<Point, eyre::Report> {
    layout
        .groups
        .iter()
        .find(|zone| &zone.label == label)
        .map(|zone| {
            Point::new(
                zone.bounds.left + zone.bounds.width + 5.0,
                zone.bounds.top + 10.0,
            )
        })
        .ok_or_else(|| eyre::eyre!("group {label} is not laid out"))
}
