//! `PostgreSQL` row-store implementation for the task board.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::board::{
    domain::{
        GroupLabel, NewTask, OwnerId, PersistedTaskData, Position, Task, TaskChanges, TaskId,
        TaskTitle,
    },
    ports::{OwnerFilter, TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the task store.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store.
///
/// Targets the migration-managed `tasks` table, which carries both optional
/// columns. Stores lacking them are handled by the service layer through
/// [`crate::board::domain::StoreCapabilities`].
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn insert_batch(&self, new_tasks: Vec<NewTask>) -> TaskStoreResult<()> {
        if new_tasks.is_empty() {
            return Ok(());
        }
        let rows = new_tasks
            .iter()
            .map(to_new_row)
            .collect::<TaskStoreResult<Vec<_>>>()?;
        let first_id = new_tasks.first().map(|task| task.id);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&rows)
                .execute(connection)
                .map_err(|err| match (err, first_id) {
                    (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), Some(id)) => {
                        TaskStoreError::DuplicateTask(id)
                    }
                    (other, _) => TaskStoreError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, id: TaskId, changes: TaskChanges) -> TaskStoreResult<()> {
        if changes.is_empty() {
            return Ok(());
        }
        let changeset = to_changeset(&changes)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            if updated == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            if deleted == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn select_all(&self, filter: OwnerFilter) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .select(TaskRow::as_select())
                .order(tasks::created_at.asc())
                .into_boxed::<diesel::pg::Pg>();
            if let OwnerFilter::Owner(owner) = filter {
                query = query.filter(tasks::user_id.eq(owner.as_str().to_owned()));
            }
            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn position_column(position: Position) -> TaskStoreResult<i32> {
    i32::try_from(position.value()).map_err(TaskStoreError::persistence)
}

fn to_new_row(task: &NewTask) -> TaskStoreResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id.into_inner(),
        title: task.title.as_str().to_owned(),
        label: task.label.as_str().to_owned(),
        period: task.period.to_string(),
        position: task.position.map(position_column).transpose()?,
        user_id: task.owner.as_ref().map(|owner| owner.as_str().to_owned()),
        created_at: task.created_at,
    })
}

fn to_changeset(changes: &TaskChanges) -> TaskStoreResult<TaskChangeset> {
    Ok(TaskChangeset {
        title: changes.title.as_ref().map(|title| title.as_str().to_owned()),
        label: changes.label.as_ref().map(|label| label.as_str().to_owned()),
        period: changes.period.map(|period| period.to_string()),
        position: changes.position.map(position_column).transpose()?,
    })
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        title,
        label,
        period,
        position,
        user_id,
        created_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title: TaskTitle::new(title).map_err(TaskStoreError::persistence)?,
        label: GroupLabel::new(label).map_err(TaskStoreError::persistence)?,
        period: period.parse().map_err(TaskStoreError::persistence)?,
        position: position
            .map(Position::try_from)
            .transpose()
            .map_err(TaskStoreError::persistence)?,
        owner: user_id
            .map(OwnerId::new)
            .transpose()
            .map_err(TaskStoreError::persistence)?,
        created_at: Some(created_at),
    };
    Ok(Task::from_persisted(data))
}
