//! Given steps for board drag-and-drop scenarios.

use super::world::{BoardWorld, parse_list, run_async};
use chrono::{Duration, NaiveDate, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::{
    domain::{GroupLabel, NewTask, Period, Position, TaskId, TaskTitle},
    ports::TaskStore,
};

fn seed_group(world: &BoardWorld, label: &str, titles: &str) -> Result<(), eyre::Report> {
    let group = GroupLabel::new(label).wrap_err("parse group label")?;
    let start = NaiveDate::from_ymd_opt(2025, 4, 1).ok_or_else(|| eyre::eyre!("bad date"))?;
    let period = Period::new(start, start).wrap_err("build period")?;
    let now = Utc::now();
    let mut position = Position::FIRST;
    let mut rows = Vec::new();
    for (offset, title) in (0_i64..).zip(parse_list(titles)) {
        rows.push(NewTask {
            id: TaskId::new(),
            title: TaskTitle::new(title).wrap_err("parse task title")?,
            label: group.clone(),
            period,
            position: Some(position),
            owner: Some(world.service.owner().clone()),
            created_at: now + Duration::milliseconds(offset),
        });
        position = position.next();
    }
    run_async(world.store.insert_batch(rows)).wrap_err("seed tasks")?;
    run_async(world.service.fetch_tasks()).wrap_err("load board")?;
    Ok(())
}

#[given(r#"a board with group "{label}" holding "{titles}""#)]
fn board_with_group(
    world: &mut BoardWorld,
    label: String,
    titles: String,
) -> Result<(), eyre::Report> {
    seed_group(world, &label, &titles)
}

#[given(r#"group "{label}" holding "{titles}""#)]
fn another_group(
    world: &mut BoardWorld,
    label: String,
    titles: String,
) -> Result<(), eyre::Report> {
    seed_group(world, &label, &titles)
}

#[given("the row-store rejects updates")]
fn row_store_rejects_updates(world: &mut BoardWorld) {
    world.store.reject_updates();
}
