//! When steps for board drag-and-drop scenarios.

use super::world::{BoardWorld, after_column, card_bounds, layout_for, run_async, slot_pointer};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::board::{
    domain::{BoardLayout, GroupLabel, Point, TaskId},
    services::DropOutcome,
};

fn drag_task_to(
    world: &mut BoardWorld,
    title: &str,
    target: impl FnOnce(&BoardLayout, TaskId) -> Result<Point, eyre::Report>,
) -> Result<(), eyre::Report> {
    let layout = layout_for(&world.service.board().snapshot());
    let task = world.task_id(title)?;
    let card = card_bounds(&layout, task)?;
    let grab = Point::new(card.left + 20.0, card.top + 10.0);
    let drop_at = target(&layout, task)?;

    let mut drag = world.service.drag_controller();
    drag.pointer_down_on_task(task, grab, card.origin())
        .wrap_err("start task drag")?;
    drag.pointer_move(drop_at, &layout);
    let outcome = drag.pointer_up(drop_at, &layout).wrap_err("release task drag")?;

    if let DropOutcome::Pending(plan) = &outcome {
        world.last_persist = Some(run_async(drag.engine().persist(plan.clone())));
    }
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#"task "{title}" is dropped at slot {slot:usize} of group "{label}""#)]
fn drop_task_at_slot(
    world: &mut BoardWorld,
    title: String,
    slot: usize,
    label: String,
) -> Result<(), eyre::Report> {
    let group = GroupLabel::new(label).wrap_err("parse group label")?;
    drag_task_to(world, &title, |layout, task| {
        slot_pointer(layout, &group, task, slot)
    })
}

#[when(r#"task "{title}" is released outside the board"#)]
fn release_task_outside(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    drag_task_to(world, &title, |_, _| Ok(Point::new(5_000.0, 5_000.0)))
}

#[when(r#"group "{dragged}" is dropped after group "{anchor}""#)]
fn drop_group_after(
    world: &mut BoardWorld,
    dragged: String,
    anchor: String,
) -> Result<(), eyre::Report> {
    let moving = GroupLabel::new(dragged).wrap_err("parse dragged label")?;
    let fixed = GroupLabel::new(anchor).wrap_err("parse anchor label")?;
    let layout = layout_for(&world.service.board().snapshot());
    let column = layout
        .groups
        .iter()
        .find(|zone| zone.label == moving)
        .map(|zone| zone.bounds)
        .ok_or_else(|| eyre::eyre!("group {moving} is not laid out"))?;
    let drop_at = after_column(&layout, &fixed)?;

    let mut drag = world.service.drag_controller();
    let grab = Point::new(column.left + 10.0, column.top + 10.0);
    drag.pointer_down_on_group(&moving, grab, column.origin())
        .wrap_err("start group drag")?;
    drag.pointer_move(drop_at, &layout);
    let outcome = drag.pointer_up(drop_at, &layout).wrap_err("release group drag")?;
    world.last_outcome = Some(outcome);
    Ok(())
}
