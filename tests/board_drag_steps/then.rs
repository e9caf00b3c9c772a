//! Then steps for board drag-and-drop scenarios.

use super::world::{BoardWorld, parse_list};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskboard::board::{domain::GroupLabel, services::DropOutcome};

#[then(r#"group "{label}" shows "{titles}""#)]
fn group_shows(world: &BoardWorld, label: String, titles: String) -> Result<(), eyre::Report> {
    let group = GroupLabel::new(label).wrap_err("parse group label")?;
    let shown = world.board_titles(&group);
    let expected = parse_list(&titles);
    eyre::ensure!(
        shown == expected,
        "expected {expected:?} in {group}, board shows {shown:?}"
    );
    Ok(())
}

#[then(r#"the store lists group "{label}" as "{titles}""#)]
fn store_lists(world: &BoardWorld, label: String, titles: String) -> Result<(), eyre::Report> {
    let group = GroupLabel::new(label).wrap_err("parse group label")?;
    let stored = world.stored_titles(&group)?;
    let expected = parse_list(&titles);
    eyre::ensure!(
        stored == expected,
        "expected {expected:?} stored in {group}, found {stored:?}"
    );
    Ok(())
}

#[then("the drop changes nothing")]
fn drop_changes_nothing(world: &BoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.last_outcome == Some(DropOutcome::Unchanged),
        "expected an unchanged drop, got {:?}",
        world.last_outcome
    );
    eyre::ensure!(world.last_persist.is_none(), "a no-op drop must not persist");
    Ok(())
}

#[then("the drop is ignored")]
fn drop_is_ignored(world: &BoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.last_outcome == Some(DropOutcome::Ignored),
        "expected an ignored drop, got {:?}",
        world.last_outcome
    );
    Ok(())
}

#[then(r#"the group order is "{labels}""#)]
fn group_order_is(world: &BoardWorld, labels: String) -> Result<(), eyre::Report> {
    let order: Vec<String> = world
        .service
        .board()
        .snapshot()
        .group_order()
        .iter()
        .map(|label| label.as_str().to_owned())
        .collect();
    let expected = parse_list(&labels);
    eyre::ensure!(
        order == expected,
        "expected group order {expected:?}, found {order:?}"
    );
    Ok(())
}

#[then(r#"the board error reads "{message}""#)]
fn board_error_reads(world: &BoardWorld, message: String) -> Result<(), eyre::Report> {
    let error = world.service.error();
    eyre::ensure!(
        error.as_deref() == Some(message.as_str()),
        "expected board error {message:?}, found {error:?}"
    );
    eyre::ensure!(
        matches!(world.last_persist, Some(Err(_))),
        "expected the persist to fail"
    );
    Ok(())
}
