//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::DefaultClock;
use taskboard::{
    board::{
        adapters::memory::InMemoryTaskStore,
        domain::{GroupLabel, OwnerId, Period},
        services::BoardService,
    },
    config::BoardConfig,
    local_store::ports::KeyValueStore,
};

/// Board service over the in-memory row-store.
pub type TestService<K> = BoardService<InMemoryTaskStore, K, DefaultClock>;

/// Builds a service for `owner` sharing `store` and `local`.
///
/// # Errors
///
/// Returns an error if `owner` is not a valid identity.
pub fn service_for<K: KeyValueStore>(
    store: &Arc<InMemoryTaskStore>,
    local: &Arc<K>,
    owner: &str,
    config: &BoardConfig,
) -> Result<TestService<K>, eyre::Report> {
    Ok(BoardService::new(
        Arc::clone(store),
        Arc::clone(local),
        Arc::new(DefaultClock),
        OwnerId::new(owner)?,
        config,
    ))
}

/// Returns the period used by every created task.
///
/// # Errors
///
/// Returns an error if the fixed dates are rejected.
pub fn january() -> Result<Period, eyre::Report> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).ok_or_else(|| eyre::eyre!("bad date"))?;
    let end = NaiveDate::from_ymd_opt(2025, 1, 31).ok_or_else(|| eyre::eyre!("bad date"))?;
    Ok(Period::new(start, end)?)
}

/// Parses a group label.
///
/// # Errors
///
/// Returns an error if `text` is not a valid label.
pub fn label(text: &str) -> Result<GroupLabel, eyre::Report> {
    Ok(GroupLabel::new(text)?)
}

/// Returns each group's label and titles in display order.
pub fn board_view<K: KeyValueStore>(service: &TestService<K>) -> Vec<(String, Vec<String>)> {
    service
        .groups()
        .into_iter()
        .map(|group| {
            let titles = group
                .tasks
                .iter()
                .map(|task| task.title().as_str().to_owned())
                .collect();
            (group.label.as_str().to_owned(), titles)
        })
        .collect()
}

/// Builds an expected board view from string slices.
pub fn view(groups: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
    groups
        .iter()
        .map(|(group, titles)| {
            (
                (*group).to_owned(),
                titles.iter().map(|title| (*title).to_owned()).collect(),
            )
        })
        .collect()
}
