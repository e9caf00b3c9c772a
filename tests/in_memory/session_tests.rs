//! Integration tests for the auth redirect handshake.

use std::sync::Arc;

use super::helpers::{board_view, january, service_for, view};
use rstest::rstest;
use taskboard::{
    board::{adapters::memory::InMemoryTaskStore, domain::OwnerId, services::CreateTasksRequest},
    config::BoardConfig,
    local_store::adapters::memory::InMemoryKeyValueStore,
    session::{
        adapters::memory::InMemoryIdentityProvider,
        domain::{Identity, SignInOutcome},
        services::SessionService,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn password_reset_redirect_leads_to_the_board() -> Result<(), eyre::Report> {
    let config = BoardConfig::default();
    let local = Arc::new(InMemoryKeyValueStore::new());
    let provider = Arc::new(InMemoryIdentityProvider::new());
    let user = Identity::new(OwnerId::new("user-7")?, None);
    provider.issue_recovery_token("token-1", user.clone())?;
    let session = SessionService::new(Arc::clone(&provider), Arc::clone(&local), &config);

    eyre::ensure!(
        session.note_redirect_query("?reset=true")?,
        "reset query should be noted"
    );
    let recovered = session
        .complete_recovery("#type=recovery&access_token=token-1&refresh_token=r-1")
        .await?
        .ok_or_else(|| eyre::eyre!("expected a recovery session"))?;
    eyre::ensure!(recovered == user, "recovered the wrong identity");
    eyre::ensure!(
        session.on_signed_in()? == SignInOutcome::PasswordResetComplete,
        "reset should be announced"
    );

    let store = Arc::new(InMemoryTaskStore::new());
    let board = service_for(&store, &local, recovered.id().as_str(), &config)?;
    board
        .create_tasks(CreateTasksRequest::new("todo", january()?).with_title("change password"))
        .await?;
    eyre::ensure!(
        board_view(&board) == view(&[("todo", &["change password"])]),
        "unexpected board {:?}",
        board_view(&board)
    );
    Ok(())
}
