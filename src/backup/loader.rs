use tracing::{debug, warn};

use crate::error::BackupError;
use crate::model::board::{BoardSnapshot, BoardSummary};
use crate::providers::trello::ACTIONS_LIMIT;
use crate::providers::Provider;

/// Fetch the full content of one board. A board that comes back with the
/// maximum number of actions is reported, since older history was cut off.
pub async fn load_board<P: Provider + ?Sized>(
    provider: &P,
    board: &BoardSummary,
) -> Result<BoardSnapshot, BackupError> {
    let snapshot = provider
        .load_board(&board.id)
        .await
        .map_err(|source| BackupError::BoardLoadFailed {
            board_id: board.id.clone(),
            board_name: board.name.clone(),
            source,
        })?;

    if snapshot.id() != Some(board.id.as_str()) {
        warn!("Board {} came back with id {:?}", board.id, snapshot.id());
    }
    debug!(
        "Loaded {} with {} action(s)",
        snapshot.name().unwrap_or(&board.name),
        snapshot.action_count()
    );

    if snapshot.action_count() >= ACTIONS_LIMIT {
        warn!(
            "Board {} ({}) has at least {ACTIONS_LIMIT} actions; older actions are not included",
            board.name, board.id
        );
    }
    Ok(snapshot)
}
