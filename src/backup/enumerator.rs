use tracing::{debug, info, warn};

use crate::error::BackupError;
use crate::model::board::BoardSummary;
use crate::providers::Provider;

/// List the open boards of `org_id` that belong to one of `targets`.
///
/// The listing endpoint is already scoped to the organization, but boards
/// are still checked against the target set before anything is fetched.
pub async fn list_target_boards<P: Provider + ?Sized>(
    provider: &P,
    org_id: &str,
    targets: &[String],
) -> Result<Vec<BoardSummary>, BackupError> {
    let boards = provider
        .list_boards(org_id)
        .await
        .map_err(|source| BackupError::BoardListingFailed {
            org_id: org_id.to_string(),
            source,
        })?;

    if boards.is_empty() {
        info!("No boards found under organization ID: {org_id}");
        return Ok(boards);
    }

    let listed = boards.len();
    let in_scope: Vec<BoardSummary> = boards
        .into_iter()
        .filter(|board| {
            let keep = board.belongs_to(targets);
            if !keep {
                warn!(
                    "Skipping board {} ({}) of organization {:?} outside the selected organizations",
                    board.name, board.id, board.id_organization
                );
            }
            keep
        })
        .collect();

    if in_scope.is_empty() {
        warn!(
            "None of the {listed} board(s) listed under organization ID {org_id} \
             belong to the selected organizations"
        );
    } else {
        debug!("{} of {listed} board(s) under {org_id} selected", in_scope.len());
    }
    Ok(in_scope)
}
