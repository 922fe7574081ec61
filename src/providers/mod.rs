pub mod trello;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::board::{BoardSnapshot, BoardSummary};
use crate::model::organization::OrganizationRef;

/// Read-only access to the boards of a project-management service.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;
    /// Every organization visible to the authenticated member.
    async fn list_organizations(&self) -> Result<Vec<OrganizationRef>>;
    /// Open boards of one organization, in the order the service lists them.
    async fn list_boards(&self, org_id: &str) -> Result<Vec<BoardSummary>>;
    /// One board with all of its nested content.
    async fn load_board(&self, board_id: &str) -> Result<BoardSnapshot>;
}
