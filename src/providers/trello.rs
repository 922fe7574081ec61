use anyhow::{Context, Result};
use async_trait::async_trait;

use super::Provider;
use crate::config::Credentials;
use crate::model::board::{BoardSnapshot, BoardSummary};
use crate::model::organization::OrganizationRef;

/// Most recent actions included in a board fetch. Older history is not
/// retrievable through the board endpoint.
pub const ACTIONS_LIMIT: usize = 1000;

const BOARD_LIST_PARAMS: &[(&str, &str)] = &[("filter", "open"), ("lists", "open")];

const BOARD_PROJECTION: &[(&str, &str)] = &[
    ("fields", "all"),
    ("actions", "all"),
    ("action_fields", "all"),
    ("actions_limit", "1000"),
    ("cards", "all"),
    ("card_fields", "all"),
    ("card_attachments", "true"),
    ("lists", "all"),
    ("list_fields", "all"),
    ("members", "all"),
    ("member_fields", "all"),
    ("checklists", "all"),
    ("checklist_fields", "all"),
    ("organization", "false"),
];

pub struct TrelloProvider {
    base: String,
    credentials: Credentials,
    client: reqwest::Client,
}

impl TrelloProvider {
    /// `base` must end with `/`, e.g. `https://api.trello.com/1/`.
    pub fn new(base: String, credentials: Credentials) -> Self {
        Self {
            base,
            credentials,
            client: reqwest::Client::new(),
        }
    }

    fn auth_params(&self) -> [(&str, &str); 2] {
        [
            ("key", &self.credentials.api_key),
            ("token", &self.credentials.token),
        ]
    }
}

#[async_trait]
impl Provider for TrelloProvider {
    fn name(&self) -> &str {
        "Trello"
    }

    async fn list_organizations(&self) -> Result<Vec<OrganizationRef>> {
        let base = &self.base;

        let organizations: Vec<OrganizationRef> = self
            .client
            .get(format!("{base}members/me/organizations"))
            .query(&self.auth_params())
            .send()
            .await
            .context("Trello members/me/organizations failed")?
            .json()
            .await
            .context("Trello returned an unreadable organization list")?;

        Ok(organizations)
    }

    async fn list_boards(&self, org_id: &str) -> Result<Vec<BoardSummary>> {
        let base = &self.base;

        // An auth rejection comes back as a plain-text body, so the decode
        // is what fails here.
        let boards: Vec<BoardSummary> = self
            .client
            .get(format!("{base}organizations/{org_id}/boards"))
            .query(&self.auth_params())
            .query(BOARD_LIST_PARAMS)
            .send()
            .await
            .with_context(|| format!("Trello organizations/{org_id}/boards failed"))?
            .json()
            .await
            .context("Board list is not a JSON array")?;

        Ok(boards)
    }

    async fn load_board(&self, board_id: &str) -> Result<BoardSnapshot> {
        let base = &self.base;

        let snapshot: BoardSnapshot = self
            .client
            .get(format!("{base}boards/{board_id}"))
            .query(&self.auth_params())
            .query(BOARD_PROJECTION)
            .send()
            .await
            .with_context(|| format!("Trello boards/{board_id} failed"))?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("Board {board_id} is not valid JSON"))?;

        Ok(snapshot)
    }
}
