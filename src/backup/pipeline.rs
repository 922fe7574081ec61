use std::path::PathBuf;

use tracing::{debug, error, info};

use super::enumerator::list_target_boards;
use super::gate::check_credentials;
use super::loader::load_board;
use super::resolver::resolve_organizations;
use super::writer::SnapshotWriter;
use crate::config::{BackupConfig, ErrorPolicy, OrgSelection};
use crate::error::BackupError;
use crate::model::board::BoardSummary;
use crate::providers::Provider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    CredentialsChecked,
    OrganizationsResolved,
    BoardsListed,
    BoardFetched,
    SnapshotWritten,
    Done,
    /// Ended early; carries the failure kind.
    Aborted(&'static str),
}

#[derive(Debug)]
pub struct FailedBoard {
    pub board_id: String,
    pub board_name: String,
    pub error: String,
}

/// What a run did.
#[derive(Debug, Default)]
pub struct RunReport {
    pub organizations: usize,
    pub written: Vec<PathBuf>,
    pub failed: Vec<FailedBoard>,
}

/// Drives one backup run: credentials, organizations, then every board of
/// every organization, strictly one request at a time.
pub struct Pipeline<'a, P: Provider + ?Sized> {
    config: &'a BackupConfig,
    provider: &'a P,
    clock: fn() -> i64,
    state: RunState,
}

fn epoch_seconds() -> i64 {
    chrono::Utc::now().timestamp()
}

impl<'a, P: Provider + ?Sized> Pipeline<'a, P> {
    pub fn new(config: &'a BackupConfig, provider: &'a P) -> Self {
        Self {
            config,
            provider,
            clock: epoch_seconds,
            state: RunState::Init,
        }
    }

    /// Replace the source of batch timestamps.
    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn enter(&mut self, state: RunState) {
        debug!("{:?} -> {:?}", self.state, state);
        self.state = state;
    }

    pub async fn run(&mut self) -> Result<RunReport, BackupError> {
        let result = self.drive().await;
        if let Err(err) = &result {
            self.enter(RunState::Aborted(err.kind()));
        }
        result
    }

    async fn drive(&mut self) -> Result<RunReport, BackupError> {
        check_credentials(self.config)?;
        debug!("Backing up from {}", self.provider.name());
        self.enter(RunState::CredentialsChecked);

        let targets = self.target_organizations().await?;
        self.enter(RunState::OrganizationsResolved);
        debug!("Organization ids: {targets:?}");

        let writer = SnapshotWriter::new(&self.config.output_directory);
        let mut report = RunReport::default();

        for org_id in &targets {
            let boards = list_target_boards(self.provider, org_id, &targets).await?;
            self.enter(RunState::BoardsListed);
            report.organizations += 1;

            if writer.prepare()? {
                info!("Created output directory {}", writer.dir().display());
            }
            if boards.is_empty() {
                continue;
            }

            info!("Backing up boards:");
            let timestamp = (self.clock)();

            for board in &boards {
                info!(" {} ({})", board.name, board.id);
                match self.backup_board(&writer, board, timestamp).await {
                    Ok(path) => report.written.push(path),
                    Err(err) if self.config.on_error == ErrorPolicy::Skip => {
                        let message = format!("{:#}", anyhow::Error::from(err));
                        error!("Skipping board {} ({}): {message}", board.name, board.id);
                        report.failed.push(FailedBoard {
                            board_id: board.id.clone(),
                            board_name: board.name.clone(),
                            error: message,
                        });
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        self.enter(RunState::Done);
        info!(
            "Backed up {} board(s) from {} organization(s) to {}",
            report.written.len(),
            report.organizations,
            writer.dir().display()
        );

        if !report.failed.is_empty() {
            for failed in &report.failed {
                error!(
                    "Not backed up: {} ({}): {}",
                    failed.board_name, failed.board_id, failed.error
                );
            }
            return Err(BackupError::BoardsFailed {
                count: report.failed.len(),
            });
        }
        Ok(report)
    }

    async fn target_organizations(&self) -> Result<Vec<String>, BackupError> {
        match &self.config.organizations {
            OrgSelection::Ids(ids) if ids.is_empty() => Err(BackupError::Config(
                "no organization ids or names given".into(),
            )),
            OrgSelection::Ids(ids) => Ok(ids.clone()),
            OrgSelection::Names(names) => resolve_organizations(self.provider, names).await,
        }
    }

    async fn backup_board(
        &mut self,
        writer: &SnapshotWriter,
        board: &BoardSummary,
        timestamp: i64,
    ) -> Result<PathBuf, BackupError> {
        let snapshot = load_board(self.provider, board).await?;
        self.enter(RunState::BoardFetched);
        let path = writer.write(&board.name, timestamp, &snapshot)?;
        self.enter(RunState::SnapshotWritten);
        Ok(path)
    }
}
