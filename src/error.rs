use std::path::PathBuf;

use thiserror::Error;

/// Failures that end a backup run.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("missing {credential}; visit {guidance_url} and re-run")]
    MissingCredential {
        credential: &'static str,
        guidance_url: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unable to read the organization directory")]
    OrganizationLookupFailed {
        #[source]
        source: anyhow::Error,
    },

    #[error("no organization matched {names:?}")]
    OrganizationResolutionFailed { names: Vec<String> },

    #[error("unable to list boards of organization {org_id}; check your key and token")]
    BoardListingFailed {
        org_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to load board {board_name} ({board_id})")]
    BoardLoadFailed {
        board_id: String,
        board_name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write snapshot {}", path.display())]
    SnapshotWriteFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("{count} board(s) could not be backed up")]
    BoardsFailed { count: usize },
}

impl BackupError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Name of the failure class, as recorded in the pipeline's final state.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential { .. } => "MissingCredential",
            Self::Config(_) => "Config",
            Self::OrganizationLookupFailed { .. } => "OrganizationLookupFailed",
            Self::OrganizationResolutionFailed { .. } => "OrganizationResolutionFailed",
            Self::BoardListingFailed { .. } => "BoardListingFailed",
            Self::BoardLoadFailed { .. } => "BoardLoadFailed",
            Self::SnapshotWriteFailed { .. } => "SnapshotWriteFailed",
            Self::BoardsFailed { .. } => "BoardsFailed",
        }
    }
}
