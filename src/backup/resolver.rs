use tracing::{debug, error, info};

use crate::error::BackupError;
use crate::providers::Provider;

/// Translate organization names into ids with a single directory lookup.
///
/// Matching is exact but ignores case and surrounding whitespace. Names
/// that match nothing are dropped; an empty result aborts the run.
pub async fn resolve_organizations<P: Provider + ?Sized>(
    provider: &P,
    names: &[String],
) -> Result<Vec<String>, BackupError> {
    let selected: Vec<String> = names.iter().map(|n| n.trim().to_lowercase()).collect();
    debug!("Trying to find organizations for {selected:?}");

    let organizations = provider
        .list_organizations()
        .await
        .map_err(|source| BackupError::OrganizationLookupFailed { source })?;

    let mut ids = Vec::new();
    if organizations.is_empty() {
        error!("No organizations found.");
    } else {
        info!("Finding all organizations.");
        for organization in &organizations {
            if selected.iter().any(|name| organization.matches(name)) {
                debug!("Organization added: {}", organization.id);
                ids.push(organization.id.clone());
            }
        }
    }

    if ids.is_empty() {
        return Err(BackupError::OrganizationResolutionFailed {
            names: names.to_vec(),
        });
    }
    Ok(ids)
}
