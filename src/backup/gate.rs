use crate::config::BackupConfig;
use crate::error::BackupError;

/// Refuse to start without both an API key and a token. The error carries
/// the URL where the operator can obtain the missing one.
pub fn check_credentials(config: &BackupConfig) -> Result<(), BackupError> {
    let credentials = &config.credentials;
    if credentials.api_key.trim().is_empty() {
        return Err(BackupError::MissingCredential {
            credential: "API key",
            guidance_url: key_url(&config.api_url),
        });
    }
    if credentials.token.trim().is_empty() {
        return Err(BackupError::MissingCredential {
            credential: "token",
            guidance_url: authorization_url(
                &config.api_url,
                &credentials.api_key,
                &config.app_name,
                &config.token_expiration,
            ),
        });
    }
    Ok(())
}

pub fn key_url(api_url: &str) -> String {
    format!("{api_url}appKey/generate")
}

pub fn authorization_url(api_url: &str, api_key: &str, app_name: &str, expiration: &str) -> String {
    format!(
        "{api_url}connect?key={}&name={}&response_type=token&expiration={}",
        urlencoding::encode(api_key),
        urlencoding::encode(app_name),
        urlencoding::encode(expiration),
    )
}
