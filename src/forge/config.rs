//! Configuration for the remote release API connection.
use secrecy::SecretString;

/// Remote repository coordinates and credentials for the release API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
}
