use uuid::Uuid;

/// Source of the admin capability
///
/// Privileged operations check the caller against this port when admin gating is enabled.
#[mockall::automock]
#[async_trait::async_trait]
pub trait AuthorityPort {
    async fn is_admin(&self, caller: Uuid) -> Result<bool, Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as connectivity, configuration, or permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
