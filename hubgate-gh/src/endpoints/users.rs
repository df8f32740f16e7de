use anyhow::Result;
use serde_json::Value;
use tracing::{info, instrument};

use crate::gateway::GitHubGateway;
use crate::routes::CallParams;
use crate::transport::Transport;

impl<T: Transport> GitHubGateway<T> {
  /// Get the authenticated user, fetched once per gateway.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_user(&mut self) -> Result<Value> {
    if let Some(user) = &self.cache.user {
      return Ok(user.clone());
    }

    let user = self.call("user", CallParams::new()).await?.body;
    info!("Cached authenticated user");
    self.cache.user = Some(user.clone());
    Ok(user)
  }
}
