use super::resource::RestResource;
use crate::{error::AppResult, models::WaitList};

impl RestResource<WaitList> {
    /// Administrator purge of every wait-list entry
    pub async fn delete_all(&self) -> AppResult<()> {
        let path = format!("{}/delete-all", self.path());
        self.client.delete(&path).await?;
        tracing::info!("Purged all wait-list entries");
        Ok(())
    }
}
