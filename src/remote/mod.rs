use async_trait::async_trait;

use crate::{
    Contact,
    ContactForm,
    error::Result,
};

pub mod api_client;

/// Remote operations the views rely on. The backend owns every record;
/// implementations never fabricate ids.
#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn contacts(&self) -> Result<Vec<Contact>>;
    async fn contact(&self, id: &str) -> Result<Contact>;

    /// Returns the created contact when the response body parses as one.
    async fn create_contact(&self, form: &ContactForm) -> Result<Option<Contact>>;
    async fn update_contact(&self, id: &str, form: &ContactForm) -> Result<()>;
    async fn delete_contact(&self, id: &str) -> Result<()>;
}
