use std::sync::Arc;
use std::time::Duration;

use crate::{
    Config,
    Contact,
    ContactApi,
    error::Result,
};

use super::{
    QueryKey,
    QueryCache,
};

/// The caches shared by every view of one session.
pub struct QueryClient {
    contacts: QueryCache<Vec<Contact>>,
    contact : QueryCache<Contact>,
}

impl QueryClient {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            contacts: QueryCache::new(stale_time),
            contact : QueryCache::new(stale_time),
        }
    }

    pub fn from_config(cfg: &dyn Config) -> Self {
        Self::new(cfg.stale_time())
    }

    pub fn contacts(&self) -> &QueryCache<Vec<Contact>> {
        &self.contacts
    }

    pub fn contact(&self) -> &QueryCache<Contact> {
        &self.contact
    }

    pub async fn fetch_contacts(&self, api: &Arc<dyn ContactApi>) -> Result<Vec<Contact>> {
        let api = api.clone();
        self.contacts.fetch(&QueryKey::contacts(), move || async move {
            api.contacts().await
        }).await
    }

    pub async fn fetch_contact(&self, api: &Arc<dyn ContactApi>, id: &str) -> Result<Contact> {
        let api = api.clone();
        let id = id.to_string();
        self.contact.fetch(&QueryKey::contact(&id), move || async move {
            api.contact(&id).await
        }).await
    }

    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        self.contacts.invalidate(prefix) + self.contact.invalidate(prefix)
    }
}
