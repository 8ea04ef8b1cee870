
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;

use crate::{
    Contact,
    ContactApi,
    ContactForm,
    Error,
    QueryClient,
    error::Result,
};

pub(crate) const OP_LIST: &str   = "contacts";
pub(crate) const OP_GET: &str    = "contact";
pub(crate) const OP_CREATE: &str = "create";
pub(crate) const OP_UPDATE: &str = "update";
pub(crate) const OP_DELETE: &str = "delete";

/// In-memory backend that records every call and can be told to fail.
#[derive(Default)]
pub(crate) struct MemoryApi {
    contacts: Mutex<Vec<Contact>>,
    failures: Mutex<HashMap<&'static str, Error>>,
    calls   : Mutex<Vec<(&'static str, Option<ContactForm>)>>,
}

impl MemoryApi {
    pub fn with_contacts(contacts: Vec<Contact>) -> Arc<Self> {
        let api = Self::default();
        *api.contacts.lock().unwrap() = contacts;
        Arc::new(api)
    }

    pub fn fail(&self, op: &'static str, err: Error) {
        self.failures.lock().unwrap().insert(op, err);
    }

    pub fn recover(&self, op: &'static str) {
        self.failures.lock().unwrap().remove(op);
    }

    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|(v, _)| *v == op).count()
    }

    pub fn last_payload(&self) -> Option<ContactForm> {
        self.calls.lock().unwrap().iter().rev().find_map(|(_, p)| p.clone())
    }

    pub fn stored(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    fn record(&self, op: &'static str, payload: Option<&ContactForm>) -> Result<()> {
        self.calls.lock().unwrap().push((op, payload.cloned()));
        match self.failures.lock().unwrap().get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContactApi for MemoryApi {
    async fn contacts(&self) -> Result<Vec<Contact>> {
        self.record(OP_LIST, None)?;
        Ok(self.stored())
    }

    async fn contact(&self, id: &str) -> Result<Contact> {
        self.record(OP_GET, None)?;
        self.stored().into_iter()
            .find(|c| c.id() == id)
            .ok_or(Error::Remote { status: 404, message: Some("Contact not found".into()) })
    }

    async fn create_contact(&self, form: &ContactForm) -> Result<Option<Contact>> {
        self.record(OP_CREATE, Some(form))?;
        let mut contacts = self.contacts.lock().unwrap();
        let id = format!("srv-{}", contacts.len() + 1);
        let contact = Contact::new(&id, &form.name, &form.email, &form.phone);
        contacts.push(contact.clone());
        Ok(Some(contact))
    }

    async fn update_contact(&self, id: &str, form: &ContactForm) -> Result<()> {
        self.record(OP_UPDATE, Some(form))?;
        let mut contacts = self.contacts.lock().unwrap();
        let Some(slot) = contacts.iter_mut().find(|c| c.id() == id) else {
            return Err(Error::Remote { status: 404, message: None });
        };
        *slot = Contact::new(id, &form.name, &form.email, &form.phone);
        Ok(())
    }

    async fn delete_contact(&self, id: &str) -> Result<()> {
        self.record(OP_DELETE, None)?;
        self.contacts.lock().unwrap().retain(|c| c.id() != id);
        Ok(())
    }
}

pub(crate) fn sample_contacts() -> Vec<Contact> {
    vec![
        Contact::new("1", "Alice", "alice@example.com", "081234567890"),
        Contact::new("2", "Bob", "bob@example.com", "6281234567890"),
    ]
}

pub(crate) fn queries() -> Arc<QueryClient> {
    Arc::new(QueryClient::new(Duration::from_secs(60)))
}
