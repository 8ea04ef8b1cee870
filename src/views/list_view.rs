use std::fmt::Write;
use std::sync::Arc;
use log::{error, info, warn};

use crate::{
    Contact,
    ContactApi,
    QueryClient,
    QueryKey,
    QueryState,
    Mutation,
    error::Result,
};

use super::Route;

pub const TITLE: &str = "Contacts";
pub const LOADING_TEXT: &str = "Loading contacts...";
pub const FETCH_ERROR_TEXT: &str = "Error fetching contacts";
pub const EMPTY_TEXT: &str = "No contacts";
pub const DELETE_ERROR_PREFIX: &str = "Failed to delete contact: ";

const HEADERS: [&str; 4] = ["Name", "Email", "Phone", "Actions"];

/// Table of all contacts with per-row edit and delete actions.
pub struct ContactListView {
    api     : Arc<dyn ContactApi>,
    queries : Arc<QueryClient>,

    deletion: Mutation<()>,
    banner  : Option<String>,
}

impl ContactListView {
    pub fn new(api: Arc<dyn ContactApi>, queries: Arc<QueryClient>) -> Self {
        Self {
            api,
            queries,
            deletion: Mutation::new(),
            banner  : None,
        }
    }

    /// Reads the contact list through the cache. A failure is kept in the
    /// cache and shows up in `state()`.
    pub async fn mount(&self) -> QueryState<Vec<Contact>> {
        if let Err(e) = self.queries.fetch_contacts(&self.api).await {
            error!("Fetching contacts error: {e}");
        }
        self.state()
    }

    pub fn state(&self) -> QueryState<Vec<Contact>> {
        self.queries.contacts().state(&QueryKey::contacts())
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn is_deleting(&self) -> bool {
        self.deletion.is_pending()
    }

    pub fn add_route(&self) -> Route {
        Route::NewContact
    }

    pub fn edit_route(contact: &Contact) -> Route {
        Route::EditContact(contact.id().to_string())
    }

    pub fn begin_delete(&mut self) -> Result<()> {
        self.deletion.begin()?;
        self.banner = None;
        Ok(())
    }

    pub async fn finish_delete(&mut self, id: &str, result: Result<()>) -> Result<()> {
        match self.deletion.settle(result) {
            Ok(()) => {
                info!("Contact {} deleted", id);
                self.queries.invalidate(&QueryKey::contacts());
                self.queries.invalidate(&QueryKey::contact(id));
                self.mount().await;
                Ok(())
            },
            Err(e) => {
                warn!("Deleting contact {} error: {}", id, e);
                self.banner = Some(format!("{}{}", DELETE_ERROR_PREFIX, e));
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.begin_delete()?;
        let result = self.api.delete_contact(id).await;
        self.finish_delete(id, result).await
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        _ = writeln!(out, "{}    [+ Add Contact: {}]", TITLE, self.add_route());

        if let Some(banner) = self.banner.as_ref() {
            _ = writeln!(out, "! {}", banner);
        }

        match self.state() {
            QueryState::Loading => {
                _ = writeln!(out, "{}", LOADING_TEXT);
            },
            QueryState::Error(_) => {
                _ = writeln!(out, "{}", FETCH_ERROR_TEXT);
            },
            QueryState::Ready(contacts) if contacts.is_empty() => {
                _ = writeln!(out, "{}", EMPTY_TEXT);
            },
            QueryState::Ready(contacts) => {
                out.push_str(&self.render_table(&contacts));
            }
        }
        out
    }

    fn render_table(&self, contacts: &[Contact]) -> String {
        let rows = contacts.iter().map(|c| {
            let delete = match self.is_deleting() {
                true => "delete (busy)".to_string(),
                false => format!("delete {}", c.id()),
            };
            [
                c.name().to_string(),
                c.email().to_string(),
                c.phone().to_string(),
                format!("edit {} | {}", Self::edit_route(c), delete),
            ]
        }).collect::<Vec<_>>();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in rows.iter() {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let line = |cells: &[String]| {
            cells.iter().enumerate()
                .map(|(i, v)| format!("{:<w$}", v, w = widths[i]))
                .collect::<Vec<_>>()
                .join(" | ")
        };

        let headers = HEADERS.map(|v| v.to_string());
        _ = writeln!(out, "{}", line(&headers[..]).trim_end());
        _ = writeln!(out, "{}", widths.iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-")
        );
        for row in rows.iter() {
            _ = writeln!(out, "{}", line(&row[..]).trim_end());
        }
        out
    }
}
