use std::fmt;
use std::str::FromStr;

use crate::{
    Error,
    error::Result,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/contacts`
    Contacts,
    /// `/`, the create form
    NewContact,
    /// `/contacts/edit/{id}`
    EditContact(String),
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let path = s.trim();
        let segments = path.trim_matches('/')
            .split('/')
            .filter(|v| !v.is_empty())
            .collect::<Vec<&str>>();

        match segments.as_slice() {
            [] => Ok(Route::NewContact),
            ["contacts"] => Ok(Route::Contacts),
            ["contacts", "edit", id] => Ok(Route::EditContact(id.to_string())),
            _ => Err(Error::Argument(format!("Unknown route: {}", path))),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Contacts => write!(f, "/contacts"),
            Route::NewContact => write!(f, "/"),
            Route::EditContact(id) => write!(f, "/contacts/edit/{}", id),
        }
    }
}
