use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize, Deserializer};

use crate::{
    Error,
    error::Result,
};

/// A contact record as held by the backend. The id is assigned by the
/// backend and is never produced locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(alias = "_id")]
    #[serde(deserialize_with = "deserialize_id")]
    id      : String,
    name    : String,
    email   : String,
    phone   : String,
}

impl Contact {
    pub fn new(id: &str, name: &str, email: &str, phone: &str) -> Self {
        Self {
            id      : id.to_string(),
            name    : name.to_string(),
            email   : email.to_string(),
            phone   : phone.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> ({})", self.name, self.email, self.phone)
    }
}

// Backends may hand out numeric ids; they are kept as opaque strings.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Str(v) => v,
        RawId::Num(v) => v.to_string(),
    })
}

/// The editable part of a contact, sent as the create/update body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name    : String,
    pub email   : String,
    pub phone   : String,
}

impl ContactForm {
    pub fn new(name: &str, email: &str, phone: &str) -> Self {
        Self {
            name    : name.to_string(),
            email   : email.to_string(),
            phone   : phone.to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name  => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }

    pub fn set(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::Name  => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
        };
        *slot = value.to_string();
    }
}

impl From<&Contact> for ContactForm {
    fn from(contact: &Contact) -> Self {
        Self::new(contact.name(), contact.email(), contact.phone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Phone];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name  => "name",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name  => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "name"  => Ok(Field::Name),
            "email" => Ok(Field::Email),
            "phone" => Ok(Field::Phone),
            _ => Err(Error::Argument(format!("Unknown contact field: {}", s))),
        }
    }
}
