use std::fmt;

pub const CONTACTS: &str = "contacts";
pub const CONTACT: &str  = "contact";

/// Identity of a cached read. Invalidation matches by prefix, so
/// `["contacts"]` covers every key that starts with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(|v| v.into()).collect())
    }

    pub fn contacts() -> Self {
        Self::new([CONTACTS])
    }

    pub fn contact(id: &str) -> Self {
        Self::new([CONTACT, id])
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}
