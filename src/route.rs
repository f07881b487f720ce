//! Route table: path patterns mapped to page descriptors.
//!
//! The table is ordered. Iteration follows insertion order (or document order
//! when loaded from JSON), and that order is what the authorization gate
//! searches when it looks for a fallback route.
//!
//! ```
//! use console_navigator::{RouteEntry, RouteTable};
//!
//! let table = RouteTable::from_json(r#"{
//!     "/dash/overview": {"name": "Overview"},
//!     "/sys/account":   {"name": "Accounts", "authority": "admin", "component": "Account"}
//! }"#).unwrap();
//!
//! let patterns: Vec<_> = table.iter().map(|e| e.path.as_str()).collect();
//! assert_eq!(patterns, ["/dash/overview", "/sys/account"]);
//! ```

use crate::error::NavigationError;
use crate::matching;
use crate::params::RouteParams;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Authority
// ============================================================================

/// An access requirement attached to a route or menu node.
///
/// Absence of a requirement (`Option::None`) means "open to everyone".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Authority {
    /// The session must hold this authority.
    One(String),
    /// The session must hold at least one of these. An empty list is never
    /// satisfied.
    AnyOf(Vec<String>),
}

impl Authority {
    /// Iterate over the authority names this requirement accepts.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let names: &[String] = match self {
            Authority::One(name) => std::slice::from_ref(name),
            Authority::AnyOf(names) => names,
        };
        names.iter().map(String::as_str)
    }
}

impl From<&str> for Authority {
    fn from(name: &str) -> Self {
        Authority::One(name.to_string())
    }
}

impl From<String> for Authority {
    fn from(name: String) -> Self {
        Authority::One(name)
    }
}

impl From<Vec<String>> for Authority {
    fn from(names: Vec<String>) -> Self {
        Authority::AnyOf(names)
    }
}

impl From<Vec<&str>> for Authority {
    fn from(names: Vec<&str>) -> Self {
        Authority::AnyOf(names.into_iter().map(String::from).collect())
    }
}

// ============================================================================
// RouteEntry
// ============================================================================

/// Page descriptor registered under a path pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Path pattern, e.g. `/sys/account/:id`.
    pub path: String,
    /// Display name used for titles and breadcrumbs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Access requirement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<Authority>,
    /// Reference to the page component, resolved by the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl RouteEntry {
    /// Create an entry for a pattern with no name, authority or component.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            authority: None,
            component: None,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the access requirement.
    #[must_use]
    pub fn authority(mut self, authority: impl Into<Authority>) -> Self {
        self.authority = Some(authority.into());
        self
    }

    /// Set the component reference.
    #[must_use]
    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Match a concrete path against this entry's pattern.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        matching::match_pattern(&self.path, path)
    }
}

// ============================================================================
// RouteTable
// ============================================================================

/// Ordered, pattern-unique collection of [`RouteEntry`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    index: HashMap<String, usize>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from entries, rejecting duplicate patterns.
    pub fn from_entries(
        entries: impl IntoIterator<Item = RouteEntry>,
    ) -> Result<Self, NavigationError> {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry)?;
        }
        Ok(table)
    }

    /// Decode a table from a JSON object keyed by pattern.
    pub fn from_json(json: &str) -> Result<Self, NavigationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append an entry. A pattern already present is rejected.
    pub fn insert(&mut self, entry: RouteEntry) -> Result<(), NavigationError> {
        if self.index.contains_key(&entry.path) {
            return Err(NavigationError::DuplicateRoute { path: entry.path });
        }
        self.index.insert(entry.path.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, entry: RouteEntry) -> Result<Self, NavigationError> {
        self.insert(entry)?;
        Ok(self)
    }

    /// Look up an entry by its exact pattern.
    pub fn get(&self, pattern: &str) -> Option<&RouteEntry> {
        self.index.get(pattern).map(|&i| &self.entries[i])
    }

    /// Return `true` if the pattern is a key of the table.
    pub fn contains(&self, pattern: &str) -> bool {
        self.index.contains_key(pattern)
    }

    /// Iterate over entries in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, RouteEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry, in table order, whose pattern matches `path`.
    pub fn first_match(&self, path: &str) -> Option<(&RouteEntry, RouteParams)> {
        self.entries
            .iter()
            .find_map(|entry| entry.matches(path).map(|params| (entry, params)))
    }

    /// Last entry, in table order, whose pattern matches `path`.
    pub fn last_match(&self, path: &str) -> Option<(&RouteEntry, RouteParams)> {
        self.entries
            .iter()
            .rev()
            .find_map(|entry| entry.matches(path).map(|params| (entry, params)))
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteEntry;
    type IntoIter = std::slice::Iter<'a, RouteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Entry body as it appears under a pattern key in JSON.
#[derive(Deserialize)]
struct EntryBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    authority: Option<Authority>,
    #[serde(default)]
    component: Option<String>,
}

struct RouteTableVisitor;

impl<'de> Visitor<'de> for RouteTableVisitor {
    type Value = RouteTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping path patterns to route entries")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut table = RouteTable::new();
        while let Some((path, body)) = map.next_entry::<String, EntryBody>()? {
            let entry = RouteEntry {
                path,
                name: body.name,
                authority: body.authority,
                component: body.component,
            };
            table.insert(entry).map_err(de::Error::custom)?;
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for RouteTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RouteTableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RouteTable {
        RouteTable::from_entries([
            RouteEntry::new("/").name("Home"),
            RouteEntry::new("/sys/account").name("Accounts").authority("admin"),
            RouteEntry::new("/sys/account/:id").name("Account detail"),
            RouteEntry::new("/sys/*").name("System"),
        ])
        .unwrap()
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut table = sample();
        let err = table.insert(RouteEntry::new("/sys/account")).unwrap_err();
        assert_eq!(
            err,
            NavigationError::DuplicateRoute {
                path: "/sys/account".to_string()
            }
        );
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_get_and_order() {
        let table = sample();
        assert_eq!(
            table.get("/sys/account").and_then(|e| e.name.as_deref()),
            Some("Accounts")
        );
        assert!(table.get("/missing").is_none());
        let patterns: Vec<_> = table.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(patterns, ["/", "/sys/account", "/sys/account/:id", "/sys/*"]);
    }

    #[test]
    fn test_first_and_last_match() {
        let table = sample();
        let (first, _) = table.first_match("/sys/account").unwrap();
        assert_eq!(first.path, "/sys/account");
        let (last, _) = table.last_match("/sys/account").unwrap();
        assert_eq!(last.path, "/sys/*");

        let (entry, params) = table.first_match("/sys/account/12").unwrap();
        assert_eq!(entry.path, "/sys/account/:id");
        assert_eq!(params.get("id"), Some(&"12".to_string()));

        assert!(table.first_match("/org").is_none());
    }

    #[test]
    fn test_from_json_keeps_document_order() {
        let table = RouteTable::from_json(
            r#"{"/z": {"name": "Z"}, "/a": {"authority": ["x", "y"]}, "/m": {}}"#,
        )
        .unwrap();
        let patterns: Vec<_> = table.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(patterns, ["/z", "/a", "/m"]);
        assert_eq!(
            table.get("/a").unwrap().authority,
            Some(Authority::from(vec!["x", "y"]))
        );
    }

    #[test]
    fn test_from_json_rejects_duplicate_keys() {
        let err = RouteTable::from_json(r#"{"/a": {}, "/a": {}}"#).unwrap_err();
        assert!(matches!(err, NavigationError::Parse { message } if message.contains("/a")));
    }

    #[test]
    fn test_authority_names() {
        let one = Authority::from("admin");
        assert_eq!(one.names().collect::<Vec<_>>(), ["admin"]);
        let many = Authority::from(vec!["a", "b"]);
        assert_eq!(many.names().collect::<Vec<_>>(), ["a", "b"]);
    }
}
