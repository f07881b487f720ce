//! Breadcrumb map resolution.
//!
//! The breadcrumb map is a flat `path → Crumb` lookup derived from the route
//! table and the menu tree. Header components use it to label the trail of
//! the current page.
//!
//! # Merge precedence
//!
//! 1. Every route table entry, with the route's own descriptor.
//! 2. Menu nodes whose path is **not** a route table key, level by level.
//! 3. Within a level, entries contributed by a node's descendants are merged
//!    after the level's own entries, and later siblings after earlier ones.
//!
//! Rule 3 means two menu nodes in different branches that share a path
//! string resolve to whichever is merged last (deeper, then later). Route
//! table entries never lose.
//!
//! ```
//! use console_navigator::{breadcrumb, MenuNode, RouteEntry, RouteTable};
//!
//! let menus = vec![MenuNode::new(1, "Dashboard", "/dash")
//!     .children(vec![MenuNode::new(2, "Overview menu", "/dash/overview")])];
//! let routes = RouteTable::from_entries([RouteEntry::new("/dash/overview").name("Overview")]).unwrap();
//!
//! let map = breadcrumb::resolve(&menus, &routes);
//! assert_eq!(map.get("/dash").unwrap().name.as_deref(), Some("Dashboard"));
//! assert_eq!(map.get("/dash/overview").unwrap().name.as_deref(), Some("Overview"));
//! ```

use crate::matching;
use crate::menu::MenuNode;
use crate::route::{Authority, RouteEntry, RouteTable};
use crate::trace_log;
use std::collections::HashMap;

/// Where a crumb came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrumbSource {
    Route,
    Menu,
}

/// Display metadata for one breadcrumb path.
#[derive(Debug, Clone, PartialEq)]
pub struct Crumb {
    pub name: Option<String>,
    pub authority: Option<Authority>,
    pub icon: Option<String>,
    pub source: CrumbSource,
}

impl From<&RouteEntry> for Crumb {
    fn from(entry: &RouteEntry) -> Self {
        Self {
            name: entry.name.clone(),
            authority: entry.authority.clone(),
            icon: None,
            source: CrumbSource::Route,
        }
    }
}

impl From<&MenuNode> for Crumb {
    fn from(node: &MenuNode) -> Self {
        Self {
            name: Some(node.label.clone()),
            authority: node.authority.clone(),
            icon: node.icon.clone(),
            source: CrumbSource::Menu,
        }
    }
}

/// Derived `path → Crumb` lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreadcrumbMap {
    entries: HashMap<String, Crumb>,
}

impl BreadcrumbMap {
    /// Crumb registered under exactly this key.
    pub fn get(&self, path: &str) -> Option<&Crumb> {
        self.entries.get(path)
    }

    /// Return `true` if the key is present.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Crumb for a concrete path: the exact key, else the first key (in
    /// lexicographic order) whose pattern matches.
    pub fn lookup(&self, pathname: &str) -> Option<(&str, &Crumb)> {
        if let Some((key, crumb)) = self.entries.get_key_value(pathname) {
            return Some((key.as_str(), crumb));
        }

        let mut keys: Vec<&String> = self
            .entries
            .keys()
            .filter(|key| !matching::is_static_pattern(key))
            .collect();
        keys.sort();
        keys.into_iter()
            .find(|key| matching::matches(key, pathname))
            .map(|key| (key.as_str(), &self.entries[key]))
    }

    /// Breadcrumb trail of a concrete path, outermost first.
    ///
    /// Each ancestor prefix of `pathname` contributes its crumb if one
    /// resolves; unlabelled prefixes are skipped.
    pub fn trail(&self, pathname: &str) -> Vec<(String, &Crumb)> {
        matching::path_prefixes(pathname)
            .into_iter()
            .filter_map(|prefix| {
                let (_, crumb) = self.lookup(&prefix)?;
                Some((prefix, crumb))
            })
            .collect()
    }

    /// Iterate over all entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Crumb)> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the breadcrumb map from a menu tree and a route table.
///
/// Pure and deterministic; safe to call on every render.
pub fn resolve(menus: &[MenuNode], routes: &RouteTable) -> BreadcrumbMap {
    let mut entries: HashMap<String, Crumb> = routes
        .iter()
        .map(|entry| (entry.path.clone(), Crumb::from(entry)))
        .collect();

    entries.extend(resolve_menu_level(menus, routes));

    BreadcrumbMap { entries }
}

/// Menu-derived entries of one level, descendants merged after the level's
/// own nodes.
fn resolve_menu_level(nodes: &[MenuNode], routes: &RouteTable) -> HashMap<String, Crumb> {
    let mut own = HashMap::new();
    let mut descendants = HashMap::new();

    for node in nodes {
        match node.route_path() {
            Some(path) if !routes.contains(path) => {
                own.insert(path.to_string(), Crumb::from(node));
            }
            Some(_) => {}
            None => {
                trace_log!("Menu node {} has no path, no breadcrumb", node.display_id());
            }
        }
        if !node.is_leaf() {
            descendants.extend(resolve_menu_level(&node.children, routes));
        }
    }

    own.extend(descendants);
    own
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_entries_are_base() {
        let routes = RouteTable::from_entries([
            RouteEntry::new("/a").name("A route"),
            RouteEntry::new("/b"),
        ])
        .unwrap();
        let map = resolve(&[], &routes);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("/a").unwrap().source, CrumbSource::Route);
        assert_eq!(map.get("/b").unwrap().name, None);
    }

    #[test]
    fn test_menu_node_does_not_override_route() {
        let routes = RouteTable::from_entries([RouteEntry::new("/a").name("Route A")]).unwrap();
        let menus = vec![MenuNode::new(1, "Menu A", "/a").icon("home")];
        let map = resolve(&menus, &routes);
        let crumb = map.get("/a").unwrap();
        assert_eq!(crumb.name.as_deref(), Some("Route A"));
        assert_eq!(crumb.icon, None);
    }

    #[test]
    fn test_menu_only_group_gets_entry() {
        let menus = vec![MenuNode::new(1, "Group", "/g").icon("folder")];
        let map = resolve(&menus, &RouteTable::new());
        let crumb = map.get("/g").unwrap();
        assert_eq!(crumb.name.as_deref(), Some("Group"));
        assert_eq!(crumb.icon.as_deref(), Some("folder"));
        assert_eq!(crumb.source, CrumbSource::Menu);
    }

    #[test]
    fn test_pathless_nodes_are_skipped_but_children_kept() {
        let menus = vec![MenuNode {
            label: "Header".to_string(),
            children: vec![MenuNode::new(2, "Child", "/child")],
            ..MenuNode::default()
        }];
        let map = resolve(&menus, &RouteTable::new());
        assert_eq!(map.len(), 1);
        assert!(map.contains("/child"));
    }

    #[test]
    fn test_lookup_falls_back_to_pattern() {
        let routes = RouteTable::from_entries([
            RouteEntry::new("/sys/account").name("Accounts"),
            RouteEntry::new("/sys/account/:id").name("Detail"),
        ])
        .unwrap();
        let map = resolve(&[], &routes);
        let (key, crumb) = map.lookup("/sys/account/42").unwrap();
        assert_eq!(key, "/sys/account/:id");
        assert_eq!(crumb.name.as_deref(), Some("Detail"));
        assert!(map.lookup("/org").is_none());
    }

    #[test]
    fn test_trail() {
        let routes = RouteTable::from_entries([
            RouteEntry::new("/sys/account").name("Accounts"),
            RouteEntry::new("/sys/account/:id").name("Detail"),
        ])
        .unwrap();
        let menus = vec![MenuNode::new(1, "System", "/sys")];
        let map = resolve(&menus, &routes);

        let trail: Vec<_> = map
            .trail("/sys/account/42")
            .into_iter()
            .map(|(path, crumb)| (path, crumb.name.clone().unwrap_or_default()))
            .collect();
        assert_eq!(
            trail,
            vec![
                ("/sys".to_string(), "System".to_string()),
                ("/sys/account".to_string(), "Accounts".to_string()),
                ("/sys/account/42".to_string(), "Detail".to_string()),
            ]
        );
    }
}
