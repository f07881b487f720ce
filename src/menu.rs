//! Menu tree model.
//!
//! The menu tree arrives from the navigation-menu service as JSON and is
//! replaced wholesale when it changes. Nodes may be clickable routes or
//! grouping headers; a node is a leaf iff it has no children.
//!
//! ```
//! use console_navigator::menu::{parse_menus, MenuNode};
//!
//! let menus = parse_menus(r#"[
//!     {"id": 1, "name": "System", "path": "/sys", "children": [
//!         {"id": 2, "name": "Accounts", "path": "/sys/account"}
//!     ]}
//! ]"#).unwrap();
//!
//! assert_eq!(menus[0].label, "System");
//! assert!(!menus[0].is_leaf());
//! assert!(menus[0].children[0].is_leaf());
//! ```

use crate::error::NavigationError;
use crate::route::Authority;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a menu node. Menu services hand out numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuId {
    Number(i64),
    Text(String),
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuId::Number(n) => write!(f, "{}", n),
            MenuId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MenuId {
    fn from(id: i64) -> Self {
        MenuId::Number(id)
    }
}

impl From<&str> for MenuId {
    fn from(id: &str) -> Self {
        MenuId::Text(id.to_string())
    }
}

/// A node of the navigation menu tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MenuId>,
    #[serde(alias = "name", default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<Authority>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Create a node with an id, label and path.
    pub fn new(id: impl Into<MenuId>, label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            label: label.into(),
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Set the icon name.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the authority required to see the node.
    #[must_use]
    pub fn authority(mut self, authority: impl Into<Authority>) -> Self {
        self.authority = Some(authority.into());
        self
    }

    /// Replace the children.
    #[must_use]
    pub fn children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = children;
        self
    }

    /// A leaf has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The node's path, treating an empty string as absent.
    pub fn route_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }

    /// Human-readable handle for diagnostics: the id, else the label.
    pub fn display_id(&self) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => format!("'{}'", self.label),
        }
    }
}

/// Decode a menu tree from the JSON array returned by the menu service.
pub fn parse_menus(json: &str) -> Result<Vec<MenuNode>, NavigationError> {
    Ok(serde_json::from_str(json)?)
}

/// Walk the tree in pre-order, calling `visit` with each node and its depth.
pub fn walk<'a, F>(nodes: &'a [MenuNode], visit: &mut F)
where
    F: FnMut(&'a MenuNode, usize),
{
    fn go<'a, F>(nodes: &'a [MenuNode], depth: usize, visit: &mut F)
    where
        F: FnMut(&'a MenuNode, usize),
    {
        for node in nodes {
            visit(node, depth);
            go(&node.children, depth + 1, visit);
        }
    }
    go(nodes, 0, visit);
}

/// Report every node missing a path or an id.
///
/// Malformed nodes are never fatal: the resolvers skip what they cannot use.
/// The layout shell logs these reports when a new tree arrives.
pub fn validate(nodes: &[MenuNode]) -> Vec<NavigationError> {
    let mut problems = Vec::new();
    walk(nodes, &mut |node, _| {
        if node.id.is_none() {
            problems.push(NavigationError::MalformedTree {
                node: node.display_id(),
                reason: "missing id".to_string(),
            });
        }
        if node.route_path().is_none() {
            problems.push(NavigationError::MalformedTree {
                node: node.display_id(),
                reason: "missing path".to_string(),
            });
        }
    });
    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let node = MenuNode::new(1, "System", "/sys")
            .icon("setting")
            .authority("admin")
            .children(vec![MenuNode::new(2, "Accounts", "/sys/account")]);

        assert_eq!(node.id, Some(MenuId::Number(1)));
        assert_eq!(node.icon.as_deref(), Some("setting"));
        assert!(!node.is_leaf());
        assert!(node.children[0].is_leaf());
    }

    #[test]
    fn test_route_path_empty_is_absent() {
        let mut node = MenuNode::new("a", "A", "");
        assert_eq!(node.route_path(), None);
        node.path = None;
        assert_eq!(node.route_path(), None);
    }

    #[test]
    fn test_parse_menus_mixed_ids() {
        let menus = parse_menus(
            r#"[{"id": 1, "label": "Dash", "path": "/dash"},
                {"id": "org", "name": "Org", "path": "/org", "authority": ["admin", "ops"]}]"#,
        )
        .unwrap();

        assert_eq!(menus[0].id, Some(MenuId::Number(1)));
        assert_eq!(menus[1].id, Some(MenuId::Text("org".to_string())));
        assert_eq!(menus[1].label, "Org");
        assert_eq!(
            menus[1].authority,
            Some(Authority::AnyOf(vec!["admin".to_string(), "ops".to_string()]))
        );
    }

    #[test]
    fn test_parse_menus_rejects_garbage() {
        assert!(matches!(
            parse_menus("{\"id\": 1}"),
            Err(NavigationError::Parse { .. })
        ));
    }

    #[test]
    fn test_walk_pre_order() {
        let menus = vec![
            MenuNode::new(1, "A", "/a").children(vec![
                MenuNode::new(2, "A1", "/a/1"),
                MenuNode::new(3, "A2", "/a/2"),
            ]),
            MenuNode::new(4, "B", "/b"),
        ];
        let mut seen = Vec::new();
        walk(&menus, &mut |node, depth| seen.push((node.label.as_str(), depth)));
        assert_eq!(seen, vec![("A", 0), ("A1", 1), ("A2", 1), ("B", 0)]);
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let menus = vec![MenuNode::new(1, "Group", "/g").children(vec![MenuNode {
            label: "Header".to_string(),
            ..MenuNode::default()
        }])];
        let problems = validate(&menus);
        assert_eq!(problems.len(), 2);
        assert!(problems
            .iter()
            .all(|p| matches!(p, NavigationError::MalformedTree { node, .. } if node == "'Header'")));
    }
}
