//! Redirect planning: menu groups send navigation to their first child.
//!
//! ```
//! use console_navigator::{redirect, MenuNode};
//!
//! let menus = vec![MenuNode::new(1, "Dashboard", "/dash")
//!     .children(vec![MenuNode::new(2, "Overview", "/dash/overview")])];
//!
//! let rules = redirect::plan(&menus);
//! assert_eq!(rules.len(), 1);
//! assert_eq!(rules[0].from, "/dash");
//! assert_eq!(rules[0].to, "/dash/overview");
//! ```

use crate::menu::MenuNode;
use crate::{trace_log, warn_log};

/// An exact redirect from a group path to its first child's path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RedirectRule {
    pub from: String,
    pub to: String,
}

impl RedirectRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Plan redirect rules for a menu tree, in pre-order.
///
/// Every node whose first child has a path yields `node.path → first child
/// path`; then each child is visited in turn. Nodes missing a path yield no
/// rule but their descendants are still planned.
pub fn plan(menus: &[MenuNode]) -> Vec<RedirectRule> {
    let mut rules = Vec::new();
    for node in menus {
        plan_node(node, &mut rules);
    }
    rules
}

fn plan_node(node: &MenuNode, rules: &mut Vec<RedirectRule>) {
    let Some(first) = node.children.first() else {
        return;
    };

    match (node.route_path(), first.route_path()) {
        (Some(from), Some(to)) => {
            trace_log!("Redirect rule {} -> {}", from, to);
            rules.push(RedirectRule::new(from, to));
        }
        (None, _) => {
            warn_log!(
                "Menu group {} has no path, skipping its redirect",
                node.display_id()
            );
        }
        (Some(from), None) => {
            warn_log!(
                "First child of menu group '{}' has no path, skipping its redirect",
                from
            );
        }
    }

    // Children are planned even when this node produced no rule.
    for child in &node.children {
        plan_node(child, rules);
    }
}

/// Exact-match lookup over planned rules.
pub fn find<'a>(rules: &'a [RedirectRule], path: &str) -> Option<&'a RedirectRule> {
    rules.iter().find(|rule| rule.from == path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaves_plan_nothing() {
        let menus = vec![MenuNode::new(1, "A", "/a"), MenuNode::new(2, "B", "/b")];
        assert!(plan(&menus).is_empty());
        assert!(plan(&[]).is_empty());
    }

    #[test]
    fn test_pre_order_and_every_child_visited() {
        let menus = vec![MenuNode::new(1, "Sys", "/sys").children(vec![
            MenuNode::new(2, "Account", "/sys/account")
                .children(vec![MenuNode::new(3, "List", "/sys/account/list")]),
            MenuNode::new(4, "Org", "/sys/org")
                .children(vec![MenuNode::new(5, "Tree", "/sys/org/tree")]),
        ])];

        assert_eq!(
            plan(&menus),
            vec![
                RedirectRule::new("/sys", "/sys/account"),
                RedirectRule::new("/sys/account", "/sys/account/list"),
                RedirectRule::new("/sys/org", "/sys/org/tree"),
            ]
        );
    }

    #[test]
    fn test_pathless_first_child_skips_rule_only() {
        let header = MenuNode {
            label: "Header".to_string(),
            children: vec![MenuNode::new(3, "Deep", "/g/deep")],
            ..MenuNode::default()
        };
        let menus = vec![MenuNode::new(1, "Group", "/g").children(vec![
            header,
            MenuNode::new(4, "Sub", "/g/sub").children(vec![MenuNode::new(5, "Leaf", "/g/sub/leaf")]),
        ])];

        // Group's first child has no path: no rule for /g, and the header
        // itself has no path either.
        assert_eq!(
            plan(&menus),
            vec![RedirectRule::new("/g/sub", "/g/sub/leaf")]
        );
    }

    #[test]
    fn test_find_exact() {
        let rules = vec![
            RedirectRule::new("/a", "/a/1"),
            RedirectRule::new("/a/1", "/a/1/x"),
        ];
        assert_eq!(find(&rules, "/a").map(|r| r.to.as_str()), Some("/a/1"));
        assert!(find(&rules, "/a/").is_none());
        assert!(find(&rules, "/b").is_none());
    }
}
