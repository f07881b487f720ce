//! Navigation-time redirect resolution and history.
//!
//! On every navigation the layout computes the *base redirect*, the target
//! of the `/` route:
//!
//! 1. If the URL carries a non-empty `redirect` query parameter, that value
//!    wins verbatim. The parameter is stripped from the visible URL by
//!    replacing the current history entry, never by pushing a new one.
//! 2. Otherwise the first authorized route of the table, never `/` nor the
//!    path the layout is mounted on.
//!
//! The explicit target is not re-checked against the
//! authorization gate; the authorized-route guard catches it downstream.

use crate::debug_log;
use crate::guards::{first_authorized_except, PermissionCheck};
use crate::params::Location;
use crate::route::RouteTable;

/// Name of the query parameter carrying an explicit redirect target.
pub const REDIRECT_PARAM: &str = "redirect";

/// Outcome of base redirect resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseRedirect {
    /// Where `/` should send the user. `None`: no accessible route.
    pub target: Option<String>,
    /// The location with the redirect parameter removed, when one was
    /// present. The caller replaces the current history entry with it.
    pub stripped: Option<Location>,
}

impl BaseRedirect {
    /// Return `true` if the target came from the query parameter.
    pub fn is_explicit(&self) -> bool {
        self.stripped.is_some()
    }
}

/// Resolve the base redirect for `location`.
///
/// `param` names the query parameter to honor, normally [`REDIRECT_PARAM`].
/// `base_path` is the path the layout is mounted on; it is never a fallback.
pub fn resolve_base_redirect<P>(
    location: &Location,
    param: &str,
    base_path: &str,
    routes: &RouteTable,
    permissions: &P,
) -> BaseRedirect
where
    P: PermissionCheck + ?Sized,
{
    match location.query.get(param).filter(|v| !v.is_empty()) {
        Some(explicit) => {
            let target = explicit.to_string();
            let mut stripped = location.clone();
            stripped.query.remove(param);
            debug_log!("Honoring explicit redirect to {}", target);
            BaseRedirect {
                target: Some(target),
                stripped: Some(stripped),
            }
        }
        None => BaseRedirect {
            target: first_authorized_except(routes, permissions, base_path),
            stripped: None,
        },
    }
}

// ============================================================================
// History
// ============================================================================

/// Direction of a history change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    Forward,
    Back,
    Replace,
}

/// A history change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChangeEvent {
    pub from: Option<String>,
    pub to: String,
    pub direction: NavigationDirection,
}

/// Browser-like history stack of hrefs.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    current: usize,
}

impl History {
    /// Create a history positioned at `/`.
    pub fn new() -> Self {
        Self::starting_at("/")
    }

    /// Create a history positioned at `href`.
    pub fn starting_at(href: impl Into<String>) -> Self {
        Self {
            entries: vec![href.into()],
            current: 0,
        }
    }

    /// Current href.
    pub fn current_href(&self) -> &str {
        &self.entries[self.current]
    }

    /// Current href, parsed.
    pub fn location(&self) -> Location {
        Location::parse(self.current_href())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: a history holds at least its starting entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Navigate to a new href, dropping any forward entries.
    pub fn push(&mut self, href: impl Into<String>) -> RouteChangeEvent {
        let to = href.into();
        let from = Some(self.current_href().to_string());

        self.entries.truncate(self.current + 1);
        self.entries.push(to.clone());
        self.current += 1;

        RouteChangeEvent {
            from,
            to,
            direction: NavigationDirection::Forward,
        }
    }

    /// Replace the current entry without adding one.
    pub fn replace(&mut self, href: impl Into<String>) -> RouteChangeEvent {
        let to = href.into();
        let from = Some(self.current_href().to_string());

        self.entries[self.current] = to.clone();

        RouteChangeEvent {
            from,
            to,
            direction: NavigationDirection::Replace,
        }
    }

    /// Go back in history
    pub fn back(&mut self) -> Option<RouteChangeEvent> {
        if !self.can_go_back() {
            return None;
        }
        let from = Some(self.current_href().to_string());
        self.current -= 1;
        Some(RouteChangeEvent {
            from,
            to: self.current_href().to_string(),
            direction: NavigationDirection::Back,
        })
    }

    /// Go forward in history
    pub fn forward(&mut self) -> Option<RouteChangeEvent> {
        if !self.can_go_forward() {
            return None;
        }
        let from = Some(self.current_href().to_string());
        self.current += 1;
        Some(RouteChangeEvent {
            from,
            to: self.current_href().to_string(),
            direction: NavigationDirection::Forward,
        })
    }

    /// Check if can go back
    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// Check if can go forward
    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.entries.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guards::Session;
    use crate::route::RouteEntry;

    fn routes() -> RouteTable {
        RouteTable::from_entries([
            RouteEntry::new("/"),
            RouteEntry::new("/sys").authority("admin"),
            RouteEntry::new("/dash"),
        ])
        .unwrap()
    }

    #[test]
    fn test_explicit_redirect_wins() {
        let location = Location::parse("/?redirect=%2Fsys&tab=2");
        let resolved =
            resolve_base_redirect(&location, REDIRECT_PARAM, "/", &routes(), &Session::anonymous());

        assert_eq!(resolved.target.as_deref(), Some("/sys"));
        assert!(resolved.is_explicit());
        assert_eq!(resolved.stripped.unwrap().href(), "/?tab=2");
    }

    #[test]
    fn test_empty_redirect_falls_back() {
        let location = Location::parse("/?redirect=");
        let resolved =
            resolve_base_redirect(&location, REDIRECT_PARAM, "/", &routes(), &Session::anonymous());

        assert_eq!(resolved.target.as_deref(), Some("/dash"));
        assert!(!resolved.is_explicit());
    }

    #[test]
    fn test_no_accessible_route() {
        let routes = RouteTable::from_entries([RouteEntry::new("/sys").authority("admin")]).unwrap();
        let resolved =
            resolve_base_redirect(&Location::parse("/"), REDIRECT_PARAM, "/", &routes, &Session::anonymous());
        assert_eq!(resolved.target, None);
    }

    #[test]
    fn test_fallback_skips_base_path() {
        let routes = RouteTable::from_entries([RouteEntry::new("/app"), RouteEntry::new("/dash")]).unwrap();
        let resolved =
            resolve_base_redirect(&Location::parse("/app"), REDIRECT_PARAM, "/app", &routes, &Session::anonymous());
        assert_eq!(resolved.target.as_deref(), Some("/dash"));
    }

    #[test]
    fn test_history_push_back_forward() {
        let mut history = History::new();
        assert_eq!(history.current_href(), "/");

        history.push("/sys");
        history.push("/sys/account");
        assert_eq!(history.len(), 3);

        let event = history.back().unwrap();
        assert_eq!(event.to, "/sys");
        assert_eq!(event.direction, NavigationDirection::Back);

        history.forward();
        assert_eq!(history.current_href(), "/sys/account");
        assert!(history.forward().is_none());
    }

    #[test]
    fn test_history_push_truncates_forward() {
        let mut history = History::new();
        history.push("/a");
        history.push("/b");
        history.back();
        history.push("/c");
        assert_eq!(history.len(), 3);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_history_replace_keeps_length() {
        let mut history = History::starting_at("/?redirect=%2Fx");
        let event = history.replace("/");
        assert_eq!(event.direction, NavigationDirection::Replace);
        assert_eq!(history.len(), 1);
        assert_eq!(history.current_href(), "/");
        assert!(!history.can_go_back());
    }
}
