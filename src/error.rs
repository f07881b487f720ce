//! Error and outcome types.
//!
//! - [`NavigationResult`]: the outcome of dispatching a path through the
//!   layout shell (`Render`, `Redirect`, `Forbidden`, `NotFound`,
//!   `NoAuthorizedRoute`).
//! - [`NavigationError`]: failures and diagnostics raised while loading
//!   navigation data or configuration.
//!
//! Absence is never an error here: a missing breadcrumb entry is a missing
//! map key, a tree without groups plans no redirect rules, and a session
//! without any accessible route gets [`NavigationResult::NoAuthorizedRoute`].
//!
//! # Examples
//!
//! ```
//! use console_navigator::NavigationResult;
//!
//! let result = NavigationResult::Redirect {
//!     from: "/sys".into(),
//!     to: "/sys/account".into(),
//! };
//! assert!(result.is_redirect());
//! assert_eq!(result.redirect_path(), Some("/sys/account"));
//! ```

use crate::params::RouteParams;
use std::fmt;

// ============================================================================
// Dispatch outcome
// ============================================================================

/// Outcome of dispatching a path through the layout shell's route switch.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationResult {
    /// A route table entry matched and every guard allowed it.
    Render {
        /// Pattern of the matched route table entry.
        pattern: String,
        /// Component reference of the matched entry, if any.
        component: Option<String>,
        /// Parameters extracted from the path.
        params: RouteParams,
    },
    /// A redirect applies: a menu group rule, a guard redirect, or the base
    /// redirect of the root path.
    Redirect { from: String, to: String },
    /// A guard denied access without naming a redirect target.
    Forbidden { path: String, reason: String },
    /// Nothing matched.
    NotFound { path: String },
    /// The root path was requested and no route is accessible to the
    /// session.
    NoAuthorizedRoute,
}

impl NavigationResult {
    /// Check if a route is rendered
    pub fn is_render(&self) -> bool {
        matches!(self, NavigationResult::Render { .. })
    }

    /// Check if the path redirects
    pub fn is_redirect(&self) -> bool {
        matches!(self, NavigationResult::Redirect { .. })
    }

    /// Check if access was denied
    pub fn is_forbidden(&self) -> bool {
        matches!(self, NavigationResult::Forbidden { .. })
    }

    /// Check if nothing matched
    pub fn is_not_found(&self) -> bool {
        matches!(self, NavigationResult::NotFound { .. })
    }

    /// Target of a redirect outcome.
    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            NavigationResult::Redirect { to, .. } => Some(to),
            _ => None,
        }
    }

    /// Pattern of a render outcome.
    pub fn rendered_pattern(&self) -> Option<&str> {
        match self {
            NavigationResult::Render { pattern, .. } => Some(pattern),
            _ => None,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors and diagnostics of the navigation core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// A menu node lacks a field the resolvers need. Reported, never fatal.
    MalformedTree { node: String, reason: String },

    /// Two route table entries share a pattern.
    DuplicateRoute { path: String },

    /// Configuration failed validation.
    InvalidConfig { message: String },

    /// JSON input could not be decoded.
    Parse { message: String },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::MalformedTree { node, reason } => {
                write!(f, "Malformed menu node {}: {}", node, reason)
            }
            NavigationError::DuplicateRoute { path } => {
                write!(f, "Duplicate route pattern: {}", path)
            }
            NavigationError::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
            NavigationError::Parse { message } => {
                write!(f, "Failed to parse navigation data: {}", message)
            }
        }
    }
}

impl std::error::Error for NavigationError {}

impl From<serde_json::Error> for NavigationError {
    fn from(err: serde_json::Error) -> Self {
        NavigationError::Parse {
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
