//! Authorization gate and route guards.
//!
//! The gate answers two questions:
//!
//! - [`is_authorized`]: does a permission source satisfy an authority
//!   requirement? The comparison itself belongs to a [`PermissionCheck`]
//!   collaborator; [`PermissionSet`] and [`Session`] are the in-crate ones.
//! - [`first_authorized`]: which route should `/` fall back to? The first
//!   route table entry, in table order, that the session may open. The root
//!   path itself is never a candidate.
//!
//! Guards turn those answers into navigation decisions. They are checked
//! **before** a route renders and return a [`NavigationAction`].
//!
//! # Built-in guards
//!
//! | Guard | Purpose | Priority |
//! |-------|---------|----------|
//! | [`LoginGuard`] | Redirects sessions without a current user | 100 |
//! | [`AuthorityGuard`] | Redirects when the route's authority fails | 80 |
//! | [`guard_fn`] | Closure guard | 0 |
//!
//! [`Guards`] composes guards with AND logic, higher priority first; the
//! first non-[`Continue`](NavigationAction::Continue) result wins.
//!
//! # Example
//!
//! ```
//! use console_navigator::{
//!     first_authorized, AuthorityGuard, Guards, LoginGuard, NavigationRequest,
//!     RouteEntry, RouteGuard, RouteTable, Session,
//! };
//!
//! let routes = RouteTable::from_entries([
//!     RouteEntry::new("/"),
//!     RouteEntry::new("/sys/account").authority("admin"),
//!     RouteEntry::new("/dash"),
//! ]).unwrap();
//!
//! let session = Session::anonymous().with_permissions(["user"]);
//! assert_eq!(first_authorized(&routes, &session).as_deref(), Some("/dash"));
//!
//! let guards = Guards::builder()
//!     .guard(LoginGuard::new("/user/login"))
//!     .guard(AuthorityGuard::new("/exception/403"))
//!     .build();
//! let request = NavigationRequest::new("/sys/account").authority("admin");
//! assert_eq!(guards.check(&session, &request).redirect_path(), Some("/user/login"));
//! ```

use crate::params::RouteParams;
use crate::route::{Authority, RouteTable};
use crate::{debug_log, warn_log};
use std::collections::HashSet;

/// The root path, never a fallback candidate.
pub const ROOT_PATH: &str = "/";

// ============================================================================
// Permission check
// ============================================================================

/// Capability comparison between an authority requirement and whatever the
/// caller knows about the current session.
pub trait PermissionCheck {
    /// `true` if the requirement is satisfied. `None` means no requirement.
    fn permits(&self, requirement: Option<&Authority>) -> bool;
}

/// Closure-backed [`PermissionCheck`], created with [`permission_fn`].
pub struct FnPermission<F> {
    f: F,
}

/// Create a permission check from a closure.
///
/// ```
/// use console_navigator::{is_authorized, permission_fn, Authority};
///
/// let everything = permission_fn(|_| true);
/// assert!(is_authorized(Some(&Authority::from("root")), &everything));
/// ```
pub const fn permission_fn<F>(f: F) -> FnPermission<F>
where
    F: Fn(Option<&Authority>) -> bool,
{
    FnPermission { f }
}

impl<F> PermissionCheck for FnPermission<F>
where
    F: Fn(Option<&Authority>) -> bool,
{
    fn permits(&self, requirement: Option<&Authority>) -> bool {
        (self.f)(requirement)
    }
}

/// The authority names a session holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    granted: HashSet<String>,
}

impl PermissionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant an authority.
    pub fn grant(&mut self, authority: impl Into<String>) {
        self.granted.insert(authority.into());
    }

    /// Return `true` if the authority is held.
    pub fn holds(&self, authority: &str) -> bool {
        self.granted.contains(authority)
    }

    /// Number of granted authorities.
    pub fn len(&self) -> usize {
        self.granted.len()
    }

    /// Return `true` if nothing is granted.
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            granted: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl PermissionCheck for PermissionSet {
    fn permits(&self, requirement: Option<&Authority>) -> bool {
        match requirement {
            None => true,
            Some(authority) => authority.names().any(|name| self.holds(name)),
        }
    }
}

/// The signed-in user, as reported by the user service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUser {
    pub name: String,
    pub user_id: Option<String>,
    pub avatar: Option<String>,
}

impl CurrentUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Session and authorization context, read-only to this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub current_user: Option<CurrentUser>,
    pub permissions: PermissionSet,
}

impl Session {
    /// A session with no user and no permissions.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session for a signed-in user.
    pub fn signed_in(user: CurrentUser) -> Self {
        Self {
            current_user: Some(user),
            permissions: PermissionSet::new(),
        }
    }

    /// Replace the permission set.
    #[must_use]
    pub fn with_permissions<S: Into<String>>(mut self, granted: impl IntoIterator<Item = S>) -> Self {
        self.permissions = granted.into_iter().collect();
        self
    }

    /// Return `true` if a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}

impl PermissionCheck for Session {
    fn permits(&self, requirement: Option<&Authority>) -> bool {
        self.permissions.permits(requirement)
    }
}

/// Decide whether `permissions` satisfy `requirement`.
pub fn is_authorized<P>(requirement: Option<&Authority>, permissions: &P) -> bool
where
    P: PermissionCheck + ?Sized,
{
    permissions.permits(requirement)
}

/// First route, in table order, the permissions may open, skipping `/`.
///
/// `None` means no route is accessible; the caller shows a not-authorized
/// page.
pub fn first_authorized<P>(routes: &RouteTable, permissions: &P) -> Option<String>
where
    P: PermissionCheck + ?Sized,
{
    first_authorized_except(routes, permissions, ROOT_PATH)
}

/// Like [`first_authorized`], additionally skipping `base_path`.
///
/// A layout mounted on `base_path` redirects that path to the fallback, so
/// the base path itself must never be chosen.
pub fn first_authorized_except<P>(
    routes: &RouteTable,
    permissions: &P,
    base_path: &str,
) -> Option<String>
where
    P: PermissionCheck + ?Sized,
{
    let found = routes
        .iter()
        .filter(|entry| entry.path != ROOT_PATH && entry.path != base_path)
        .find(|entry| is_authorized(entry.authority.as_ref(), permissions))
        .map(|entry| entry.path.clone());

    if let Some(path) = &found {
        debug_log!("First authorized route: {}", path);
    } else {
        warn_log!("No route in the table is accessible to the session");
    }
    found
}

// ============================================================================
// NavigationAction
// ============================================================================

/// Result of a guard check.
///
/// ```
/// use console_navigator::NavigationAction;
///
/// let action = NavigationAction::redirect("/exception/403");
/// assert!(action.is_redirect());
/// assert_eq!(action.redirect_path(), Some("/exception/403"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationAction {
    /// Allow navigation to proceed.
    Continue,

    /// Deny navigation with a reason.
    Deny {
        /// Human-readable reason for denying navigation.
        reason: String,
    },

    /// Redirect to a different path.
    Redirect {
        /// Path to redirect to.
        to: String,
        /// Optional human-readable reason for redirecting.
        reason: Option<String>,
    },
}

impl NavigationAction {
    /// Create a result that blocks navigation with a human-readable reason.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::Deny {
            reason: reason.into(),
        }
    }

    /// Create a result that redirects navigation to a different path.
    pub fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            reason: None,
        }
    }

    /// Create a redirect result with a human-readable reason.
    pub fn redirect_with_reason(to: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            reason: Some(reason.into()),
        }
    }

    /// Check if this action allows navigation to continue.
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    /// Check if this action denies navigation.
    pub fn is_deny(&self) -> bool {
        matches!(self, Self::Deny { .. })
    }

    /// Check if this action redirects navigation.
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    /// Get the redirect path, if this is a redirect action.
    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            Self::Redirect { to, .. } => Some(to.as_str()),
            _ => None,
        }
    }
}

// ============================================================================
// NavigationRequest
// ============================================================================

/// What a guard sees: the concrete path and the route it matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationRequest {
    /// Concrete path being opened.
    pub path: String,
    /// Pattern of the matched route table entry.
    pub pattern: Option<String>,
    /// Authority required by the matched entry.
    pub authority: Option<Authority>,
    /// Parameters extracted from the path.
    pub params: RouteParams,
}

impl NavigationRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the matched pattern.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the required authority.
    #[must_use]
    pub fn authority(mut self, authority: impl Into<Authority>) -> Self {
        self.authority = Some(authority.into());
        self
    }

    /// Set the extracted parameters.
    #[must_use]
    pub fn params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }
}

// ============================================================================
// RouteGuard trait
// ============================================================================

/// Trait for route guards that control access to routes.
///
/// Guards are checked synchronously before a matched route renders.
pub trait RouteGuard: Send + Sync + 'static {
    /// Check if navigation should be allowed.
    ///
    /// Returns:
    /// - [`NavigationAction::Continue`] to allow navigation
    /// - [`NavigationAction::Deny`] to block navigation
    /// - [`NavigationAction::Redirect`] to redirect to a different path
    fn check(&self, session: &Session, request: &NavigationRequest) -> NavigationAction;

    /// Guard name for debugging and error messages.
    fn name(&self) -> &'static str {
        "RouteGuard"
    }

    /// Priority for execution order. Higher runs first. Default is 0.
    fn priority(&self) -> i32 {
        0
    }
}

/// Create a guard from a function or closure.
///
/// ```
/// use console_navigator::{guard_fn, NavigationAction};
///
/// let maintenance = guard_fn(|_session, request| {
///     if request.path.starts_with("/sys") {
///         NavigationAction::redirect("/maintenance")
///     } else {
///         NavigationAction::Continue
///     }
/// });
/// ```
pub const fn guard_fn<F>(f: F) -> FnGuard<F>
where
    F: Fn(&Session, &NavigationRequest) -> NavigationAction + Send + Sync + 'static,
{
    FnGuard { f }
}

/// Guard created from a function or closure.
pub struct FnGuard<F> {
    f: F,
}

impl<F> RouteGuard for FnGuard<F>
where
    F: Fn(&Session, &NavigationRequest) -> NavigationAction + Send + Sync + 'static,
{
    fn check(&self, session: &Session, request: &NavigationRequest) -> NavigationAction {
        (self.f)(session, request)
    }
}

// ============================================================================
// LoginGuard
// ============================================================================

/// Redirects to the login page when no user is signed in.
pub struct LoginGuard {
    login_path: String,
}

impl LoginGuard {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }
}

impl RouteGuard for LoginGuard {
    fn check(&self, session: &Session, request: &NavigationRequest) -> NavigationAction {
        if session.is_authenticated() || request.path == self.login_path {
            NavigationAction::Continue
        } else {
            NavigationAction::redirect_with_reason(&self.login_path, "Authentication required")
        }
    }

    fn name(&self) -> &'static str {
        "LoginGuard"
    }

    fn priority(&self) -> i32 {
        100
    }
}

// ============================================================================
// AuthorityGuard
// ============================================================================

/// The authorized-route guard: redirects to the forbidden page when the
/// session does not satisfy the matched route's authority.
pub struct AuthorityGuard {
    redirect_path: String,
}

impl AuthorityGuard {
    pub fn new(redirect_path: impl Into<String>) -> Self {
        Self {
            redirect_path: redirect_path.into(),
        }
    }
}

impl RouteGuard for AuthorityGuard {
    fn check(&self, session: &Session, request: &NavigationRequest) -> NavigationAction {
        if is_authorized(request.authority.as_ref(), session) {
            NavigationAction::Continue
        } else {
            NavigationAction::redirect_with_reason(
                &self.redirect_path,
                format!("Missing authority for {}", request.path),
            )
        }
    }

    fn name(&self) -> &'static str {
        "AuthorityGuard"
    }

    fn priority(&self) -> i32 {
        80
    }
}

// ============================================================================
// Guard Composition
// ============================================================================

/// Combines multiple guards with AND logic.
///
/// Guards run in priority order (higher first, registration order among
/// equals). The first non-continue result is returned immediately.
#[derive(Default)]
pub struct Guards {
    guards: Vec<Box<dyn RouteGuard>>,
}

impl Guards {
    /// Create a new AND composition from a vec of boxed guards.
    #[must_use]
    pub fn new(guards: Vec<Box<dyn RouteGuard>>) -> Self {
        Self { guards }
    }

    /// Start building a guard composition.
    pub fn builder() -> GuardBuilder {
        GuardBuilder::new()
    }

    /// Add a guard.
    pub fn push<G: RouteGuard>(&mut self, guard: G) {
        self.guards.push(Box::new(guard));
    }

    /// Number of composed guards.
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Return `true` if no guard is composed.
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl RouteGuard for Guards {
    fn check(&self, session: &Session, request: &NavigationRequest) -> NavigationAction {
        let mut sorted: Vec<_> = self.guards.iter().collect();
        sorted.sort_by_key(|g| std::cmp::Reverse(g.priority()));

        for guard in sorted {
            let result = guard.check(session, request);
            if !result.is_continue() {
                debug_log!("Guard {} stopped navigation to {}", guard.name(), request.path);
                return result;
            }
        }
        NavigationAction::Continue
    }

    fn name(&self) -> &'static str {
        "Guards"
    }

    fn priority(&self) -> i32 {
        self.guards.iter().map(|g| g.priority()).max().unwrap_or(0)
    }
}

/// Builder for [`Guards`] with fluent API.
#[must_use]
#[derive(Default)]
pub struct GuardBuilder {
    guards: Vec<Box<dyn RouteGuard>>,
}

impl GuardBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self { guards: Vec::new() }
    }

    /// Add a guard to the composition.
    pub fn guard<G: RouteGuard>(mut self, guard: G) -> Self {
        self.guards.push(Box::new(guard));
        self
    }

    /// Build the final [`Guards`].
    #[must_use]
    pub fn build(self) -> Guards {
        Guards::new(self.guards)
    }
}

// ============================================================================
// Tests
// ============================================================================
