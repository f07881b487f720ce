//! # console-navigator
//!
//! Headless navigation core for menu-driven admin console layouts.
//!
//! A console is described by two pieces of data: a **menu tree** (what the
//! sider shows) and a **route table** (what pages exist and who may open
//! them). From these the crate derives everything the layout needs on each
//! navigation:
//!
//! - a [`BreadcrumbMap`] labelling every known path ([`breadcrumb`]),
//! - redirect rules sending menu groups to their first child ([`redirect`]),
//! - the first route a session may open, used when `/` is requested
//!   ([`first_authorized`]),
//! - the route switch outcome and document title ([`LayoutShell`]).
//!
//! Rendering is not part of this crate; the caller turns a
//! [`NavigationResult`] into pixels.
//!
//! # Quick start
//!
//! ```
//! use console_navigator::{
//!     breadcrumb, redirect, CurrentUser, LayoutShell, MenuNode, RouteEntry, RouteTable,
//!     Session, ShellConfig,
//! };
//!
//! let menus = vec![MenuNode::new(1, "Dashboard", "/dash").children(vec![
//!     MenuNode::new(2, "Overview", "/dash/overview"),
//!     MenuNode::new(3, "Monitor", "/dash/monitor"),
//! ])];
//! let routes = RouteTable::from_entries([
//!     RouteEntry::new("/"),
//!     RouteEntry::new("/dash/overview").name("Overview"),
//!     RouteEntry::new("/dash/monitor").name("Monitor").authority("ops"),
//! ]).unwrap();
//!
//! // Pure resolvers
//! let crumbs = breadcrumb::resolve(&menus, &routes);
//! assert_eq!(crumbs.get("/dash").and_then(|c| c.name.as_deref()), Some("Dashboard"));
//! assert_eq!(redirect::plan(&menus)[0].to, "/dash/overview");
//!
//! // Or the stateful shell
//! let mut shell = LayoutShell::new(ShellConfig::default());
//! shell.set_routes(routes);
//! shell.set_menus(menus);
//!
//! let session = Session::signed_in(CurrentUser::new("pkaq"));
//! let base = shell.base_redirect(&session);
//! let outcome = shell.dispatch("/dash/monitor", &session, &base);
//! assert_eq!(outcome.redirect_path(), Some("/exception/403"));
//! ```
//!
//! # Features
//!
//! - `log` (default): emit records through the `log` crate.
//! - `tracing`: emit records through `tracing` instead.
//! - `cache` (default): LRU cache of resolved page titles.

pub mod breadcrumb;
#[cfg(feature = "cache")]
pub mod cache;
pub mod config;
pub mod error;
pub mod guards;
pub mod layout;
pub mod logging;
pub mod matching;
pub mod menu;
pub mod navigation;
pub mod params;
pub mod progress;
pub mod redirect;
pub mod route;
pub mod viewport;

pub use breadcrumb::{BreadcrumbMap, Crumb, CrumbSource};
#[cfg(feature = "cache")]
pub use cache::{CacheStats, TitleCache};
pub use config::{FooterLink, ShellConfig};
pub use error::{NavigationError, NavigationResult};
pub use guards::{
    first_authorized, first_authorized_except, guard_fn, is_authorized, permission_fn,
    AuthorityGuard, CurrentUser, FnGuard, FnPermission, GuardBuilder, Guards, LoginGuard,
    NavigationAction, NavigationRequest, PermissionCheck, PermissionSet, RouteGuard, Session,
};
pub use layout::{LayoutShell, ResolvedNavigation, ShellCommand, Theme};
pub use menu::{MenuId, MenuNode};
pub use navigation::{
    resolve_base_redirect, BaseRedirect, History, NavigationDirection, RouteChangeEvent,
    REDIRECT_PARAM,
};
pub use params::{Location, QueryParams, RouteParams};
pub use progress::{NoopIndicator, ProgressController, ProgressIndicator};
pub use redirect::RedirectRule;
pub use route::{Authority, RouteEntry, RouteTable};
pub use viewport::{
    MediaQueryWatcher, ScreenClass, SubscriptionId, ViewportClassifier, ViewportListener,
};
