//! The layout shell.
//!
//! [`LayoutShell`] owns the navigation data of the console (menu tree and
//! route table), keeps the derived breadcrumb map and redirect rules in
//! sync with it, and answers the questions the rendering layer asks on
//! every navigation:
//!
//! - which route to show for a path ([`LayoutShell::dispatch`]),
//! - where `/` should go ([`LayoutShell::base_redirect`]),
//! - what the document title is ([`LayoutShell::page_title`]),
//! - whether the viewport is mobile ([`LayoutShell::is_mobile`]).
//!
//! # Route switch
//!
//! A path is dispatched in this order, first match wins:
//!
//! 1. exact menu group redirect rules,
//! 2. route table entries other than the base path, gated by the global
//!    guards and then the authorized-route guard,
//! 3. the base path, redirecting to the base redirect,
//! 4. not found.
//!
//! # Example
//!
//! ```
//! use console_navigator::{LayoutShell, MenuNode, RouteEntry, RouteTable, Session, ShellConfig};
//!
//! let mut shell = LayoutShell::new(ShellConfig::default().title_suffix("Console"));
//! shell.set_routes(RouteTable::from_entries([
//!     RouteEntry::new("/"),
//!     RouteEntry::new("/sys").name("System"),
//!     RouteEntry::new("/sys/account").name("Accounts"),
//! ]).unwrap());
//! shell.set_menus(vec![
//!     MenuNode::new(1, "System", "/sys")
//!         .children(vec![MenuNode::new(2, "Accounts", "/sys/account")]),
//! ]);
//!
//! let session = Session::anonymous();
//! let base = shell.base_redirect(&session);
//! assert_eq!(shell.dispatch("/sys", &session, &base).redirect_path(), Some("/sys/account"));
//! assert_eq!(shell.page_title("/sys/account"), "Accounts - Console");
//! ```

#[cfg(feature = "cache")]
use crate::cache::TitleCache;
use crate::breadcrumb::{self, BreadcrumbMap, Crumb};
use crate::config::ShellConfig;
use crate::error::{NavigationError, NavigationResult};
use crate::guards::{
    AuthorityGuard, Guards, LoginGuard, NavigationAction, NavigationRequest, RouteGuard, Session,
};
use crate::menu::{self, MenuNode};
use crate::navigation::{resolve_base_redirect, BaseRedirect, History};
use crate::progress::{ProgressController, ProgressIndicator};
use crate::redirect::{self, RedirectRule};
use crate::route::RouteTable;
use crate::viewport::{SubscriptionId, ViewportClassifier};
use crate::{debug_log, info_log, warn_log};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Header dropdown key that opens the trigger-error page.
pub const MENU_KEY_TRIGGER_ERROR: &str = "triggerError";

/// Header dropdown key that signs the user out.
pub const MENU_KEY_LOGOUT: &str = "logout";

/// A side effect the shell asks its owner to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// A new history entry was pushed.
    Push(String),
    /// The session should be ended by the caller.
    Logout,
    /// Load the signed-in user; requested once per mount.
    FetchCurrentUser,
    /// Load header notices; requested when the notice panel opens.
    FetchNotices,
    /// Drop every notice of the given type.
    ClearNotices(String),
}

/// Color theme of the layout chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Blue,
    Green,
}

impl Theme {
    /// Theme after a switch: blue, then green, then the default look
    /// (`None`), then blue again.
    pub fn next(current: Option<Theme>) -> Option<Theme> {
        match current {
            None => Some(Theme::Blue),
            Some(Theme::Blue) => Some(Theme::Green),
            Some(Theme::Green) => None,
        }
    }
}

/// What a navigation resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNavigation {
    pub outcome: NavigationResult,
    pub title: String,
}

/// Headless layout shell of the admin console.
pub struct LayoutShell {
    config: ShellConfig,
    menus: Vec<MenuNode>,
    routes: RouteTable,
    breadcrumbs: BreadcrumbMap,
    redirects: Vec<RedirectRule>,
    guards: Guards,
    authority_guard: AuthorityGuard,
    history: History,
    collapsed: bool,
    theme: Option<Theme>,
    is_mobile: Arc<AtomicBool>,
    subscription: Option<SubscriptionId>,
    #[cfg(feature = "cache")]
    titles: TitleCache,
}

impl LayoutShell {
    /// Create an empty shell positioned at the base path.
    ///
    /// With `require_login` set in the configuration, a [`LoginGuard`]
    /// sending anonymous sessions to the configured login page is installed.
    pub fn new(config: ShellConfig) -> Self {
        let mut guards = Guards::default();
        if config.require_login {
            guards.push(LoginGuard::new(config.login_path.clone()));
        }
        Self {
            authority_guard: AuthorityGuard::new(config.forbidden_path.clone()),
            history: History::starting_at(config.base_path.clone()),
            #[cfg(feature = "cache")]
            titles: TitleCache::with_capacity(config.title_cache_capacity),
            config,
            menus: Vec::new(),
            routes: RouteTable::new(),
            breadcrumbs: BreadcrumbMap::default(),
            redirects: Vec::new(),
            guards,
            collapsed: false,
            theme: None,
            is_mobile: Arc::new(AtomicBool::new(false)),
            subscription: None,
        }
    }

    /// Add a global guard, checked before the authorized-route guard.
    #[must_use]
    pub fn with_guard<G: RouteGuard>(mut self, guard: G) -> Self {
        self.guards.push(guard);
        self
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn menus(&self) -> &[MenuNode] {
        &self.menus
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    // ========================================================================
    // Navigation data
    // ========================================================================

    /// Replace the menu tree.
    ///
    /// Malformed nodes are logged and skipped by the resolvers.
    pub fn set_menus(&mut self, menus: Vec<MenuNode>) {
        for problem in menu::validate(&menus) {
            warn_log!("{}", problem);
        }
        self.menus = menus;
        self.recompute();
    }

    /// Replace the route table.
    pub fn set_routes(&mut self, routes: RouteTable) {
        self.routes = routes;
        self.recompute();
    }

    /// Replace the menu tree from its JSON form.
    pub fn load_menus_json(&mut self, json: &str) -> Result<(), NavigationError> {
        let menus = menu::parse_menus(json)?;
        self.set_menus(menus);
        Ok(())
    }

    /// Replace the route table from its JSON form.
    pub fn load_routes_json(&mut self, json: &str) -> Result<(), NavigationError> {
        let routes = RouteTable::from_json(json)?;
        self.set_routes(routes);
        Ok(())
    }

    fn recompute(&mut self) {
        self.breadcrumbs = breadcrumb::resolve(&self.menus, &self.routes);
        self.redirects = redirect::plan(&self.menus);
        self.invalidate_titles();
        debug_log!(
            "Navigation data recomputed: {} breadcrumb entries, {} redirect rules",
            self.breadcrumbs.len(),
            self.redirects.len()
        );
    }

    /// Current breadcrumb map.
    pub fn breadcrumb_map(&self) -> &BreadcrumbMap {
        &self.breadcrumbs
    }

    /// Current redirect rules, in menu pre-order.
    pub fn redirect_rules(&self) -> &[RedirectRule] {
        &self.redirects
    }

    /// Breadcrumb trail of `pathname`, outermost first.
    pub fn breadcrumb_trail(&self, pathname: &str) -> Vec<(String, &Crumb)> {
        self.breadcrumbs.trail(pathname)
    }

    // ========================================================================
    // Titles
    // ========================================================================

    /// Document title for `pathname`.
    ///
    /// The last route table pattern matching the path names the page; when
    /// none matches (or it has no name) the configured title is used.
    pub fn page_title(&mut self, pathname: &str) -> String {
        if let Some(title) = self.cached_title(pathname) {
            return title;
        }
        let title = self
            .routes
            .last_match(pathname)
            .and_then(|(entry, _)| entry.name.as_deref())
            .map_or_else(|| self.config.title.clone(), |name| self.config.format_title(name));
        self.store_title(pathname, &title);
        title
    }

    #[cfg(feature = "cache")]
    fn cached_title(&mut self, pathname: &str) -> Option<String> {
        self.titles.get(pathname)
    }

    #[cfg(not(feature = "cache"))]
    fn cached_title(&mut self, _pathname: &str) -> Option<String> {
        None
    }

    #[cfg(feature = "cache")]
    fn store_title(&mut self, pathname: &str, title: &str) {
        self.titles.insert(pathname.to_string(), title.to_string());
    }

    #[cfg(not(feature = "cache"))]
    fn store_title(&mut self, _pathname: &str, _title: &str) {}

    #[cfg(feature = "cache")]
    fn invalidate_titles(&mut self) {
        self.titles.clear();
    }

    #[cfg(not(feature = "cache"))]
    fn invalidate_titles(&mut self) {}

    /// Title cache, for inspecting hit rates.
    #[cfg(feature = "cache")]
    pub fn title_cache(&self) -> &TitleCache {
        &self.titles
    }

    // ========================================================================
    // Routing
    // ========================================================================

    /// Resolve the base redirect against the current history location.
    ///
    /// An explicit redirect parameter is stripped from the visible URL by
    /// replacing the current history entry.
    pub fn base_redirect(&mut self, session: &Session) -> BaseRedirect {
        let location = self.history.location();
        let resolved = resolve_base_redirect(
            &location,
            &self.config.redirect_param,
            &self.config.base_path,
            &self.routes,
            session,
        );
        if let Some(stripped) = &resolved.stripped {
            self.history.replace(stripped.href());
        }
        resolved
    }

    /// Run `pathname` through the route switch.
    pub fn dispatch(&self, pathname: &str, session: &Session, base: &BaseRedirect) -> NavigationResult {
        if let Some(rule) = redirect::find(&self.redirects, pathname) {
            return NavigationResult::Redirect {
                from: rule.from.clone(),
                to: rule.to.clone(),
            };
        }

        let candidates = self
            .routes
            .iter()
            .filter(|entry| entry.path != self.config.base_path);
        for entry in candidates {
            let Some(params) = entry.matches(pathname) else {
                continue;
            };
            let mut request = NavigationRequest::new(pathname)
                .pattern(entry.path.clone())
                .params(params.clone());
            request.authority = entry.authority.clone();

            return match self.check_guards(session, &request) {
                NavigationAction::Continue => NavigationResult::Render {
                    pattern: entry.path.clone(),
                    component: entry.component.clone(),
                    params,
                },
                NavigationAction::Redirect { to, .. } => NavigationResult::Redirect {
                    from: pathname.to_string(),
                    to,
                },
                NavigationAction::Deny { reason } => NavigationResult::Forbidden {
                    path: pathname.to_string(),
                    reason,
                },
            };
        }

        if pathname == self.config.base_path {
            return match &base.target {
                Some(target) => NavigationResult::Redirect {
                    from: pathname.to_string(),
                    to: target.clone(),
                },
                None => NavigationResult::NoAuthorizedRoute,
            };
        }

        NavigationResult::NotFound {
            path: pathname.to_string(),
        }
    }

    fn check_guards(&self, session: &Session, request: &NavigationRequest) -> NavigationAction {
        let action = self.guards.check(session, request);
        if action.is_continue() {
            self.authority_guard.check(session, request)
        } else {
            action
        }
    }

    /// Navigate to `href`: push it, drive the progress indicator, then
    /// resolve the base redirect and dispatch.
    pub fn navigate<P: ProgressIndicator>(
        &mut self,
        href: &str,
        session: &Session,
        progress: &mut ProgressController<P>,
        loading: bool,
    ) -> ResolvedNavigation {
        self.history.push(href);
        let base = self.base_redirect(session);
        let pathname = self.history.location().pathname;
        progress.track(&pathname, loading);

        let outcome = self.dispatch(&pathname, session, &base);
        let title = self.page_title(&pathname);
        info_log!("Navigated to {} ({:?})", pathname, outcome);
        ResolvedNavigation { outcome, title }
    }

    // ========================================================================
    // Chrome state
    // ========================================================================

    /// Subscribe to `classifier` and ask for the current user. A second
    /// mount without an unmount is ignored and returns `None`.
    pub fn mount<C: ViewportClassifier + ?Sized>(
        &mut self,
        classifier: &mut C,
    ) -> Option<ShellCommand> {
        if self.subscription.is_some() {
            return None;
        }
        let flag = Arc::clone(&self.is_mobile);
        let id = classifier.subscribe(Box::new(move |mobile| {
            flag.store(mobile, Ordering::Relaxed);
        }));
        self.subscription = Some(id);
        Some(ShellCommand::FetchCurrentUser)
    }

    /// Release the subscription taken by [`mount`](Self::mount).
    pub fn unmount<C: ViewportClassifier + ?Sized>(&mut self, classifier: &mut C) {
        if let Some(id) = self.subscription.take() {
            classifier.unsubscribe(id);
        }
    }

    /// Return `true` if the shell is mounted on a classifier.
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn is_mobile(&self) -> bool {
        self.is_mobile.load(Ordering::Relaxed)
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    /// Switch to the next theme and return it.
    pub fn change_theme(&mut self) -> Option<Theme> {
        self.theme = Theme::next(self.theme);
        debug_log!("Theme switched to {:?}", self.theme);
        self.theme
    }

    /// The header notice panel opened or closed.
    pub fn handle_notice_visible_change(&self, visible: bool) -> Option<ShellCommand> {
        visible.then_some(ShellCommand::FetchNotices)
    }

    /// The user cleared the notices of one type.
    pub fn handle_notice_clear(&self, notice_type: impl Into<String>) -> ShellCommand {
        ShellCommand::ClearNotices(notice_type.into())
    }

    /// Handle a click in the header's user dropdown.
    pub fn handle_header_menu(&mut self, key: &str) -> Option<ShellCommand> {
        match key {
            MENU_KEY_TRIGGER_ERROR => {
                let path = self.config.trigger_error_path.clone();
                self.history.push(path.clone());
                Some(ShellCommand::Push(path))
            }
            MENU_KEY_LOGOUT => Some(ShellCommand::Logout),
            _ => {
                debug_log!("Ignoring header menu key: {}", key);
                None
            }
        }
    }
}

impl Default for LayoutShell {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}
