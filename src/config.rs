//! Layout shell configuration.
//!
//! Everything the shell needs that is not navigation data: application
//! title and copyright, the special pages guards redirect to, and cache
//! sizing. Values can be built in code or decoded from JSON; missing JSON
//! fields take their defaults.
//!
//! ```
//! use console_navigator::ShellConfig;
//!
//! let config = ShellConfig::from_json(r#"{
//!     "title": "Eva Console",
//!     "titleSuffix": "Eva",
//!     "forbiddenPath": "/error/403"
//! }"#).unwrap();
//!
//! assert_eq!(config.title, "Eva Console");
//! assert_eq!(config.forbidden_path, "/error/403");
//! assert_eq!(config.login_path, "/user/login");
//! ```

use crate::error::NavigationError;
use crate::error_log;
use crate::navigation::REDIRECT_PARAM;
use serde::{Deserialize, Serialize};

/// A link rendered in the layout footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterLink {
    pub key: String,
    pub title: String,
    pub href: String,
    #[serde(default)]
    pub blank_target: bool,
}

/// Configuration of the layout shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellConfig {
    /// Document title used when no route name applies.
    pub title: String,
    /// Appended to route names as `"{name} - {suffix}"`. `None` keeps the
    /// bare route name.
    pub title_suffix: Option<String>,
    /// Footer copyright line.
    pub copyright: String,
    /// Footer links.
    pub footer_links: Vec<FooterLink>,
    /// Path the layout is mounted on; its own route is the base redirect.
    pub base_path: String,
    /// Where the authorized-route guard sends denied users.
    pub forbidden_path: String,
    /// Login page the login guard redirects to.
    pub login_path: String,
    /// Install a login guard sending anonymous sessions to `login_path`.
    pub require_login: bool,
    /// Page the header's "trigger error" menu item opens.
    pub trigger_error_path: String,
    /// Query parameter carrying an explicit redirect target.
    pub redirect_param: String,
    /// Number of page titles kept in the title cache.
    pub title_cache_capacity: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "Admin Console".to_string(),
            title_suffix: None,
            copyright: String::new(),
            footer_links: Vec::new(),
            base_path: "/".to_string(),
            forbidden_path: "/exception/403".to_string(),
            login_path: "/user/login".to_string(),
            require_login: false,
            trigger_error_path: "/exception/trigger".to_string(),
            redirect_param: REDIRECT_PARAM.to_string(),
            title_cache_capacity: 256,
        }
    }
}

impl ShellConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, NavigationError> {
        let config: ShellConfig = serde_json::from_str(json).map_err(|err| {
            error_log!("Failed to load shell configuration: {}", err);
            NavigationError::from(err)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every special path is absolute and the cache can hold
    /// something.
    pub fn validate(&self) -> Result<(), NavigationError> {
        let paths = [
            ("basePath", &self.base_path),
            ("forbiddenPath", &self.forbidden_path),
            ("loginPath", &self.login_path),
            ("triggerErrorPath", &self.trigger_error_path),
        ];
        for (field, path) in paths {
            if !path.starts_with('/') {
                return Err(NavigationError::InvalidConfig {
                    message: format!("{} must start with '/', got '{}'", field, path),
                });
            }
        }
        if self.redirect_param.is_empty() {
            return Err(NavigationError::InvalidConfig {
                message: "redirectParam must not be empty".to_string(),
            });
        }
        if self.title_cache_capacity == 0 {
            return Err(NavigationError::InvalidConfig {
                message: "titleCacheCapacity must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Set the fallback document title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the suffix appended to route names.
    #[must_use]
    pub fn title_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.title_suffix = Some(suffix.into());
        self
    }

    /// Set the footer copyright line.
    #[must_use]
    pub fn copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = copyright.into();
        self
    }

    /// Add a footer link.
    #[must_use]
    pub fn footer_link(mut self, link: FooterLink) -> Self {
        self.footer_links.push(link);
        self
    }

    /// Set the forbidden page.
    #[must_use]
    pub fn forbidden_path(mut self, path: impl Into<String>) -> Self {
        self.forbidden_path = path.into();
        self
    }

    /// Set the login page.
    #[must_use]
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Require a signed-in user on every route but the login page.
    #[must_use]
    pub fn require_login(mut self, require: bool) -> Self {
        self.require_login = require;
        self
    }

    /// Set the path the layout is mounted on.
    #[must_use]
    pub fn base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Set the title cache capacity.
    #[must_use]
    pub fn title_cache_capacity(mut self, capacity: usize) -> Self {
        self.title_cache_capacity = capacity;
        self
    }

    /// Format the document title for a route name.
    pub fn format_title(&self, route_name: &str) -> String {
        match &self.title_suffix {
            Some(suffix) => format!("{} - {}", route_name, suffix),
            None => route_name.to_string(),
        }
    }
}
