//! Shared fixtures for integration tests
//!
//! Provides menu trees, route tables, sessions, and a recording progress
//! indicator.

#![allow(dead_code)]

use console_navigator::*;

/// Install a test logger once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Console menu: a dashboard group, a system group with a nested group,
/// and a leaf-only profile entry.
pub fn console_menus() -> Vec<MenuNode> {
    vec![
        MenuNode::new(1, "Dashboard", "/dash").icon("dashboard").children(vec![
            MenuNode::new(2, "Overview", "/dash/overview"),
            MenuNode::new(3, "Monitor", "/dash/monitor"),
        ]),
        MenuNode::new(10, "System", "/sys").icon("setting").children(vec![
            MenuNode::new(11, "Accounts", "/sys/account"),
            MenuNode::new(12, "Organisation", "/sys/org").children(vec![
                MenuNode::new(13, "Departments", "/sys/org/dept"),
            ]),
        ]),
        MenuNode::new(20, "Profile", "/profile"),
    ]
}

/// Route table matching [`console_menus`].
pub fn console_routes() -> RouteTable {
    RouteTable::from_entries([
        RouteEntry::new("/"),
        RouteEntry::new("/dash/overview").name("Overview").component("Overview"),
        RouteEntry::new("/dash/monitor").name("Monitor").authority("ops"),
        RouteEntry::new("/sys/account").name("Accounts").authority("admin"),
        RouteEntry::new("/sys/account/:id").name("Account Detail").authority("admin"),
        RouteEntry::new("/sys/org/dept").name("Departments").authority(vec!["admin", "hr"]),
        RouteEntry::new("/profile").name("Profile"),
        RouteEntry::new("/exception/403").name("Forbidden"),
    ])
    .expect("fixture routes are unique")
}

/// A shell loaded with the console fixtures.
pub fn console_shell() -> LayoutShell {
    let mut shell = LayoutShell::new(ShellConfig::default().title_suffix("Ant Design Pro"));
    shell.set_routes(console_routes());
    shell.set_menus(console_menus());
    shell
}

/// Signed-in administrator.
pub fn admin_session() -> Session {
    Session::signed_in(CurrentUser::new("admin")).with_permissions(["admin"])
}

/// Signed-in user holding the given authorities.
pub fn session_with(authorities: &[&str]) -> Session {
    Session::signed_in(CurrentUser::new("user")).with_permissions(authorities.iter().copied())
}

/// Progress indicator recording every call.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<&'static str>,
}

impl ProgressIndicator for Recorder {
    fn start(&mut self) {
        self.calls.push("start");
    }

    fn done(&mut self) {
        self.calls.push("done");
    }
}
