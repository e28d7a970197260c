//! Responsive navigation shell for MoonUI documentation sites.
//!
//! This crate holds the host-agnostic state machines behind the side panel,
//! the top-bar menu and the panel scroll memory. Hosts (the browser bindings,
//! or tests) feed events in through the host traits and render the snapshots
//! that come back out.

pub mod config;
pub mod controller;
pub mod feedback;
pub mod host;
pub mod links;
pub mod markup;
pub mod menu;
pub mod scroll;
pub mod viewport;

pub use config::{ConfigError, ShellConfig};
pub use controller::{HitRegion, NavigationShellController, ShellSnapshot, Transition};
pub use feedback::{CopyFeedback, CopyState};
pub use host::{MemorySessionStore, ScrollLock, ScrollSurface, SessionStore, StoreError, ViewportProbe};
pub use links::{LinkEntry, LinkSection};
pub use menu::TopBarMenu;
pub use scroll::{PanelScrollTracker, PendingRestore, ScrollOffset, ScrollPositionStore};
pub use viewport::{Breakpoint, ViewportClass};
