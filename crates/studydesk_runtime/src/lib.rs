//! Window manager for the study desktop: registry, stacking, gesture geometry, sidebar policy,
//! taskbar projection, and launch routing, plus the Leptos shell that renders them.

pub mod catalog;
pub mod components;
pub mod config;
mod effect_executor;
pub mod host;
pub mod lesson;
pub mod model;
pub mod reducer;
pub mod router;
mod runtime_context;
pub mod sidebar;
pub mod store;
pub mod taskbar;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::{ConfigError, ShellConfig};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, LaunchRequest, ReducerError, RuntimeEffect};
pub use router::LaunchTarget;
pub use store::DesktopStore;
