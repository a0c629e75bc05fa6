//! Terminal speedometer dashboard for locally running MLX inference servers.

pub mod app;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod opener;
pub mod reconcile;
pub mod render;
pub mod settings;
pub mod snapshot;
pub mod source;
pub mod theme;
pub mod ui;
pub mod widget;
