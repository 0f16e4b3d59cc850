pub mod ai;
pub mod conversation;
pub mod directory;
pub mod persona;
pub mod relay;
pub mod session;
pub mod telemetry;
pub mod types;

#[cfg(feature = "ui")]
pub mod theme;
#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;
