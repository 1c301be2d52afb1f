pub mod ai;
pub mod chart;
pub mod config;
pub mod credentials;
pub mod finance;
pub mod session;
pub mod types;
pub mod voice;

#[cfg(feature = "ui")]
pub mod theme;
#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;
