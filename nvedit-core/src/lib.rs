//! Board-agnostic core of the settings editor
//!
//! This crate contains everything that does not depend on a specific
//! platform port:
//!
//! - Factory block checksum
//! - Settings snapshot, typed bitfield views and step rules
//! - Settings store adapter (load/save of scalar settings)
//! - Factory block codec (byte-wise read-modify-write over SMBus)
//! - Session with dirty tracking and apply
//! - Menu line binding and the editor facade

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod checksum;
pub mod config;
pub mod editor;
pub mod error;
pub mod factory;
pub mod menu;
pub mod session;
pub mod settings;
pub mod store;

pub use config::EditorConfig;
pub use editor::Editor;
pub use error::ApplyError;
pub use menu::{Menu, MenuAction, MenuLine};
pub use session::{ApplyReport, Setting, SettingsSession};
pub use settings::SettingsSnapshot;
