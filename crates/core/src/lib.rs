//! GastroBoard Core - Domain library.
//!
//! This crate provides the domain model and pure logic shared by all
//! GastroBoard components:
//! - `server` - The signage server (TV display + admin editor)
//! - `cli` - Command-line tools for seeding and managing the config file
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no file access. Everything here is deterministic and unit-testable:
//!
//! - [`types`] - The configuration document model (screens, dishes, users)
//! - [`scheduler`] - The slideshow scheduler that picks the next screen
//! - [`display`] - Derived display strings (half-portion weight and price)
//! - [`migrate`] - Forward migration of older / partial config documents
//! - [`defaults`] - The built-in seed configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod defaults;
pub mod display;
pub mod migrate;
pub mod scheduler;
pub mod types;

pub use types::*;
