//! Core types for GastroBoard.
//!
//! The type hierarchy mirrors the persisted configuration document:
//! an [`AppConfig`] holds ordered [`Screen`]s (menu boards or promo slides)
//! and the [`User`]s allowed into the admin editor.

pub mod config;
pub mod id;
pub mod screen;
pub mod user;

pub use config::{AppConfig, EditError, MoveDirection, ScreenSettings};
pub use id::*;
pub use screen::{
    Category, Dish, InvalidRotation, MenuContent, PromoContent, Rotation, Screen, ScreenContent,
    ScreenKind,
};
pub use user::{Role, User};
