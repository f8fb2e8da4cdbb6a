//! Server-side models that are not part of the persisted document.

pub mod session;
