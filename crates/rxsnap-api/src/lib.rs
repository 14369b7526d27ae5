//! rxsnap web service library.
//!
//! Exposed as a library so integration tests can build the router against an
//! injected drive backend.

pub mod error;
pub mod handlers;
pub mod keepalive;
pub mod services;
pub mod setup;
pub mod state;
