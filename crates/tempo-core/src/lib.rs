//! Core Tempo client library (config, token store, API boundary, session, todo state).

pub mod api;
pub mod config;
pub mod nav;
pub mod session;
pub mod store;
pub mod token;
