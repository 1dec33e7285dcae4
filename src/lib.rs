//! pagesctl: Pages project and deployment management
//!
//! Resolves which account and project a command means (explicit flag, cached default, or an
//! interactive selection), talks to the remote API through a paginated fetcher, and persists the
//! resolved context so later invocations need less input.

pub mod api;
pub mod auth;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod invocation;
pub mod logging;
pub mod pages;
pub mod pagination;
pub mod selector;
pub mod vcs;
