//! GitHub implementation of the hubsync remote host capability
//!
//! Talks to the GitHub REST API with a bearer token. All traffic goes
//! through a single [`GitHubClient`] built at startup; operations receive it
//! as a `&dyn RemoteHost`, so nothing here is process-global.

pub mod client;
pub mod types;

pub use client::GitHubClient;
