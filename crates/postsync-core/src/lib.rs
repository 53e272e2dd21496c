//! postsync Core Library
//!
//! This crate provides the core functionality for postsync, a client that
//! lists, creates, edits and deletes posts on a remote REST collection
//! resource, keeping an in-memory list consistent with it.
//!
//! # Architecture
//!
//! - **Remote Gateway**: four HTTP operations against the collection
//! - **Collection Store**: the in-memory list used for rendering
//! - **Sync Controller**: runs gateway calls and reconciles their results
//!
//! Nothing is persisted locally. The store is rebuilt from the remote on
//! every load.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let gateway = HttpGateway::new(&config.api_url);
//! let mut controller = SyncController::from_config(gateway, &config);
//!
//! controller.load().await?;
//! for post in controller.store().posts() {
//!     println!("{}", post.title);
//! }
//! ```
//!
//! # Modules
//!
//! - `controller`: Sync Controller (main entry point)
//! - `store`: Collection Store and its reconciliation primitives
//! - `gateway`: Remote Gateway trait and HTTP implementation
//! - `models`: Post, draft and client id types
//! - `error`: Remote error type
//! - `config`: Application configuration

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod models;
pub mod store;

pub use config::Config;
pub use controller::{Submitted, SyncController};
pub use error::{Operation, RemoteError};
pub use gateway::{Gateway, HttpGateway};
pub use models::{next_client_id, Draft, FormMode, NewPost, Post, PostId};
pub use store::{PostStore, View};
