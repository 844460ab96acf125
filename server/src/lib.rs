//! # Sus Journal Server
//!
//! Mirrors the live roster of a running game session into a JSON document
//! and serves it over a small local HTTP API, so a browser page can show who
//! is in the round and let the player attach notes to each participant.
//!
//! ## Core Responsibilities
//!
//! ### Snapshot Publishing
//! Once per host update the publisher polls the host roster, merges it with
//! the locally owned notes, derives automatic notes ("Dead", "Imposter") from
//! the session state and swaps in a freshly serialized snapshot. The previous
//! snapshot is discarded, never patched.
//!
//! ### Note Taking
//! `POST /api/tagplayer` sets or clears a participant's note. The snapshot is
//! rebuilt right away so the next read already shows the change.
//!
//! ### Session Reset
//! When the host reports no session, every note is dropped and the canonical
//! empty snapshot `{"players":[],"roles":[]}` is published.
//!
//! ## Architecture Design
//!
//! ### One Lock
//! The note book and the published snapshot live together in a [`state::Journal`]
//! behind a single `tokio::sync::RwLock`. HTTP reads share the read half; a
//! builder pass and a tag write each hold the write half from start to finish,
//! so a tag can never be lost between derivation and publication.
//!
//! ### Host-Driven Ticks
//! The publisher does not own a timer. The host pushes a notification on an
//! `mpsc` channel after each of its updates and [`publisher::run_publisher`]
//! handles each one. Tests call [`publisher::Publisher::tick`] directly.
//!
//! ### Task per Connection
//! The HTTP side is an `axum` router served on its own task; every accepted
//! connection runs concurrently with the publisher.
//!
//! ## Module Organization
//!
//! - `notes`: per-participant note book
//! - `roster`: the pull interface to the host game
//! - `game`: snapshot builder and note derivation
//! - `state`: the shared journal and its lock
//! - `publisher`: tick handler and tag writes
//! - `network`: HTTP routes, CORS and the listener
//! - `assets`: static page and image loaded at startup
//! - `demo`: simulated host for running standalone
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use journal_server::assets::Assets;
//! use journal_server::demo::{run_host, DemoHost};
//! use journal_server::network::{router, NetworkServer};
//! use journal_server::publisher::{run_publisher, Publisher};
//! use journal_server::state::Journal;
//! use std::path::Path;
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let host = Arc::new(DemoHost::new(10, None));
//!     let publisher = Arc::new(Publisher::new(host.clone(), Journal::shared()));
//!
//!     let (tick_tx, tick_rx) = mpsc::channel(64);
//!     tokio::spawn(run_host(host, 30, tick_tx));
//!     tokio::spawn(run_publisher(Arc::clone(&publisher), tick_rx));
//!
//!     let app = router(publisher, Assets::load(Path::new("assets")));
//!     NetworkServer::bind("127.0.0.1:8080", app).await?.run().await?;
//!     Ok(())
//! }
//! ```

pub mod assets;
pub mod config;
pub mod demo;
pub mod error;
pub mod game;
pub mod network;
pub mod notes;
pub mod publisher;
pub mod roster;
pub mod state;
pub mod utils;
