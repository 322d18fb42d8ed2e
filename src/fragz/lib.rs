//! # Fragz Architecture
//!
//! Fragz manages a collection of text fragments loaded from files: it pages
//! through them, lets a caller pick some, and replaces the picked ones with
//! the smaller pieces an external fragmentation process cuts them into.
//!
//! Like the rest of our tools it is a library first; the `fragz` binary is one
//! client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, runs the shell loop    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the Session              │
//! │  - Normalizes inputs (positions/ranges → fragment ids)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - load, page, get, delete, fragment, config                │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs, collection.rs, pagination.rs)         │
//! │  - Ordered collection + page cursor                         │
//! │  - Talks to the outside only through two traits:            │
//! │    SourceReader (source/) and Fragmenter (fragmenter/)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifiers
//!
//! A fragment loaded from disk is identified by its path. Fragments produced
//! by splitting get `fragment_<position>_<ordinal>` ids, with a `_<k>` suffix
//! when that id is already taken. See [`ident`].
//!
//! ## The Split Worker
//!
//! With no external program configured, the binary acts as its own
//! collaborator: it runs itself as `fragz split-worker <mode> <target>
//! <tolerance>`. The splitting logic lives in [`splitter`].
//!
//! ## Testing Strategy
//!
//! 1. **Commands and session**: unit tests with [`source::memory::InMemoryReader`]
//!    and the scripted `StubFragmenter` (behind `cfg(test)` / `test_utils`).
//! 2. **API**: dispatch and selector resolution.
//! 3. **CLI**: `tests/` drives the real binary, including the process boundary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each operation
//! - [`session`]: The collection manager (collection + page cursor)
//! - [`collection`]: Ordered fragment storage, load / delete / replace
//! - [`pagination`]: Page arithmetic
//! - [`model`]: `Fragment` and `FragmentMeta`
//! - [`ident`]: Fragment id generation
//! - [`display`]: Display name shortening
//! - [`index`]: Parsing user selections (positions, ranges, ids)
//! - [`source`]: File-read collaborator
//! - [`fragmenter`]: Fragmentation collaborator and its process transport
//! - [`splitter`]: The built-in split worker logic
//! - [`config`]: Configuration management
//! - [`init`]: Wiring a context from configuration
//! - [`error`]: Error types

pub mod api;
pub mod collection;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod fragmenter;
pub mod ident;
pub mod index;
pub mod init;
pub mod model;
pub mod pagination;
pub mod session;
pub mod source;
pub mod splitter;
