//! Group-scoped rights resolution for the corral platform.
//!
//! This crate is the authorization core: it decides, for every operation on
//! every resource, whether a given identity may perform it. Transport,
//! authentication, and domain payloads are external collaborators: the
//! engine is handed a verified username and reads only a resource's creator
//! and published scopes.
//!
//! # Components
//!
//! ```text
//! rights   (closed Right catalog)
//!    ↑
//! model    (Role, Group, Membership, User, ResourceRecord)
//!    ↑
//! store    (AccessStore trait + in-memory backend)
//!    ↑
//! resolver (effective rights = union over assigned roles, always live)
//!    ↑
//! guard    (require: ownership > global > published scopes; filter_visible)
//!    ↑
//! registry / groups / users / content   (gated mutations + cascades)
//!    ↑
//! engine   (composition) + bootstrap (idempotent seeding)
//! ```
//!
//! # Design principles
//!
//! - **Explicit identity**: every call takes the acting username as a
//!   parameter; a decision is a pure function of (identity, request, state).
//! - **One decision order**: ownership beats global, global beats published
//!   scopes; the order lives in one module ([`guard`]) and nowhere else.
//! - **Live resolution**: no cached rights; revocations and role edits take
//!   effect on the next check.
//! - **Atomic cascades**: compound mutations are single store operations so
//!   a backend can make them all-or-nothing.
pub mod bootstrap;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod groups;
pub mod guard;
pub mod model;
pub mod registry;
pub mod resolver;
pub mod rights;
pub mod store;
pub mod users;

pub use config::AccessConfig;
pub use content::ContentIndex;
pub use engine::AccessEngine;
pub use error::{AccessError, AccessResult};
pub use groups::GroupDirectory;
pub use guard::AccessGuard;
pub use model::{Group, Membership, ResourceRecord, Role, User, GLOBAL_GROUP};
pub use registry::RoleRegistry;
pub use resolver::MembershipResolver;
pub use rights::{ResourceKind, Right, ALL_RIGHTS};
pub use store::{memory::InMemoryStore, AccessStore, StoreError};
pub use users::UserDirectory;
