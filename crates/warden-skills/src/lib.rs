//! Warden Skills - Intent detection and guidance injection.
//!
//! A [`TopicRegistry`] maps topics to regex patterns and a guidance
//! document. When a prompt or a tool's file path matches a topic that has
//! not been delivered in the current session, the topic's document is
//! loaded from a [`DocumentStore`] and injected into the agent's context.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use warden_skills::{FsDocumentStore, TopicRegistry, skill_handlers};
//!
//! let registry = Arc::new(TopicRegistry::with_defaults()?);
//! let store = Arc::new(FsDocumentStore::new("/home/me/.warden/skills"));
//! for handler in skill_handlers(registry, store) {
//!     manager.register(handler);
//! }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod error;
pub mod handlers;
pub mod registry;
pub mod store;
pub mod topic;

pub use error::{SkillError, SkillResult};
pub use handlers::{
    AUTO_SKILL_MESSAGE_TYPE, PathInjectionHandler, PromptInjectionHandler, SessionResetHandler,
    skill_handlers,
};
pub use registry::{TopicRegistry, default_topics};
pub use store::{DEFAULT_DOCUMENT_FILE, DocumentStore, FsDocumentStore, MemoryDocumentStore};
pub use topic::{DocumentId, PatternRule, Topic, TopicId};
