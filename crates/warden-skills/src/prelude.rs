//! Prelude module - commonly used types for convenient import.
//!
//! Use `use warden_skills::prelude::*;` to import all essential types.

// Topics
pub use crate::{DocumentId, PatternRule, Topic, TopicId, TopicRegistry};

// Stores
pub use crate::{DocumentStore, FsDocumentStore, MemoryDocumentStore};

// Handlers
pub use crate::{PathInjectionHandler, PromptInjectionHandler, SessionResetHandler, skill_handlers};

// Errors
pub use crate::{SkillError, SkillResult};
