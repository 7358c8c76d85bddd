//! inkstone-app: the post editor form enclosing the rich text editor.
//!
//! The editor itself never persists; this crate owns the draft record, the
//! field validation, the unsaved-changes close guard, and the single
//! record write to the external store collaborator.

pub mod form;
pub mod post;
pub mod store;

pub use form::{Field, FieldError, PostForm, SaveError};
pub use post::{PostRecord, PostStatus};
pub use store::{MemoryPostStore, PostStore, StoreError};
