//! inkstone-markup: the markup fragment model behind the editor.
//!
//! Documents are stored as HTML fragment strings. This crate provides the
//! pieces every other crate builds on:
//!
//! - `FragmentParser` - pull parser over a fragment, with byte spans
//! - `FragmentBuilder` - programmatic, always-escaped fragment construction
//! - `escape`/`unescape` helpers plus the copy-payload percent encoding
//! - `validate_fragment` - the well-formedness check behind the snapshot
//!   invariant
//! - structure queries: element spans, block classification, boundary
//!   snapping
//!
//! The fragment grammar is deliberately the subset the editing surface
//! produces. Input is trusted (no sanitization); malformed syntax degrades
//! to text rather than erroring, mirroring how a browser parser would
//! recover.

pub mod builder;
pub mod escape;
pub mod event;
pub mod parser;
pub mod structure;
pub mod validate;

pub use builder::FragmentBuilder;
pub use escape::{
    decode_copy_payload, encode_copy_payload, escape_attribute, escape_html, unescape,
    PayloadError,
};
pub use event::{Attribute, FragmentEvent, FragmentTag, is_block_tag, is_void_tag};
pub use parser::FragmentParser;
pub use structure::{ElementSpan, balanced_cover, element_spans, snap_out_of_tags};
pub use validate::{FragmentError, validate_fragment};
