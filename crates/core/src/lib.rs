//! Building blocks shared by the index and archive readers.
//!
//! - [`Entry`]: one captured resource, identified by URL and payload hash
//! - [`decode_url`] and [`strip_digest_prefix`]: normalization applied to
//!   both sources so their values can be compared directly
//! - [`discover`]: recursive, deterministic file discovery by name suffix

mod decode;
mod discover;
mod entry;
pub mod error;

pub use crate::decode::{decode_url, strip_digest_prefix};
pub use crate::discover::discover;
pub use crate::entry::{Entry, EntryKey, EntryKind};
