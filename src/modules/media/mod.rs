mod cache_key;
mod record;

pub use cache_key::cache_key;
pub use record::{MediaDetails, MediaKind, MediaRecord, MediaSource};
