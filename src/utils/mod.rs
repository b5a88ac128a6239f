pub mod slug;
pub mod time;

pub use slug::{derive_id, slugify, UNKNOWN_RELEASE_DATE};
pub use time::{now_iso, parse_iso, snapshot_stamp, ISO_FORMAT};
