//! Read-only formatting for replication status pages.

pub mod duration;
pub mod slot;

pub use duration::format_duration;
pub use slot::{flow_name, mirror_edit_path, SlotDisplay, SLOT_PREFIX};
