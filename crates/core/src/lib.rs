//! Dashboard core - entity ordering and display helpers
//!
//! This crate provides the pure helpers behind the dashboard's lists:
//! - Entity records (devices, folders) keyed by id
//! - Name/id and id comparators
//! - Keyed map <-> ordered list normalization
//! - Numeric precision and empty-object helpers

pub mod entity;
pub mod format;
pub mod normalize;

// Re-export main types for convenience
pub use entity::{by_id, by_name_or_id, Device, Entity, Folder};
pub use format::{decimals, is_empty_object};
pub use normalize::{key_by_id, map_to_list, map_to_list_by_name, sort_by_name_or_id, EntityMap};
