//! Entity records and comparators
//!
//! Entities are the uniquely keyed records the dashboard lists: devices
//! (keyed by device ID, optionally named) and folders (keyed by folder ID).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::rc::Rc;
use std::sync::Arc;

/// A record with a unique string key and an optional display name
pub trait Entity {
    /// Unique key
    fn id(&self) -> &str;

    /// Display name, if the record has one
    fn name(&self) -> Option<&str> {
        None
    }
}

impl<T: Entity + ?Sized> Entity for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn name(&self) -> Option<&str> {
        (**self).name()
    }
}

impl<T: Entity + ?Sized> Entity for Arc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn name(&self) -> Option<&str> {
        (**self).name()
    }
}

impl<T: Entity + ?Sized> Entity for Rc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn name(&self) -> Option<&str> {
        (**self).name()
    }
}

/// Order by name when both sides are named, otherwise by id
///
/// Equal names compare as [`Ordering::Equal`] without looking at ids; use
/// [`crate::sort_by_name_or_id`] for a fully deterministic display order.
/// An empty name still counts as a name.
pub fn by_name_or_id<T: Entity + ?Sized>(a: &T, b: &T) -> Ordering {
    match (a.name(), b.name()) {
        (Some(a_name), Some(b_name)) => a_name.cmp(b_name),
        _ => by_id(a, b),
    }
}

/// Order by id
pub fn by_id<T: Entity + ?Sized>(a: &T, b: &T) -> Ordering {
    a.id().cmp(b.id())
}

/// A remote device as reported by the REST config endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "deviceID")]
    pub device_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Device {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            name: None,
        }
    }

    pub fn named(device_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            name: Some(name.into()),
        }
    }
}

impl Entity for Device {
    fn id(&self) -> &str {
        &self.device_id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A shared folder as reported by the REST config endpoint
///
/// Folders are always listed by id; the label is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Folder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }
}

impl Entity for Folder {
    fn id(&self) -> &str {
        &self.id
    }
}
