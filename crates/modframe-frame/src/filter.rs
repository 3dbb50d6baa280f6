//! Device id filtering.
//!
//! Device id 0 is never assigned to a real device. In a filter it acts as
//! the wildcard.

use std::collections::BTreeSet;

/// Wildcard device id.
pub const ANY_DEVICE: u8 = 0;

/// Set of device ids a receiver accepts frames from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeviceFilter {
    /// Accept every device.
    #[default]
    Any,
    /// Accept only these devices.
    OneOf(BTreeSet<u8>),
}

impl DeviceFilter {
    /// Resolve a list of ids. An empty list or one containing 0 accepts all.
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let ids: BTreeSet<u8> = ids.into_iter().collect();
        if ids.is_empty() || ids.contains(&ANY_DEVICE) {
            Self::Any
        } else {
            Self::OneOf(ids)
        }
    }

    /// Returns true if frames from `device_id` should be dispatched.
    pub fn accepts(&self, device_id: u8) -> bool {
        match self {
            Self::Any => true,
            Self::OneOf(ids) => ids.contains(&device_id),
        }
    }
}

impl From<u8> for DeviceFilter {
    fn from(id: u8) -> Self {
        Self::from_ids([id])
    }
}

impl From<&[u8]> for DeviceFilter {
    fn from(ids: &[u8]) -> Self {
        Self::from_ids(ids.iter().copied())
    }
}

impl From<Vec<u8>> for DeviceFilter {
    fn from(ids: Vec<u8>) -> Self {
        Self::from_ids(ids)
    }
}
