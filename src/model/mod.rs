// File: src/model/mod.rs
// Wire types shared by the api layer and the view models.
pub mod admin;
pub mod item;
pub mod profile;
pub mod session;

pub use admin::*;
pub use item::{ContentItem, ContentKind, Progress};
pub use profile::*;
pub use session::SessionUser;

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
