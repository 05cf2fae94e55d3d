// src/models/mod.rs

pub mod assignment;
pub mod course;
pub mod course_module;
pub mod notification;
pub mod quiz;
pub mod result;
pub mod student;
pub mod task;
pub mod teacher;

use serde::{Deserialize, Deserializer};

/// Deserializer for partial updates of nullable columns.
///
/// Used with `#[serde(default)]`: an absent field stays `None`, an explicit
/// `null` becomes `Some(None)` (clear the column), a value `Some(Some(v))`.
pub(crate) fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
