//! Serde helpers shared by request types.

use serde::{Deserialize, Deserializer};

/// Deserialize `Option<Option<T>>` so a PATCH body can tell "absent" from `null`.
///
/// - Missing field → `None` (requires `#[serde(default)]`)
/// - Field is `null` → `Some(None)`
/// - Field has value → `Some(Some(value))`
///
/// ```ignore
/// #[derive(Deserialize)]
/// struct PatchActionItem {
///     #[serde(default, deserialize_with = "crate::serde_utils::double_option")]
///     note_id: Option<Option<i64>>,
/// }
/// ```
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
