//! The adapter seam between manifest entries and descriptors.

use serde_json::Value;

use modsync_core::ModDescriptor;

use crate::error::ProviderError;

/// Resolves one manifest entry into a [`ModDescriptor`].
pub trait ProviderAdapter {
    /// Manifest group key this adapter handles (e.g. `"modrinth"`).
    fn key(&self) -> &str;

    /// Turn `entry` into a descriptor, usually with one API round-trip.
    fn resolve(&self, entry: &Value) -> Result<ModDescriptor, ProviderError>;
}

/// Read the first present identifier among `names` from an entry object.
///
/// Strings and non-negative integers are accepted. Identifiers end up in a
/// URL path, so anything but ASCII alphanumerics, `-` and `_` is rejected.
pub(crate) fn id_field(
    provider: &str,
    entry: &Value,
    names: &[&str],
) -> Result<String, ProviderError> {
    let Some(object) = entry.as_object() else {
        return Err(ProviderError::invalid(provider, "entry is not an object"));
    };

    let raw = names.iter().find_map(|name| match object.get(*name) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Some(Value::Number(n)) if n.is_u64() => Some(n.to_string()),
        _ => None,
    });
    let Some(id) = raw else {
        return Err(ProviderError::invalid(
            provider,
            format!("missing `{}`", names.first().copied().unwrap_or("id")),
        ));
    };

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ProviderError::invalid(
            provider,
            format!("identifier '{id}' contains unsupported characters"),
        ));
    }
    Ok(id)
}

/// Join an API base URL and a path without doubling slashes.
pub(crate) fn join_url(endpoint: &str, path: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
