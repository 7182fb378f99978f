//! Caret markers in source fixtures.

/// Marker standing for the caret in fixture sources and CLI input.
pub const CARET_MARKER: &str = "$$";

/// Remove the first `$$` from `source` and return the text with the caret
/// offset. `None` if the source has no marker, or if the marker lies beyond
/// what a `u32` offset can address.
pub fn split_caret_marker(source: &str) -> Option<(String, u32)> {
    let offset = source.find(CARET_MARKER)?;
    let position = u32::try_from(offset).ok()?;
    let mut text = String::with_capacity(source.len() - CARET_MARKER.len());
    text.push_str(&source[..offset]);
    text.push_str(&source[offset + CARET_MARKER.len()..]);
    Some((text, position))
}

#[cfg(test)]
#[path = "../tests/marker_tests.rs"]
mod marker_tests;
