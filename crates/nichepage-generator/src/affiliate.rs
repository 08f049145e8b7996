//! Affiliate tag injection for outbound product links.
//!
//! Rewriting is best effort: a link that cannot be parsed is returned as-is so
//! that a bad URL never blocks page generation.

use url::{Url, form_urlencoded};

use nichepage_core::product::PLACEHOLDER_URL;

/// Query parameter carrying the affiliate tag.
pub const TRACKING_PARAM: &str = "tag";

/// Set the tracking parameter on `url` to `tag`.
///
/// Scheme, authority, path and fragment are kept byte for byte. Other query
/// parameters are copied verbatim, in order, including repeated keys and their
/// original percent-encoding. An existing tracking parameter is overwritten in
/// place; extra copies of it and empty `&&` segments are dropped.
///
/// An empty `url` becomes `#`. An empty `tag` leaves the link untouched.
#[must_use]
pub fn rewrite(url: &str, tag: &str) -> String {
    if url.is_empty() {
        return PLACEHOLDER_URL.to_string();
    }
    if tag.is_empty() {
        return url.to_string();
    }

    if Url::parse(url).is_err() {
        return url.to_string();
    }

    let (before_fragment, fragment) = match url.split_once('#') {
        Some((head, frag)) => (head, Some(frag)),
        None => (url, None),
    };
    let (base, query) = before_fragment
        .split_once('?')
        .unwrap_or((before_fragment, ""));

    let tag_segment = format!(
        "{TRACKING_PARAM}={}",
        form_urlencoded::byte_serialize(tag.as_bytes()).collect::<String>()
    );

    let mut segments = Vec::new();
    let mut tagged = false;
    for segment in query.split('&').filter(|s| !s.is_empty()) {
        if !is_tracking_segment(segment) {
            segments.push(segment);
        } else if !tagged {
            segments.push(&tag_segment);
            tagged = true;
        }
    }
    if !tagged {
        segments.push(&tag_segment);
    }

    let mut rewritten = format!("{base}?{}", segments.join("&"));
    if let Some(frag) = fragment {
        rewritten.push('#');
        rewritten.push_str(frag);
    }
    rewritten
}

/// Whether a raw `key=value` query segment carries the tracking parameter.
fn is_tracking_segment(segment: &str) -> bool {
    let raw_key = segment.split_once('=').map_or(segment, |(key, _)| key);
    form_urlencoded::parse(raw_key.as_bytes())
        .next()
        .is_some_and(|(key, _)| key == TRACKING_PARAM)
}
