//! Shareable links carrying an encoded selection.
//!
//! The payload is `{"selectedTalks": {...}}` as JSON, base64-encoded into the
//! `schedule` query parameter.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::SHARE_QUERY_PARAM;
use crate::error::{GridError, GridResult};
use crate::selection::Selection;

#[derive(Serialize, Deserialize)]
struct SharePayload {
    #[serde(rename = "selectedTalks")]
    selection: Selection,
}

pub fn encode(selection: &Selection) -> String {
    let payload = SharePayload {
        selection: selection.clone(),
    };
    // A map of strings always serializes
    let json = serde_json::to_string(&payload).unwrap_or_default();
    STANDARD.encode(json)
}

/// Decode a raw payload. Anything malformed yields `None`.
pub fn decode(encoded: &str) -> Option<Selection> {
    let bytes = match STANDARD.decode(encoded.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "share payload is not base64");
            return None;
        }
    };

    match serde_json::from_slice::<SharePayload>(&bytes) {
        Ok(payload) => Some(payload.selection),
        Err(e) => {
            tracing::debug!(error = %e, "share payload is not a schedule");
            None
        }
    }
}

/// Link to `base` carrying the selection.
pub fn share_url(base: &str, selection: &Selection) -> GridResult<String> {
    let mut url =
        Url::parse(base).map_err(|e| GridError::Config(format!("Invalid share URL '{base}': {e}")))?;
    url.query_pairs_mut()
        .clear()
        .append_pair(SHARE_QUERY_PARAM, &encode(selection));
    Ok(url.into())
}

/// Accept either a full share link or the bare payload.
pub fn decode_link(input: &str) -> Option<Selection> {
    let input = input.trim();
    match Url::parse(input) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == SHARE_QUERY_PARAM)
            .and_then(|(_, value)| decode(&value)),
        Err(_) => decode(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> Selection {
        [
            ("10:00", "10:00-docker-para-iniciantes"),
            ("11:40", "11:40-ia-no-design-de-produtos-inovadores"),
            ("13:40", "13:40-a-era-gemma"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn decode_reverses_encode() {
        assert_eq!(decode(&encode(&selection())), Some(selection()));
        assert_eq!(decode(&encode(&Selection::new())), Some(Selection::new()));
    }

    #[test]
    fn garbage_decodes_to_nothing() {
        assert_eq!(decode("%%%not base64%%%"), None);
        // valid base64, not JSON
        assert_eq!(decode(&STANDARD.encode("hello")), None);
        // valid JSON, wrong shape
        assert_eq!(decode(&STANDARD.encode(r#"{"selectedTalks": 3}"#)), None);
        assert_eq!(decode(""), None);
    }

    #[test]
    fn payload_matches_the_browser_format() {
        let selection: Selection = [("10:00", "x")].into_iter().collect();
        let json = STANDARD.decode(encode(&selection)).unwrap();
        assert_eq!(String::from_utf8(json).unwrap(), r#"{"selectedTalks":{"10:00":"x"}}"#);
    }

    #[test]
    fn links_round_trip_through_the_query_string() {
        let url = share_url("https://devfestbh.github.io/grade/", &selection()).unwrap();
        assert!(url.starts_with("https://devfestbh.github.io/grade/?schedule="));
        assert_eq!(decode_link(&url), Some(selection()));
    }

    #[test]
    fn share_url_replaces_existing_query() {
        let url = share_url("https://example.com/?schedule=old&x=1", &selection()).unwrap();
        assert_eq!(url.matches("schedule=").count(), 1);
        assert!(!url.contains("x=1"));
    }

    #[test]
    fn bare_payload_and_links_without_schedule() {
        let payload = encode(&selection());
        assert_eq!(decode_link(&payload), Some(selection()));
        assert_eq!(decode_link("https://example.com/?other=1"), None);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(share_url("not a url", &selection()).is_err());
    }
}
