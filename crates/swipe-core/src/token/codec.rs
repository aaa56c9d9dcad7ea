//! # Token Codec
//!
//! Wire format: URL-safe base64 of `{"ts": <i64>, "buckets": [[left, right], ...]}`.
//! Encoding omits padding so the token can sit in a query string or header
//! untouched; decoding accepts it either way.
//!
//! Decoding is the trust boundary. Anything that does not parse, or parses
//! into a history the current configuration could not have produced, is
//! discarded in favour of a fresh token.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::{Bucket, SwipeToken};
use crate::errors::{CoreResult, SwipeCoreError};
use crate::types::config::SwipeConfig;

/// URL-safe alphabet, unpadded on the way out, padding-agnostic on the way in
pub const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Longest JSON rendering of one bucket: `[4294967295,4294967295],`
const MAX_BUCKET_JSON_LEN: usize = 24;

/// Room for the braces, keys and an i64 timestamp
const TOKEN_JSON_OVERHEAD: usize = 64;

#[derive(Serialize, Deserialize)]
struct WireToken {
    ts: i64,
    #[serde(default)]
    buckets: Vec<(u32, u32)>,
}

/// Upper bound on the encoded length of any token valid under `config`
pub fn max_encoded_len(config: &SwipeConfig) -> usize {
    let json_len = config
        .bucket_count
        .saturating_mul(MAX_BUCKET_JSON_LEN)
        .saturating_add(TOKEN_JSON_OVERHEAD);
    json_len.saturating_mul(4) / 3 + 4
}

impl SwipeToken {
    /// Serialize the token into its opaque URL-safe form
    pub fn encode(&self) -> String {
        let wire = WireToken {
            ts: self.last_update,
            buckets: self.buckets().iter().map(|b| (b.left, b.right)).collect(),
        };

        // Integers and arrays always serialize; an empty token would decode as fresh anyway
        let json = serde_json::to_vec(&wire).unwrap_or_default();
        TOKEN_ENGINE.encode(json)
    }

    /// Decode a token, reporting why it was rejected
    pub fn try_decode(token: &str, config: &SwipeConfig) -> CoreResult<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SwipeCoreError::malformed_token("empty token"));
        }

        if token.len() > max_encoded_len(config) {
            return Err(SwipeCoreError::malformed_token(format!(
                "token length {} exceeds {}",
                token.len(),
                max_encoded_len(config)
            )));
        }

        let json = TOKEN_ENGINE
            .decode(token)
            .map_err(|e| SwipeCoreError::malformed_token(format!("invalid base64: {}", e)))?;

        let wire: WireToken = serde_json::from_slice(&json)
            .map_err(|e| SwipeCoreError::malformed_token(format!("invalid payload: {}", e)))?;

        let buckets = wire
            .buckets
            .into_iter()
            .map(|(left, right)| Bucket::new(left, right))
            .collect();

        Self::from_parts(wire.ts, buckets, config)
    }

    /// Decode a client supplied token. Absent, empty or undecodable input
    /// yields a fresh token anchored at `now`; this never fails.
    pub fn decode(token: Option<&str>, config: &SwipeConfig, now: i64) -> Self {
        token
            .and_then(|raw| Self::try_decode(raw, config).ok())
            .unwrap_or_else(|| Self::fresh(now, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::direction::SwipeDirection;

    const T0: i64 = 1_700_000_000;

    #[test]
    fn test_round_trip() {
        let config = SwipeConfig::default();
        let token = SwipeToken::from_parts(
            T0,
            vec![Bucket::new(0, 1), Bucket::new(0, 0), Bucket::new(3, 2)],
            &config,
        )
        .unwrap();

        let encoded = token.encode();
        assert_eq!(SwipeToken::try_decode(&encoded, &config).unwrap(), token);
    }

    #[test]
    fn test_encoding_is_url_safe() {
        let config = SwipeConfig::default();
        let mut token = SwipeToken::fresh(T0, &config);
        for _ in 0..50 {
            token.update(SwipeDirection::Right, T0, &config);
        }

        let encoded = token.encode();
        assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_decodes_padded_legacy_tokens() {
        let config = SwipeConfig::default();
        let padded = base64::engine::general_purpose::URL_SAFE
            .encode(br#"{"ts": 1700000000, "buckets": [[1, 0], [0, 2]]}"#);

        let token = SwipeToken::try_decode(&padded, &config).unwrap();
        assert_eq!(token.last_update, T0);
        assert_eq!(token.buckets().get(1), Some(&Bucket::new(0, 2)));
    }

    #[test]
    fn test_missing_buckets_default_to_empty() {
        let config = SwipeConfig::default();
        let encoded = TOKEN_ENGINE.encode(br#"{"ts": 42}"#);

        let token = SwipeToken::try_decode(&encoded, &config).unwrap();
        assert_eq!(token.last_update, 42);
        assert!(token.buckets().is_empty());
    }

    #[test]
    fn test_rejects_garbage() {
        let config = SwipeConfig::default();
        let cases = [
            "not base64 at all!".to_string(),
            TOKEN_ENGINE.encode(b"{not json"),
            TOKEN_ENGINE.encode(br#"{"buckets": []}"#),
            TOKEN_ENGINE.encode(br#"{"ts": 1, "buckets": [[-1, 0]]}"#),
            TOKEN_ENGINE.encode(br#"{"ts": 1, "buckets": [[1, 2, 3]]}"#),
            TOKEN_ENGINE.encode(br#"{"ts": "soon", "buckets": []}"#),
        ];

        for case in cases {
            assert!(
                SwipeToken::try_decode(&case, &config).is_err(),
                "accepted {}",
                case
            );
        }
    }

    #[test]
    fn test_rejects_oversized_history() {
        let config = SwipeConfig {
            bucket_count: 2,
            ..SwipeConfig::default()
        };
        let encoded = TOKEN_ENGINE.encode(br#"{"ts": 1, "buckets": [[1, 0], [1, 0], [1, 0]]}"#);

        let err = SwipeToken::try_decode(&encoded, &config).unwrap_err();
        assert!(matches!(err, SwipeCoreError::MalformedToken(_)));
    }

    #[test]
    fn test_rejects_overlong_input_before_decoding() {
        let config = SwipeConfig::default();
        let huge = "A".repeat(max_encoded_len(&config) + 1);
        assert!(SwipeToken::try_decode(&huge, &config).is_err());
    }

    #[test]
    fn test_decode_falls_back_to_fresh() {
        let config = SwipeConfig::default();

        let absent = SwipeToken::decode(None, &config, T0);
        assert_eq!(absent, SwipeToken::fresh(T0, &config));

        let empty = SwipeToken::decode(Some(""), &config, T0);
        assert_eq!(empty, SwipeToken::fresh(T0, &config));

        let corrupt = SwipeToken::decode(Some("%%%"), &config, T0);
        assert!(corrupt.buckets().is_empty());
        assert_eq!(corrupt.last_update, T0);
    }

    #[test]
    fn test_full_window_fits_length_bound() {
        let config = SwipeConfig::default();
        let buckets = vec![Bucket::new(u32::MAX, u32::MAX); config.bucket_count];
        let token = SwipeToken::from_parts(i64::MIN, buckets, &config).unwrap();

        let encoded = token.encode();
        assert!(encoded.len() <= max_encoded_len(&config));
        assert_eq!(SwipeToken::try_decode(&encoded, &config).unwrap(), token);
    }
}
