//! API token codec.
//!
//! Momento has issued three token encodings over time:
//!
//! - **Legacy**: a JWT whose claims carry the endpoints directly
//!   (`cp` for control, `c` for cache).
//! - **V1**: a single base64 blob of `{"endpoint": ..., "api_key": ...}`.
//!   Endpoints are `control.<endpoint>` / `cache.<endpoint>` and the raw key
//!   is the inner `api_key`.
//! - **V2** (global): a JWT whose claims contain `"t": "g"`. Endpoints are not
//!   embedded and must be supplied by the caller.
//!
//! Classification walks [`FORMATS`] in order. Each entry pairs a shape
//! predicate with a decoder; the first predicate that holds decides the
//! format, and a token matching none of them is [`TokenKind::Invalid`].

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Claim value marking a V2 (global) key.
pub const GLOBAL_KEY_SENTINEL: &str = "g";

/// Accepts both the standard and URL-safe alphabets (after normalization),
/// with or without padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Errors produced while decoding a token.
///
/// These never reach callers of the credential entry points, which report a
/// single stable message; they exist for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token is empty")]
    Empty,
    #[error("expected 3 dot-separated segments, found {0}")]
    Segments(usize),
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload is missing `{0}`")]
    MissingField(&'static str),
    #[error("payload field `{0}` is blank")]
    BlankField(&'static str),
    #[error("token does not match any known format")]
    Unrecognized,
}

/// The encoding a raw token string was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Legacy,
    V1,
    V2,
    Invalid,
}

/// Control and data endpoints derived from a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub control: String,
    pub cache: String,
}

impl Endpoints {
    /// `control.<host>` / `cache.<host>`.
    pub fn for_host(host: &str) -> Self {
        Self {
            control: format!("control.{host}"),
            cache: format!("cache.{host}"),
        }
    }
}

/// A successfully decoded token.
#[derive(Clone, PartialEq, Eq)]
pub enum Token {
    Legacy {
        api_key: String,
        endpoints: Endpoints,
    },
    V1 {
        api_key: String,
        host: String,
    },
    V2 {
        api_key: String,
    },
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Legacy { .. } => TokenKind::Legacy,
            Token::V1 { .. } => TokenKind::V1,
            Token::V2 { .. } => TokenKind::V2,
        }
    }

    /// The key presented on every call. For V1 this is the inner key, not
    /// the envelope.
    pub fn api_key(&self) -> &str {
        match self {
            Token::Legacy { api_key, .. } | Token::V1 { api_key, .. } | Token::V2 { api_key } => {
                api_key.as_str()
            }
        }
    }

    /// Endpoints embedded in the token. V2 keys carry none.
    pub fn endpoints(&self) -> Option<Endpoints> {
        match self {
            Token::Legacy { endpoints, .. } => Some(endpoints.clone()),
            Token::V1 { host, .. } => Some(Endpoints::for_host(host)),
            Token::V2 { .. } => None,
        }
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Legacy { endpoints, .. } => f
                .debug_struct("Legacy")
                .field("endpoints", endpoints)
                .finish_non_exhaustive(),
            Token::V1 { host, .. } => f.debug_struct("V1").field("host", host).finish_non_exhaustive(),
            Token::V2 { .. } => f.debug_struct("V2").finish_non_exhaustive(),
        }
    }
}

struct Format {
    kind: TokenKind,
    matches: fn(&str) -> bool,
    decode: fn(&str) -> Result<Token, TokenError>,
}

/// Recognized formats in evaluation order. V2 must precede Legacy since
/// both are JWT-shaped.
const FORMATS: &[Format] = &[
    Format {
        kind: TokenKind::V2,
        matches: is_v2,
        decode: decode_v2,
    },
    Format {
        kind: TokenKind::Legacy,
        matches: is_legacy,
        decode: decode_legacy,
    },
    Format {
        kind: TokenKind::V1,
        matches: is_v1,
        decode: decode_v1,
    },
];

/// Classify a raw token without decoding it.
pub fn classify(raw: &str) -> TokenKind {
    FORMATS
        .iter()
        .find(|format| (format.matches)(raw))
        .map(|format| format.kind)
        .unwrap_or(TokenKind::Invalid)
}

/// Classify and decode a raw token.
pub fn decode(raw: &str) -> Result<Token, TokenError> {
    if raw.trim().is_empty() {
        return Err(TokenError::Empty);
    }
    match FORMATS.iter().find(|format| (format.matches)(raw)) {
        Some(format) => (format.decode)(raw),
        None => Err(diagnose(raw)),
    }
}

/// Best explanation of why an unmatched token failed, for logging.
fn diagnose(raw: &str) -> TokenError {
    let result = if raw.split('.').count() == 3 {
        decode_legacy(raw)
    } else {
        decode_v1(raw)
    };
    result.err().unwrap_or(TokenError::Unrecognized)
}

#[derive(Deserialize)]
struct GlobalClaims {
    t: Option<String>,
}

#[derive(Deserialize)]
struct LegacyClaims {
    cp: Option<String>,
    c: Option<String>,
}

#[derive(Deserialize)]
struct V1Envelope {
    endpoint: Option<String>,
    api_key: Option<String>,
}

fn is_v2(raw: &str) -> bool {
    claims::<GlobalClaims>(raw).is_ok_and(|c| c.t.as_deref() == Some(GLOBAL_KEY_SENTINEL))
}

fn is_legacy(raw: &str) -> bool {
    claims::<LegacyClaims>(raw).is_ok_and(|c| c.cp.is_some() && c.c.is_some())
}

fn is_v1(raw: &str) -> bool {
    !raw.contains('.')
        && envelope(raw).is_ok_and(|e| e.endpoint.is_some() && e.api_key.is_some())
}

fn decode_v2(raw: &str) -> Result<Token, TokenError> {
    Ok(Token::V2 {
        api_key: raw.to_string(),
    })
}

fn decode_legacy(raw: &str) -> Result<Token, TokenError> {
    let claims = claims::<LegacyClaims>(raw)?;
    Ok(Token::Legacy {
        api_key: raw.to_string(),
        endpoints: Endpoints {
            control: required(claims.cp, "cp")?,
            cache: required(claims.c, "c")?,
        },
    })
}

fn decode_v1(raw: &str) -> Result<Token, TokenError> {
    let envelope = envelope(raw)?;
    Ok(Token::V1 {
        host: required(envelope.endpoint, "endpoint")?,
        api_key: required(envelope.api_key, "api_key")?,
    })
}

fn required(value: Option<String>, field: &'static str) -> Result<String, TokenError> {
    match value {
        None => Err(TokenError::MissingField(field)),
        Some(v) if v.trim().is_empty() => Err(TokenError::BlankField(field)),
        Some(v) => Ok(v),
    }
}

/// Decode the middle segment of a JWT-shaped token.
fn claims<T: DeserializeOwned>(raw: &str) -> Result<T, TokenError> {
    let segments: Vec<&str> = raw.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Segments(segments.len()));
    }
    Ok(serde_json::from_slice(&decode_base64(segments[1])?)?)
}

fn envelope(raw: &str) -> Result<V1Envelope, TokenError> {
    Ok(serde_json::from_slice(&decode_base64(raw)?)?)
}

/// Decode base64 in either alphabet, padded or not.
pub(crate) fn decode_base64(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let normalized: String = input
        .trim()
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    LENIENT.decode(normalized)
}
