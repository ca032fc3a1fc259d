//! Browser identity: the signed current-session cookie.
//!
//! The "current session" is per-browser state, carried in a `parley_session`
//! cookie holding `<session-uuid>.<hex hmac-sha256>`. The signing key is 32
//! random bytes persisted at `{data_dir}/session.key`. Forged, malformed, or
//! stale tokens verify to nothing and the browser is simply treated as new;
//! there is no error path a client can probe.

use std::convert::Infallible;
use std::io::Write;
use std::path::Path;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use uuid::Uuid;

use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying the signed current-session token.
pub const SESSION_COOKIE: &str = "parley_session";

/// Filename of the persisted signing key inside the data directory.
const KEY_FILE: &str = "session.key";

/// HMAC key for signing and verifying session cookies.
pub struct SessionKey(Vec<u8>);

impl SessionKey {
    /// Load the signing key from `{data_dir}/session.key`, generating and
    /// persisting a fresh 32-byte key on first run.
    pub fn load_or_create(data_dir: &Path) -> anyhow::Result<Self> {
        let path = data_dir.join(KEY_FILE);
        match std::fs::read(&path) {
            Ok(bytes) if !bytes.is_empty() => Ok(Self(bytes)),
            Ok(_) | Err(_) => {
                let mut bytes = [0u8; 32];
                rand::rngs::OsRng.fill_bytes(&mut bytes);
                let mut file = std::fs::File::create(&path)?;
                file.write_all(&bytes)?;
                Ok(Self(bytes.to_vec()))
            }
        }
    }

    /// Construct a key from raw bytes (tests).
    #[cfg(test)]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    fn sign(&self, session_id: &Uuid) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.0).expect("HMAC accepts any key length");
        mac.update(session_id.as_bytes());
        let sig = mac.finalize().into_bytes();
        sig.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Issue a signed token for a session id.
    pub fn issue(&self, session_id: &Uuid) -> String {
        format!("{session_id}.{}", self.sign(session_id))
    }

    /// Verify a token, returning the session id it names.
    ///
    /// Verification is constant-time (via the hmac crate's `verify_slice`).
    pub fn verify(&self, token: &str) -> Option<Uuid> {
        let (id_part, sig_part) = token.split_once('.')?;
        let session_id: Uuid = id_part.parse().ok()?;
        let expected = decode_hex(sig_part)?;

        let mut mac =
            HmacSha256::new_from_slice(&self.0).expect("HMAC accepts any key length");
        mac.update(session_id.as_bytes());
        mac.verify_slice(&expected).ok()?;
        Some(session_id)
    }

    /// Build the `Set-Cookie` value pointing the browser at `session_id`.
    pub fn cookie_for(&self, session_id: &Uuid) -> String {
        format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.issue(session_id)
        )
    }
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    // Byte chunks, not string slices: multi-byte input must fail, not panic.
    s.as_bytes()
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).ok()?;
            u8::from_str_radix(pair, 16).ok()
        })
        .collect()
}

/// The browser's verified current session, if any.
///
/// Extracting this never fails: an absent or invalid cookie yields `None`.
pub struct BrowserSession(pub Option<Uuid>);

impl FromRequestParts<AppState> for BrowserSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = parts
            .headers
            .get(axum::http::header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|cookies| find_cookie(cookies, SESSION_COOKIE))
            .and_then(|token| state.session_key.verify(token));
        Ok(BrowserSession(current))
    }
}

fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name).then_some(v)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SessionKey {
        SessionKey::from_bytes(vec![7u8; 32])
    }

    #[test]
    fn issue_then_verify_round_trip() {
        let key = key();
        let id = Uuid::now_v7();
        assert_eq!(key.verify(&key.issue(&id)), Some(id));
    }

    #[test]
    fn tampered_id_rejected() {
        let key = key();
        let token = key.issue(&Uuid::now_v7());
        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("{}.{sig}", Uuid::now_v7());
        assert_eq!(key.verify(&forged), None);
    }

    #[test]
    fn tampered_signature_rejected() {
        let key = key();
        let id = Uuid::now_v7();
        let forged = format!("{id}.{}", "0".repeat(64));
        assert_eq!(key.verify(&forged), None);
    }

    #[test]
    fn garbage_tokens_rejected() {
        let key = key();
        assert_eq!(key.verify(""), None);
        assert_eq!(key.verify("no-dot-here"), None);
        assert_eq!(key.verify("not-a-uuid.abcdef"), None);
        assert_eq!(key.verify("a.b.c"), None);
    }

    #[test]
    fn multibyte_signature_rejected_without_panic() {
        let key = key();
        let id = Uuid::now_v7();
        // 32 two-byte chars: even byte length, so it reaches the hex decoder
        let forged = format!("{id}.{}", "é".repeat(32));
        assert_eq!(key.verify(&forged), None);
        assert_eq!(decode_hex("éé"), None);
    }

    #[test]
    fn different_key_rejects_token() {
        let id = Uuid::now_v7();
        let token = key().issue(&id);
        let other = SessionKey::from_bytes(vec![8u8; 32]);
        assert_eq!(other.verify(&token), None);
    }

    #[test]
    fn find_cookie_picks_named_pair() {
        let header = "theme=dark; parley_session=abc.def; lang=en";
        assert_eq!(find_cookie(header, SESSION_COOKIE), Some("abc.def"));
        assert_eq!(find_cookie(header, "missing"), None);
    }

    #[test]
    fn load_or_create_persists_key() {
        let dir = tempfile::tempdir().unwrap();
        let first = SessionKey::load_or_create(dir.path()).unwrap();
        let second = SessionKey::load_or_create(dir.path()).unwrap();

        let id = Uuid::now_v7();
        assert_eq!(second.verify(&first.issue(&id)), Some(id));
    }
}
