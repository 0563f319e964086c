//! Minimal signed-cookie session.
//!
//! The session is a JSON document carried in the `sessionid` cookie as
//! `base64(payload).base64(hmac_sha256(payload))`. A cookie whose signature
//! does not verify is treated as no session at all.

use crate::i18n::Language;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct SessionKey {
    secret: Vec<u8>,
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKey(..)")
    }
}

impl SessionKey {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Random per-process key from the OS RNG.
    pub fn generate() -> anyhow::Result<Self> {
        let mut buf = [0u8; 32];
        getrandom::getrandom(&mut buf)
            .map_err(|e| anyhow::anyhow!("Failed to generate session key: {}", e))?;
        Ok(Self::new(buf.to_vec()))
    }

    fn mac(&self) -> anyhow::Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret).map_err(|e| anyhow::anyhow!(e))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

pub fn encode_session(key: &SessionKey, data: &SessionData) -> anyhow::Result<String> {
    let payload = serde_json::to_vec(data)?;
    let mut mac = key.mac()?;
    mac.update(&payload);
    let sig = mac.finalize().into_bytes();
    Ok(format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(payload),
        URL_SAFE_NO_PAD.encode(sig)
    ))
}

pub fn decode_session(key: &SessionKey, token: &str) -> Option<SessionData> {
    let (payload_b64, sig_b64) = token.split_once('.')?;
    let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
    let sig = URL_SAFE_NO_PAD.decode(sig_b64).ok()?;

    let mut mac = key.mac().ok()?;
    mac.update(&payload);
    mac.verify_slice(&sig).ok()?;

    serde_json::from_slice(&payload).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SessionKey {
        SessionKey::new(b"unit_test_session_secret_32_bytes!!".to_vec())
    }

    #[test]
    fn signed_session_decodes() {
        let data = SessionData {
            language: Some(Language::En),
        };
        let token = encode_session(&key(), &data).unwrap();
        assert_eq!(decode_session(&key(), &token), Some(data));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let token = encode_session(
            &key(),
            &SessionData {
                language: Some(Language::Tr),
            },
        )
        .unwrap();
        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", URL_SAFE_NO_PAD.encode(br#"{"language":"en"}"#), sig);
        assert_eq!(decode_session(&key(), &forged), None);
    }

    #[test]
    fn other_key_is_rejected() {
        let token = encode_session(&key(), &SessionData::default()).unwrap();
        let other = SessionKey::new(b"a_completely_different_secret_value".to_vec());
        assert_eq!(decode_session(&other, &token), None);
    }

    #[test]
    fn garbage_is_no_session() {
        assert_eq!(decode_session(&key(), "not-a-session"), None);
        assert_eq!(decode_session(&key(), "a.b"), None);
    }

    #[test]
    fn unknown_language_in_payload_is_no_session() {
        let payload = br#"{"language":"fr"}"#;
        let mut mac = key().mac().unwrap();
        mac.update(payload);
        let sig = mac.finalize().into_bytes();
        let token = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload),
            URL_SAFE_NO_PAD.encode(sig)
        );
        assert_eq!(decode_session(&key(), &token), None);
    }

    #[test]
    fn generated_keys_differ() {
        let a = SessionKey::generate().unwrap();
        let b = SessionKey::generate().unwrap();
        assert_ne!(a.secret, b.secret);
    }
}
