use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::{engine::general_purpose, Engine as _};
use rand::{thread_rng, Rng};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::env;

// Obfuscation, not secrecy: the passphrase ships with the app unless the
// deployment overrides ENCRYPTION_KEY.
const DEFAULT_PASSPHRASE: &str = "agentic-wander-secret-key-2025";

const NONCE_LEN: usize = 12;

/// Serialize and encrypt under AES-256-GCM. The blob is
/// base64(nonce || ciphertext). Returns an empty string if anything fails,
/// which persistence code treats as "do not overwrite".
pub fn encrypt_data<T: Serialize>(data: &T) -> String {
    let json = match serde_json::to_string(data) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Encryption failed: {}", e);
            return String::new();
        }
    };

    let cipher = match cipher() {
        Some(cipher) => cipher,
        None => return String::new(),
    };

    let mut nonce_bytes = [0u8; NONCE_LEN];
    thread_rng().fill(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    match cipher.encrypt(nonce, json.as_bytes()) {
        Ok(ciphertext) => {
            let mut blob = nonce_bytes.to_vec();
            blob.extend_from_slice(&ciphertext);
            general_purpose::STANDARD.encode(blob)
        }
        Err(e) => {
            eprintln!("Encryption failed: {}", e);
            String::new()
        }
    }
}

/// Decrypt and deserialize a blob produced by `encrypt_data`. Blobs written
/// before encryption was introduced are plain JSON; those are parsed as-is.
/// Anything unreadable yields `None`.
pub fn decrypt_data<T: DeserializeOwned>(blob: &str) -> Option<T> {
    if blob.is_empty() {
        return None;
    }

    if let Some(json) = decrypt_to_string(blob) {
        match serde_json::from_str(&json) {
            Ok(value) => return Some(value),
            Err(e) => eprintln!("Decrypted payload is not valid JSON: {}", e),
        }
    }

    // Legacy blobs predate the encryption wrapper.
    serde_json::from_str(blob).ok()
}

fn decrypt_to_string(blob: &str) -> Option<String> {
    let data = general_purpose::STANDARD.decode(blob).ok()?;
    if data.len() < NONCE_LEN {
        return None;
    }

    let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);
    let cipher = cipher()?;
    let plaintext = cipher.decrypt(Nonce::from_slice(nonce_bytes), ciphertext).ok()?;
    String::from_utf8(plaintext).ok()
}

fn cipher() -> Option<Aes256Gcm> {
    let passphrase = env::var("ENCRYPTION_KEY")
        .ok()
        .filter(|key| !key.is_empty())
        .unwrap_or_else(|| DEFAULT_PASSPHRASE.to_string());

    let key_bytes: [u8; 32] = Sha256::digest(passphrase.as_bytes()).into();
    match Aes256Gcm::new_from_slice(&key_bytes) {
        Ok(cipher) => Some(cipher),
        Err(e) => {
            eprintln!("Failed to create cipher: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn roundtrip_preserves_value() {
        env::remove_var("ENCRYPTION_KEY");

        let original = vec!["first".to_string(), "second".to_string()];
        let blob = encrypt_data(&original);
        assert!(!blob.is_empty());

        let restored: Vec<String> = decrypt_data(&blob).expect("blob should decrypt");
        assert_eq!(restored, original);
    }

    #[test]
    #[serial]
    fn roundtrip_preserves_empty_list() {
        env::remove_var("ENCRYPTION_KEY");

        let original: Vec<String> = Vec::new();
        let restored: Vec<String> =
            decrypt_data(&encrypt_data(&original)).expect("blob should decrypt");
        assert!(restored.is_empty());
    }

    #[test]
    #[serial]
    fn same_plaintext_gets_fresh_nonce() {
        env::remove_var("ENCRYPTION_KEY");

        let value = vec![1, 2, 3];
        assert_ne!(encrypt_data(&value), encrypt_data(&value));
    }

    #[test]
    #[serial]
    fn legacy_plain_json_still_reads() {
        env::remove_var("ENCRYPTION_KEY");

        let restored: Vec<i64> = decrypt_data("[4,5,6]").expect("legacy blob should parse");
        assert_eq!(restored, vec![4, 5, 6]);
    }

    #[test]
    #[serial]
    fn garbage_yields_none() {
        env::remove_var("ENCRYPTION_KEY");

        assert_eq!(decrypt_data::<Vec<i64>>(""), None);
        assert_eq!(decrypt_data::<Vec<i64>>("@@not base64 or json@@"), None);
    }

    #[test]
    #[serial]
    fn tampered_blob_yields_none() {
        env::remove_var("ENCRYPTION_KEY");

        let blob = encrypt_data(&vec!["payload".to_string()]);
        let mut bytes = general_purpose::STANDARD.decode(&blob).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        let tampered = general_purpose::STANDARD.encode(bytes);

        assert_eq!(decrypt_data::<Vec<String>>(&tampered), None);
    }

    #[test]
    #[serial]
    fn key_change_invalidates_old_blobs() {
        env::remove_var("ENCRYPTION_KEY");
        let blob = encrypt_data(&vec!["payload".to_string()]);

        env::set_var("ENCRYPTION_KEY", "a-different-passphrase");
        assert_eq!(decrypt_data::<Vec<String>>(&blob), None);

        env::remove_var("ENCRYPTION_KEY");
        assert!(decrypt_data::<Vec<String>>(&blob).is_some());
    }
}
