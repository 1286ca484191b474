//! End-to-end demonstration of the reference data flow: encrypt a small
//! "patient record" stand-in with AES-256-GCM, fragment the ciphertext with
//! [`medvault_fec::FragmentCodec`], split the key with
//! [`medvault_fec::ThresholdSecretSplitter`], simulate losing some fragments
//! and shares, then reverse the whole thing.
//!
//! This binary demonstrates the external contract of the engine crate; it
//! contains no fragment/share numerics of its own, and the on-disk layout,
//! audit logging, and access control it would need in a real deployment are
//! all out of scope (see the engine crate's docs).

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use clap::Parser;
use medvault_fec::{Config, Fragment};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(about = "Fragment-and-split a sample patient record, then recover it from partial loss")]
struct Args {
    /// Data fragment count.
    #[arg(long, default_value_t = 4)]
    k: usize,
    /// Parity fragment count (tolerated fragment losses).
    #[arg(long, default_value_t = 2)]
    m: usize,
    /// Key-share reconstruction threshold.
    #[arg(long, default_value_t = 3)]
    t: usize,
    /// Total key shares.
    #[arg(long, default_value_t = 5)]
    n: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct PatientRecord {
    patient_id: String,
    name: String,
    diagnosis: String,
    notes: String,
}

#[derive(Debug, Error)]
enum DemoError {
    #[error("engine error: {0}")]
    Engine(#[from] medvault_fec::Error),
    #[error("encryption failed")]
    Encrypt,
    #[error("decryption failed -- wrong key or corrupted ciphertext")]
    Decrypt,
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

const AES_KEY_LEN: usize = 32;
const AES_NONCE_LEN: usize = 12;

fn encrypt(key: &[u8; AES_KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>, DemoError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| DemoError::Encrypt)?;
    let mut nonce_bytes = [0u8; AES_NONCE_LEN];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);
    let ciphertext = cipher.encrypt(nonce, plaintext).map_err(|_| DemoError::Encrypt)?;

    let mut out = Vec::with_capacity(AES_NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

fn decrypt(key: &[u8; AES_KEY_LEN], sealed: &[u8]) -> Result<Vec<u8>, DemoError> {
    if sealed.len() < AES_NONCE_LEN {
        return Err(DemoError::Decrypt);
    }
    let (nonce_bytes, ciphertext) = sealed.split_at(AES_NONCE_LEN);
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| DemoError::Decrypt)?;
    let nonce = Nonce::from_slice(nonce_bytes);
    cipher.decrypt(nonce, ciphertext).map_err(|_| DemoError::Decrypt)
}

fn main() -> Result<(), DemoError> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let config = Config::new(args.k, args.m, args.t, args.n);

    let record = PatientRecord {
        patient_id: "PT-10042".into(),
        name: "Jordan Rivera".into(),
        diagnosis: "Stand-in demo data, not a real record".into(),
        notes: "Ransomware-resilience harness exercise only".into(),
    };
    let plaintext = serde_json::to_vec(&record)?;

    let mut key = [0u8; AES_KEY_LEN];
    rand::rngs::OsRng.fill_bytes(&mut key);

    let sealed = encrypt(&key, &plaintext)?;
    tracing::info!(bytes = sealed.len(), "encrypted patient record");

    let codec = config.build_codec()?;
    let fragments = codec.encode(&sealed)?;
    tracing::info!(n = fragments.len(), k = args.k, m = args.m, "fragmented ciphertext");

    let splitter = config.build_splitter()?;
    let shares = splitter.split(&key)?;
    tracing::info!(n = shares.len(), t = args.t, "split encryption key");

    // Simulate the ransomware threat model: lose up to `m` fragments and
    // drop down to exactly `t` key shares.
    let mut received: Vec<Option<Fragment>> = fragments.into_iter().map(Some).collect();
    for slot in 0..args.m.min(received.len()) {
        received[slot] = None;
    }
    let surviving_shares = &shares[..args.t];

    let recovered_key_vec = splitter.reconstruct_with_len(surviving_shares, AES_KEY_LEN)?;
    let recovered_key: [u8; AES_KEY_LEN] =
        recovered_key_vec.try_into().expect("reconstruct_with_len guarantees the requested length");
    let recovered_sealed = codec.decode(received)?;
    let recovered_plaintext = decrypt(&recovered_key, &recovered_sealed)?;
    let recovered_record: PatientRecord = serde_json::from_slice(&recovered_plaintext)?;

    println!("recovered record: {recovered_record:?}");
    assert_eq!(recovered_plaintext, plaintext, "recovered plaintext must match the original");
    Ok(())
}
