//! External member refs ("G{generation}-xxxxxx").
//!
//! The tail hashes (timestamp, name checksum, random salt), so refs stay
//! unique across import batches without any coordination, and the
//! generation prefix keeps them human-sortable in raw data files.

use rand::Rng;
use sha1::{Digest, Sha1};

const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const TAIL_LEN: usize = 6;
// 62^6, the tail keyspace.
const TAIL_SPACE: u64 = 56_800_235_584;

/// Mints a fresh external ref for a member of the given generation.
pub fn new_member_uid(generation: i32, name: &str) -> String {
    let salt = rand::thread_rng().gen_range(10_000..=99_999);
    format!("G{generation}-{}", uid_tail(now_unix_ms(), name, salt))
}

/// The hash tail: last six base62 digits of
/// sha1("{timestamp}-{name char sum}-{salt}").
fn uid_tail(timestamp_ms: u128, name: &str, salt: u32) -> String {
    let name_checksum: u64 = name.chars().map(|c| c as u64).sum();
    let raw = format!("{timestamp_ms}-{name_checksum}-{salt}");

    let mut hasher = Sha1::new();
    hasher.update(raw.as_bytes());
    let digest = hasher.finalize();

    // Digest value mod 62^6, accumulated byte-wise to stay in u64.
    let mut tail_value = digest
        .iter()
        .fold(0u64, |acc, &byte| (acc * 256 + byte as u64) % TAIL_SPACE);

    let mut tail = [0u8; TAIL_LEN];
    for slot in tail.iter_mut().rev() {
        *slot = BASE62_ALPHABET[(tail_value % 62) as usize];
        tail_value /= 62;
    }
    String::from_utf8_lossy(&tail).into_owned()
}

fn now_unix_ms() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
