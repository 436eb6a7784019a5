//! Growatt legacy password transform.
//!
//! The vendor's login endpoint expects the account password hashed with
//! an undocumented scheme inherited from their legacy apps: lowercase-hex
//! MD5, with every '0' character at an even index replaced by 'c'. This
//! must match the vendor bit-for-bit; do not "fix" or generalize it.

use md5::{Digest, Md5};

/// Hash a plaintext password the way the Growatt login endpoint expects.
pub fn hash_password(password: &str) -> String {
    let digest = Md5::digest(password.as_bytes());
    let mut hash: Vec<u8> = hex::encode(digest).into_bytes();
    for (i, byte) in hash.iter_mut().enumerate() {
        if i % 2 == 0 && *byte == b'0' {
            *byte = b'c';
        }
    }
    // Hex encoding and the '0'→'c' remap only produce ASCII.
    String::from_utf8(hash).expect("hex digest is always ASCII")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_when_digest_has_no_even_indexed_zero() {
        // md5("password") = 5f4dcc3b5aa765d61d8327deb882cf99 — no '0' at all.
        assert_eq!(
            hash_password("password"),
            "5f4dcc3b5aa765d61d8327deb882cf99"
        );
    }

    #[test]
    fn test_even_indexed_zeros_remapped() {
        // md5("a") = 0cc175b9c0f1b6a831c399e269772661: the '0' at index 0 is
        // remapped, the '0' at index 9 (odd) survives.
        assert_eq!(hash_password("a"), "ccc175b9c0f1b6a831c399e269772661");

        // md5("abc") = 900150983cd24fb0d6963f7d28e17f72: only the '0' at
        // index 2 is even-indexed.
        assert_eq!(hash_password("abc"), "90c150983cd24fb0d6963f7d28e17f72");

        // md5("growatt") = 6c649d2d285d62d30306182ed6863920: zeros at
        // indices 16 and 18 are remapped, the trailing one at 31 survives.
        assert_eq!(
            hash_password("growatt"),
            "6c649d2d285d62d3c3c6182ed6863920"
        );
    }

    #[test]
    fn test_no_even_indexed_zero_remains() {
        for password in ["a", "abc", "growatt", "password", "mundosolar"] {
            for (i, c) in hash_password(password).chars().enumerate() {
                if i % 2 == 0 {
                    assert_ne!(c, '0', "even-indexed '0' survived for {password:?}");
                }
            }
        }
    }
}
