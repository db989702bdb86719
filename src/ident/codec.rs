//! Reversible encoding between primary keys and public tokens.
//!
//! The construction is the classic salted-shuffle positional codec: the
//! working alphabet is permuted by a salt-derived consistent shuffle, a
//! lottery character seeds a fresh permutation per token, and separator
//! and guard characters pad short tokens up to a configured minimum
//! length. Decoding reverses each step and then re-encodes the result;
//! any mismatch means the token was not minted by this codec.

use thiserror::Error;

use crate::config::HashidConfig;

/// Default URL-safe alphabet for token generation.
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

/// Characters reserved as value separators inside multi-value tokens.
const SEPARATOR_POOL: &str = "cfhistuCFHISTU";

/// Target ratio of alphabet length to separator count.
const SEPARATOR_RATIO: f64 = 3.5;

/// Ratio of alphabet length to guard count.
const GUARD_RATIO: f64 = 12.0;

/// Minimum number of unique characters the alphabet must provide.
const MIN_ALPHABET_LEN: usize = 16;

/// Errors that can occur while building a codec from configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The configured alphabet has too few unique characters.
    #[error("alphabet must contain at least {MIN_ALPHABET_LEN} unique characters, got {0}")]
    AlphabetTooShort(usize),

    /// The configured alphabet contains whitespace.
    #[error("alphabet must not contain whitespace")]
    WhitespaceInAlphabet,
}

/// Bidirectional mapping between primary keys and opaque public tokens.
///
/// Construction derives the internal alphabet, separator, and guard sets
/// from the configured salt; after that the codec is immutable and safe
/// to share across any number of concurrent resolutions.
#[derive(Debug, Clone)]
pub struct HashidCodec {
    salt: Vec<char>,
    alphabet: Vec<char>,
    separators: Vec<char>,
    guards: Vec<char>,
    min_length: usize,
}

impl HashidCodec {
    /// Build a codec from configuration, validating the alphabet.
    pub fn new(config: &HashidConfig) -> Result<Self, CodecError> {
        let salt: Vec<char> = config.salt.chars().collect();

        let mut alphabet: Vec<char> = Vec::new();
        for c in config.alphabet.chars() {
            if c.is_whitespace() {
                return Err(CodecError::WhitespaceInAlphabet);
            }
            if !alphabet.contains(&c) {
                alphabet.push(c);
            }
        }
        if alphabet.len() < MIN_ALPHABET_LEN {
            return Err(CodecError::AlphabetTooShort(alphabet.len()));
        }

        // Split the separator pool out of the working alphabet.
        let mut separators: Vec<char> = SEPARATOR_POOL
            .chars()
            .filter(|c| alphabet.contains(c))
            .collect();
        alphabet.retain(|c| !separators.contains(c));

        consistent_shuffle(&mut separators, &salt);

        if separators.is_empty()
            || (alphabet.len() as f64 / separators.len() as f64) > SEPARATOR_RATIO
        {
            let mut needed = (alphabet.len() as f64 / SEPARATOR_RATIO).ceil() as usize;
            if needed == 1 {
                needed = 2;
            }
            if needed > separators.len() {
                let diff = needed - separators.len();
                separators.extend_from_slice(&alphabet[..diff]);
                alphabet.drain(..diff);
            } else {
                separators.truncate(needed);
            }
        }

        consistent_shuffle(&mut alphabet, &salt);

        let guard_count = (alphabet.len() as f64 / GUARD_RATIO).ceil() as usize;
        let guards;
        if alphabet.len() < 3 {
            guards = separators[..guard_count].to_vec();
            separators.drain(..guard_count);
        } else {
            guards = alphabet[..guard_count].to_vec();
            alphabet.drain(..guard_count);
        }

        Ok(Self {
            salt,
            alphabet,
            separators,
            guards,
            min_length: config.min_length,
        })
    }

    /// Encode a single primary key into a token.
    pub fn encode(&self, key: u64) -> String {
        self.encode_many(&[key])
    }

    /// Encode a sequence of values into one token.
    ///
    /// Route keys in this system are always single-value; the multi-value
    /// form exists because the token format supports it and decode must
    /// be able to verify whatever it parses.
    pub fn encode_many(&self, values: &[u64]) -> String {
        if values.is_empty() {
            return String::new();
        }

        let mut alphabet = self.alphabet.clone();
        let values_hash: u64 = values
            .iter()
            .enumerate()
            .map(|(i, v)| v % (i as u64 + 100))
            .sum();
        let lottery = alphabet[(values_hash % alphabet.len() as u64) as usize];
        let mut token = vec![lottery];

        for (i, &value) in values.iter().enumerate() {
            let mut buffer = vec![lottery];
            buffer.extend_from_slice(&self.salt);
            buffer.extend_from_slice(&alphabet);
            let len = alphabet.len();
            consistent_shuffle(&mut alphabet, &buffer[..len]);

            let digits = to_base(value, &alphabet);
            token.extend_from_slice(&digits);

            if i + 1 < values.len() {
                let reduced = value % (digits[0] as u64 + i as u64);
                let sep = self.separators[(reduced % self.separators.len() as u64) as usize];
                token.push(sep);
            }
        }

        if token.len() < self.min_length {
            let index = ((values_hash + token[0] as u64) % self.guards.len() as u64) as usize;
            token.insert(0, self.guards[index]);

            if token.len() < self.min_length {
                let index = ((values_hash + token[2] as u64) % self.guards.len() as u64) as usize;
                token.push(self.guards[index]);
            }
        }

        let half = alphabet.len() / 2;
        while token.len() < self.min_length {
            let shuffle_salt = alphabet.clone();
            consistent_shuffle(&mut alphabet, &shuffle_salt);

            let mut padded = alphabet[half..].to_vec();
            padded.extend_from_slice(&token);
            padded.extend_from_slice(&alphabet[..half]);
            token = padded;

            let excess = token.len().saturating_sub(self.min_length);
            if excess > 0 {
                let start = excess / 2;
                token = token[start..start + self.min_length].to_vec();
            }
        }

        token.into_iter().collect()
    }

    /// Decode a token back into the values it was minted from.
    ///
    /// Fails soft: an empty token, symbols outside the alphabet,
    /// arithmetic overflow, or a token produced under a different salt
    /// all yield an empty vector.
    pub fn decode(&self, token: &str) -> Vec<u64> {
        if token.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = token.chars().collect();

        // Guards bracket the payload when padding was applied.
        let parts = split_on(&chars, &self.guards);
        let core: &[char] = if parts.len() == 2 || parts.len() == 3 {
            &parts[1]
        } else {
            &parts[0]
        };
        if core.is_empty() {
            return Vec::new();
        }

        let lottery = core[0];
        let segments = split_on(&core[1..], &self.separators);

        let mut alphabet = self.alphabet.clone();
        let mut values = Vec::with_capacity(segments.len());
        for segment in &segments {
            let mut buffer = vec![lottery];
            buffer.extend_from_slice(&self.salt);
            buffer.extend_from_slice(&alphabet);
            let len = alphabet.len();
            consistent_shuffle(&mut alphabet, &buffer[..len]);

            match from_base(segment, &alphabet) {
                Some(value) => values.push(value),
                None => return Vec::new(),
            }
        }

        // A token that does not reproduce itself was not minted here.
        if self.encode_many(&values) != token {
            return Vec::new();
        }

        values
    }
}

/// Salt-driven deterministic permutation, applied in place.
fn consistent_shuffle(chars: &mut [char], salt: &[char]) {
    if salt.is_empty() || chars.is_empty() {
        return;
    }

    let mut v = 0usize;
    let mut p = 0usize;
    let mut i = chars.len() - 1;
    while i > 0 {
        v %= salt.len();
        let n = salt[v] as usize;
        p += n;
        let j = (n + v + p) % i;
        chars.swap(i, j);
        i -= 1;
        v += 1;
    }
}

/// Positional encoding of a value in the given alphabet.
fn to_base(mut value: u64, alphabet: &[char]) -> Vec<char> {
    let base = alphabet.len() as u64;
    let mut digits = Vec::new();
    loop {
        digits.push(alphabet[(value % base) as usize]);
        value /= base;
        if value == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}

/// Positional decoding; `None` on foreign symbols, overflow, or an empty
/// segment.
fn from_base(chars: &[char], alphabet: &[char]) -> Option<u64> {
    if chars.is_empty() {
        return None;
    }
    let base = alphabet.len() as u64;
    let mut value: u64 = 0;
    for c in chars {
        let index = alphabet.iter().position(|a| a == c)? as u64;
        value = value.checked_mul(base)?.checked_add(index)?;
    }
    Some(value)
}

/// Split on any of the given characters, keeping empty pieces so that
/// leading and trailing delimiters are observable.
fn split_on(chars: &[char], delimiters: &[char]) -> Vec<Vec<char>> {
    let mut parts: Vec<Vec<char>> = vec![Vec::new()];
    for &c in chars {
        if delimiters.contains(&c) {
            parts.push(Vec::new());
        } else {
            parts.last_mut().expect("parts is never empty").push(c);
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> HashidCodec {
        HashidCodec::new(&HashidConfig {
            salt: "this is my salt".to_string(),
            min_length: 0,
            alphabet: DEFAULT_ALPHABET.to_string(),
        })
        .unwrap()
    }

    fn codec_with(salt: &str, min_length: usize) -> HashidCodec {
        HashidCodec::new(&HashidConfig {
            salt: salt.to_string(),
            min_length,
            alphabet: DEFAULT_ALPHABET.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let codec = codec();
        for key in (0..=1000).chain([4096, 1_000_000, u64::MAX / 2, u64::MAX]) {
            let token = codec.encode(key);
            assert!(!token.is_empty());
            let decoded = codec.decode(&token);
            assert_eq!(decoded.first().copied(), Some(key), "key {key} token {token}");
        }
    }

    #[test]
    fn test_encode_is_deterministic() {
        let codec = codec();
        assert_eq!(codec.encode(42), codec.encode(42));

        let other = codec_with("this is my salt", 0);
        assert_eq!(codec.encode(42), other.encode(42));
    }

    #[test]
    fn test_zero_key() {
        let codec = codec();
        let token = codec.encode(0);
        assert_eq!(codec.decode(&token), vec![0]);
    }

    #[test]
    fn test_min_length_padding() {
        let codec = codec_with("this is my salt", 18);
        for key in [0u64, 1, 42, 123456] {
            let token = codec.encode(key);
            assert!(token.len() >= 18, "token {token} shorter than minimum");
            assert_eq!(codec.decode(&token).first().copied(), Some(key));
        }
    }

    #[test]
    fn test_multi_value_round_trip() {
        let codec = codec();
        let values = [683u64, 94108, 123, 5];
        let token = codec.encode_many(&values);
        assert_eq!(codec.decode(&token), values.to_vec());
    }

    #[test]
    fn test_empty_input_encodes_to_empty() {
        let codec = codec();
        assert_eq!(codec.encode_many(&[]), "");
    }

    #[test]
    fn test_malformed_tokens_decode_to_empty() {
        let codec = codec();
        assert!(codec.decode("").is_empty());
        assert!(codec.decode("not-a-real-token").is_empty());
        assert!(codec.decode("!!!@@@").is_empty());
        assert!(codec.decode("    ").is_empty());
        assert!(codec.decode("żółć").is_empty());
        // Long enough to overflow positional accumulation.
        assert!(codec.decode(&"z".repeat(64)).is_empty());
    }

    #[test]
    fn test_foreign_salt_rejected() {
        let ours = codec_with("this is my salt", 0);
        let theirs = codec_with("someone elses salt", 0);
        for key in [0u64, 1, 42, 99999] {
            let foreign = theirs.encode(key);
            assert!(
                ours.decode(&foreign).is_empty(),
                "token {foreign} minted elsewhere must not decode"
            );
        }
    }

    #[test]
    fn test_consecutive_keys_are_not_sequential() {
        // Enumeration resistance: the encoding of k+1 must not be the
        // encoding of k with only a trailing symbol changed.
        let codec = codec();
        for key in 0..200u64 {
            let a: Vec<char> = codec.encode(key).chars().collect();
            let b: Vec<char> = codec.encode(key + 1).chars().collect();
            let same_except_last =
                a.len() == b.len() && a[..a.len() - 1] == b[..b.len() - 1];
            assert!(!same_except_last, "keys {key} and {} look sequential", key + 1);
        }
    }

    #[test]
    fn test_tokens_use_configured_alphabet() {
        let codec = codec_with("this is my salt", 8);
        for key in 0..100u64 {
            let token = codec.encode(key);
            assert!(token.chars().all(|c| DEFAULT_ALPHABET.contains(c)));
        }
    }

    #[test]
    fn test_alphabet_too_short() {
        let result = HashidCodec::new(&HashidConfig {
            salt: "salt".to_string(),
            min_length: 0,
            alphabet: "abcdefgh".to_string(),
        });
        assert_eq!(result.unwrap_err(), CodecError::AlphabetTooShort(8));
    }

    #[test]
    fn test_duplicates_collapse_before_length_check() {
        let result = HashidCodec::new(&HashidConfig {
            salt: "salt".to_string(),
            min_length: 0,
            alphabet: "abcabcabcabcabcabcabcabc".to_string(),
        });
        assert_eq!(result.unwrap_err(), CodecError::AlphabetTooShort(3));
    }

    #[test]
    fn test_whitespace_in_alphabet() {
        let result = HashidCodec::new(&HashidConfig {
            salt: "salt".to_string(),
            min_length: 0,
            alphabet: "abcdefghij klmnopqrstuv".to_string(),
        });
        assert_eq!(result.unwrap_err(), CodecError::WhitespaceInAlphabet);
    }

    #[test]
    fn test_empty_salt_still_round_trips() {
        let codec = codec_with("", 0);
        let token = codec.encode(12345);
        assert_eq!(codec.decode(&token).first().copied(), Some(12345));
    }
}
