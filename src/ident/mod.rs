//! Opaque identifier codec.
//!
//! # Data Flow
//! ```text
//! Primary key (u64)
//!     → codec.rs encode (salt-shuffled alphabet, lottery char)
//!     → opaque URL-safe token
//!
//! Incoming token
//!     → codec.rs decode (strip guards, split on separators, unhash)
//!     → re-encode verification
//!     → Vec<u64> (empty on any failure)
//! ```
//!
//! # Design Decisions
//! - Tokens are reversible: no lookup table, no stored mapping
//! - Decode never fails hard; malformed input yields an empty vector
//! - Re-encoding the decoded values guards against foreign-salt tokens
//! - Consecutive keys produce unrelated tokens (enumeration resistance)

pub mod codec;

pub use codec::{CodecError, HashidCodec, DEFAULT_ALPHABET};
