//! System-wide constants for ChequeBank.

/// Maximum number of sign-over records in one endorsement chain.
pub const MAX_SIGN_OVERS: usize = 6;

/// Marker prefixed to every sign-over digest so a sign-over signature can
/// never be mistaken for a cheque signature.
pub const SIGN_OVER_MARKER: [u8; 4] = 0xFFFF_DEAD_u32.to_be_bytes();

/// Length of an ed25519 signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "ChequeBank";
