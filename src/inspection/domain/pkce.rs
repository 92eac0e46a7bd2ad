use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes behind the CSRF state and the code verifier
const ENTROPY_BYTES: usize = 32;

/// CSRF state plus PKCE verifier/challenge for a single login attempt (RFC 7636)
///
/// The verifier never leaves the process except in the token exchange; only
/// the S256 challenge goes into the authorize URL.
#[derive(Clone)]
pub struct PkceChallenge {
    pub state: String,
    pub verifier: String,
    pub challenge: String,
}

impl std::fmt::Debug for PkceChallenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PkceChallenge")
            .field("challenge", &self.challenge)
            .finish_non_exhaustive()
    }
}

impl PkceChallenge {
    pub const METHOD: &'static str = "S256";

    /// Draws fresh state and verifier bytes from the operating system RNG
    pub fn generate() -> Self {
        let mut state = [0u8; ENTROPY_BYTES];
        let mut verifier = [0u8; ENTROPY_BYTES];
        OsRng.fill_bytes(&mut state);
        OsRng.fill_bytes(&mut verifier);
        Self::from_entropy(&state, &verifier)
    }

    pub fn from_entropy(state: &[u8], verifier: &[u8]) -> Self {
        let verifier = URL_SAFE_NO_PAD.encode(verifier);
        let challenge = Self::challenge_for(&verifier);
        Self {
            state: URL_SAFE_NO_PAD.encode(state),
            verifier,
            challenge,
        }
    }

    /// `BASE64URL(SHA256(verifier))` without padding
    pub fn challenge_for(verifier: &str) -> String {
        URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc7636_appendix_b_vector() {
        assert_eq!(
            PkceChallenge::challenge_for("dBjftJeZ4CVP-mJ0kQw8zIa7Vq4Yz6XQpz86xWcPt48"),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }

    #[test]
    fn test_generated_values_are_url_safe_and_sized() {
        let pkce = PkceChallenge::generate();
        assert_eq!(pkce.verifier.len(), 43);
        assert_eq!(pkce.state.len(), 43);
        assert!(pkce
            .verifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(pkce.challenge, PkceChallenge::challenge_for(&pkce.verifier));
    }

    #[test]
    fn test_each_attempt_is_unique() {
        let a = PkceChallenge::generate();
        let b = PkceChallenge::generate();
        assert_ne!(a.state, b.state);
        assert_ne!(a.verifier, b.verifier);
    }

    #[test]
    fn test_debug_hides_verifier() {
        let pkce = PkceChallenge::from_entropy(&[1; 32], &[2; 32]);
        let debug = format!("{:?}", pkce);
        assert!(!debug.contains(&pkce.verifier));
        assert!(!debug.contains(&pkce.state));
    }
}
