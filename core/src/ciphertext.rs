use std::fmt;

use blindfx_backend::FixedToken;

/// An opaque fixed-width token holding `(base * A * B) mod M`.
///
/// Ciphertexts are immutable; every operator returns a new one.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Ciphertext {
    pub(crate) token: FixedToken,
}

impl Ciphertext {
    pub fn from_token(token: FixedToken) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &FixedToken {
        &self.token
    }

    pub fn byte_width(&self) -> usize {
        self.token.len()
    }

    /// Hexadecimal wire form, `2 * byte_width` characters.
    pub fn to_hex(&self) -> String {
        self.token.to_hex()
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.token, f)
    }
}
