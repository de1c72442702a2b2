use rug::{Integer, integer::Order};
use std::fmt;

use crate::PowerOfTwoModulus;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("malformed token: {0}")]
    Format(String),

    #[error("value outside [0, 2^{log_m})")]
    Range { log_m: u32 },
}

/// A fixed-width, big-endian, unsigned serialization of an element of `Z_M`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FixedToken(Box<[u8]>);

impl FixedToken {
    /// Wraps raw bytes. The width is only checked when the token is decoded.
    pub fn from_bytes(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hexadecimal wire form, two characters per byte.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Display for FixedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for FixedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedToken({})", self.to_hex())
    }
}

/// Converts between ring elements and `byte_width` bytes wide tokens.
#[derive(Clone, Debug)]
pub struct FixedCodec {
    byte_width: usize,
    modulus: PowerOfTwoModulus,
}

impl FixedCodec {
    pub fn new(byte_width: usize) -> Self {
        Self {
            byte_width,
            modulus: PowerOfTwoModulus::from_byte_width(byte_width),
        }
    }

    pub fn byte_width(&self) -> usize {
        self.byte_width
    }

    pub fn modulus(&self) -> &PowerOfTwoModulus {
        &self.modulus
    }

    /// Serializes `value` to exactly `byte_width` big-endian bytes.
    pub fn encode(&self, value: &Integer) -> Result<FixedToken, CodecError> {
        if !self.modulus.contains(value) {
            return Err(CodecError::Range {
                log_m: self.modulus.log_m(),
            });
        }
        let digits: Vec<u8> = value.to_digits::<u8>(Order::Msf);
        let mut bytes: Vec<u8> = vec![0u8; self.byte_width];
        bytes[self.byte_width - digits.len()..].copy_from_slice(&digits);
        Ok(FixedToken::from_bytes(bytes))
    }

    pub fn decode(&self, token: &FixedToken) -> Result<Integer, CodecError> {
        if token.len() != self.byte_width {
            return Err(CodecError::Format(format!(
                "expected {} bytes, got {}",
                self.byte_width,
                token.len()
            )));
        }
        Ok(Integer::from_digits(token.as_bytes(), Order::Msf))
    }

    /// Parses the hexadecimal wire form, which must be exactly
    /// `2 * byte_width` characters long.
    pub fn from_hex(&self, s: &str) -> Result<FixedToken, CodecError> {
        if s.len() != 2 * self.byte_width {
            return Err(CodecError::Format(format!(
                "expected {} hex characters, got {}",
                2 * self.byte_width,
                s.len()
            )));
        }
        let bytes: Vec<u8> = hex::decode(s).map_err(|e| CodecError::Format(e.to_string()))?;
        Ok(FixedToken::from_bytes(bytes))
    }
}
