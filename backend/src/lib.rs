pub mod codec;
pub mod modulus;
pub mod rounding;

pub use codec::*;
pub use modulus::*;
pub use rounding::*;
