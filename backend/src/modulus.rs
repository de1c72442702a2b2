use rug::Integer;

/// The ring `Z_M` with `M = 2^log_m`.
///
/// Reduction keeps the `log_m` least significant bits, which for negative
/// operands yields the least non-negative residue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerOfTwoModulus {
    log_m: u32,
    value: Integer,
    half: Integer,
}

impl PowerOfTwoModulus {
    pub fn new(log_m: u32) -> Self {
        assert!(log_m > 0, "invalid argument log_m: must be > 0");
        let value: Integer = Integer::from(1) << log_m;
        let half: Integer = Integer::from(1) << (log_m - 1);
        Self { log_m, value, half }
    }

    /// Modulus of a `byte_width` bytes wide token, `M = 2^(8 * byte_width)`.
    pub fn from_byte_width(byte_width: usize) -> Self {
        Self::new((byte_width * 8) as u32)
    }

    pub fn log_m(&self) -> u32 {
        self.log_m
    }

    pub fn value(&self) -> &Integer {
        &self.value
    }

    /// Returns `M/2`.
    pub fn half(&self) -> &Integer {
        &self.half
    }

    pub fn is_power_of_two(&self) -> bool {
        self.value.is_power_of_two()
    }

    /// Returns true if `0 <= x < M`.
    pub fn contains(&self, x: &Integer) -> bool {
        !x.is_negative() && x.significant_bits() <= self.log_m
    }

    /// Returns `x mod M` in `[0, M)`.
    pub fn reduce(&self, x: &Integer) -> Integer {
        Integer::from(x.keep_bits_ref(self.log_m))
    }

    /// Maps a residue in `[0, M)` to its centered representative in `[-M/2, M/2)`.
    pub fn lift(&self, x: &Integer) -> Integer {
        debug_assert!(self.contains(x), "invalid argument x: not reduced");
        if *x >= self.half {
            Integer::from(x - &self.value)
        } else {
            x.clone()
        }
    }

    pub fn add(&self, a: &Integer, b: &Integer) -> Integer {
        self.reduce(&Integer::from(a + b))
    }

    pub fn sub(&self, a: &Integer, b: &Integer) -> Integer {
        self.reduce(&Integer::from(a - b))
    }

    pub fn mul(&self, a: &Integer, b: &Integer) -> Integer {
        self.reduce(&Integer::from(a * b))
    }

    /// Returns `x^-1 mod M`, which exists if and only if `x` is odd.
    pub fn invert(&self, x: &Integer) -> Option<Integer> {
        x.invert_ref(&self.value).map(Integer::from)
    }
}
