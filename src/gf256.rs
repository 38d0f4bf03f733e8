//! Arithmetic over GF(2^8) as used by QR code Reed-Solomon codes.
//!
//! The field is generated by the polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11D)
//! with primitive element alpha = 2. Both lookup tables are built at compile
//! time and never change, so they can be shared freely between threads.

/// The field polynomial x^8 + x^4 + x^3 + x^2 + 1.
pub const FIELD_POLYNOMIAL: u16 = 0x11d;

/// Antilog table: `EXP_TABLE[i]` is alpha^i.
///
/// Stored twice over so that the sum of two logarithms indexes it directly.
pub static EXP_TABLE: [u8; 512] = build_exp_table();

/// Log table: `LOG_TABLE[alpha^i]` is i. Entry 0 is unused.
pub static LOG_TABLE: [u8; 256] = build_log_table();

const fn build_exp_table() -> [u8; 512] {
    let mut table = [0u8; 512];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 512 {
        table[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= FIELD_POLYNOMIAL;
        }
        i += 1;
    }
    table
}

const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Returns alpha raised to the given power.
pub fn exp(power: usize) -> u8 {
    EXP_TABLE[power % 255]
}

/// Returns the discrete logarithm of `x`, or `None` for zero.
pub fn log(x: u8) -> Option<u8> {
    (x != 0).then(|| LOG_TABLE[usize::from(x)])
}

/// Multiplies two field elements.
pub fn multiply(x: u8, y: u8) -> u8 {
    if x == 0 || y == 0 {
        return 0;
    }
    EXP_TABLE[usize::from(LOG_TABLE[usize::from(x)]) + usize::from(LOG_TABLE[usize::from(y)])]
}

/// Evaluates a polynomial at `x`. Coefficients are ordered from the highest
/// degree term down to the constant term.
pub fn evaluate(poly: &[u8], x: u8) -> u8 {
    poly.iter().fold(0, |acc, &coef| multiply(acc, x) ^ coef)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Carry-less multiply with reduction, independent of the tables.
    fn multiply_slow(x: u8, y: u8) -> u8 {
        let mut z: u8 = 0;
        for i in (0..8).rev() {
            z = (z << 1) ^ ((z >> 7) * 0x1d);
            z ^= ((y >> i) & 1) * x;
        }
        z
    }

    #[test]
    fn test_exp_table_start() {
        assert_eq!(&EXP_TABLE[..10], &[1, 2, 4, 8, 16, 32, 64, 128, 29, 58]);
        assert_eq!(EXP_TABLE[255], 1);
        assert_eq!(exp(255), 1);
    }

    #[test]
    fn test_log_inverts_exp() {
        for i in 0..255 {
            assert_eq!(log(exp(i)), Some(i as u8));
        }
        assert_eq!(log(0), None);
    }

    #[test]
    fn test_multiply_matches_reference() {
        for x in 0..=255u8 {
            for y in 0..=255u8 {
                assert_eq!(multiply(x, y), multiply_slow(x, y), "{x} * {y}");
            }
        }
    }

    #[test]
    fn test_evaluate() {
        // (x + 1) evaluated at 1 is 0 in characteristic 2
        assert_eq!(evaluate(&[1, 1], 1), 0);
        assert_eq!(evaluate(&[1, 0, 0], 2), 4);
        assert_eq!(evaluate(&[], 7), 0);
    }
}
