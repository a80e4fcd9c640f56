//! Random PIN generation.

use ecosim_logic::pin::{PIN_DIGITS, PIN_LETTERS};
use rand::Rng;

fn pick(rng: &mut impl Rng, alphabet: &[u8]) -> char {
    char::from(alphabet[rng.gen_range(0..alphabet.len())])
}

/// Six characters, letter-letter-digit-digit-letter-letter, e.g. `AB23CD`.
pub fn generate_lobby_pin(rng: &mut impl Rng) -> String {
    let mut pin = String::with_capacity(6);
    pin.push(pick(rng, PIN_LETTERS));
    pin.push(pick(rng, PIN_LETTERS));
    pin.push(pick(rng, PIN_DIGITS));
    pin.push(pick(rng, PIN_DIGITS));
    pin.push(pick(rng, PIN_LETTERS));
    pin.push(pick(rng, PIN_LETTERS));
    pin
}

/// Four digits, 1000–9999.
pub fn generate_short_pin(rng: &mut impl Rng) -> String {
    rng.gen_range(1000..=9999u32).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosim_logic::pin::{is_lobby_pin, is_valid_pin};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_lobby_pin_pattern() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..5000 {
            let pin = generate_lobby_pin(&mut rng);
            assert_eq!(pin.len(), 6);
            assert!(is_lobby_pin(&pin), "{}", pin);
            assert!(is_valid_pin(&pin));
        }
    }

    #[test]
    fn test_lobby_pin_avoids_lookalikes() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..5000 {
            let pin = generate_lobby_pin(&mut rng);
            assert!(!pin.chars().any(|c| "ILO01".contains(c)), "{}", pin);
        }
    }

    #[test]
    fn test_short_pin_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..5000 {
            let pin = generate_short_pin(&mut rng);
            let n: u32 = pin.parse().unwrap();
            assert!((1000..=9999).contains(&n));
            assert!(is_valid_pin(&pin));
        }
    }

    #[test]
    fn test_same_seed_same_pin() {
        let a = generate_lobby_pin(&mut StdRng::seed_from_u64(9));
        let b = generate_lobby_pin(&mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
