//! Lobby PIN alphabet, validation and display.
//!
//! Letters skip I, L and O; digits skip 0 and 1, so a PIN read off a
//! projector cannot be mistyped as a look-alike.

pub const PIN_LETTERS: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ";
pub const PIN_DIGITS: &[u8] = b"23456789";

/// Number of distinct letter-letter-digit-digit-letter-letter PINs.
pub const LOBBY_PIN_SPACE: u64 = (PIN_LETTERS.len() as u64).pow(4) * (PIN_DIGITS.len() as u64).pow(2);

/// 4–6 ASCII letters or digits, case-insensitive.
pub fn is_valid_pin(pin: &str) -> bool {
    (4..=6).contains(&pin.len()) && pin.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Whether `pin` could have come out of the lobby PIN generator.
pub fn is_lobby_pin(pin: &str) -> bool {
    let b = pin.as_bytes();
    b.len() == 6
        && PIN_LETTERS.contains(&b[0])
        && PIN_LETTERS.contains(&b[1])
        && PIN_DIGITS.contains(&b[2])
        && PIN_DIGITS.contains(&b[3])
        && PIN_LETTERS.contains(&b[4])
        && PIN_LETTERS.contains(&b[5])
}

/// `AB12CD` → `AB-12-CD`, `1234` → `12-34`. Other lengths are returned as-is.
pub fn format_pin(pin: &str) -> String {
    if !pin.is_ascii() {
        return pin.to_string();
    }
    match pin.len() {
        6 => format!("{}-{}-{}", &pin[0..2], &pin[2..4], &pin[4..6]),
        4 => format!("{}-{}", &pin[0..2], &pin[2..4]),
        _ => pin.to_string(),
    }
}

/// Canonical form of user-typed input: trimmed, dashes and spaces removed,
/// uppercased.
pub fn normalize_pin(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_pin() {
        assert!(is_valid_pin("AB12CD"));
        assert!(is_valid_pin("ab12"));
        assert!(is_valid_pin("4821"));
        assert!(!is_valid_pin("AB1"));
        assert!(!is_valid_pin("AB12CDE"));
        assert!(!is_valid_pin("AB-12"));
        assert!(!is_valid_pin("ÄB12"));
    }

    #[test]
    fn test_is_lobby_pin() {
        assert!(is_lobby_pin("AB23CD"));
        assert!(!is_lobby_pin("AB12CD"), "1 is not in the digit alphabet");
        assert!(!is_lobby_pin("IB23CD"), "I is not in the letter alphabet");
        assert!(!is_lobby_pin("ab23cd"));
    }

    #[test]
    fn test_format_pin() {
        assert_eq!(format_pin("AB12CD"), "AB-12-CD");
        assert_eq!(format_pin("4821"), "48-21");
        assert_eq!(format_pin("ABCDE"), "ABCDE");
    }

    #[test]
    fn test_normalize_round_trips_format() {
        assert_eq!(normalize_pin(" ab-23-cd "), "AB23CD");
        assert_eq!(normalize_pin(&format_pin("XY45ZW")), "XY45ZW");
    }

    #[test]
    fn test_pin_space() {
        assert_eq!(LOBBY_PIN_SPACE, 23u64.pow(4) * 64);
    }
}
