//! Roman numerals for any `u64`
//!
//! Values above 3999 use vinculum notation: every symbol in a group that
//! counts thousands carries one combining overline (U+0305) per factor of
//! 1000. Zero is written `N`.

const OVERLINE: char = '\u{0305}';

const NUMERALS: [(u64, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

pub fn to_roman(n: u64) -> String {
    if n == 0 {
        return "N".to_string();
    }

    // base-1000 groups below the leading one, least significant first
    let mut lower = Vec::new();
    let mut top = n;
    while top >= 4000 {
        lower.push(top % 1000);
        top /= 1000;
    }

    let mut out = String::new();
    push_group(&mut out, top, lower.len());
    for (level, group) in lower.iter().enumerate().rev() {
        push_group(&mut out, *group, level);
    }
    out
}

fn push_group(out: &mut String, mut value: u64, overlines: usize) {
    for (amount, symbol) in NUMERALS {
        while value >= amount {
            for ch in symbol.chars() {
                out.push(ch);
                out.extend(std::iter::repeat(OVERLINE).take(overlines));
            }
            value -= amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers() {
        assert_eq!(to_roman(0), "N");
        assert_eq!(to_roman(1), "I");
        assert_eq!(to_roman(4), "IV");
        assert_eq!(to_roman(9), "IX");
        assert_eq!(to_roman(14), "XIV");
        assert_eq!(to_roman(1994), "MCMXCIV");
        assert_eq!(to_roman(3999), "MMMCMXCIX");
    }

    #[test]
    fn test_vinculum() {
        assert_eq!(to_roman(4000), "I\u{0305}V\u{0305}");
        assert_eq!(to_roman(4001), "I\u{0305}V\u{0305}I");
        assert_eq!(to_roman(5_000_000), "V\u{0305}\u{0305}");
    }

    #[test]
    fn test_huge_values_do_not_panic() {
        let text = to_roman(u64::MAX);
        assert!(!text.is_empty());
        assert!(text.contains(OVERLINE));
    }
}
