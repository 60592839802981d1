//! Card number checksum and generation
//!
//! Card numbers are validated with the Luhn checksum: starting from the
//! second-to-last digit and moving left, every other digit is doubled (9 is
//! subtracted from doubles above 9), and the number is valid when the digit
//! sum is divisible by 10. Spaces are separators and are ignored.

/// Total digit count of generated card numbers
const GENERATED_LENGTH: usize = 16;

/// Collect the digits of a number, skipping spaces
///
/// Returns `None` if any other non-digit character is present.
fn digits(number: &str) -> Option<Vec<u32>> {
    number
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| c.to_digit(10))
        .collect()
}

/// Luhn sum of `digits`, doubling every other digit counted from the end
///
/// `double_last` selects whether the last digit is doubled (true when
/// computing a check digit for a payload).
fn luhn_sum(digits: &[u32], double_last: bool) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            let doubled = (i % 2 == 0) == double_last;
            if doubled {
                let d = d * 2;
                if d > 9 {
                    d - 9
                } else {
                    d
                }
            } else {
                d
            }
        })
        .sum()
}

/// Check a card number against the Luhn checksum
///
/// Empty or non-numeric input is simply invalid.
pub fn is_valid(number: &str) -> bool {
    match digits(number) {
        Some(digits) if !digits.is_empty() => luhn_sum(&digits, false) % 10 == 0,
        _ => false,
    }
}

/// Compute the digit that makes `payload` followed by it a valid number
///
/// # Returns
///
/// * `Some(digit)` - The check digit (0-9)
/// * `None` - If the payload is empty or contains non-digits
pub fn check_digit(payload: &str) -> Option<u8> {
    let digits = digits(payload)?;
    if digits.is_empty() {
        return None;
    }
    let sum = luhn_sum(&digits, true);
    Some(((10 - sum % 10) % 10) as u8)
}

/// Generate a valid 16-digit card number for an issuer prefix
///
/// The prefix digits come first, `sequence` is zero-padded into the middle
/// and the check digit closes the number. The result is grouped by four
/// digits, e.g. `"5106 2100 0000 0015"`.
///
/// # Returns
///
/// * `Some(number)` - A number that passes [`is_valid`]
/// * `None` - If the prefix is not numeric or prefix and sequence do not fit
pub fn generate(prefix: &str, sequence: u64) -> Option<String> {
    let prefix: String = prefix.chars().filter(|c| *c != ' ').collect();
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let width = (GENERATED_LENGTH - 1).checked_sub(prefix.len())?;
    let sequence = format!("{:0width$}", sequence, width = width);
    if sequence.len() > width {
        return None;
    }

    let payload = format!("{}{}", prefix, sequence);
    let digit = check_digit(&payload)?;
    let number = format!("{}{}", payload, digit);

    let groups: Vec<&str> = (0..GENERATED_LENGTH)
        .step_by(4)
        .map(|start| &number[start..start + 4])
        .collect();
    Some(groups.join(" "))
}
