//! Parsing of the comma separated digit field.

/// Turns free-form operator input into the digit sequence sent to the engine.
///
/// Tokens are split on `,` and trimmed. Each token contributes its leading
/// integer (an optional sign followed by ASCII digits), so `"12abc"` reads as
/// `12` and `"3.9"` as `3`. Tokens without a leading digit, or whose integer
/// does not fit in `i64`, are dropped without comment. Order and duplicates
/// are preserved. Never fails.
pub fn parse_digits(raw: &str) -> Vec<i64> {
    raw.split(',').filter_map(leading_integer).collect()
}

fn leading_integer(token: &str) -> Option<i64> {
    let token = token.trim();
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let digits = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    let sign_len = token.len() - unsigned.len();
    token[..sign_len + digits].parse().ok()
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;
