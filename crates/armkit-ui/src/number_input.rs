//! Text-backed numeric input.
//!
//! The displayed text is edited freely; a value is emitted only when the text
//! parses as a finite number. Losing focus restores the text of the last
//! value the owner accepted.

/// Parses the longest numeric literal at the start of `text`.
///
/// Leading whitespace is skipped and anything after the literal is ignored,
/// so `"12abc"` reads as 12 and `"1e"` as 1. Returns `None` when no digits
/// lead the text or the value is not finite.
pub fn parse_number(text: &str) -> Option<f64> {
    let literal = leading_literal(text.trim_start());
    if literal.is_empty() {
        return None;
    }
    literal.parse::<f64>().ok().filter(|v| v.is_finite())
}

// sign? digits* ('.' digits*)? (('e' | 'E') sign? digits+)?, at least one mantissa digit
fn leading_literal(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    &text[..end]
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberInput {
    value: f64,
    text: String,
}

impl NumberInput {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            text: value.to_string(),
        }
    }

    /// Text currently shown in the field.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Last value set by the owner.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Replaces the displayed text and returns the parsed value, if any.
    ///
    /// The returned value is a proposal; the owner confirms it with
    /// [`NumberInput::set_value`].
    pub fn input(&mut self, text: &str) -> Option<f64> {
        self.text = text.to_string();
        parse_number(text)
    }

    /// Restores the text of the current value.
    pub fn blur(&mut self) {
        self.text = self.value.to_string();
    }

    /// Updates the value from outside. The text is only rewritten when the
    /// value actually changes so an in-progress edit is left alone.
    pub fn set_value(&mut self, value: f64) {
        if value.to_bits() != self.value.to_bits() {
            self.value = value;
            self.text = value.to_string();
        }
    }
}

impl Default for NumberInput {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("12.5"), Some(12.5));
        assert_eq!(parse_number(" -3 "), Some(-3.0));
        assert_eq!(parse_number("1e2"), Some(100.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("."), None);
    }

    #[test]
    fn test_parse_number_reads_leading_literal() {
        assert_eq!(parse_number("12abc"), Some(12.0));
        assert_eq!(parse_number("1e"), Some(1.0));
        assert_eq!(parse_number("1e+"), Some(1.0));
        assert_eq!(parse_number("3.5.2"), Some(3.5));
        assert_eq!(parse_number("  7 apples"), Some(7.0));
        assert_eq!(parse_number("-.5x"), Some(-0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("2E-1m"), Some(0.2));
        assert_eq!(parse_number("1e999"), None);
        assert_eq!(parse_number("Infinity"), None);
        assert_eq!(parse_number("x12"), None);
    }

    #[test]
    fn test_malformed_text_reverts_on_blur() {
        let mut input = NumberInput::new(80.0);
        assert_eq!(input.input("x8"), None);
        assert_eq!(input.text(), "x8");
        input.blur();
        assert_eq!(input.text(), "80");
    }

    #[test]
    fn test_accepted_value_updates_text() {
        let mut input = NumberInput::new(100.0);
        let proposed = input.input("120").unwrap();
        input.set_value(proposed);
        assert_eq!(input.value(), 120.0);
        assert_eq!(input.text(), "120");
    }

    #[test]
    fn test_unchanged_value_keeps_edit() {
        let mut input = NumberInput::new(1.0);
        input.input("1.");
        input.set_value(1.0);
        assert_eq!(input.text(), "1.");
    }
}
