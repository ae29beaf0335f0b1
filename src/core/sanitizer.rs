//! Cell value cleaning applied during column extraction.

use crate::domain::model::Value;

/// Characters removed outright: currency symbols, arithmetic operators, brackets.
fn is_stripped(c: char) -> bool {
    matches!(
        c,
        '£' | '$'
            | '€'
            | '¥'
            | '+'
            | '-'
            | '*'
            | '/'
            | '='
            | '%'
            | '('
            | ')'
            | '['
            | ']'
            | '{'
            | '}'
    )
}

/// Cleans a raw string. All stripping happens before whitespace is collapsed.
pub fn clean_str(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !is_stripped(*c)).collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleans a cell. Missing cells become the empty string.
pub fn clean(value: &Value) -> String {
    match value {
        Value::Missing => String::new(),
        other => clean_str(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_is_empty() {
        assert_eq!(clean(&Value::Missing), "");
    }

    #[test]
    fn test_strips_currency() {
        assert_eq!(clean(&Value::from("$1,234.56")), "1,234.56");
        assert_eq!(clean(&Value::from("£12 €3 ¥4")), "12 3 4");
    }

    #[test]
    fn test_strips_operators_and_brackets() {
        assert_eq!(clean(&Value::from("  (loss) -5% ")), "loss 5");
        assert_eq!(clean(&Value::from("[a]{b}=c*d/e+f")), "abcdef");
    }

    #[test]
    fn test_collapses_whitespace_after_stripping() {
        assert_eq!(clean(&Value::from(" $1,000 (approx) ")), "1,000 approx");
        assert_eq!(clean(&Value::from("a - b")), "a b");
        assert_eq!(clean(&Value::from("x\t\n  y")), "x y");
    }

    #[test]
    fn test_numbers_use_text_form() {
        assert_eq!(clean(&Value::Number(-5.0)), "5");
        assert_eq!(clean(&Value::Number(12.5)), "12.5");
    }

    #[test]
    fn test_only_symbols_becomes_empty() {
        assert_eq!(clean(&Value::from("( $ )")), "");
    }
}
