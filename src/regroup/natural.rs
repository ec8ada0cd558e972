//! Natural ("human") ordering of titles: `full_2` sorts before `full_10`.

use std::cmp::Ordering;

/// One run of a tokenized string.
///
/// Tokens alternate text, digits, text, ... starting with a (possibly empty)
/// text run, so two token lists always compare like with like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Digits(&'a str),
}

fn tokenize(s: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_digits = false;

    for (idx, ch) in s.char_indices() {
        let is_digit = ch.is_ascii_digit();
        if is_digit != in_digits {
            let run = &s[start..idx];
            tokens.push(if in_digits {
                Token::Digits(run)
            } else {
                Token::Text(run)
            });
            start = idx;
            in_digits = is_digit;
        }
    }

    let run = &s[start..];
    tokens.push(if in_digits {
        Token::Digits(run)
    } else {
        Token::Text(run)
    });
    tokens
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        .then_with(|| a.len().cmp(&b.len()))
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    let lower_a = a.chars().flat_map(char::to_lowercase);
    let lower_b = b.chars().flat_map(char::to_lowercase);
    lower_a.cmp(lower_b)
}

fn cmp_token(a: &Token<'_>, b: &Token<'_>) -> Ordering {
    match (a, b) {
        (Token::Digits(x), Token::Digits(y)) => cmp_digits(x, y),
        (Token::Text(x), Token::Text(y)) => cmp_text(x, y),
        // Alternation keeps kinds aligned; order mixed pairs deterministically anyway.
        (Token::Text(_), Token::Digits(_)) => Ordering::Greater,
        (Token::Digits(_), Token::Text(_)) => Ordering::Less,
    }
}

/// Compares two strings in natural order.
///
/// Digit runs compare by numeric value (arbitrary length), text runs compare
/// case-insensitively. Strings that still tie are ordered by their bytes, so
/// the ordering is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ta = tokenize(a);
    let tb = tokenize(b);

    for (x, y) in ta.iter().zip(tb.iter()) {
        match cmp_token(x, y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    ta.len().cmp(&tb.len()).then_with(|| a.cmp(b))
}

/// Sorts strings in place in natural order.
pub fn natural_sort<S: AsRef<str>>(items: &mut [S]) {
    items.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_suffixes_compare_as_integers() {
        let mut titles = vec!["full_2", "full_10", "full_1"];
        natural_sort(&mut titles);
        assert_eq!(titles, vec!["full_1", "full_2", "full_10"]);
    }

    #[test]
    fn text_runs_ignore_case() {
        assert_eq!(natural_cmp("Full_3", "full_20"), Ordering::Less);
        assert_eq!(natural_cmp("ABC", "abd"), Ordering::Less);
    }

    #[test]
    fn leading_digits_and_mixed_runs() {
        let mut items = vec!["10a", "9b", "a1", "2", "x2y10", "x2y9"];
        natural_sort(&mut items);
        assert_eq!(items, vec!["2", "9b", "10a", "a1", "x2y9", "x2y10"]);
    }

    #[test]
    fn huge_numbers_do_not_overflow() {
        let big = "mol_123456789012345678901234567890";
        let bigger = "mol_223456789012345678901234567890";
        assert_eq!(natural_cmp(big, bigger), Ordering::Less);
    }

    #[test]
    fn ties_are_broken_deterministically() {
        assert_eq!(natural_cmp("full_01", "full_1"), Ordering::Greater);
        assert_eq!(natural_cmp("FULL_1", "full_1"), Ordering::Less);
        assert_eq!(natural_cmp("full_1", "full_1"), Ordering::Equal);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(natural_cmp("full", "full_1"), Ordering::Less);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
    }

    #[test]
    fn tokenize_alternates_starting_with_text() {
        assert_eq!(
            tokenize("12ab3"),
            vec![
                Token::Text(""),
                Token::Digits("12"),
                Token::Text("ab"),
                Token::Digits("3")
            ]
        );
    }
}
