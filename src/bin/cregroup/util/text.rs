/// Greedy word wrap. Words longer than `width` (file paths, mostly) are
/// hard-split so no line exceeds the box they are printed into.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        for piece in chunks(word, width) {
            let needed = char_len(&current) + 1 + char_len(&piece);
            if current.is_empty() {
                current = piece;
            } else if needed <= width {
                current.push(' ');
                current.push_str(&piece);
            } else {
                lines.push(std::mem::replace(&mut current, piece));
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Cuts `s` to at most `max_len` characters, marking the cut with `…`.
pub fn truncate(s: &str, max_len: usize) -> String {
    match max_len {
        0 => String::new(),
        _ if char_len(s) <= max_len => s.to_string(),
        1 => "…".to_string(),
        _ => {
            let mut out: String = s.chars().take(max_len - 1).collect();
            out.push('…');
            out
        }
    }
}

/// Like [`truncate`], but keeps the end of `s`, so the file name of a long
/// path stays visible.
pub fn truncate_start(s: &str, max_len: usize) -> String {
    let len = char_len(s);
    match max_len {
        0 => String::new(),
        _ if len <= max_len => s.to_string(),
        1 => "…".to_string(),
        _ => {
            let mut out = String::from("…");
            out.extend(s.chars().skip(len - (max_len - 1)));
            out
        }
    }
}

fn chunks(word: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_short_text() {
        assert_eq!(wrap("grouping verified", 20), vec!["grouping verified"]);
    }

    #[test]
    fn wrap_at_word_boundaries() {
        assert_eq!(
            wrap("title full_7 not found", 12),
            vec!["title full_7", "not found"]
        );
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(
            wrap("open /data/confs.sdf", 8),
            vec!["open", "/data/co", "nfs.sdf"]
        );
    }

    #[test]
    fn wrap_empty_yields_one_line() {
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("full_1", 10), "full_1");
        assert_eq!(truncate("full_1", 6), "full_1");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("c1ccccc1O", 5), "c1cc…");
        assert_eq!(truncate("日本語テスト", 4), "日本語…");
    }

    #[test]
    fn truncate_start_keeps_file_name() {
        assert_eq!(truncate_start("/very/long/dir/out.sdf", 9), "…/out.sdf");
        assert_eq!(truncate_start("out.sdf", 9), "out.sdf");
    }
}
