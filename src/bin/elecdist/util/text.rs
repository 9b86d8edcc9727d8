/// Greedy word wrap that keeps explicit line breaks.
///
/// Blank input lines survive as empty output lines so multi-paragraph
/// error messages keep their layout inside the error panel.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            let current_len = current.chars().count();
            if current.is_empty() {
                current.push_str(word);
            } else if current_len + 1 + word_len <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Shortens `s` to at most `max_len` characters, marking the cut with `…`.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    match max_len {
        0 => String::new(),
        _ => s
            .chars()
            .take(max_len - 1)
            .chain(std::iter::once('…'))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_width() {
        assert_eq!(
            wrap("Stopped at the first problem", 12),
            vec!["Stopped at", "the first", "problem"]
        );
    }

    #[test]
    fn wrap_keeps_paragraphs() {
        assert_eq!(
            wrap("Input is a terminal.\n\nUsage: elecdist count", 40),
            vec!["Input is a terminal.", "", "Usage: elecdist count"]
        );
    }

    #[test]
    fn wrap_empty_text() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn truncate_fits() {
        assert_eq!(truncate("HOH A   1", 16), "HOH A   1");
        assert_eq!(truncate("Total", 5), "Total");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Electron Distribution", 10), "Electron …");
        assert_eq!(truncate("Å-cutoff", 2), "Å…");
        assert_eq!(truncate("abc", 0), "");
    }
}
