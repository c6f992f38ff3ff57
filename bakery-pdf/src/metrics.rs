//! Text metrics for the builtin Helvetica faces
//!
//! Widths are the standard Helvetica AFM advance widths (1/1000 em) for
//! printable ASCII. Bold text is approximated by scaling the regular width.

/// Advance widths for `' '..='~'`
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Width used for characters outside printable ASCII
const FALLBACK_WIDTH: u16 = 556;

const BOLD_FACTOR: f32 = 1.06;

fn char_width(c: char) -> u16 {
    match c {
        ' '..='~' => HELVETICA_WIDTHS[(c as usize) - 32],
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points at `size`
pub fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c) as u32).sum();
    let width = units as f32 * size / 1000.0;
    if bold { width * BOLD_FACTOR } else { width }
}

/// Greedy word wrap into lines no wider than `max_width`.
///
/// Words wider than a whole line are split by character. Always returns at
/// least one line (empty input gives one empty line).
pub fn wrap_text(text: &str, max_width: f32, size: f32, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width(&candidate, size, bold) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if text_width(word, size, bold) <= max_width {
            current = word.to_string();
        } else {
            for c in word.chars() {
                let mut next = current.clone();
                next.push(c);
                if !current.is_empty() && text_width(&next, size, bold) > max_width {
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                } else {
                    current = next;
                }
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_of_known_strings() {
        // "Total" = 611 + 556 + 278 + 556 + 222 = 2223
        assert!((text_width("Total", 10.0, false) - 22.23).abs() < 0.001);
        assert_eq!(text_width("", 12.0, false), 0.0);
        assert!(text_width("Total", 10.0, true) > text_width("Total", 10.0, false));
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap_text("Veg Puff", 200.0, 10.0, false), vec!["Veg Puff"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap_text("", 100.0, 10.0, false), vec![String::new()]);
    }

    #[test]
    fn long_text_wraps_on_words() {
        let text = "Extra Large Chocolate Truffle Celebration Cake With Fresh Cream";
        let lines = wrap_text(text, 100.0, 10.0, false);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0, false) <= 100.0, "{line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn overlong_word_is_split() {
        let word = "W".repeat(40);
        let lines = wrap_text(&word, 50.0, 10.0, false);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width(line, 10.0, false) <= 50.0);
        }
    }
}
