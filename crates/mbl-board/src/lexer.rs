//! Row tokenization: the three-branch heuristic that turns one text line
//! into a sequence of two-character-ish cells, plus `#` comment stripping.

/// Split one board row into cells, then drop anything past a `#` comment.
pub fn tokenize_row(line: &str) -> Vec<String> {
    let trimmed = line.trim_end();
    let chars: Vec<char> = trimmed.chars().collect();
    let row = if chars.len() < 3 || chars[2] != ' ' {
        fixed_width_cells(&chars)
    } else if chars.len() < 4 || chars[3] != ' ' {
        trimmed.split(' ').map(str::to_string).collect()
    } else {
        trimmed.split("  ").map(str::to_string).collect()
    };
    strip_comment(row)
}

fn fixed_width_cells(chars: &[char]) -> Vec<String> {
    chars.chunks(2).map(|pair| pair.iter().collect()).collect()
}

fn strip_comment(mut row: Vec<String>) -> Vec<String> {
    for i in 0..row.len() {
        if row[i].starts_with('#') {
            row.truncate(i);
            break;
        }
        if let Some(pos) = row[i].find('#') {
            row[i].truncate(pos);
            row.truncate(i + 1);
            break;
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_row_splits_fixed_width() {
        assert_eq!(tokenize_row("4243"), vec!["42", "43"]);
        assert_eq!(tokenize_row("42"), vec!["42"]);
    }

    #[test]
    fn third_char_non_space_splits_on_single_space() {
        // "}0 ++ {0" -> chars[2] == '0' (not a space) and chars[3] is space,
        // so this actually falls into the fixed-width branch; use a row
        // whose third character really is non-space to hit the single-space
        // branch, e.g. a 3+ char cell column like "abc def".
        assert_eq!(tokenize_row("abc def"), vec!["abc", "def"]);
    }

    #[test]
    fn two_space_default_branch() {
        assert_eq!(tokenize_row("}0  ++  {0"), vec!["}0", "++", "{0"]);
    }

    #[test]
    fn comment_stripping_drops_trailing_cells() {
        assert_eq!(tokenize_row("}0  ++  # comment  {0"), vec!["}0", "++", ""]);
    }

    #[test]
    fn comment_mid_cell_truncates_and_stops() {
        assert_eq!(tokenize_row("}0  +#5  {0"), vec!["}0", "+"]);
    }
}
