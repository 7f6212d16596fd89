pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

pub fn clamp_cursor(cursor: usize, value: &str) -> usize {
    cursor.min(char_count(value))
}

pub fn insert_char(value: &mut String, cursor: &mut usize, ch: char) {
    let pos = clamp_cursor(*cursor, value);
    let byte_pos = byte_index_at_char(value, pos);
    value.insert(byte_pos, ch);
    *cursor = pos + 1;
}

pub fn backspace_char(value: &mut String, cursor: &mut usize) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos == 0 {
        return false;
    }
    let byte_pos = byte_index_at_char(value, pos - 1);
    value.remove(byte_pos);
    *cursor = pos - 1;
    true
}

pub fn delete_char(value: &mut String, cursor: &mut usize) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos >= char_count(value) {
        return false;
    }
    let byte_pos = byte_index_at_char(value, pos);
    value.remove(byte_pos);
    *cursor = pos;
    true
}

pub fn move_left(cursor: &mut usize, value: &str) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos == 0 {
        return false;
    }
    *cursor = pos - 1;
    true
}

pub fn move_right(cursor: &mut usize, value: &str) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos >= char_count(value) {
        return false;
    }
    *cursor = pos + 1;
    true
}

/// Deletes back to the previous date/time separator.
pub fn delete_segment_left(value: &mut String, cursor: &mut usize) -> bool {
    let mut chars: Vec<char> = value.chars().collect();
    let pos = (*cursor).min(chars.len());
    if pos == 0 {
        *cursor = 0;
        return false;
    }

    let mut start = pos;
    while start > 0 && is_separator(chars[start - 1]) {
        start -= 1;
    }
    while start > 0 && !is_separator(chars[start - 1]) {
        start -= 1;
    }

    chars.drain(start..pos);
    *value = chars.into_iter().collect();
    *cursor = start;
    true
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '.' | '/' | ',' | '-' | ':')
}

fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_delete_around_cursor() {
        let mut value = String::from("06/16");
        let mut cursor = 2;
        insert_char(&mut value, &mut cursor, '1');
        assert_eq!((value.as_str(), cursor), ("061/16", 3));
        assert!(backspace_char(&mut value, &mut cursor));
        assert!(delete_char(&mut value, &mut cursor));
        assert_eq!((value.as_str(), cursor), ("0616", 2));
        cursor = 4;
        assert!(!delete_char(&mut value, &mut cursor));
    }

    #[test]
    fn segment_delete_stops_at_separator() {
        let mut value = String::from("06/16/2015");
        let mut cursor = char_count(&value);
        assert!(delete_segment_left(&mut value, &mut cursor));
        assert_eq!((value.as_str(), cursor), ("06/16/", 6));
        assert!(delete_segment_left(&mut value, &mut cursor));
        assert_eq!((value.as_str(), cursor), ("06/", 3));
    }

    #[test]
    fn cursor_moves_are_clamped() {
        let mut cursor = 0;
        assert!(!move_left(&mut cursor, "ab"));
        assert!(move_right(&mut cursor, "ab"));
        cursor = 9;
        assert!(!move_right(&mut cursor, "ab"));
        assert_eq!(clamp_cursor(cursor, "ab"), 2);
    }
}
