/// Estimate the buffer offset under a click inside a rendered widget.
///
/// Proportional and monospace-unaware: the click's fraction of the widget
/// width picks the same fraction of the line's characters. The result always
/// lands inside the line, which is all that matters once the line turns raw.
///
/// Counting is done in characters and converted back to a byte offset, so
/// the result is always on a char boundary.
pub fn map_click_to_offset(
    click_x: f64,
    widget_width: f64,
    raw_text: &str,
    line_start: usize,
) -> usize {
    let char_len = raw_text.chars().count();
    let ratio = click_x / widget_width;
    let ratio = if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    };
    let char_index = ((ratio * char_len as f64).round() as usize).min(char_len);
    line_start + byte_offset(raw_text, char_index)
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 100.0, 10)]
    #[case(50.0, 100.0, 15)]
    #[case(100.0, 100.0, 20)]
    #[case(-20.0, 100.0, 10)]
    #[case(500.0, 100.0, 20)]
    #[case(14.0, 100.0, 11)]
    #[case(16.0, 100.0, 12)]
    #[case(10.0, 0.0, 20)]
    #[case(-10.0, 0.0, 10)]
    #[case(0.0, 0.0, 10)]
    #[case(f64::NAN, 100.0, 10)]
    fn proportional_mapping(#[case] x: f64, #[case] width: f64, #[case] expected: usize) {
        assert_eq!(map_click_to_offset(x, width, "0123456789", 10), expected);
    }

    #[test]
    fn empty_line_maps_to_line_start() {
        assert_eq!(map_click_to_offset(40.0, 80.0, "", 7), 7);
    }

    #[test]
    fn multibyte_text_lands_on_char_boundary() {
        // four chars, nine bytes
        let text = "é日本x";
        let offset = map_click_to_offset(50.0, 100.0, text, 0);
        assert_eq!(offset, 5);
        assert!(text.is_char_boundary(offset));
    }
}
