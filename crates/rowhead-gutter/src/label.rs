#![forbid(unsafe_code)]

//! Line-number label text.

/// Label for the zero-based `line_index`: the 1-based number right-aligned in
/// `min_digits` columns. Numbers wider than that are kept whole.
///
/// ```
/// use rowhead_gutter::label::format_line_number;
///
/// assert_eq!(format_line_number(0, 3), "  1");
/// assert_eq!(format_line_number(999, 3), "1000");
/// ```
#[must_use]
pub fn format_line_number(line_index: usize, min_digits: usize) -> String {
    format!("{:>width$}", line_index.saturating_add(1), width = min_digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_min_digits() {
        assert_eq!(format_line_number(1, 3), "  2");
        assert_eq!(format_line_number(98, 3), " 99");
        assert_eq!(format_line_number(998, 3), "999");
    }

    #[test]
    fn never_truncates() {
        assert_eq!(format_line_number(123_455, 3), "123456");
        assert_eq!(format_line_number(9, 1), "10");
    }

    #[test]
    fn zero_width_means_no_padding() {
        assert_eq!(format_line_number(4, 0), "5");
    }
}
