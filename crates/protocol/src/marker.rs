//! Control markers for dynamic bulks

/// Opens a dynamic bulk (or nests one level deeper inside it)
pub const OPEN_MARKER: &str = "{";

/// Closes a dynamic bulk (or leaves one nesting level)
pub const CLOSE_MARKER: &str = "}";

/// Check whether a line is the open marker
#[inline]
pub fn is_open_marker(line: &str) -> bool {
    line == OPEN_MARKER
}

/// Check whether a line is the close marker
#[inline]
pub fn is_close_marker(line: &str) -> bool {
    line == CLOSE_MARKER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_are_exact() {
        assert!(is_open_marker("{"));
        assert!(is_close_marker("}"));

        assert!(!is_open_marker(" {"));
        assert!(!is_open_marker("{ "));
        assert!(!is_open_marker("{}"));
        assert!(!is_close_marker("}}"));
        assert!(!is_close_marker(""));
    }
}
