use itertools::Itertools;

/// Outputs up to this many lines are kept whole.
pub const MAX_UNTRUNCATED_LINES: usize = 12;
pub const HEAD_LINES: usize = 3;
pub const TAIL_LINES: usize = 9;
pub const ELLIPSIS: &str = "...";

/// Reduces captured output to at most 13 lines.
///
/// Up to [`MAX_UNTRUNCATED_LINES`] lines are joined unchanged. Longer output
/// keeps the first [`HEAD_LINES`], an [`ELLIPSIS`] line, and the last
/// [`TAIL_LINES`]. Line contents are never inspected.
pub fn truncate<S: AsRef<str>>(lines: &[S]) -> String {
    if lines.len() <= MAX_UNTRUNCATED_LINES {
        return lines.iter().map(AsRef::as_ref).join("\n");
    }

    let head = lines[..HEAD_LINES].iter().map(AsRef::as_ref);
    let tail = lines[lines.len() - TAIL_LINES..].iter().map(AsRef::as_ref);

    head.chain(std::iter::once(ELLIPSIS)).chain(tail).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn test_short_output_is_joined_unchanged() {
        let lines = numbered(12);
        assert_eq!(truncate(&lines), lines.join("\n"));
    }

    #[test]
    fn test_empty_output() {
        let lines: Vec<String> = Vec::new();
        assert_eq!(truncate(&lines), "");
    }

    #[test]
    fn test_long_output_keeps_head_and_tail() {
        let lines = numbered(40);
        let truncated = truncate(&lines);
        let result: Vec<&str> = truncated.split('\n').collect();

        assert_eq!(result.len(), 13);
        assert_eq!(&result[..3], &["line 1", "line 2", "line 3"]);
        assert_eq!(result[3], "...");
        let expected_tail: Vec<String> = (32..=40).map(|i| format!("line {i}")).collect();
        assert_eq!(&result[4..], expected_tail.as_slice());
    }

    #[test]
    fn test_thirteen_lines_drops_only_line_four() {
        let lines = numbered(13);
        let truncated = truncate(&lines);
        let result: Vec<&str> = truncated.split('\n').collect();

        assert_eq!(result.len(), 13);
        assert_eq!(result[3], "...");
        assert_eq!(result[4], "line 5");
        assert!(!result.contains(&"line 4"));
    }

    #[test]
    fn test_content_is_not_inspected() {
        let lines = vec![String::new(); 20];
        let truncated = truncate(&lines);
        assert_eq!(truncated.split('\n').count(), 13);
        assert_eq!(truncated.split('\n').nth(3), Some("..."));
    }

    #[test]
    fn test_idempotent_on_short_output() {
        for count in [0, 1, 5, 12] {
            let once = truncate(&numbered(count));
            let lines: Vec<&str> = if once.is_empty() {
                Vec::new()
            } else {
                once.split('\n').collect()
            };
            assert_eq!(truncate(&lines), once);
        }
    }
}
