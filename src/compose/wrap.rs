//! Greedy word wrapping over Unicode code points.
//!
//! Counting operates on code points, never bytes, so multi-byte scripts wrap
//! at the same visual density as ASCII. Concatenating the returned lines
//! (reinserting one space where a soft break dropped it) reconstructs the
//! caption exactly.

/// Split `caption` into display lines of at most `max_line` code points.
///
/// Single forward scan: while the remainder is too long, the scan tracks the
/// most recent whitespace and cuts there when it reaches the `max_line`-th
/// code point, dropping the whitespace itself. A window with no whitespace
/// degrades to a hard cut at exactly `max_line` code points (mid-word break,
/// nothing dropped).
///
/// An empty caption yields no lines; the renderer treats that as a no-op.
pub fn wrap_caption(caption: &str, max_line: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = caption;

    while !rest.is_empty() {
        if rest.chars().count() <= max_line {
            lines.push(rest.to_string());
            break;
        }

        // Byte offsets of the cut: end of this line, start of the remainder.
        // The scan always reaches `max_line` because the remainder is longer.
        let mut last_space: Option<(usize, usize)> = None;
        let mut line_end = rest.len();
        let mut rest_start = rest.len();
        for (seen, (byte_idx, ch)) in rest.char_indices().enumerate() {
            if ch.is_whitespace() {
                last_space = Some((byte_idx, byte_idx + ch.len_utf8()));
            }
            if seen == max_line {
                (line_end, rest_start) = match last_space {
                    Some((space_start, space_end)) => (space_start, space_end),
                    None => (byte_idx, byte_idx),
                };
                break;
            }
        }

        lines.push(rest[..line_end].to_string());
        rest = &rest[rest_start..];
    }

    lines
}
