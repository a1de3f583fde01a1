/// Convert a 0-based byte offset into a 1-based (line, column) pair.
///
/// Offsets past the end of `data` are clamped to its length, so the last
/// position of the text is reported instead.
pub fn line_column_from_offset(data: &[u8], offset: usize) -> (usize, usize) {
    let offset = offset.min(data.len());
    let preceding = &data[..offset];

    let line = 1 + preceding.iter().filter(|b| **b == b'\n').count();
    let line_start = preceding
        .iter()
        .rposition(|b| *b == b'\n')
        .map_or(0, |i| i + 1);

    (line, offset - line_start + 1)
}

/// Render `line` together with up to `before` preceding and `after` following
/// lines, each prefixed with its right-aligned 1-based line number.
///
/// Text that is empty or ends in a newline has an empty last line; it is
/// shown only when `line` points at it, as "end of input" errors do.
pub fn lines_before_and_after(data: &[u8], line: usize, before: usize, after: usize) -> String {
    let mut lines: Vec<&[u8]> = data.split_inclusive(|b| *b == b'\n').collect();
    if line == lines.len() + 1 && data.last().is_none_or(|b| *b == b'\n') {
        lines.push(b"");
    }
    if line == 0 || line > lines.len() {
        return String::new();
    }

    let first = line.saturating_sub(before).max(1);
    let last = (line + after).min(lines.len());
    let width = last.to_string().len();

    lines[first - 1..last]
        .iter()
        .zip(first..)
        .map(|(text, number)| format!("{number:>width$}: {}", String::from_utf8_lossy(text)))
        .collect()
}
