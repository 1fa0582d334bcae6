/// Narrowest gutter, in columns
pub const MIN_WIDTH: usize = 4;

/// Line-number column text for a document with `line_count` lines
pub fn line_numbers(line_count: usize) -> String {
    (1..=line_count.max(1))
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Columns needed to show the largest line number
pub fn width(line_count: usize) -> usize {
    line_count.max(1).to_string().len().max(MIN_WIDTH)
}
