//! Column arithmetic for indentation
//!
//! Columns count tab stops: a tab advances to the next multiple of the tab
//! size. Rendering a column and measuring it again gives the same column.

/// Column of the first non-whitespace character of `line`, or of the end
/// of the line when it is blank.
pub fn column_of_first_non_whitespace(line: &str, tab_size: usize) -> usize {
    let tab_size = tab_size.max(1);
    let mut column = 0;

    for ch in line.chars() {
        match ch {
            '\t' => column += tab_size - column % tab_size,
            '\r' | '\n' => break,
            ch if ch.is_whitespace() => column += 1,
            _ => break,
        }
    }

    column
}

/// Indentation string reaching `column`: tabs plus remainder spaces when
/// `use_tabs`, otherwise spaces only.
pub fn render(column: usize, use_tabs: bool, tab_size: usize) -> String {
    if !use_tabs {
        return " ".repeat(column);
    }

    let tab_size = tab_size.max(1);
    let mut indentation = "\t".repeat(column / tab_size);
    indentation.push_str(&" ".repeat(column % tab_size));
    indentation
}
