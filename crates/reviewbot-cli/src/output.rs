use serde::Serialize;
use std::fmt::Write as _;

const COLUMN_GAP: &str = "  ";

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) {
    print!("{}", render_table(headers, rows));
}

/// Left-aligned columns sized to their widest cell (in chars), a dashed rule
/// under the header, no trailing padding on any line.
fn render_table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> String {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &widths, headers.iter().copied());
    let rule = widths.map(|w| "-".repeat(w));
    push_line(&mut out, &widths, rule.iter().map(String::as_str));
    for row in rows {
        push_line(&mut out, &widths, row.iter().map(String::as_str));
    }
    out
}

fn push_line<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    let mut line = String::new();
    for (i, (cell, &width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        let _ = write!(line, "{cell:<width$}");
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_to_widest_cell_and_trims_line_ends() {
        let rows = [
            ["backend review".to_string(), "all-users".to_string(), "1".to_string()],
            ["docs".to_string(), "teams".to_string(), "-".to_string()],
        ];
        let rendered = render_table(["LEAF", "MODE", "COUNT"], &rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "LEAF            MODE       COUNT",
                "--------------  ---------  -----",
                "backend review  all-users  1",
                "docs            teams      -",
            ]
        );
    }

    #[test]
    fn table_widths_count_chars_not_bytes() {
        let rows = [["ünïcode".to_string()]];
        let rendered = render_table(["NAME"], &rows);
        assert_eq!(rendered, "NAME\n-------\nünïcode\n");
    }

    #[test]
    fn empty_table_is_header_and_rule() {
        let rendered = render_table(["A", "BB"], &[]);
        assert_eq!(rendered, "A  BB\n-  --\n");
    }
}
