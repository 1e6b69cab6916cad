//! Cell spanning for parsed tables.
//!
//! After a table is fully collected, cells containing exactly `>` merge into
//! the cell on their right (widening it by one column each), and body cells
//! containing exactly `^` merge into the cell above when the column widths
//! agree. Merged cells are spliced out right to left so earlier indices stay
//! valid. Marker cells with no anchor keep their literal text.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn style(self) -> &'static str {
        match self {
            Alignment::Left => "text-align: left;",
            Alignment::Center => "text-align: center;",
            Alignment::Right => "text-align: right;",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableCell {
    /// Trimmed cell source, still unparsed.
    pub raw: String,
    pub align: Option<Alignment>,
    pub colspan: usize,
    pub rowspan: usize,
    merged: bool,
}

impl TableCell {
    pub fn new(raw: impl Into<String>, align: Option<Alignment>) -> Self {
        Self {
            raw: raw.into(),
            align,
            colspan: 1,
            rowspan: 1,
            merged: false,
        }
    }
}

/// Runs the full spanning pass over a table's header and body rows.
pub fn collapse_spans(header: &mut Vec<TableCell>, rows: &mut [Vec<TableCell>]) {
    collapse_colspans(header);
    splice_merged(header);

    for row in rows.iter_mut() {
        collapse_colspans(row);
    }
    collapse_rowspans(rows);
    for row in rows.iter_mut() {
        splice_merged(row);
    }
}

/// Absorbs runs of `>` cells into the cell on their right. The anchor takes
/// the alignment of the leftmost absorbed cell when it carries one.
fn collapse_colspans(cells: &mut [TableCell]) {
    let mut index = cells.len();
    while index > 0 {
        index -= 1;
        let mut colspan = 1;
        let mut left = index;
        while left > 0 && cells[left - 1].raw == ">" {
            colspan += 1;
            cells[left - 1].merged = true;
            if let Some(align) = cells[left - 1].align {
                cells[index].align = Some(align);
            }
            left -= 1;
        }
        if colspan > 1 {
            cells[index].colspan = colspan;
        }
        index = left;
    }
}

/// Absorbs `^` cells into the cell above them, column widths permitting.
fn collapse_rowspans(rows: &mut [Vec<TableCell>]) {
    for row_no in 0..rows.len() {
        for index in 0..rows[row_no].len() {
            if rows[row_no][index].merged {
                continue;
            }
            let colspan = rows[row_no][index].colspan;
            let mut rowspan = 1;
            while row_no + rowspan < rows.len() {
                let below = &mut rows[row_no + rowspan];
                match below.get_mut(index) {
                    Some(cell) if cell.raw == "^" && !cell.merged && cell.colspan == colspan => {
                        cell.merged = true;
                        rowspan += 1;
                    }
                    _ => break,
                }
            }
            if rowspan > 1 {
                rows[row_no][index].rowspan = rowspan;
            }
        }
    }
}

fn splice_merged(cells: &mut Vec<TableCell>) {
    cells.retain(|cell| !cell.merged);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(raw: &str) -> TableCell {
        TableCell::new(raw, None)
    }

    #[test]
    fn colspan_absorbs_markers_to_the_left() {
        let mut header = vec![cell(">"), cell("Wide"), cell("Tail")];
        let mut rows: Vec<Vec<TableCell>> = Vec::new();
        collapse_spans(&mut header, &mut rows);

        assert_eq!(header.len(), 2);
        assert_eq!(header[0].raw, "Wide");
        assert_eq!(header[0].colspan, 2);
        assert_eq!(header[1].colspan, 1);
    }

    #[test]
    fn trailing_colspan_marker_stays_literal() {
        let mut header = vec![cell("Head"), cell(">")];
        let mut rows: Vec<Vec<TableCell>> = Vec::new();
        collapse_spans(&mut header, &mut rows);

        assert_eq!(header.len(), 2);
        assert_eq!(header[1].raw, ">");
        assert_eq!(header[1].colspan, 1);
    }

    #[test]
    fn rowspan_absorbs_caret_cells_below() {
        let mut header = vec![cell("A"), cell("B")];
        let mut rows = vec![
            vec![cell("tall"), cell("x")],
            vec![cell("^"), cell("y")],
            vec![cell("^"), cell("z")],
        ];
        collapse_spans(&mut header, &mut rows);

        assert_eq!(rows[0][0].rowspan, 3);
        assert_eq!(rows[1], vec![cell("y")]);
        assert_eq!(rows[2], vec![cell("z")]);
    }

    #[test]
    fn rowspan_requires_matching_column_width() {
        let mut header = vec![cell("A"), cell("B")];
        let mut rows = vec![
            vec![cell(">"), cell("wide")],
            vec![cell("^"), cell("n")],
        ];
        collapse_spans(&mut header, &mut rows);

        // the anchor above spans two columns, the caret below spans one
        assert_eq!(rows[0][0].colspan, 2);
        assert_eq!(rows[0][0].rowspan, 1);
        assert_eq!(rows[1][0].raw, "^");
    }

    #[test]
    fn alignment_of_absorbed_cell_wins() {
        let mut header = vec![
            TableCell::new(">", Some(Alignment::Center)),
            TableCell::new("Wide", None),
        ];
        let mut rows: Vec<Vec<TableCell>> = Vec::new();
        collapse_spans(&mut header, &mut rows);

        assert_eq!(header[0].align, Some(Alignment::Center));
    }

    #[test]
    fn collapsing_twice_changes_nothing() {
        let mut header = vec![cell(">"), cell("Wide")];
        let mut rows = vec![
            vec![cell("tall"), cell("x"), cell("y")],
            vec![cell("^"), cell("p"), cell("q")],
        ];
        collapse_spans(&mut header, &mut rows);
        let header_once = header.clone();
        let rows_once = rows.to_vec();

        collapse_spans(&mut header, &mut rows);
        assert_eq!(header, header_once);
        assert_eq!(rows, rows_once);
    }
}
