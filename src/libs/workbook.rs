//! Styled workbook construction and `.xlsx` serialization.
//!
//! [`build_workbook`] turns logical [`SheetGrid`]s into a [`Workbook`] model
//! carrying every presentation decision: frozen header, per-cell borders and
//! alignment, header/zebra fills, column widths and print setup. The model is
//! plain data so it can be inspected directly; [`Workbook::to_buffer`] is the
//! only step that touches `rust_xlsxwriter` and the only one that can fail.
//!
//! ## Layout Rules
//!
//! - Header row bold and centered, other rows left-aligned
//! - Thin `#CBD5E1` border, wrapped text and vertical centering on every cell
//! - With colors: header filled `#E8F1FF`, every other data row `#F7F7F8`
//!   starting with the first one
//! - Column width `min(40, max(4, longest value) + 2)`
//! - Print area covers the whole grid and row 1 repeats on every page
//! - With print layout: landscape, one page wide and tall, centered, half-inch
//!   margins and quarter-inch header/footer
//! - Text longer than a cell can hold is cut to 32,767 characters

use crate::libs::error::ExportError;
use crate::libs::sheet::{Cell, SheetGrid};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Worksheet, XlsxError};
use std::collections::HashSet;

/// Longest sheet name accepted by spreadsheet applications.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Longest text a single cell can hold.
pub const MAX_CELL_TEXT_LEN: usize = 32_767;

pub const HEADER_FILL: u32 = 0xE8F1FF;
pub const ZEBRA_FILL: u32 = 0xF7F7F8;
pub const BORDER_COLOR: u32 = 0xCBD5E1;

const MIN_CONTENT_WIDTH: usize = 4;
const MAX_COLUMN_WIDTH: usize = 40;
const COLUMN_PADDING: usize = 2;

const FORBIDDEN_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkbookOptions {
    /// Landscape, fit to a single page, centered, fixed margins.
    pub apply_print_layout: bool,
    /// Header and zebra fills.
    pub apply_colors: bool,
}

impl Default for WorkbookOptions {
    fn default() -> Self {
        Self {
            apply_print_layout: true,
            apply_colors: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    Center,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub bold: bool,
    pub fill: Option<u32>,
    pub align: HorizontalAlign,
    pub border_color: u32,
    pub wrap: bool,
    pub vertical_center: bool,
}

impl CellStyle {
    fn for_row(row: usize, options: WorkbookOptions) -> Self {
        let header = row == 0;
        let fill = match (options.apply_colors, header) {
            (false, _) => None,
            (true, true) => Some(HEADER_FILL),
            (true, false) if row % 2 == 1 => Some(ZEBRA_FILL),
            (true, false) => None,
        };

        Self {
            bold: header,
            fill,
            align: if header { HorizontalAlign::Center } else { HorizontalAlign::Left },
            border_color: BORDER_COLOR,
            wrap: true,
            vertical_center: true,
        }
    }

    fn to_format(self) -> Format {
        let mut format = Format::new()
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::RGB(self.border_color))
            .set_align(match self.align {
                HorizontalAlign::Center => FormatAlign::Center,
                HorizontalAlign::Left => FormatAlign::Left,
            });

        if self.vertical_center {
            format = format.set_align(FormatAlign::VerticalCenter);
        }
        if self.wrap {
            format = format.set_text_wrap();
        }
        if self.bold {
            format = format.set_bold();
        }
        if let Some(fill) = self.fill {
            format = format.set_background_color(Color::RGB(fill));
        }
        format
    }
}

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub header: f64,
    pub footer: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 0.5,
            right: 0.5,
            top: 0.5,
            bottom: 0.5,
            header: 0.25,
            footer: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub landscape: bool,
    pub fit_to_width: u16,
    pub fit_to_height: u16,
    pub center_horizontally: bool,
    pub margins: Margins,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            landscape: true,
            fit_to_width: 1,
            fit_to_height: 1,
            center_horizontally: true,
            margins: Margins::default(),
        }
    }
}

/// Print metadata; rows and columns are zero-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintSetup {
    pub last_row: u32,
    pub last_col: u16,
    pub repeat_rows: (u32, u32),
    pub page: Option<PageLayout>,
}

impl PrintSetup {
    /// Print area in A1 notation, e.g. `"A1:C3"`.
    pub fn area(&self) -> String {
        format!("A1:{}{}", column_name(self.last_col), self.last_row + 1)
    }

    /// Repeated title rows in sheet notation, e.g. `"1:1"`.
    pub fn title_rows(&self) -> String {
        format!("{}:{}", self.repeat_rows.0 + 1, self.repeat_rows.1 + 1)
    }
}

/// Frozen rows/columns above and left of the split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreezePane {
    pub rows: u32,
    pub cols: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
    pub styles: Vec<Vec<CellStyle>>,
    pub freeze: Option<FreezePane>,
    pub column_widths: Vec<f64>,
    pub print: Option<PrintSetup>,
}

impl Sheet {
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn style(&self, row: usize, col: usize) -> Option<&CellStyle> {
        self.styles.get(row).and_then(|r| r.get(col))
    }

    /// Number of styled cells.
    pub fn formatted_cells(&self) -> usize {
        self.styles.iter().map(Vec::len).sum()
    }

    fn write_to(&self, worksheet: &mut Worksheet) -> Result<(), ExportError> {
        worksheet.set_name(&self.name)?;

        for (r, (cells, styles)) in self.rows.iter().zip(&self.styles).enumerate() {
            let row = u32::try_from(r).map_err(|_| XlsxError::RowColumnLimitError)?;
            for (c, (cell, style)) in cells.iter().zip(styles).enumerate() {
                let col = u16::try_from(c).map_err(|_| XlsxError::RowColumnLimitError)?;
                let format = style.to_format();
                match cell {
                    Cell::Text(text) => worksheet.write_string_with_format(row, col, text, &format)?,
                    Cell::Number(value) => worksheet.write_number_with_format(row, col, *value, &format)?,
                    Cell::Empty => worksheet.write_blank(row, col, &format)?,
                };
            }
        }

        if let Some(freeze) = self.freeze {
            worksheet.set_freeze_panes(freeze.rows, freeze.cols)?;
        }

        for (col, width) in self.column_widths.iter().enumerate() {
            let col = u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)?;
            worksheet.set_column_width(col, *width)?;
        }

        if let Some(print) = self.print {
            worksheet.set_print_area(0, 0, print.last_row, print.last_col)?;
            worksheet.set_repeat_rows(print.repeat_rows.0, print.repeat_rows.1)?;

            if let Some(page) = print.page {
                if page.landscape {
                    worksheet.set_landscape();
                }
                let m = page.margins;
                worksheet
                    .set_print_fit_to_pages(page.fit_to_width, page.fit_to_height)
                    .set_print_center_horizontally(page.center_horizontally)
                    .set_margins(m.left, m.right, m.top, m.bottom, m.header, m.footer);
            }
        }

        Ok(())
    }
}

/// Ordered sheets ready for serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }

    /// Serializes the workbook into an Office Open XML (`.xlsx`) buffer.
    pub fn to_buffer(&self) -> Result<Vec<u8>, ExportError> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        for sheet in &self.sheets {
            sheet.write_to(workbook.add_worksheet())?;
        }
        Ok(workbook.save_to_buffer()?)
    }
}

/// Spreadsheet column letters for a zero-based index (`0` -> `A`, `26` -> `AA`).
pub fn column_name(col: u16) -> String {
    let mut n = col as u32 + 1;
    let mut name = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        name.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    name.iter().rev().collect()
}

/// Width of one column: longest rendered value (at least 4) plus padding, capped at 40.
pub fn column_width(rows: &[Vec<Cell>], col: usize) -> f64 {
    let longest = rows
        .iter()
        .filter_map(|row| row.get(col))
        .filter_map(Cell::display_len)
        .fold(MIN_CONTENT_WIDTH, usize::max);
    (longest + COLUMN_PADDING).min(MAX_COLUMN_WIDTH) as f64
}

/// Sheet name safe for spreadsheet applications and unique within `taken`.
///
/// Forbidden characters become `-`, surrounding apostrophes are dropped, the
/// result is cut to 31 characters and a ` (n)` suffix resolves clashes.
fn sheet_name(raw: &str, taken: &mut HashSet<String>) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if FORBIDDEN_NAME_CHARS.contains(&c) { '-' } else { c })
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'');
    let base = if cleaned.is_empty() { "Sheet" } else { cleaned };

    let truncate = |text: &str, len: usize| -> String { text.chars().take(len).collect::<String>().trim_end().to_string() };

    let mut name = truncate(base, MAX_SHEET_NAME_LEN);
    let mut counter = 2;
    while taken.contains(&name.to_lowercase()) {
        let suffix = format!(" ({})", counter);
        name = format!("{}{}", truncate(base, MAX_SHEET_NAME_LEN - suffix.len()), suffix);
        counter += 1;
    }

    taken.insert(name.to_lowercase());
    name
}

/// Cuts text to [`MAX_CELL_TEXT_LEN`] characters.
fn fit_cell_text(cell: Cell) -> Cell {
    match cell {
        Cell::Text(text) if text.chars().count() > MAX_CELL_TEXT_LEN => {
            Cell::Text(text.chars().take(MAX_CELL_TEXT_LEN).collect())
        }
        cell => cell,
    }
}

fn build_sheet(grid: &SheetGrid, name: String, options: WorkbookOptions) -> Sheet {
    if grid.is_empty() || grid.width() == 0 {
        return Sheet {
            name,
            rows: Vec::new(),
            styles: Vec::new(),
            freeze: None,
            column_widths: Vec::new(),
            print: None,
        };
    }

    let rows: Vec<Vec<Cell>> = grid
        .normalized_rows()
        .into_iter()
        .map(|row| row.into_iter().map(fit_cell_text).collect())
        .collect();
    let width = grid.width();

    let styles = rows
        .iter()
        .enumerate()
        .map(|(r, row)| vec![CellStyle::for_row(r, options); row.len()])
        .collect();

    let column_widths = (0..width).map(|col| column_width(&rows, col)).collect();

    // Oversized grids saturate here and are rejected by the writer.
    let print = PrintSetup {
        last_row: u32::try_from(rows.len() - 1).unwrap_or(u32::MAX),
        last_col: u16::try_from(width - 1).unwrap_or(u16::MAX),
        repeat_rows: (0, 0),
        page: options.apply_print_layout.then(PageLayout::default),
    };

    Sheet {
        name,
        rows,
        styles,
        freeze: Some(FreezePane { rows: 1, cols: 1 }),
        column_widths,
        print: Some(print),
    }
}

/// Builds the styled workbook model for `sheets`, in order.
///
/// Never fails: ragged rows are padded to the header width and a sheet with
/// no rows is emitted bare, without cells or layout.
pub fn build_workbook(sheets: &[SheetGrid], options: WorkbookOptions) -> Workbook {
    let mut taken = HashSet::new();
    let sheets = sheets
        .iter()
        .map(|grid| {
            let name = sheet_name(&grid.name, &mut taken);
            build_sheet(grid, name, options)
        })
        .collect();
    Workbook { sheets }
}
