//! Block-flow page layout.
//!
//! Content blocks are placed top to bottom and spill onto new pages. Every page is handed
//! to a [`PageDecorator`] as soon as it is opened, before any content lands on it, so the
//! decoration sits underneath the flowed content. Coordinates are millimetres from the
//! bottom-left corner of the page; font sizes are points.

use super::metrics::glyph_width;
use super::styles::{Align, FontWeight, PageGeometry, RgbColor, TextStyle};
use crate::errors::AppError;

/// Millimetres per typographic point.
pub const PT_TO_MM: f32 = 0.352_778;

const LINE_SPACING: f32 = 1.2;
const CELL_PADDING: f32 = 2.0;
const ELLIPSIS: &str = "...";

/// One drawing instruction on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        /// Baseline
        y: f32,
        size: f32,
        weight: FontWeight,
        color: RgbColor,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: RgbColor,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        color: RgbColor,
    },
}

/// A page under construction.
#[derive(Debug, Clone)]
pub struct Page {
    pub number: usize,
    pub geometry: PageGeometry,
    pub ops: Vec<DrawOp>,
}

impl Page {
    fn new(number: usize, geometry: PageGeometry) -> Self {
        Self {
            number,
            geometry,
            ops: Vec::new(),
        }
    }

    pub fn text(&mut self, text: &str, x: f32, y: f32, size: f32, weight: FontWeight, color: RgbColor) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            size,
            weight,
            color,
        });
    }

    /// Place `text` inside `[left, left + width]` according to `align`.
    pub fn aligned_text(&mut self, text: &str, left: f32, width: f32, y: f32, style: &TextStyle) {
        let text_width = text_width(text, style.size, style.weight);
        let x = match style.align {
            Align::Left => left,
            Align::Center => left + (width - text_width) / 2.0,
            Align::Right => left + width - text_width,
        };
        self.text(text, x, y, style.size, style.weight, style.color);
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: RgbColor) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), thickness: f32, color: RgbColor) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            thickness,
            color,
        });
    }

    /// All text placed on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Page-level decoration applied to every page when it is opened.
pub trait PageDecorator {
    fn decorate(&self, page: &mut Page);
}

/// Table column definition.
#[derive(Debug, Clone)]
pub struct Column {
    pub title: String,
    /// Relative width; columns share the content width in proportion
    pub weight: f32,
}

/// A table whose header row repeats on every page it spans.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub header_style: TextStyle,
    pub cell_style: TextStyle,
    pub header_fill: RgbColor,
    pub stripe_fill: Option<RgbColor>,
    pub grid: RgbColor,
}

/// A unit of flowed content.
#[derive(Debug, Clone)]
pub enum Block {
    Paragraph { text: String, style: TextStyle },
    /// Vertical gap in millimetres
    Spacer(f32),
    Table(Table),
}

impl Block {
    pub fn paragraph(text: impl Into<String>, style: TextStyle) -> Self {
        Block::Paragraph {
            text: text.into(),
            style,
        }
    }
}

/// Finished layout, ready for a PDF backend.
#[derive(Debug, Clone)]
pub struct LaidOutDocument {
    pub title: String,
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl LaidOutDocument {
    /// All text of the document, page after page.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|page| page.texts())
    }
}

/// Flow `blocks` onto pages of `geometry`, decorating each page as it opens.
pub fn layout_document(
    title: &str,
    geometry: PageGeometry,
    blocks: &[Block],
    decorator: &dyn PageDecorator,
) -> Result<LaidOutDocument, AppError> {
    if geometry.content_width() <= 0.0 || geometry.content_top() <= geometry.content_bottom() {
        return Err(AppError::Render(format!(
            "page {}x{}mm leaves no room for content",
            geometry.width, geometry.height
        )));
    }

    let mut flow = Flow::new(geometry, decorator);
    for block in blocks {
        match block {
            Block::Paragraph { text, style } => flow.paragraph(text, style)?,
            Block::Spacer(height) => flow.spacer(*height),
            Block::Table(table) => flow.table(table)?,
        }
    }

    Ok(LaidOutDocument {
        title: title.to_string(),
        geometry,
        pages: flow.pages,
    })
}

struct Flow<'a> {
    geometry: PageGeometry,
    decorator: &'a dyn PageDecorator,
    pages: Vec<Page>,
    cursor: f32,
}

impl<'a> Flow<'a> {
    fn new(geometry: PageGeometry, decorator: &'a dyn PageDecorator) -> Self {
        let mut flow = Self {
            geometry,
            decorator,
            pages: Vec::new(),
            cursor: 0.0,
        };
        flow.new_page();
        flow
    }

    fn new_page(&mut self) {
        let mut page = Page::new(self.pages.len() + 1, self.geometry);
        self.decorator.decorate(&mut page);
        self.pages.push(page);
        self.cursor = self.geometry.content_top();
    }

    fn page(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn at_page_top(&self) -> bool {
        self.cursor >= self.geometry.content_top()
    }

    fn remaining(&self) -> f32 {
        self.cursor - self.geometry.content_bottom()
    }

    fn content_height(&self) -> f32 {
        self.geometry.content_top() - self.geometry.content_bottom()
    }

    fn spacer(&mut self, height: f32) {
        if self.at_page_top() {
            return;
        }
        if height >= self.remaining() {
            self.new_page();
        } else {
            self.cursor -= height;
        }
    }

    fn paragraph(&mut self, text: &str, style: &TextStyle) -> Result<(), AppError> {
        let line_height = style.size * LINE_SPACING * PT_TO_MM;
        if line_height > self.content_height() {
            return Err(AppError::Render(format!(
                "{}pt text does not fit on a page",
                style.size
            )));
        }

        self.spacer(style.space_before * PT_TO_MM);

        let left = self.geometry.margin_left;
        let width = self.geometry.content_width();
        for line in wrap_text(text, width, style.size, style.weight) {
            if line_height > self.remaining() {
                self.new_page();
            }
            let baseline = self.cursor - style.size * PT_TO_MM;
            self.page().aligned_text(&line, left, width, baseline, style);
            self.cursor -= line_height;
        }

        self.spacer(style.space_after * PT_TO_MM);
        Ok(())
    }

    fn table(&mut self, table: &Table) -> Result<(), AppError> {
        if table.columns.is_empty() {
            return Err(AppError::Render("table has no columns".to_string()));
        }
        let total_weight: f32 = table.columns.iter().map(|c| c.weight).sum();
        if total_weight <= 0.0 {
            return Err(AppError::Render("table columns have no width".to_string()));
        }

        let width = self.geometry.content_width();
        let widths: Vec<f32> = table
            .columns
            .iter()
            .map(|c| width * c.weight / total_weight)
            .collect();
        let header_height = row_height(&table.header_style);
        let body_height = row_height(&table.cell_style);
        if header_height + body_height > self.content_height() {
            return Err(AppError::Render("table row does not fit on a page".to_string()));
        }

        // Header plus the first row must share a page
        if header_height + body_height > self.remaining() {
            self.new_page();
        }
        self.table_header(table, &widths, header_height);

        for (index, row) in table.rows.iter().enumerate() {
            if body_height > self.remaining() {
                self.new_page();
                self.table_header(table, &widths, header_height);
            }
            let fill = if index % 2 == 1 {
                table.stripe_fill
            } else {
                None
            };
            self.table_row(row, &widths, body_height, &table.cell_style, fill, table.grid);
        }
        Ok(())
    }

    fn table_header(&mut self, table: &Table, widths: &[f32], height: f32) {
        let left = self.geometry.margin_left;
        let total: f32 = widths.iter().sum();
        let top = self.cursor;
        self.page()
            .fill_rect(left, top - height, total, height, table.header_fill);
        self.page()
            .line((left, top), (left + total, top), 0.5, table.grid);
        let titles: Vec<String> = table.columns.iter().map(|c| c.title.clone()).collect();
        self.table_row(&titles, widths, height, &table.header_style, None, table.grid);
    }

    fn table_row(
        &mut self,
        cells: &[String],
        widths: &[f32],
        height: f32,
        style: &TextStyle,
        fill: Option<RgbColor>,
        grid: RgbColor,
    ) {
        let left = self.geometry.margin_left;
        let total: f32 = widths.iter().sum();
        let top = self.cursor;
        let bottom = top - height;
        let baseline = bottom + (height - style.size * PT_TO_MM) / 2.0 + style.size * PT_TO_MM * 0.2;
        let page = self.page();

        if let Some(color) = fill {
            page.fill_rect(left, bottom, total, height, color);
        }

        let mut x = left;
        for (index, width) in widths.iter().enumerate() {
            let cell = cells.get(index).map(String::as_str).unwrap_or("");
            let inner = width - 2.0 * CELL_PADDING;
            let fitted = fit_text(cell, inner, style.size, style.weight);
            page.aligned_text(&fitted, x + CELL_PADDING, inner, baseline, style);
            page.line((x, top), (x, bottom), 0.5, grid);
            x += width;
        }
        page.line((x, top), (x, bottom), 0.5, grid);
        page.line((left, bottom), (left + total, bottom), 0.5, grid);

        self.cursor = bottom;
    }
}

fn row_height(style: &TextStyle) -> f32 {
    style.size * PT_TO_MM + 2.0 * CELL_PADDING + 1.0
}

/// Advance width of `text` in millimetres for the built-in Helvetica faces.
pub fn text_width(text: &str, size: f32, weight: FontWeight) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(c, weight))).sum();
    units as f32 / 1000.0 * size * PT_TO_MM
}

/// Break `text` into lines no wider than `max_width`. Explicit newlines are kept.
pub fn wrap_text(text: &str, max_width: f32, size: f32, weight: FontWeight) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if text_width(&candidate, size, weight) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            // A single word wider than the line is split by characters
            let mut piece = String::new();
            for ch in word.chars() {
                piece.push(ch);
                if text_width(&piece, size, weight) > max_width && piece.chars().count() > 1 {
                    piece.pop();
                    lines.push(std::mem::take(&mut piece));
                    piece.push(ch);
                }
            }
            current = piece;
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Shorten `text` with an ellipsis until it fits `max_width`.
pub fn fit_text(text: &str, max_width: f32, size: f32, weight: FontWeight) -> String {
    if text_width(text, size, weight) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + ELLIPSIS;
        if text_width(&candidate, size, weight) <= max_width {
            return candidate;
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::styles::ReportStyles;

    struct PageNumbers;

    impl PageDecorator for PageNumbers {
        fn decorate(&self, page: &mut Page) {
            let label = format!("page {}", page.number);
            page.text(&label, 10.0, 10.0, 8.0, FontWeight::Regular, RgbColor::GREY);
        }
    }

    fn styles() -> ReportStyles {
        ReportStyles::new("Painel", "Rua A, 1")
    }

    fn table(rows: usize) -> Table {
        let s = styles();
        Table {
            columns: vec![
                Column {
                    title: "Nome".into(),
                    weight: 3.0,
                },
                Column {
                    title: "Total".into(),
                    weight: 1.0,
                },
            ],
            rows: (0..rows)
                .map(|i| vec![format!("Vendedor {}", i), i.to_string()])
                .collect(),
            header_style: s.table_header,
            cell_style: s.table_cell,
            header_fill: s.table_header_fill,
            stripe_fill: Some(s.table_stripe_fill),
            grid: s.table_grid,
        }
    }

    #[test]
    fn test_wrap_respects_width_and_newlines() {
        let lines = wrap_text("um dois tres quatro cinco seis", 20.0, 10.0, FontWeight::Regular);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0, FontWeight::Regular) <= 20.0);
        }
        assert_eq!(lines.join(" "), "um dois tres quatro cinco seis");

        let lines = wrap_text("linha 1\nlinha 2", 500.0, 10.0, FontWeight::Regular);
        assert_eq!(lines, ["linha 1", "linha 2"]);
    }

    #[test]
    fn test_wrap_splits_overlong_words() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, 30.0, 10.0, FontWeight::Regular);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_wide_glyphs_still_fit_their_cell() {
        let shouty = "WWW MMMM WWWWW MMM WWWW";
        assert!(text_width("WWWW", 10.0, FontWeight::Regular) > text_width("iiii", 10.0, FontWeight::Regular) * 3.0);

        let fitted = fit_text(shouty, 25.0, 9.0, FontWeight::Bold);
        assert!(fitted.ends_with(ELLIPSIS));
        assert!(text_width(&fitted, 9.0, FontWeight::Bold) <= 25.0);

        for line in wrap_text(shouty, 25.0, 10.0, FontWeight::Regular) {
            assert!(text_width(&line, 10.0, FontWeight::Regular) <= 25.0);
        }
    }

    #[test]
    fn test_fit_text_adds_ellipsis() {
        assert_eq!(fit_text("curto", 100.0, 9.0, FontWeight::Regular), "curto");
        let fitted = fit_text(&"nome comprido ".repeat(10), 30.0, 9.0, FontWeight::Regular);
        assert!(fitted.ends_with(ELLIPSIS));
        assert!(text_width(&fitted, 9.0, FontWeight::Regular) <= 30.0);
    }

    #[test]
    fn test_every_page_is_decorated_once() {
        let s = styles();
        let blocks: Vec<Block> = (0..200)
            .map(|i| Block::paragraph(format!("Paragrafo {}", i), s.body))
            .collect();

        let doc = layout_document("t", s.page, &blocks, &PageNumbers).unwrap();

        assert!(doc.pages.len() > 1);
        for page in &doc.pages {
            let label = format!("page {}", page.number);
            assert_eq!(page.texts().filter(|t| *t == label).count(), 1);
            // Decoration precedes flowed content
            assert_eq!(page.texts().next(), Some(label.as_str()));
        }
    }

    #[test]
    fn test_long_table_repeats_header_on_each_page() {
        let s = styles();
        let doc = layout_document("t", s.page, &[Block::Table(table(120))], &PageNumbers).unwrap();

        assert!(doc.pages.len() > 1);
        for page in &doc.pages {
            assert_eq!(page.texts().filter(|t| *t == "Nome").count(), 1);
        }
        let rows = doc
            .texts()
            .filter(|t| t.starts_with("Vendedor "))
            .count();
        assert_eq!(rows, 120);
    }

    #[test]
    fn test_content_stays_inside_margins() {
        let s = styles();
        let doc = layout_document("t", s.page, &[Block::Table(table(80))], &PageNumbers).unwrap();
        for page in &doc.pages {
            for op in &page.ops {
                if let DrawOp::FillRect { y, .. } = op {
                    assert!(*y >= s.page.content_bottom() - 0.01);
                }
            }
        }
    }

    #[test]
    fn test_degenerate_page_is_a_render_error() {
        let s = styles();
        let mut page = s.page;
        page.margin_top = 200.0;
        page.margin_bottom = 200.0;
        let result = layout_document("t", page, &[], &PageNumbers);
        assert!(matches!(result, Err(AppError::Render(_))));
    }
}
