//! PDF output for laid-out documents, using the built-in Helvetica faces.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb,
};

use super::layout::{DrawOp, LaidOutDocument};
use super::metrics::is_win_ansi;
use super::styles::{FontWeight, RgbColor};
use crate::errors::AppError;

/// Serialize every page of `document` into PDF bytes.
pub fn write_pdf(document: &LaidOutDocument) -> Result<Vec<u8>, AppError> {
    if document.pages.is_empty() {
        return Err(AppError::Render("document has no pages".to_string()));
    }

    let dropped = unprintable_chars(document);
    if dropped > 0 {
        tracing::warn!(
            title = %document.title,
            dropped,
            "Characters outside the WinAnsi range cannot be shown by the built-in fonts and are left out"
        );
    }

    let width = Mm(document.geometry.width);
    let height = Mm(document.geometry.height);
    let (pdf, first_page, first_layer) =
        PdfDocument::new(document.title.clone(), width, height, "Page 1");
    let regular = pdf.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = pdf.add_builtin_font(BuiltinFont::HelveticaBold)?;

    for (index, page) in document.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            pdf.add_page(width, height, format!("Page {}", index + 1))
        };
        let layer = pdf.get_page(page_index).get_layer(layer_index);
        for op in &page.ops {
            draw(&layer, op, &regular, &bold);
        }
    }

    Ok(pdf.save_to_bytes()?)
}

fn draw(layer: &PdfLayerReference, op: &DrawOp, regular: &IndirectFontRef, bold: &IndirectFontRef) {
    match op {
        DrawOp::Text {
            text,
            x,
            y,
            size,
            weight,
            color,
        } => {
            let font = match weight {
                FontWeight::Regular => regular,
                FontWeight::Bold => bold,
            };
            layer.set_fill_color(pdf_color(*color));
            layer.use_text(text.clone(), *size, Mm(*x), Mm(*y), font);
        }
        DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        } => {
            layer.set_fill_color(pdf_color(*color));
            layer.add_rect(Rect::new(Mm(*x), Mm(*y), Mm(x + width), Mm(y + height)));
        }
        DrawOp::Line {
            from,
            to,
            thickness,
            color,
        } => {
            layer.set_outline_color(pdf_color(*color));
            layer.set_outline_thickness(*thickness);
            layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(from.0), Mm(from.1)), false),
                    (Point::new(Mm(to.0), Mm(to.1)), false),
                ],
                is_closed: false,
            });
        }
    }
}

/// Number of characters in `document` the built-in fonts will drop.
pub fn unprintable_chars(document: &LaidOutDocument) -> usize {
    document
        .texts()
        .flat_map(str::chars)
        .filter(|c| !is_win_ansi(*c))
        .count()
}

fn pdf_color(color: RgbColor) -> Color {
    Color::Rgb(Rgb::new(color.r, color.g, color.b, None))
}
