//! Report styling, built once at startup and passed to the renderer.

use crate::config::Config;

/// RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: RgbColor = RgbColor::new(0.0, 0.0, 0.0);
    pub const WHITE: RgbColor = RgbColor::new(1.0, 1.0, 1.0);
    pub const NAVY: RgbColor = RgbColor::new(0.0, 0.0, 0.502);
    pub const DARK_BLUE: RgbColor = RgbColor::new(0.0, 0.0, 0.545);
    pub const GREY: RgbColor = RgbColor::new(0.5, 0.5, 0.5);
    pub const LIGHT_GREY: RgbColor = RgbColor::new(0.92, 0.92, 0.92);
    pub const PALE_BLUE: RgbColor = RgbColor::new(0.93, 0.95, 1.0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Paragraph style. Sizes and spacing are in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: RgbColor,
    pub align: Align,
    pub space_before: f32,
    pub space_after: f32,
}

impl TextStyle {
    fn new(size: f32, weight: FontWeight, color: RgbColor, align: Align) -> Self {
        Self {
            size,
            weight,
            color,
            align,
            space_before: 0.0,
            space_after: 0.0,
        }
    }

    fn spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }
}

/// Page size and margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl PageGeometry {
    /// A4 portrait with room for the header band and footer line.
    pub const A4: PageGeometry = PageGeometry {
        width: 210.0,
        height: 297.0,
        margin_left: 20.0,
        margin_right: 20.0,
        margin_top: 32.0,
        margin_bottom: 25.0,
    };

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn content_top(&self) -> f32 {
        self.height - self.margin_top
    }

    pub fn content_bottom(&self) -> f32 {
        self.margin_bottom
    }
}

/// Everything the renderer needs to know about look and fixed wording.
#[derive(Debug, Clone)]
pub struct ReportStyles {
    pub page: PageGeometry,
    pub title: TextStyle,
    pub heading: TextStyle,
    pub body: TextStyle,
    pub summary: TextStyle,
    pub table_header: TextStyle,
    pub table_cell: TextStyle,
    pub table_header_fill: RgbColor,
    pub table_stripe_fill: RgbColor,
    pub table_grid: RgbColor,
    pub band_height: f32,
    pub band_fill: RgbColor,
    pub band_text: TextStyle,
    pub brand: String,
    pub watermark: String,
    pub watermark_size: f32,
    pub watermark_color: RgbColor,
    pub footer: String,
    pub footer_text: TextStyle,
    pub note_placeholder: String,
    pub empty_table_notice: String,
}

impl ReportStyles {
    pub fn new(brand: impl Into<String>, footer: impl Into<String>) -> Self {
        let brand = brand.into();
        let watermark = brand
            .chars()
            .find(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase().to_string())
            .unwrap_or_else(|| "R".to_string());

        Self {
            page: PageGeometry::A4,
            title: TextStyle::new(18.0, FontWeight::Bold, RgbColor::NAVY, Align::Center)
                .spacing(0.0, 20.0),
            heading: TextStyle::new(14.0, FontWeight::Bold, RgbColor::DARK_BLUE, Align::Left)
                .spacing(15.0, 8.0),
            body: TextStyle::new(10.0, FontWeight::Regular, RgbColor::BLACK, Align::Left)
                .spacing(0.0, 5.0),
            summary: TextStyle::new(16.0, FontWeight::Bold, RgbColor::BLACK, Align::Left)
                .spacing(0.0, 10.0),
            table_header: TextStyle::new(10.0, FontWeight::Bold, RgbColor::WHITE, Align::Center),
            table_cell: TextStyle::new(9.0, FontWeight::Regular, RgbColor::BLACK, Align::Center),
            table_header_fill: RgbColor::NAVY,
            table_stripe_fill: RgbColor::PALE_BLUE,
            table_grid: RgbColor::GREY,
            band_height: 18.0,
            band_fill: RgbColor::NAVY,
            band_text: TextStyle::new(13.0, FontWeight::Bold, RgbColor::WHITE, Align::Left),
            brand,
            watermark,
            watermark_size: 260.0,
            watermark_color: RgbColor::LIGHT_GREY,
            footer: footer.into(),
            footer_text: TextStyle::new(8.0, FontWeight::Regular, RgbColor::GREY, Align::Center),
            note_placeholder: "Nenhuma observação de acompanhamento foi registrada para este relatório."
                .to_string(),
            empty_table_notice: "Nenhum vendedor encontrado para esta loja.".to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.report_brand.clone(), config.report_footer.clone())
    }
}
