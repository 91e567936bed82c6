//! Store report content and page decoration.

use chrono::{NaiveDate, NaiveTime};

use super::layout::{layout_document, Block, Column, Page, PageDecorator, Table, PT_TO_MM};
use super::pdf::write_pdf;
use super::styles::{Align, FontWeight, ReportStyles};
use crate::dashboard::ReportData;
use crate::errors::AppError;
use crate::models::SalespersonWithDisparos;

/// Rendered PDF bytes.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// Brand band, watermark and footer drawn on every page.
pub struct ReportDecorator<'a> {
    styles: &'a ReportStyles,
}

impl<'a> ReportDecorator<'a> {
    pub fn new(styles: &'a ReportStyles) -> Self {
        Self { styles }
    }
}

impl PageDecorator for ReportDecorator<'_> {
    fn decorate(&self, page: &mut Page) {
        let s = self.styles;
        let geometry = page.geometry;

        // Watermark first so everything else paints over it
        let mut watermark = s.body;
        watermark.size = s.watermark_size;
        watermark.weight = FontWeight::Bold;
        watermark.color = s.watermark_color;
        watermark.align = Align::Center;
        let glyph_height = s.watermark_size * PT_TO_MM * 0.7;
        page.aligned_text(
            &s.watermark,
            0.0,
            geometry.width,
            (geometry.height - glyph_height) / 2.0,
            &watermark,
        );

        let band_bottom = geometry.height - s.band_height;
        page.fill_rect(0.0, band_bottom, geometry.width, s.band_height, s.band_fill);
        let band_baseline = band_bottom + (s.band_height - s.band_text.size * PT_TO_MM) / 2.0;
        page.aligned_text(
            &s.brand,
            geometry.margin_left,
            geometry.content_width(),
            band_baseline,
            &s.band_text,
        );

        let footer_y = geometry.margin_bottom / 2.0;
        page.line(
            (geometry.margin_left, footer_y + 5.0),
            (geometry.width - geometry.margin_right, footer_y + 5.0),
            0.5,
            s.table_grid,
        );
        page.aligned_text(
            &s.footer,
            geometry.margin_left,
            geometry.content_width(),
            footer_y,
            &s.footer_text,
        );
        let mut number_style = s.footer_text;
        number_style.align = Align::Right;
        let page_label = format!("Página {}", page.number);
        page.aligned_text(
            &page_label,
            geometry.margin_left,
            geometry.content_width(),
            footer_y - 4.0,
            &number_style,
        );
    }
}

/// Lay out and serialize the report of one store.
pub fn render_report(
    data: &ReportData,
    note: Option<&str>,
    generated_on: NaiveDate,
    styles: &ReportStyles,
) -> Result<RenderedDocument, AppError> {
    let blocks = compose_report(data, note, generated_on, styles);
    let title = format!("Relatório de Disparos - {}", data.store.name);
    let document = layout_document(&title, styles.page, &blocks, &ReportDecorator::new(styles))?;
    let bytes = write_pdf(&document)?;

    Ok(RenderedDocument {
        bytes,
        pages: document.pages.len(),
    })
}

/// Content blocks of the report, top to bottom.
pub fn compose_report(
    data: &ReportData,
    note: Option<&str>,
    generated_on: NaiveDate,
    styles: &ReportStyles,
) -> Vec<Block> {
    let store = &data.store;
    let responsible = store
        .responsible
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or("Não informado");
    let note = note
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(styles.note_placeholder.as_str());

    let mut blocks = vec![
        Block::paragraph("Relatório de Disparos", styles.title),
        Block::paragraph(format!("Loja: {}", store.name), styles.body),
        Block::paragraph(format!("Responsável: {}", responsible), styles.body),
        Block::paragraph(
            format!("Data de geração: {}", long_date(generated_on)),
            styles.body,
        ),
        Block::paragraph("Resumo de Disparos", styles.heading),
        Block::paragraph(format_thousands(data.total_disparos()), styles.summary),
        Block::paragraph(
            "Total corresponde à soma dos disparos semanais de todos os vendedores ativos desta loja.",
            styles.body,
        ),
        Block::paragraph("Observações de Acompanhamento", styles.heading),
        Block::paragraph(note, styles.body),
        Block::paragraph("Detalhamento por Vendedor", styles.heading),
    ];

    if data.salespeople.is_empty() {
        blocks.push(Block::paragraph(
            styles.empty_table_notice.clone(),
            styles.body,
        ));
    } else {
        blocks.push(Block::Spacer(2.0));
        blocks.push(Block::Table(salesperson_table(&data.salespeople, styles)));
    }

    blocks
}

fn salesperson_table(rows: &[SalespersonWithDisparos], styles: &ReportStyles) -> Table {
    let column = |title: &str, weight: f32| Column {
        title: title.to_string(),
        weight,
    };

    Table {
        columns: vec![
            column("Vendedor", 3.0),
            column("Total Semanal", 1.6),
            column("Disparos Hoje", 1.6),
            column("Status", 1.6),
            column("Base Tratada", 1.4),
        ],
        rows: rows
            .iter()
            .map(|row| {
                let salesperson = &row.salesperson;
                vec![
                    salesperson.name.clone(),
                    format_thousands(row.weekly_total()),
                    format_thousands(salesperson.daily_disparos),
                    salesperson
                        .status
                        .map(|s| s.label())
                        .unwrap_or("Desconhecido")
                        .to_string(),
                    if salesperson.base_treated { "Sim" } else { "Não" }.to_string(),
                ]
            })
            .collect(),
        header_style: styles.table_header,
        cell_style: styles.table_cell,
        header_fill: styles.table_header_fill,
        stripe_fill: Some(styles.table_stripe_fill),
        grid: styles.table_grid,
    }
}

/// `16 de outubro de 2026`.
pub fn long_date(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format_localized("%-d de %B de %Y", chrono::Locale::pt_BR)
        .to_string()
}

/// Integer with `.` as the thousands separator.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisparoSource, Salesperson, SalespersonStatus, Store, WeekCounts};

    fn styles() -> ReportStyles {
        ReportStyles::new("Painel de Vendas", "Rua das Flores, 10 - Recife/PE")
    }

    fn store() -> Store {
        Store {
            id: 1,
            name: "Loja Centro".into(),
            responsible: Some("Carla".into()),
        }
    }

    fn salesperson(id: i64, status: SalespersonStatus, base_treated: bool) -> SalespersonWithDisparos {
        SalespersonWithDisparos {
            salesperson: Salesperson {
                id,
                name: format!("Vendedor {}", id),
                email: None,
                store_id: Some(1),
                status: Some(status),
                base_treated,
                daily_disparos: 12,
                last_status_type: None,
                last_status_date: None,
            },
            disparos_semanais: WeekCounts::from_fn(|_| 100),
            source: DisparoSource::Recorded,
        }
    }

    fn oct_16() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn table_of(blocks: &[Block]) -> Option<&Table> {
        blocks.iter().find_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    fn paragraphs(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_long_date_uses_portuguese_month() {
        assert_eq!(long_date(oct_16()), "16 de outubro de 2026");
        assert_eq!(
            long_date(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()),
            "5 de março de 2026"
        );
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_400), "1.400");
        assert_eq!(format_thousands(1_234_567), "1.234.567");
        assert_eq!(format_thousands(-4_200), "-4.200");
    }

    #[test]
    fn test_empty_store_gets_notice_instead_of_table() {
        let s = styles();
        let data = ReportData {
            store: store(),
            salespeople: vec![],
        };

        let blocks = compose_report(&data, None, oct_16(), &s);

        assert!(table_of(&blocks).is_none());
        let texts = paragraphs(&blocks);
        assert!(texts.contains(&s.empty_table_notice.as_str()));
        assert!(texts.contains(&"0"));
    }

    #[test]
    fn test_table_rows_and_summary() {
        let s = styles();
        let data = ReportData {
            store: store(),
            salespeople: vec![
                salesperson(1, SalespersonStatus::Connected, true),
                salesperson(2, SalespersonStatus::Blocked, false),
            ],
        };

        let blocks = compose_report(&data, Some("Retomar contato com a base antiga"), oct_16(), &s);

        let texts = paragraphs(&blocks);
        assert!(texts.contains(&"1.400"));
        assert!(texts.contains(&"Loja: Loja Centro"));
        assert!(texts.contains(&"Responsável: Carla"));
        assert!(texts.contains(&"Data de geração: 16 de outubro de 2026"));
        assert!(texts.contains(&"Retomar contato com a base antiga"));
        assert!(!texts.contains(&s.empty_table_notice.as_str()));

        let table = table_of(&blocks).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], ["Vendedor 1", "700", "12", "Conectado", "Sim"]);
        assert_eq!(table.rows[1], ["Vendedor 2", "700", "12", "Bloqueado", "Não"]);
    }

    #[test]
    fn test_blank_note_uses_placeholder() {
        let s = styles();
        let data = ReportData {
            store: store(),
            salespeople: vec![],
        };
        for note in [None, Some(""), Some("   \n ")] {
            let blocks = compose_report(&data, note, oct_16(), &s);
            assert!(paragraphs(&blocks).contains(&s.note_placeholder.as_str()));
        }
    }

    #[test]
    fn test_rendered_pdf_is_decorated_on_every_page() {
        let s = styles();
        let data = ReportData {
            store: store(),
            salespeople: (1..=90)
                .map(|id| salesperson(id, SalespersonStatus::Connected, true))
                .collect(),
        };

        let blocks = compose_report(&data, None, oct_16(), &s);
        let document =
            layout_document("t", s.page, &blocks, &ReportDecorator::new(&s)).unwrap();
        assert!(document.pages.len() > 1);
        for page in &document.pages {
            let texts: Vec<_> = page.texts().collect();
            assert!(texts.contains(&s.brand.as_str()));
            assert!(texts.contains(&s.footer.as_str()));
            assert!(texts.contains(&s.watermark.as_str()));
        }

        let rendered = render_report(&data, None, oct_16(), &s).unwrap();
        assert_eq!(rendered.pages, document.pages.len());
        assert!(rendered.bytes.starts_with(b"%PDF"));
    }
}
