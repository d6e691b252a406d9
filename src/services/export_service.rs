use rust_xlsxwriter::*;

use crate::error::Result;
use crate::i18n::Lang;
use crate::models::dossier::Dossier;

pub const EXPORT_FILENAME: &str = "Dossiers_List.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub struct ExportService;

impl ExportService {
    /// Styled workbook with one row per dossier under a merged title row.
    pub fn dossiers_xlsx(dossiers: &[Dossier], lang: Lang) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Dossiers")?;

        let title_bg = Color::RGB(0x1E3A5F);
        let header_bg = Color::RGB(0x4F81BD);
        let alt_row = Color::RGB(0xF2F6FB);
        let border_color = Color::RGB(0xD0D7E2);

        let columns = [
            ("Name", 25.0),
            ("Email", 35.0),
            ("Phone", 20.0),
            ("Post Reference", 20.0),
            ("Referring Professor", 30.0),
        ];
        let last_col = (columns.len() - 1) as u16;

        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        // Title
        let title_format = Format::new()
            .set_font_size(16)
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(title_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(0, 36)?;
        worksheet.merge_range(0, 0, 0, last_col, lang.t("export_title"), &title_format)?;

        // Header
        let header_format = Format::new()
            .set_bold()
            .set_font_size(11)
            .set_font_color(Color::White)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);
        let header_row = 1;
        worksheet.set_row_height(header_row, 24)?;
        for (i, (name, _)) in columns.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }

        // Rows
        let data_start_row = 2;
        for (idx, dossier) in dossiers.iter().enumerate() {
            let row = data_start_row + idx as u32;
            let bg = if idx % 2 == 0 { Color::White } else { alt_row };
            let cell = Format::new()
                .set_font_size(10)
                .set_background_color(bg)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);

            for (col, value) in row_values(dossier).into_iter().enumerate() {
                worksheet.write_string_with_format(row, col as u16, value, &cell)?;
            }
        }

        worksheet.set_freeze_panes(data_start_row, 0)?;
        let last_row = (data_start_row + dossiers.len() as u32).saturating_sub(1).max(header_row);
        worksheet.autofilter(header_row, 0, last_row, last_col)?;

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}

/// Cells of one data row, in header order.
fn row_values(dossier: &Dossier) -> [&str; 5] {
    [
        &dossier.name,
        &dossier.mail,
        &dossier.phonenumber,
        &dossier.postereference,
        &dossier.profref,
    ]
}
