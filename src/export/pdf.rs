use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Encode `text` for the WinAnsi Helvetica font. Latin-1 maps one to one;
/// characters outside the code page become `?`.
pub(crate) fn winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

/// One titled table inside the document.
pub struct TableSection {
    pub heading: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Minimal A4 table writer on top of `pdf-writer` (Helvetica, zebra rows,
/// sections flowing across pages).
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,
    next_id: i32,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    font_size: f32,
    header_font_size: f32,
    heading_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Page being filled: its content stream and the current baseline.
struct Cursor {
    content: Content,
    y: f32,
    page: usize,
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            page_refs: Vec::new(),
            current_content_id: None,
            next_id: 4,

            page_w: 595.0,
            page_h: 842.0,
            margin: 50.0,
            row_h: 20.0,

            font_size: 10.0,
            header_font_size: 11.0,
            heading_font_size: 12.0,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn top_y(&self) -> f32 {
        self.page_h - self.margin - 30.0
    }

    fn start_page(&mut self, title: &str, page: usize) -> Cursor {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        {
            let mut p = self.pdf.page(page_id);
            p.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
                .contents(content_id);
            p.resources().fonts().pair(Name(b"F1"), self.font_id);
        }

        self.current_content_id = Some(content_id);

        let mut content = Content::new();
        self.draw_text(
            &mut content,
            self.margin,
            self.page_h - self.margin + 15.0,
            self.title_font_size,
            title,
        );
        self.draw_text(
            &mut content,
            self.page_w - self.margin - 60.0,
            self.margin - 35.0,
            self.font_size,
            &format!("Page {page}"),
        );

        Cursor {
            content,
            y: self.top_y(),
            page,
        }
    }

    fn finish_page(&mut self, cursor: Cursor) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &cursor.content.finish());
        }
    }

    fn next_page(&mut self, cursor: Cursor, title: &str) -> Cursor {
        let page = cursor.page + 1;
        self.finish_page(cursor);
        self.start_page(title, page)
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&winansi(text)));
        content.end_text();
    }

    fn fill_band(&self, content: &mut Content, y: f32, width: f32, rgb: (f32, f32, f32)) {
        content.save_state();
        content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(&self, content: &mut Content, y: f32, widths: &[f32], row: &[String], size: f32) {
        let mut x = self.margin;

        for (text, w) in row.iter().zip(widths) {
            self.draw_text(content, x + 4.0, y + 5.0, size, text);

            content.save_state();
            content.set_stroke_rgb(0.65, 0.65, 0.65);
            content.rect(x, y, *w, self.row_h);
            content.stroke();
            content.restore_state();

            x += w;
        }
    }

    fn draw_header(&self, content: &mut Content, y: f32, widths: &[f32], headers: &[String]) {
        self.fill_band(content, y, widths.iter().sum(), (0.85, 0.87, 0.90));
        self.draw_row(content, y, widths, headers, self.header_font_size);
    }

    /// Column widths from header + content, scaled down to fit the page.
    fn compute_col_widths(&self, headers: &[String], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.5).collect();

        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (cell.len() as f32 * 6.2).max(*w);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;
        if total > max {
            let scale = max / total;
            widths.iter_mut().for_each(|w| *w *= scale);
        }

        widths
    }

    /// Lay out all sections one after the other, breaking pages as needed.
    /// A section without rows still gets its header and an "(no data)" line.
    pub fn write_sections(&mut self, title: &str, sections: &[TableSection]) {
        let mut cursor = self.start_page(title, 1);

        for section in sections {
            // heading + header + one row must fit, otherwise start fresh
            if cursor.y - 2.0 * self.row_h < self.margin {
                cursor = self.next_page(cursor, title);
            }

            let widths = self.compute_col_widths(&section.headers, &section.rows);

            self.draw_text(
                &mut cursor.content,
                self.margin,
                cursor.y + 5.0,
                self.heading_font_size,
                &section.heading,
            );
            cursor.y -= self.row_h;

            self.draw_header(&mut cursor.content, cursor.y, &widths, &section.headers);
            cursor.y -= self.row_h;

            if section.rows.is_empty() {
                self.draw_text(
                    &mut cursor.content,
                    self.margin + 4.0,
                    cursor.y + 5.0,
                    self.font_size,
                    "(no data)",
                );
                cursor.y -= self.row_h;
            }

            for (i, row) in section.rows.iter().enumerate() {
                if cursor.y < self.margin {
                    cursor = self.next_page(cursor, title);
                    self.draw_header(&mut cursor.content, cursor.y, &widths, &section.headers);
                    cursor.y -= self.row_h;
                }

                if i % 2 == 0 {
                    self.fill_band(
                        &mut cursor.content,
                        cursor.y,
                        widths.iter().sum(),
                        (0.96, 0.96, 0.96),
                    );
                }
                self.draw_row(&mut cursor.content, cursor.y, &widths, row, self.font_size);
                cursor.y -= self.row_h;
            }

            // gap between sections
            cursor.y -= self.row_h;
        }

        self.finish_page(cursor);
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);

        {
            let mut pages = self.pdf.pages(self.pages_id);
            pages.count(self.page_refs.len() as i32);
            pages.kids(self.page_refs.iter().copied());
        }

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}
