use std::io::Cursor;
use std::sync::Arc;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use crate::errors::ShopError;
use crate::utils::formatting::format_won;
use super::fonts::ReportFont;
use tracing::debug;

const PADDING: u32 = 40;
const LINE_HEIGHT: u32 = 44;
const HEADER_HEIGHT: u32 = 120;
const CONTENT_WIDTH: u32 = 980;
const FOOTER_HEIGHT: u32 = 140;
const REASON_LINE_HEIGHT: u32 = 28;
const MIN_REASON_BOX: u32 = 100;
const BALANCE_COLUMN_OFFSET: i32 = 420;

const TITLE_SIZE: f32 = 46.0;
const HEADING_SIZE: f32 = 28.0;
const BODY_SIZE: f32 = 24.0;
const SMALL_SIZE: f32 = 22.0;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TITLE_INK: Rgba<u8> = Rgba([25, 25, 25, 255]);
const TITLE_SHADOW: Rgba<u8> = Rgba([180, 180, 180, 255]);
const HEADING_INK: Rgba<u8> = Rgba([30, 30, 30, 255]);
const NAME_INK: Rgba<u8> = Rgba([20, 20, 20, 255]);
const DETAIL_INK: Rgba<u8> = Rgba([60, 60, 60, 255]);
const TOTAL_INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const REASON_INK: Rgba<u8> = Rgba([40, 40, 40, 255]);
const FRAME: Rgba<u8> = Rgba([225, 225, 225, 255]);
const ROW_FRAME: Rgba<u8> = Rgba([238, 238, 238, 255]);
pub const BALANCE_OK: Rgba<u8> = Rgba([0, 120, 0, 255]);
pub const BALANCE_OVER: Rgba<u8> = Rgba([180, 0, 0, 255]);

/// One purchased item as it appears in the report.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub line_total: u64,
    pub thumbnail: Arc<RgbaImage>,
}

/// Everything drawn on a report.
#[derive(Debug, Clone)]
pub struct ReportInput {
    pub mission_title: String,
    pub rows: Vec<ReportRow>,
    pub reasons: String,
    pub spent: u64,
    pub budget: u64,
}

impl ReportInput {
    pub fn remaining(&self) -> i64 {
        crate::utils::balance(self.budget, self.spent)
    }
}

/// Reasoning lines that will be drawn: the trimmed text split on newlines,
/// capped at `max_lines`. Blank reasoning gives no lines.
pub fn reason_lines(reasons: &str, max_lines: usize) -> Vec<&str> {
    let trimmed = reasons.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .take(max_lines)
        .collect()
}

/// Fixed-width layout; only the row count and reasoning line count vary the height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLayout {
    pub thumb_size: u32,
    pub row_height: u32,
    pub reason_height: u32,
    pub width: u32,
    pub height: u32,
}

impl ReportLayout {
    pub fn measure(thumb_size: u32, rows: usize, reason_lines: usize) -> Self {
        let row_height = (thumb_size + 20).max(LINE_HEIGHT * 3);
        let reason_height = MIN_REASON_BOX.max(REASON_LINE_HEIGHT * reason_lines.max(1) as u32);
        let width = CONTENT_WIDTH + PADDING * 2;
        let height = HEADER_HEIGHT
            + 20
            + rows as u32 * row_height
            + 30
            + reason_height
            + 20
            + FOOTER_HEIGHT
            + PADDING * 2;
        Self { thumb_size, row_height, reason_height, width, height }
    }
}

/// Draws the purchase report and encodes it as PNG.
#[derive(Debug, Clone)]
pub struct ReportComposer {
    font: ReportFont,
    thumb_size: u32,
    max_reason_lines: usize,
}

impl ReportComposer {
    pub fn new(font: ReportFont, thumb_size: u32, max_reason_lines: usize) -> Self {
        Self { font, thumb_size, max_reason_lines }
    }

    pub fn font(&self) -> &ReportFont {
        &self.font
    }

    pub fn thumb_size(&self) -> u32 {
        self.thumb_size
    }

    pub fn layout(&self, input: &ReportInput) -> ReportLayout {
        let lines = reason_lines(&input.reasons, self.max_reason_lines).len();
        ReportLayout::measure(self.thumb_size, input.rows.len(), lines)
    }

    /// Render the report image. The input must contain at least one row.
    pub fn render(&self, input: &ReportInput) -> Result<RgbaImage, ShopError> {
        if input.rows.is_empty() {
            return Err(ShopError::Report("a report needs at least one purchased item".into()));
        }

        let layout = self.layout(input);
        let mut img = RgbaImage::from_pixel(layout.width, layout.height, BACKGROUND);
        let pad = PADDING as i32;
        let right = (layout.width - PADDING) as i32;

        // Title with drop shadow
        let title = format!("미션: {}", input.mission_title);
        self.font.draw(&mut img, pad + 3, pad + 3, TITLE_SIZE, TITLE_SHADOW, &title);
        self.font.draw(&mut img, pad, pad, TITLE_SIZE, TITLE_INK, &title);

        let mut y = pad + HEADER_HEIGHT as i32;

        frame(&mut img, pad - 10, y - 14, right + 10, y + 38, FRAME);
        self.font.draw(&mut img, pad, y, HEADING_SIZE, HEADING_INK, "구매 내역");
        y += 56;

        let row_h = layout.row_height as i32;
        let text_x = pad + self.thumb_size as i32 + 20;
        let line_h = LINE_HEIGHT as i32;
        for row in &input.rows {
            frame(&mut img, pad - 10, y - 10, right + 10, y + row_h - 10, ROW_FRAME);
            image::imageops::overlay(&mut img, row.thumbnail.as_ref(), pad as i64, y as i64);

            self.font.draw(&mut img, text_x, y + 4, HEADING_SIZE, NAME_INK, &row.name);
            let detail = format!(
                "수량: {}   단가: {}",
                row.quantity,
                format_won(row.unit_price)
            );
            self.font.draw(&mut img, text_x, y + 4 + line_h, BODY_SIZE, DETAIL_INK, &detail);
            let total = format!("합계: {}", format_won(row.line_total));
            self.font.draw(&mut img, text_x, y + 4 + line_h * 2, BODY_SIZE, TOTAL_INK, &total);

            y += row_h;
        }

        y += 12;
        self.font.draw(&mut img, pad, y, HEADING_SIZE, HEADING_INK, "구매 이유");
        y += 42;
        let reason_h = layout.reason_height as i32;
        frame(&mut img, pad - 10, y - 10, right + 10, y + reason_h, FRAME);
        for (i, line) in reason_lines(&input.reasons, self.max_reason_lines).iter().enumerate() {
            let line_y = y + i as i32 * REASON_LINE_HEIGHT as i32;
            self.font.draw(&mut img, pad, line_y, SMALL_SIZE, REASON_INK, line);
        }
        y += reason_h + 34;

        let remaining = input.remaining();
        let balance_ink = if remaining >= 0 { BALANCE_OK } else { BALANCE_OVER };
        self.font.draw(
            &mut img, pad, y, HEADING_SIZE, NAME_INK,
            &format!("예산: {}", format_won(input.budget)),
        );
        y += line_h;
        self.font.draw(
            &mut img, pad, y, HEADING_SIZE, NAME_INK,
            &format!("사용한 금액: {}", format_won(input.spent)),
        );
        self.font.draw(
            &mut img, pad + BALANCE_COLUMN_OFFSET, y, HEADING_SIZE, balance_ink,
            &format!("남은 돈: {}", format_won(remaining)),
        );

        debug!(width = layout.width, height = layout.height, rows = input.rows.len(), "Report rendered");
        Ok(img)
    }

    /// Render and encode as PNG bytes.
    pub fn compose(&self, input: &ReportInput) -> Result<Vec<u8>, ShopError> {
        let img = self.render(input)?;
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img).write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }
}

fn frame(img: &mut RgbaImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>) {
    let width = (x1 - x0).max(1) as u32;
    let height = (y1 - y0).max(1) as u32;
    draw_hollow_rect_mut(img, Rect::at(x0, y0).of_size(width, height), color);
}
