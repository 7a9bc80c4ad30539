//! Ratatui widget that draws the carousel strip from an engine snapshot.
//!
//! Cards are drawn cell by cell and clipped to the strip, because the
//! outermost cards of the window are deliberately half (or fully) outside
//! the viewport.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Widget},
};

use crate::core::projector::Placement;
use crate::core::wrap::{wrap_index, LogicalIndex};

use super::theme::Theme;

// ───────────────────────────────────────── card ──────────────

/// Rendered form of one item; built once per slot and cached in the host's
/// render slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    /// Position of the item in the collection.
    pub index: usize,
}

impl Card {
    /// Item projection used by the terminal host.
    pub fn project(item: &str, logical: LogicalIndex, len: usize) -> Self {
        Self {
            title: item.to_string(),
            index: wrap_index(logical, len),
        }
    }
}

// ───────────────────────────────────────── widget ────────────

/// The carousel widget — created fresh each frame.
pub struct CarouselWidget<'a> {
    cards: &'a [Placement<&'a Card>],
    item_width: u16,
    focused: Option<LogicalIndex>,
    block: Option<Block<'a>>,
}

impl<'a> CarouselWidget<'a> {
    pub fn new(cards: &'a [Placement<&'a Card>], item_width: u16) -> Self {
        Self {
            cards,
            item_width,
            focused: None,
            block: None,
        }
    }

    /// Highlight the card at this logical index.
    pub fn focused(mut self, index: LogicalIndex) -> Self {
        self.focused = Some(index);
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for CarouselWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let strip = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if strip.width == 0 || strip.height == 0 {
            return;
        }

        // Pixel 0 is the centre of the strip.
        let origin = strip.x as f64 + strip.width as f64 / 2.0;
        for placement in self.cards {
            let left = (origin + placement.left).round() as i32;
            let style = if self.focused == Some(placement.logical_index) {
                Theme::focused_card_style()
            } else {
                Theme::card_style()
            };
            draw_card(buf, strip, left, self.item_width, placement.node, style);
        }
    }
}

/// Draw one card with its left edge at column `left`, clipped to `strip`.
fn draw_card(buf: &mut Buffer, strip: Rect, left: i32, width: u16, card: &Card, style: Style) {
    for (r, (row, is_index)) in card_rows(card, width as usize, strip.height as usize)
        .iter()
        .enumerate()
    {
        let y = strip.y + r as u16;
        let row_style = if *is_index {
            Theme::card_index_style()
        } else {
            style
        };
        for (c, ch) in row.iter().enumerate() {
            let x = left + c as i32;
            if x < strip.x as i32 || x >= (strip.x + strip.width) as i32 {
                continue;
            }
            if let Some(cell) = buf.cell_mut((x as u16, y)) {
                cell.set_char(*ch).set_style(row_style);
            }
        }
    }
}

/// Character grid for a card of `w` × `h` cells; the flag marks the row
/// holding the item index.
fn card_rows(card: &Card, w: usize, h: usize) -> Vec<(Vec<char>, bool)> {
    if w == 0 || h == 0 {
        return Vec::new();
    }
    if w < 2 || h == 1 {
        return vec![(centred(&card.title, w), false)];
    }

    let inner = w - 2;
    let border = |l: char, r: char| {
        let mut row = vec!['─'; w];
        row[0] = l;
        row[w - 1] = r;
        row
    };
    let framed = |text: &str| {
        let mut row = vec!['│'];
        row.extend(centred(text, inner));
        row.push('│');
        row
    };

    let mut rows = vec![(border('┌', '┐'), false)];
    let body = h - 2;
    let title_row = body.saturating_sub(1) / 2;
    let index_label = format!("#{}", card.index);
    for i in 0..body {
        if i == title_row {
            rows.push((framed(&card.title), false));
        } else if i == title_row + 1 {
            rows.push((framed(&index_label), true));
        } else {
            rows.push((framed(""), false));
        }
    }
    rows.push((border('└', '┘'), false));
    rows
}

/// `text` centred in `w` cells, truncated if it does not fit.
fn centred(text: &str, w: usize) -> Vec<char> {
    let chars: Vec<char> = text.chars().take(w).collect();
    let pad = (w - chars.len()) / 2;
    let mut row = vec![' '; w];
    row[pad..pad + chars.len()].copy_from_slice(&chars);
    row
}
