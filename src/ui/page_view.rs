//! The scrolled document.
//!
//! Sections are laid out from their pixel geometry (one row per 20 px) onto
//! an off-screen canvas the height of the whole document, then the rows the
//! viewport can see are copied into the frame.  Clickable elements are
//! registered in document coordinates and shifted the same way.

use folio::core::dom::{Dom, ElementId, Selector};
use folio::core::memory::MemoryDom;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, StatefulWidget, Widget, Wrap},
};

use super::hit::HitMap;
use super::theme::Palette;

/// CSS pixels per terminal column.
pub const COL_PX: f64 = 10.0;
/// CSS pixels per terminal row.
pub const ROW_PX: f64 = 20.0;

const ACTIVE: &str = "active";

fn rows(px: f64) -> u16 {
    (px / ROW_PX).round().clamp(0.0, u16::MAX as f64) as u16
}

fn width_of(s: &str) -> u16 {
    s.chars().count().min(u16::MAX as usize) as u16
}

/// Bottom edge (px) of the lowest top-level block.
pub fn document_height(dom: &MemoryDom) -> f64 {
    let Some(body) = dom.get(dom.body()) else {
        return 0.0;
    };
    body.children
        .iter()
        .map(|&el| dom.offset_top(el) + dom.height(el))
        .fold(0.0, f64::max)
}

/// Whether the fade-in has run (or was never applied).
fn revealed(dom: &MemoryDom, el: ElementId) -> bool {
    dom.style(el, "opacity").as_deref() != Some("0")
}

fn first_text(dom: &MemoryDom, scope: ElementId, class: &str) -> String {
    dom.find_within(scope, &Selector::class(class))
        .first()
        .map(|&el| dom.text(el))
        .unwrap_or_default()
}

pub struct PageView<'a> {
    dom: &'a MemoryDom,
    palette: Palette,
    top_row: i64,
    mobile: bool,
}

impl<'a> PageView<'a> {
    pub fn new(dom: &'a MemoryDom, palette: Palette, top_row: i64, mobile: bool) -> Self {
        Self {
            dom,
            palette,
            top_row,
            mobile,
        }
    }

    fn by_id(&self, id: &str) -> Option<ElementId> {
        self.dom.find(&Selector::id(id))
    }

    fn section_area(&self, el: ElementId, canvas: Rect) -> Rect {
        Rect::new(
            0,
            rows(self.dom.offset_top(el)),
            canvas.width,
            rows(self.dom.height(el)).max(1),
        )
        .intersection(canvas)
    }

    // ── sections ───────────────────────────────────────────────

    fn draw_hero(&self, buf: &mut Buffer) {
        let Some(hero) = self.by_id("home") else {
            return;
        };
        let area = self.section_area(hero, buf.area);
        if area.is_empty() {
            return;
        }
        let greeting = self
            .dom
            .find_within(hero, &Selector::tag("h1"))
            .first()
            .map(|&h| self.dom.text(h))
            .unwrap_or_default();
        let typed = self
            .by_id("typing-text")
            .map(|el| self.dom.text(el))
            .unwrap_or_default();
        let cursor_on = self
            .dom
            .find(&Selector::class("typing-cursor"))
            .and_then(|c| self.dom.style(c, "opacity"))
            .as_deref()
            == Some("1");

        let line = Line::from(vec![
            Span::styled(greeting, self.palette.heading()),
            Span::styled(typed, self.palette.typed()),
            Span::styled("|", self.palette.cursor(cursor_on)),
        ]);
        let middle = Rect {
            y: area.y + area.height / 2,
            height: 1,
            ..area
        };
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(middle, buf);
    }

    fn draw_work(&self, buf: &mut Buffer, hits: &mut Vec<(Rect, ElementId)>) {
        let Some(work) = self.by_id("work") else {
            return;
        };
        let area = self.section_area(work, buf.area);
        let block = Block::default()
            .title(" Work ")
            .borders(Borders::TOP)
            .border_style(self.palette.border());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 4 {
            return;
        }

        // Label strip.
        let label_row = inner.y + 1;
        let mut x = inner.x + 1;
        for (i, label) in self
            .dom
            .find_all(&Selector::class("portfolio-label"))
            .into_iter()
            .enumerate()
        {
            let text = format!(" {} {} ", i + 1, self.dom.text(label));
            let w = width_of(&text);
            if x + w > inner.right() {
                break;
            }
            let style = if self.dom.has_class(label, ACTIVE) {
                self.palette.active()
            } else {
                self.palette.base()
            };
            buf.set_string(x, label_row, &text, style);
            hits.push((Rect::new(x, label_row, w, 1), label));
            x += w + 1;
        }

        // The visible slide.
        let items = self.dom.find_all(&Selector::class("portfolio-item"));
        let shown = items
            .iter()
            .copied()
            .find(|&item| self.dom.has_class(item, ACTIVE))
            .or_else(|| items.first().copied());
        let slide = Rect::new(
            inner.x + 2,
            label_row + 2,
            inner.width.saturating_sub(4),
            8,
        )
        .intersection(inner);
        if let Some(item) = shown {
            let (title, body, border) = if revealed(self.dom, item) {
                (self.palette.heading(), self.palette.base(), self.palette.border())
            } else {
                let hidden = self.palette.unrevealed();
                (hidden, hidden, hidden)
            };
            Paragraph::new(vec![
                Line::styled(first_text(self.dom, item, "portfolio-title"), title),
                Line::raw(""),
                Line::styled(first_text(self.dom, item, "portfolio-blurb"), body),
            ])
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border)
                    .style(self.palette.base()),
            )
            .render(slide, buf);
            hits.push((slide, item));
        }

        // Dots.  Hidden on mobile along with the carousel.
        let dot_row = slide.bottom() + 1;
        if self.mobile || dot_row >= inner.bottom() {
            return;
        }
        let dots = self.dom.find_all(&Selector::class("portfolio-indicator"));
        let span = (dots.len() as u16).saturating_mul(3);
        let mut x = inner.x + inner.width.saturating_sub(span) / 2;
        for dot in dots {
            if x + 2 > inner.right() {
                break;
            }
            let on = self.dom.has_class(dot, ACTIVE);
            buf.set_string(x, dot_row, if on { "●" } else { "○" }, self.palette.indicator(on));
            hits.push((Rect::new(x, dot_row, 2, 1), dot));
            x += 3;
        }
    }

    fn draw_about(&self, buf: &mut Buffer, hits: &mut Vec<(Rect, ElementId)>) {
        let Some(about) = self.by_id("about") else {
            return;
        };
        let area = self.section_area(about, buf.area);
        let block = Block::default()
            .title(" About ")
            .borders(Borders::TOP)
            .border_style(self.palette.border());
        let inner = block.inner(area);
        block.render(area, buf);

        let tiles = self.dom.find_all(&Selector::class("stat-item"));
        if tiles.is_empty() || inner.height < 2 {
            return;
        }
        let tile_w = inner.width / tiles.len() as u16;
        for (i, &tile) in tiles.iter().enumerate() {
            let open = self.dom.has_class(tile, ACTIVE);
            let rect = Rect::new(
                inner.x + i as u16 * tile_w,
                inner.y + 1,
                tile_w.saturating_sub(1),
                if open { 7 } else { 5 },
            )
            .intersection(inner);

            let shown = revealed(self.dom, tile);
            let pick = |style| if shown { style } else { self.palette.unrevealed() };
            let mut lines = vec![
                Line::styled(first_text(self.dom, tile, "stat-value"), pick(self.palette.typed())),
                Line::styled(first_text(self.dom, tile, "stat-label"), pick(self.palette.muted())),
            ];
            if open {
                lines.push(Line::raw(""));
                lines.push(Line::styled(first_text(self.dom, tile, "stat-note"), self.palette.base()));
            }
            let border = if open {
                self.palette.raised_border()
            } else {
                pick(self.palette.border())
            };
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::bordered().border_style(border).style(self.palette.base()))
                .render(rect, buf);
            hits.push((rect, tile));
        }
    }

    fn draw_footer(&self, buf: &mut Buffer) {
        let Some(footer) = self.dom.find(&Selector::tag("footer")) else {
            return;
        };
        let area = self.section_area(footer, buf.area);
        if area.is_empty() {
            return;
        }
        Paragraph::new(Line::styled(self.dom.text(footer), self.palette.muted()))
            .alignment(Alignment::Center)
            .render(Rect { height: 1, ..area }, buf);
    }
}

impl StatefulWidget for PageView<'_> {
    type State = HitMap;

    fn render(self, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
        let doc_rows = rows(document_height(self.dom)).max(area.height);
        let canvas_area = Rect::new(0, 0, area.width, doc_rows);
        let mut canvas = Buffer::empty(canvas_area);
        canvas.set_style(canvas_area, self.palette.base());

        let mut doc_hits = Vec::new();
        self.draw_hero(&mut canvas);
        self.draw_work(&mut canvas, &mut doc_hits);
        self.draw_about(&mut canvas, &mut doc_hits);
        self.draw_footer(&mut canvas);

        buf.set_style(area, self.palette.base());
        for row in 0..area.height {
            let src = self.top_row + row as i64;
            if src < 0 || src >= doc_rows as i64 {
                continue;
            }
            for col in 0..area.width {
                let from = canvas.cell((col, src as u16)).cloned();
                if let (Some(from), Some(to)) = (from, buf.cell_mut((area.x + col, area.y + row))) {
                    *to = from;
                }
            }
        }

        for (rect, el) in doc_hits {
            let top = rect.y as i64 - self.top_row + area.y as i64;
            let bottom = top + rect.height as i64;
            let (top, bottom) = (top.max(area.y as i64), bottom.min(area.bottom() as i64));
            if bottom > top {
                hits.push(
                    Rect::new(area.x + rect.x, top as u16, rect.width, (bottom - top) as u16)
                        .intersection(area),
                    el,
                );
            }
        }
    }
}
