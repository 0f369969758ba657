//! Overlays drawn on top of the page: the contact modal and the stat
//! tooltip.

use folio::core::dom::{Dom, Selector};
use folio::core::memory::MemoryDom;
use folio::core::modal::FIELD_IDS;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, StatefulWidget, Widget, Wrap},
};

use super::hit::HitMap;
use super::page_view::{COL_PX, ROW_PX};
use super::theme::Palette;

const FIELD_LABELS: [&str; 5] = ["Name", "Email", "You are", "Subject", "Message"];

// ───────────────────────────────────────── contact modal ─────

pub struct ContactPopup<'a> {
    pub dom: &'a MemoryDom,
    pub palette: Palette,
}

impl StatefulWidget for ContactPopup<'_> {
    type State = HitMap;

    fn render(self, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
        let Some(modal) = self.dom.find(&Selector::id("contact-modal")) else {
            return;
        };
        let part = |class: &str| self.dom.find_within(modal, &Selector::class(class)).first().copied();

        // Anything outside the dialog is overlay.
        if let Some(overlay) = part("modal-overlay") {
            hits.push(area, overlay);
        }

        let popup = centered_fixed(58, 15, area);
        Clear.render(popup, buf);
        if let Some(content) = part("modal-content") {
            hits.push(popup, content);
        }

        let block = Block::default()
            .title(" Get in touch ")
            .title_style(self.palette.heading())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.palette.raised_border())
            .style(self.palette.base());
        let inner = block.inner(popup);
        block.render(popup, buf);

        if let Some(close) = part("modal-close") {
            let x = popup.right().saturating_sub(4);
            if x > popup.x && popup.height > 0 {
                let button = Rect::new(x, popup.y, 3, 1);
                buf.set_string(x, popup.y, "[×]", self.palette.heading());
                hits.push(button, close);
            }
        }

        let fact = self
            .dom
            .find_all(&Selector::class("fun-fact-text"))
            .into_iter()
            .find(|&f| self.dom.style(f, "display").as_deref() == Some("block"))
            .map(|f| self.dom.text(f))
            .unwrap_or_default();

        let mut lines = vec![
            Line::styled(fact, self.palette.muted().add_modifier(Modifier::ITALIC)),
            Line::raw(""),
        ];
        for (id, label) in FIELD_IDS.iter().zip(FIELD_LABELS) {
            let value = self
                .dom
                .find(&Selector::id(id))
                .map(|el| self.dom.value(el))
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(format!("  {label:<9}"), self.palette.muted()),
                Span::styled(if value.is_empty() { "…".to_string() } else { value }, self.palette.base()),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "  Enter: send demo message  Esc: close",
            self.palette.muted(),
        ));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

// ───────────────────────────────────────── tooltip ───────────

/// `.stat-tooltip`, placed from its `left`/`top` pixel styles.
pub struct StatTooltipView<'a> {
    pub dom: &'a MemoryDom,
    pub palette: Palette,
}

fn px(value: Option<String>) -> Option<f64> {
    value?.strip_suffix("px")?.parse().ok()
}

impl Widget for StatTooltipView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(tip) = self.dom.find(&Selector::class("stat-tooltip")) else {
            return;
        };
        if !self.dom.has_class(tip, "visible") {
            return;
        }
        let (Some(left), Some(top)) = (px(self.dom.style(tip, "left")), px(self.dom.style(tip, "top"))) else {
            return;
        };
        let text = format!(" {} ", self.dom.text(tip));
        let width = (text.chars().count() as u16).min(area.width);
        let x = area.x + ((left / COL_PX) as u16).min(area.width.saturating_sub(width));
        let y = area.y + ((top / ROW_PX) as u16).min(area.height.saturating_sub(1));
        let rect = Rect::new(x, y, width, 1).intersection(area);
        Clear.render(rect, buf);
        Paragraph::new(text).style(self.palette.tooltip()).render(rect, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
