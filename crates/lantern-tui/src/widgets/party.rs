//! Party HUD widget

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use lantern_core::party::Party;

use crate::theme::Theme;

pub struct PartyWidget<'a> {
    party: &'a Party,
    theme: &'a Theme,
}

impl<'a> PartyWidget<'a> {
    pub fn new(party: &'a Party, theme: &'a Theme) -> Self {
        Self { party, theme }
    }
}

/// An HP bar of the given width; displayed hp clamps at zero
pub(crate) fn hp_bar(hp: i32, hp_max: i32, width: usize) -> (usize, f64) {
    let pct = (hp.max(0) as f64 / hp_max.max(1) as f64).clamp(0.0, 1.0);
    ((pct * width as f64).round() as usize, pct)
}

impl Widget for PartyWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Party")
            .border_style(Style::default().fg(self.theme.border));

        let bar_width = 12usize;
        let mut lines = Vec::new();
        for member in self.party.members() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<12}", member.name),
                    Style::default().fg(self.theme.text),
                ),
                Span::styled(
                    format!("{:>3}/{:<3}", member.hp.max(0), member.hp_max),
                    Style::default().fg(self.theme.text_dim),
                ),
            ]));
            let (filled, pct) = hp_bar(member.hp, member.hp_max, bar_width);
            let color = if pct > 0.3 { self.theme.good } else { self.theme.bad };
            lines.push(Line::from(vec![
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::styled(
                    "░".repeat(bar_width - filled),
                    Style::default().fg(self.theme.text_dim),
                ),
            ]));
        }

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
