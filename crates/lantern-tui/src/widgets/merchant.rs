//! Merchant overlay widget

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use lantern_core::item::Item;
use lantern_core::merchant::Merchant;

use crate::theme::Theme;

pub struct MerchantWidget<'a> {
    merchant: &'a Merchant,
    inventory: &'a [Item],
    gold: i32,
    theme: &'a Theme,
}

impl<'a> MerchantWidget<'a> {
    pub fn new(merchant: &'a Merchant, inventory: &'a [Item], gold: i32, theme: &'a Theme) -> Self {
        Self {
            merchant,
            inventory,
            gold,
            theme,
        }
    }
}

impl Widget for MerchantWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.merchant.name)
            .border_style(Style::default().fg(self.theme.accent));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from(Span::styled(
            "Stock",
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        ))];
        for item in &self.merchant.stock {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<24}", item.name),
                    Style::default().fg(self.theme.text),
                ),
                Span::styled(
                    format!("{:>4}g", self.merchant.buy_price(item)),
                    Style::default().fg(self.theme.gold),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("  {}", item.desc),
                Style::default().fg(self.theme.text_dim),
            )));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Your Pack",
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        if self.inventory.is_empty() {
            lines.push(Line::from(Span::styled(
                "  (empty)",
                Style::default().fg(self.theme.text_dim),
            )));
        }
        for item in self.inventory {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<24}", item.name),
                    Style::default().fg(self.theme.text),
                ),
                Span::styled(
                    format!("{:>4}g", self.merchant.sell_price(item)),
                    Style::default().fg(self.theme.gold),
                ),
            ]));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Gold: {}", self.gold),
            Style::default().fg(self.theme.gold),
        )));
        lines.push(Line::from(Span::styled(
            "[B]uy first stock item  [S]ell first pack item  [L]eave",
            Style::default().fg(self.theme.accent),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}
