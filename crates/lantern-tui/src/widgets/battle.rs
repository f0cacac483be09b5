//! Battle overlay widget

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use lantern_core::battle::Battle;
use lantern_core::party::Party;

use crate::narration;
use crate::theme::Theme;
use super::party::hp_bar;

pub struct BattleWidget<'a> {
    battle: &'a Battle,
    party: &'a Party,
    theme: &'a Theme,
}

impl<'a> BattleWidget<'a> {
    pub fn new(battle: &'a Battle, party: &'a Party, theme: &'a Theme) -> Self {
        Self {
            battle,
            party,
            theme,
        }
    }
}

impl Widget for BattleWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Battle")
            .border_style(Style::default().fg(self.theme.border_danger));
        let inner = block.inner(area);
        block.render(area, buf);

        let enemy = &self.battle.enemy;
        let bar_width = 16usize;
        let (filled, _) = hp_bar(enemy.hp, enemy.hp_max, bar_width);

        let mut lines = vec![
            Line::from(Span::styled(
                enemy.name.clone(),
                Style::default()
                    .fg(self.theme.bad)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("█".repeat(filled), Style::default().fg(self.theme.bad)),
                Span::styled(
                    "░".repeat(bar_width - filled),
                    Style::default().fg(self.theme.text_dim),
                ),
            ]),
            Line::default(),
        ];

        // Last few log lines, narrated here at the presentation boundary
        let log_rows = inner.height.saturating_sub(6 + self.party.members().len() as u16);
        let log = self.battle.log();
        let skip = log.len().saturating_sub(log_rows as usize);
        for event in &log[skip..] {
            lines.push(Line::from(Span::styled(
                narration::battle_event_text(event),
                Style::default().fg(self.theme.text),
            )));
        }
        lines.push(Line::default());

        for member in self.party.members() {
            let (filled, pct) = hp_bar(member.hp, member.hp_max, 8);
            let color = if pct > 0.3 { self.theme.good } else { self.theme.bad };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<12}", member.name),
                    Style::default().fg(self.theme.text),
                ),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::styled(
                    "░".repeat(8 - filled),
                    Style::default().fg(self.theme.text_dim),
                ),
            ]));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "[A]ttack  [S]kill  [I]tem  [L]ight  [F]lee",
            Style::default().fg(self.theme.accent),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}
