//! Application state and main UI controller
//!
//! Owns the session and dispatches input by modal context. The session
//! itself rejects input for inactive contexts, so the dispatch here is
//! presentation routing, not the gate.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use lantern_core::battle::BattleAction;
use lantern_core::{Happening, Modal, Session, WIPE_DELAY_MS};

use crate::input::key_to_command;
use crate::narration;
use crate::theme::Theme;
use crate::widgets::{BattleWidget, CorridorWidget, MerchantWidget, PartyWidget};

/// Which menu page is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuTab {
    Summary,
    Party,
    Inventory,
}

/// Application state
pub struct App {
    session: Session,
    theme: Theme,
    hint: String,
    should_quit: bool,
    /// Pending wipe-recovery deadline. At most one; set when the party
    /// wipes, cleared when recovery runs.
    wipe_deadline: Option<Instant>,
    menu_tab: MenuTab,
    save_path: PathBuf,
}

impl App {
    pub fn new(session: Session, theme: Theme, save_path: PathBuf) -> Self {
        Self {
            session,
            theme,
            hint: "Find the Ragpicker. Somewhere, a cat watches from shadow.".to_string(),
            should_quit: false,
            wipe_deadline: None,
            menu_tab: MenuTab::Summary,
            save_path,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Fold a batch of happenings into the hint line and the wipe timer
    fn absorb(&mut self, happenings: Vec<Happening>) {
        for happening in happenings {
            if matches!(happening, Happening::PartyWiped) && self.wipe_deadline.is_none() {
                self.wipe_deadline =
                    Some(Instant::now() + Duration::from_millis(WIPE_DELAY_MS));
            }
            if let Some(text) = narration::happening_text(&happening) {
                self.hint = text;
            }
        }
    }

    /// Run due timers. Called every poll tick.
    pub fn on_tick(&mut self) {
        if let Some(deadline) = self.wipe_deadline {
            if Instant::now() >= deadline {
                self.wipe_deadline = None;
                let happenings = self.session.finish_wipe_recovery();
                self.absorb(happenings);
            }
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.session.modal() {
            Modal::Explore => self.handle_explore_key(key),
            Modal::Battle => self.handle_battle_key(key),
            Modal::Merchant => self.handle_merchant_key(key),
            Modal::Shrine => self.handle_shrine_key(key),
            Modal::Story => self.handle_story_key(key),
            Modal::Menu => self.handle_menu_key(key),
        }
    }

    fn handle_explore_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('x') => self.save(),
            _ => {
                if let Some(command) = key_to_command(key) {
                    let happenings = self.session.tick(command);
                    self.absorb(happenings);
                }
            }
        }
    }

    fn handle_battle_key(&mut self, key: KeyEvent) {
        let action = match key.code {
            KeyCode::Char('a') => BattleAction::Attack,
            KeyCode::Char('s') => BattleAction::Skill,
            KeyCode::Char('i') => BattleAction::UseItem,
            KeyCode::Char('l') => BattleAction::Light,
            KeyCode::Char('f') => BattleAction::Flee,
            _ => return,
        };
        let happenings = self.session.battle_act(action);
        self.absorb(happenings);
    }

    fn handle_merchant_key(&mut self, key: KeyEvent) {
        let happenings = match key.code {
            KeyCode::Char('b') => self.session.merchant_buy(),
            KeyCode::Char('s') => self.session.merchant_sell(),
            KeyCode::Char('l') | KeyCode::Esc => self.session.merchant_leave(),
            _ => return,
        };
        self.absorb(happenings);
    }

    fn handle_shrine_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('r') | KeyCode::Enter) {
            let happenings = self.session.shrine_rest();
            self.absorb(happenings);
        }
    }

    fn handle_story_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
            let happenings = self.session.story_continue();
            self.absorb(happenings);
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('p') => self.menu_tab = MenuTab::Party,
            KeyCode::Char('i') => self.menu_tab = MenuTab::Inventory,
            KeyCode::Char('m') | KeyCode::Char('c') | KeyCode::Esc => {
                self.menu_tab = MenuTab::Summary;
                let happenings = self.session.close_menu();
                self.absorb(happenings);
            }
            _ => {}
        }
    }

    fn save(&mut self) {
        match lantern_save::save_game(&self.session.snapshot(), &self.save_path) {
            Ok(()) => self.hint = "Saved.".to_string(),
            Err(e) => self.hint = format!("Save failed: {e}"),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(3)])
            .split(frame.area());
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(24), Constraint::Length(26)])
            .split(rows[0]);

        frame.render_widget(CorridorWidget::new(&self.session, &self.theme), columns[0]);
        frame.render_widget(PartyWidget::new(&self.session.party, &self.theme), columns[1]);
        self.render_status(frame, rows[1]);

        match self.session.modal() {
            Modal::Explore => {}
            Modal::Battle => {
                if let Some(battle) = self.session.battle() {
                    let area = centered_rect(frame.area(), 56, 22);
                    frame.render_widget(
                        BattleWidget::new(battle, &self.session.party, &self.theme),
                        area,
                    );
                }
            }
            Modal::Merchant => {
                if let Some(merchant) = self.session.merchant() {
                    let area = centered_rect(frame.area(), 62, 22);
                    frame.render_widget(
                        MerchantWidget::new(
                            merchant,
                            &self.session.inventory,
                            self.session.gold,
                            &self.theme,
                        ),
                        area,
                    );
                }
            }
            Modal::Shrine => self.render_shrine(frame),
            Modal::Story => self.render_story(frame),
            Modal::Menu => self.render_menu(frame),
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let status = Paragraph::new(vec![
            Line::from(Span::styled(
                self.hint.clone(),
                Style::default().fg(self.theme.text),
            )),
            Line::from(vec![
                Span::styled(
                    format!("Gold {}  ", self.session.gold),
                    Style::default().fg(self.theme.gold),
                ),
                Span::styled(
                    self.session.map.name.clone(),
                    Style::default().fg(self.theme.accent),
                ),
                Span::styled(
                    "   W/A/S/D move  L lantern  M menu  X save  Q quit",
                    Style::default().fg(self.theme.text_dim),
                ),
            ]),
        ])
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(self.theme.border)),
        );
        frame.render_widget(status, area);
    }

    fn render_shrine(&self, frame: &mut Frame) {
        let area = centered_rect(frame.area(), 46, 7);
        frame.render_widget(Clear, area);
        let popup = Paragraph::new(vec![
            Line::from("Warm light gathers."),
            Line::from("Small scars loosen their hold."),
            Line::default(),
            Line::from(Span::styled(
                "[R]est",
                Style::default().fg(self.theme.accent),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Lantern Shrine")
                .border_style(Style::default().fg(self.theme.accent)),
        );
        frame.render_widget(popup, area);
    }

    fn render_story(&self, frame: &mut Frame) {
        let area = centered_rect(frame.area(), 56, 13);
        frame.render_widget(Clear, area);
        let popup = Paragraph::new(vec![
            Line::from("A sinuous silhouette coils into being. Eyes like twin"),
            Line::from("embers regard you with patient amusement."),
            Line::default(),
            Line::from("\"Curious hands, brighter than you think. Seek the gate"),
            Line::from("that was not made; seek the story that was not told.\""),
            Line::default(),
            Line::from("Wisp noses a small bundle toward you."),
            Line::from("Got: Lantern of Stolen Sparks."),
            Line::default(),
            Line::from(Span::styled(
                "[Enter] Continue",
                Style::default().fg(self.theme.accent),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Wisp, the Shade-Cat")
                .border_style(Style::default().fg(self.theme.accent)),
        );
        frame.render_widget(popup, area);
    }

    fn render_menu(&self, frame: &mut Frame) {
        let area = centered_rect(frame.area(), 58, 16);
        frame.render_widget(Clear, area);

        let mut lines = Vec::new();
        match self.menu_tab {
            MenuTab::Summary => {
                lines.push(Line::from("Party & inventory summary."));
            }
            MenuTab::Party => {
                for member in self.session.party.members() {
                    lines.push(Line::from(Span::styled(
                        member.name.clone(),
                        Style::default()
                            .fg(self.theme.text)
                            .add_modifier(Modifier::BOLD),
                    )));
                    lines.push(Line::from(Span::styled(
                        format!(
                            "  HP {}/{}  ATK {}  DEF {}  FOC {}  WON {}",
                            member.hp.max(0),
                            member.hp_max,
                            member.atk,
                            member.def,
                            member.focus,
                            member.wonder
                        ),
                        Style::default().fg(self.theme.text_dim),
                    )));
                }
            }
            MenuTab::Inventory => {
                if self.session.inventory.is_empty() {
                    lines.push(Line::from("(empty)"));
                }
                for item in &self.session.inventory {
                    lines.push(Line::from(Span::styled(
                        item.name.clone(),
                        Style::default().fg(self.theme.text),
                    )));
                    lines.push(Line::from(Span::styled(
                        format!("  {}", item.desc),
                        Style::default().fg(self.theme.text_dim),
                    )));
                }
            }
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "[P]arty  [I]nventory  [Esc] Close",
            Style::default().fg(self.theme.accent),
        )));

        let popup = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Menu")
                .border_style(Style::default().fg(self.theme.border)),
        );
        frame.render_widget(popup, area);
    }
}

/// A centered popup rect of at most the given size
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
