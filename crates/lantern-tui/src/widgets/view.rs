//! First-person corridor widget
//!
//! Rasterizes the core's depth frame onto the terminal buffer. The core
//! emits surfaces in painter's order (far to near), so this is a plain
//! overdraw loop: fill the sky/floor backdrop, then fill each surface's
//! cells.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Widget};

use lantern_core::Session;
use lantern_core::view::{Rect as ViewRect, Surface, Viewport};

use crate::theme::Theme;

pub struct CorridorWidget<'a> {
    session: &'a Session,
    theme: &'a Theme,
}

impl<'a> CorridorWidget<'a> {
    pub fn new(session: &'a Session, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

impl Widget for CorridorWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.session.map.name.as_str())
            .border_style(Style::default().fg(self.theme.border));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // Backdrop: sky above the horizon, floor below
        let horizon = inner.y + inner.height / 2;
        for y in inner.top()..inner.bottom() {
            let bg = if y < horizon {
                self.theme.view_sky
            } else {
                self.theme.view_floor
            };
            for x in inner.left()..inner.right() {
                if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                    cell.set_char(' ');
                    cell.set_bg(bg);
                }
            }
        }

        let frame = self
            .session
            .depth_frame(Viewport::new(inner.width as f32, inner.height as f32));

        for band in &frame.bands {
            for surface in &band.surfaces {
                match surface {
                    Surface::SideWall { rect, gate, .. } => {
                        let color = if *gate {
                            self.theme.view_gate
                        } else {
                            self.theme.view_side
                        };
                        fill(buf, inner, rect, color);
                    }
                    Surface::FrontWall { rect, gate } => {
                        let color = if *gate {
                            self.theme.view_gate
                        } else {
                            self.theme.view_front
                        };
                        fill(buf, inner, rect, color);
                    }
                    Surface::GateSlat { rect } => {
                        fill(buf, inner, rect, self.theme.view_slat);
                    }
                    Surface::FloorGuide { left, apex, right } => {
                        line(buf, inner, *left, *apex, self.theme.view_guide);
                        line(buf, inner, *apex, *right, self.theme.view_guide);
                    }
                }
            }
        }
    }
}

/// Fill a view-space rectangle, clipped to the widget area
fn fill(buf: &mut Buffer, inner: Rect, rect: &ViewRect, color: Color) {
    let x0 = rect.x.round().max(0.0) as u16;
    let y0 = rect.y.round().max(0.0) as u16;
    let x1 = ((rect.x + rect.w).round().max(0.0) as u16).min(inner.width);
    let y1 = ((rect.y + rect.h).round().max(0.0) as u16).min(inner.height);
    for y in y0..y1 {
        for x in x0..x1 {
            if let Some(cell) = buf.cell_mut(Position::new(inner.x + x, inner.y + y)) {
                cell.set_char(' ');
                cell.set_bg(color);
            }
        }
    }
}

/// Dot a line segment between two view-space points
fn line(buf: &mut Buffer, inner: Rect, from: (f32, f32), to: (f32, f32), color: Color) {
    let steps = ((to.0 - from.0).abs().max((to.1 - from.1).abs()).ceil() as i32).max(1);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = from.0 + (to.0 - from.0) * t;
        let y = from.1 + (to.1 - from.1) * t;
        if x < 0.0 || y < 0.0 {
            continue;
        }
        let (x, y) = (x.round() as u16, y.round() as u16);
        if x < inner.width && y < inner.height {
            if let Some(cell) = buf.cell_mut(Position::new(inner.x + x, inner.y + y)) {
                cell.set_char('·');
                cell.set_fg(color);
            }
        }
    }
}
