//! First-person corridor view
//!
//! Pure read of player pose + grid into a frame of depth bands. For each
//! depth 1..=6 exactly three tiles are sampled: the forward cell and its
//! orientation-relative left/right neighbors. A uniform 1/depth scale
//! sizes the surfaces, and bands are emitted far to near so the caller
//! can overdraw in painter's order. No ray marching; per-frame cost is
//! constant regardless of map size.

use crate::MAX_DEPTH;
use crate::StoryFlags;
use crate::action::Direction;
use crate::grid::{TileGrid, TileKind};

/// Abstract drawing area, in the caller's units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned fill, in viewport units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Which flank a side wall hangs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// How a sampled tile reads to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Wall-like: solid wall or a closed secret door
    Blocking,
    /// A gate: drawn with its own face and slat detail
    Gate,
    Open,
}

impl Facing {
    pub fn classify(tile: TileKind) -> Facing {
        if tile.blocks_view() {
            Facing::Blocking
        } else if tile == TileKind::Gate {
            Facing::Gate
        } else {
            Facing::Open
        }
    }
}

/// One drawable surface within a depth band
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    /// Flank slab for a blocked side cell
    SideWall { side: Side, rect: Rect, gate: bool },
    /// Face across the corridor for a blocked forward cell
    FrontWall { rect: Rect, gate: bool },
    /// Slat detail over a gate face
    GateSlat { rect: Rect },
    /// Converging floor guideline drawn when the way ahead is open
    FloorGuide {
        left: (f32, f32),
        apex: (f32, f32),
        right: (f32, f32),
    },
}

/// All surfaces for one sampled depth
#[derive(Debug, Clone, PartialEq)]
pub struct DepthBand {
    pub depth: i32,
    pub surfaces: Vec<Surface>,
}

/// A complete frame, bands ordered far to near
#[derive(Debug, Clone, PartialEq)]
pub struct DepthFrame {
    pub bands: Vec<DepthBand>,
}

/// Build the corridor frame for the given pose.
pub fn build_frame(
    grid: &TileGrid,
    flags: &StoryFlags,
    x: i32,
    y: i32,
    dir: Direction,
    viewport: Viewport,
) -> DepthFrame {
    let bands = (1..=MAX_DEPTH)
        .rev()
        .map(|depth| build_band(grid, flags, x, y, dir, viewport, depth))
        .collect();
    DepthFrame { bands }
}

fn build_band(
    grid: &TileGrid,
    flags: &StoryFlags,
    x: i32,
    y: i32,
    dir: Direction,
    viewport: Viewport,
    depth: i32,
) -> DepthBand {
    let (fdx, fdy) = dir.delta();
    let (ldx, ldy) = dir.left().delta();
    let (rdx, rdy) = dir.right().delta();

    let tx = x + fdx * depth;
    let ty = y + fdy * depth;
    let center = Facing::classify(grid.tile_at(tx, ty, flags));
    let left = Facing::classify(grid.tile_at(tx + ldx, ty + ldy, flags));
    let right = Facing::classify(grid.tile_at(tx + rdx, ty + rdy, flags));

    let scale = 1.0 / depth as f32;
    let (w, h) = (viewport.width, viewport.height);
    let wall_w = w * 0.9 * scale;
    let wall_h = h * 0.9 * scale;
    let cx = w / 2.0;
    let cy = h / 2.0 + (h * 0.05) * scale;
    let side_gap = (w * 0.06) * scale;

    let mut surfaces = Vec::new();

    // Side slabs never draw for the open case
    if left != Facing::Open {
        surfaces.push(Surface::SideWall {
            side: Side::Left,
            rect: Rect {
                x: cx - wall_w - side_gap,
                y: cy - wall_h / 2.0,
                w: wall_w * 0.6,
                h: wall_h,
            },
            gate: left == Facing::Gate,
        });
    }
    if right != Facing::Open {
        surfaces.push(Surface::SideWall {
            side: Side::Right,
            rect: Rect {
                x: cx + side_gap,
                y: cy - wall_h / 2.0,
                w: wall_w * 0.6,
                h: wall_h,
            },
            gate: right == Facing::Gate,
        });
    }

    match center {
        Facing::Blocking | Facing::Gate => {
            let rect = Rect {
                x: cx - wall_w / 2.0,
                y: cy - wall_h / 2.0,
                w: wall_w,
                h: wall_h,
            };
            let gate = center == Facing::Gate;
            surfaces.push(Surface::FrontWall { rect, gate });
            if gate {
                surfaces.push(Surface::GateSlat {
                    rect: Rect {
                        x: cx - wall_w / 2.0 + wall_w * 0.4,
                        y: cy - wall_h * 0.4,
                        w: wall_w * 0.2,
                        h: wall_h * 0.8,
                    },
                });
            }
        }
        Facing::Open => {
            surfaces.push(Surface::FloorGuide {
                left: (cx - wall_w / 2.0, cy + wall_h / 2.0),
                apex: (cx, cy + wall_h * 0.2),
                right: (cx + wall_w / 2.0, cy + wall_h / 2.0),
            });
        }
    }

    DepthBand { depth, surfaces }
}
