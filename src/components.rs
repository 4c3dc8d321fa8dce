use crate::enums::FacingDirection;
use bevy::prelude::*;

/// Axis-aligned rectangle in world pixels. Y grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Moves the rectangle so its bottom edge sits at `bottom`.
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height as i32;
    }

    /// Moves the rectangle so its top edge sits at `top`.
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Overlapping region of two rectangles, if any. Zero-size
    /// rectangles never intersect anything.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(BoundingBox::new(
                left,
                top,
                (right - left) as u32,
                (bottom - top) as u32,
            ))
        } else {
            None
        }
    }
}

/// Per-pixel opacity grid derived from a sprite's alpha channel.
/// Dimensions always match the owning rectangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpacityMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl OpacityMask {
    /// Mask with every pixel opaque.
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Mask from an explicit bit grid, row-major.
    pub fn from_bits(width: u32, height: u32, bits: Vec<bool>) -> Self {
        assert_eq!(bits.len(), (width * height) as usize);
        Self {
            width,
            height,
            bits,
        }
    }

    /// Mask from an RGBA byte buffer: a pixel is opaque when its
    /// alpha byte is nonzero.
    pub fn from_alpha(width: u32, height: u32, rgba: &[u8]) -> Self {
        assert_eq!(rgba.len(), (width * height * 4) as usize);
        let bits = rgba.chunks_exact(4).map(|px| px[3] != 0).collect();
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[(y * self.width + x) as usize]
    }

    /// Horizontally mirrored copy, for left-facing sprite variants.
    pub fn flipped(&self) -> OpacityMask {
        let mut bits = Vec::with_capacity(self.bits.len());
        for y in 0..self.height {
            for x in 0..self.width {
                bits.push(self.bits[(y * self.width + (self.width - 1 - x)) as usize]);
            }
        }
        Self {
            width: self.width,
            height: self.height,
            bits,
        }
    }
}

/// Collision footprint - bounding rectangle plus opacity mask of the
/// same dimensions. Replaced wholesale when the animation frame changes.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct CollisionShape {
    pub rect: BoundingBox,
    pub mask: OpacityMask,
}

impl CollisionShape {
    pub fn new(rect: BoundingBox, mask: OpacityMask) -> Self {
        assert_eq!(rect.width, mask.width());
        assert_eq!(rect.height, mask.height());
        Self { rect, mask }
    }

    /// Fully opaque shape, the footprint of a solid block.
    pub fn solid(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            rect: BoundingBox::new(x, y, width, height),
            mask: OpacityMask::filled(width, height),
        }
    }
}

/// Velocity component - world pixels per tick
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Velocity {
    pub x: i32,
    pub y: f32,
}

impl Velocity {
    pub fn new(x: i32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self { x: 0, y: 0.0 }
    }
}

/// Player physics and animation state
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    /// Ticks since last grounded or jump reset; drives gravity buildup.
    pub fall_timer: u32,
    /// 0-3, capped by the jump system.
    pub jump_count: u8,
    pub facing: FacingDirection,
    pub animation_phase: u32,
    pub health: u8,
    pub coins: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            fall_timer: 0,
            jump_count: 0,
            facing: FacingDirection::Left,
            animation_phase: 0,
            health: 3,
            coins: 0,
        }
    }
}

/// Player marker component
#[derive(Component)]
pub struct Player;

/// Player intent component - captures input for the next fixed tick.
/// `jump_pressed` is edge-triggered and consumed by the jump system.
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct PlayerIntent {
    pub move_left: bool,
    pub move_right: bool,
    pub jump_pressed: bool,
}

/// Static level block - immutable after spawn, collision data lives in
/// the CollisionShape spawned alongside
#[derive(Component, Clone, Debug, Default)]
pub struct Obstacle {
    pub name: Option<String>,
}
