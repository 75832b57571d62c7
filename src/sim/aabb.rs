//! Axis-aligned box geometry and contact resolution
//!
//! Every gameplay collision in the game - platforms, patrollers, pickups,
//! the goal - is a test between two of these boxes. `resolve` is called once
//! per solid per frame, so it must stay O(1) and allocation-free.

/// An axis-aligned box. Position is the top-left corner in world
/// coordinates (y grows downward); the shape is fixed, the position moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Side of the *moving* box that made contact.
///
/// `Bottom` means the moving box's underside came to rest on the solid's top
/// (a landing); `Top` means it struck the solid from below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// True if the two boxes overlap (strictly - edge contact does not count).
///
/// Used for damage-only contacts where no push-out is wanted.
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    let dx = a.center_x() - b.center_x();
    let dy = a.center_y() - b.center_y();
    dx.abs() < (a.w + b.w) / 2.0 && dy.abs() < (a.h + b.h) / 2.0
}

/// Push `moving` out of `solid` along the axis of least penetration and
/// report which side of `moving` made contact.
///
/// Minimum-translation-vector test: compare the center-to-center distance
/// against the summed half extents on each axis. If both axes overlap, the
/// axis with the smaller penetration is the resolution axis; `moving` is
/// displaced by exactly the penetration depth. Non-overlapping boxes return
/// `None` and neither box is touched.
pub fn resolve(moving: &mut Aabb, solid: &Aabb) -> Option<Side> {
    let dx = moving.center_x() - solid.center_x();
    let dy = moving.center_y() - solid.center_y();
    let half_w = (moving.w + solid.w) / 2.0;
    let half_h = (moving.h + solid.h) / 2.0;

    if dx.abs() >= half_w || dy.abs() >= half_h {
        return None;
    }

    let pen_x = half_w - dx.abs();
    let pen_y = half_h - dy.abs();

    if pen_x >= pen_y {
        // Vertical resolution
        if dy > 0.0 {
            moving.y += pen_y;
            Some(Side::Top)
        } else {
            moving.y -= pen_y;
            Some(Side::Bottom)
        }
    } else if dx > 0.0 {
        moving.x += pen_x;
        Some(Side::Left)
    } else {
        moving.x -= pen_x;
        Some(Side::Right)
    }
}
