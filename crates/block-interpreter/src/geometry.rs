//! Axis-aligned rectangles in stage coordinates, and the
//! sprite bounding-box algorithm sensing blocks depend on.

use block_model::{Scriptable, STAGE_SIZE};

/// A plain value type — no dynamic-attribute magic, just named fields
/// and an `impl` block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self { left, bottom, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn top(&self) -> f64 {
        self.bottom + self.height
    }

    pub fn move_ip(&mut self, dx: f64, dy: f64) {
        self.left += dx;
        self.bottom += dy;
    }

    pub fn scale_ip(&mut self, scale: f64) {
        self.left *= scale;
        self.bottom *= scale;
        self.width *= scale;
        self.height *= scale;
    }

    /// Strict containment — points on the boundary don't count, matching
    /// `collide_point`'s strict `<`/`>`.
    pub fn collide_point(&self, point: (f64, f64)) -> bool {
        let (x, y) = point;
        x > self.left && x < self.right() && y > self.bottom && y < self.top()
    }

    pub fn collide_rect(&self, other: Rect) -> bool {
        self.left + self.width > other.left
            && other.left + other.width > self.left
            && self.bottom + self.height > other.bottom
            && other.bottom + other.height > self.bottom
    }

    /// True when any side of `self` crosses the 480x360 stage boundary
    /// centred at the origin (matches Scratch's `touching edge?`, not a
    /// strict full-containment check).
    pub fn off_stage(&self) -> bool {
        let (w, h) = STAGE_SIZE;
        let (hw, hh) = (w / 2.0, h / 2.0);
        self.left < -hw || self.right() > hw || self.top() > hh || self.bottom < -hh
    }
}

/// The axis-aligned bounding box of a sprite after costume
/// rotation-centre-anchored scaling and rotation, translated to the
/// sprite's position.
///
/// Sprites with no costume report a zero-size rect at their position —
/// not in the original catalogue (every sprite there always has a
/// costume) but a reachable state in a programmatically built Project.
pub fn bounds(scriptable: &Scriptable) -> Rect {
    let sprite = match scriptable.as_sprite() {
        Some(s) => s,
        None => return Rect::new(0.0, 0.0, 0.0, 0.0),
    };
    let (px, py) = sprite.position;
    let costume = match sprite.core.costume() {
        Some(c) => c,
        None => return Rect::new(px, py, 0.0, 0.0),
    };

    let (rx, ry) = costume.rotation_center;
    let (width, height) = costume.size;
    let mut rect = Rect::new(-rx, ry - height, width, height);

    rect.scale_ip(sprite.core.size / 100.0);

    let theta = sprite.direction.to_radians();
    let (sin_a, cos_a) = theta.sin_cos();

    let corners = [
        (rect.left, rect.top()),
        (rect.right(), rect.top()),
        (rect.left, rect.bottom),
        (rect.right(), rect.bottom),
    ];

    let mut xs = Vec::with_capacity(4);
    let mut ys = Vec::with_capacity(4);
    for (cx, cy) in corners {
        xs.push(cx * sin_a - cy * cos_a);
        ys.push(cx * cos_a + cy * sin_a);
    }

    let left = xs.iter().cloned().fold(f64::INFINITY, f64::min);
    let right = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let bottom = ys.iter().cloned().fold(f64::INFINITY, f64::min);
    let top = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    Rect::new(left + px, bottom + py, right - left, top - bottom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use block_model::{Costume, Sprite};

    fn sprite_with_costume(size: (f64, f64), center: (f64, f64)) -> Scriptable {
        let mut sprite = Sprite::new("s");
        sprite.core.costumes.push(Costume {
            name: "c".into(),
            rotation_center: center,
            size,
        });
        Scriptable::Sprite(sprite)
    }

    #[test]
    fn bounds_at_origin_direction_90_matches_unrotated_costume_rect() {
        let s = sprite_with_costume((60.0, 40.0), (30.0, 20.0));
        let rect = bounds(&s);
        // direction 90 degrees is the sprite's "facing up" rest pose.
        assert!((rect.width - 60.0).abs() < 1e-9);
        assert!((rect.height - 40.0).abs() < 1e-9);
    }

    #[test]
    fn off_stage_detects_any_side_crossing_the_boundary() {
        let r = Rect::new(300.0, 0.0, 10.0, 10.0);
        assert!(r.off_stage());
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!r.off_stage());
        // straddles the right edge: inside overall, but one side crosses.
        let r = Rect::new(235.0, 0.0, 10.0, 10.0);
        assert!(r.off_stage());
    }
}
