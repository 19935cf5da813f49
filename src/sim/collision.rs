//! Axis-aligned rectangle collision
//!
//! Every overlap question in the game (platforms, hazards, items, goal) goes
//! through [`overlaps`], so edge semantics stay identical everywhere:
//! touching edges do not count as a collision.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `pos` is the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Same size, moved to `pos`
    #[inline]
    pub fn at(&self, pos: Vec2) -> Self {
        Self {
            pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }
}

/// Strict AABB overlap test
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// A solid surface as seen by the resolver
///
/// Moving platforms have already advanced when bodies resolve, so the
/// resolver also gets the rectangle the platform occupied when the frame began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solid {
    pub now: Rect,
    pub before: Rect,
}

impl Solid {
    /// A surface that did not move this frame
    pub fn fixed(rect: Rect) -> Self {
        Self {
            now: rect,
            before: rect,
        }
    }
}

/// Outcome of resolving a tentative move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Committed top-left position
    pub pos: Vec2,
    /// Velocity after contact response
    pub vel: Vec2,
    /// Landed on top of a surface this frame
    pub grounded: bool,
}

/// Falling body that started on or above the surface and whose tentative
/// bottom crossed the swept top (the higher of its old and new top).
///
/// Sweeping keeps bodies attached to platforms that sank this frame.
fn lands_on(current: &Rect, tentative: &Rect, solid: &Solid) -> bool {
    tentative.left() < solid.now.right()
        && tentative.right() > solid.now.left()
        && current.bottom() <= solid.before.top()
        && tentative.bottom() > solid.before.top().min(solid.now.top())
}

/// Landing-only resolution
///
/// Only a falling body whose bottom was at or above a surface's top when the
/// frame began is stopped; walls and ceilings are ignored. The first qualifying
/// surface in slice order wins.
pub fn resolve_landing(current: &Rect, next: Vec2, vel: Vec2, solids: &[Solid]) -> Resolution {
    let mut out = Resolution {
        pos: next,
        vel,
        grounded: false,
    };
    if vel.y <= 0.0 {
        return out;
    }

    let tentative = current.at(next);
    if let Some(solid) = solids.iter().find(|s| lands_on(current, &tentative, s)) {
        out.pos.y = solid.now.top() - current.size.y;
        out.vel.y = 0.0;
        out.grounded = true;
    }
    out
}

/// Axis-separated resolution
///
/// The horizontal test uses the tentative X with the current Y, the vertical
/// test uses the current X with the tentative Y. Each axis stops at the first
/// surface it hits, in slice order.
pub fn resolve_axes(current: &Rect, next: Vec2, vel: Vec2, solids: &[Solid]) -> Resolution {
    let mut out = Resolution {
        pos: next,
        vel,
        grounded: false,
    };

    if vel.x != 0.0 {
        let moved_x = current.at(Vec2::new(next.x, current.pos.y));
        if let Some(solid) = solids.iter().find(|s| moved_x.overlaps(&s.before)) {
            out.pos.x = if vel.x > 0.0 {
                solid.before.left() - current.size.x
            } else {
                solid.before.right()
            };
            out.vel.x = 0.0;
        }
    }

    let moved_y = current.at(Vec2::new(current.pos.x, next.y));
    if vel.y > 0.0 {
        if let Some(solid) = solids
            .iter()
            .find(|s| lands_on(current, &moved_y, s) || moved_y.overlaps(&s.now))
        {
            out.pos.y = solid.now.top() - current.size.y;
            out.vel.y = 0.0;
            out.grounded = true;
        }
    } else if vel.y < 0.0 {
        if let Some(solid) = solids.iter().find(|s| moved_y.overlaps(&s.now)) {
            out.pos.y = solid.now.bottom();
            out.vel.y = 0.0;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground() -> Solid {
        Solid::fixed(Rect::new(0.0, 360.0, 2000.0, 40.0))
    }

    #[test]
    fn test_overlap_strict_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);

        // Shares only an edge
        assert!(!overlaps(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!overlaps(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Shares only a corner
        assert!(!overlaps(&a, &Rect::new(10.0, 10.0, 5.0, 5.0)));

        assert!(overlaps(&a, &Rect::new(9.5, 9.5, 5.0, 5.0)));
        assert!(overlaps(&a, &Rect::new(2.0, 2.0, 2.0, 2.0)));
    }

    #[test]
    fn test_landing_snaps_to_top() {
        // Bottom edge 1px above the ground, falling at 5.6 after gravity
        let body = Rect::new(100.0, 319.0, 30.0, 40.0);
        let vel = Vec2::new(0.0, 5.6);

        let res = resolve_landing(&body, body.pos + vel, vel, &[ground()]);
        assert!(res.grounded);
        assert_eq!(res.pos.y, 320.0);
        assert_eq!(res.vel.y, 0.0);
    }

    #[test]
    fn test_landing_ignores_rising_and_side_entry() {
        let platform = Solid::fixed(Rect::new(200.0, 310.0, 120.0, 20.0));

        // Rising through from below passes straight through
        let body = Rect::new(210.0, 325.0, 30.0, 40.0);
        let vel = Vec2::new(0.0, -5.0);
        let res = resolve_landing(&body, body.pos + vel, vel, &[platform]);
        assert!(!res.grounded);
        assert_eq!(res.pos, body.pos + vel);

        // Bottom already below the platform top: no landing, no wall stop
        let body = Rect::new(175.0, 300.0, 30.0, 40.0);
        let vel = Vec2::new(3.5, 0.6);
        let res = resolve_landing(&body, body.pos + vel, vel, &[platform]);
        assert!(!res.grounded);
        assert_eq!(res.pos, body.pos + vel);
    }

    #[test]
    fn test_landing_first_platform_wins() {
        let low = Solid::fixed(Rect::new(0.0, 330.0, 100.0, 20.0));
        let high = Solid::fixed(Rect::new(0.0, 325.0, 100.0, 20.0));
        let body = Rect::new(10.0, 280.0, 30.0, 40.0);
        let vel = Vec2::new(0.0, 12.0);

        let res = resolve_landing(&body, body.pos + vel, vel, &[low, high]);
        assert_eq!(res.pos.y, 290.0);

        let res = resolve_landing(&body, body.pos + vel, vel, &[high, low]);
        assert_eq!(res.pos.y, 285.0);
    }

    #[test]
    fn test_landing_on_rising_platform() {
        // Body resting on a platform that moved up 1.5 this frame
        let before = Rect::new(0.0, 300.0, 100.0, 20.0);
        let now = Rect::new(0.0, 298.5, 100.0, 20.0);
        let solid = Solid { now, before };
        let body = Rect::new(10.0, 260.0, 30.0, 40.0);
        let vel = Vec2::new(0.0, 0.6);

        let res = resolve_landing(&body, body.pos + vel, vel, &[solid]);
        assert!(res.grounded);
        assert_eq!(res.pos.y, 258.5);
    }

    #[test]
    fn test_riding_descending_platform() {
        // Body resting on a platform that sank 1.5 this frame, gravity only adds 0.6
        let before = Rect::new(0.0, 300.0, 100.0, 20.0);
        let now = Rect::new(0.0, 301.5, 100.0, 20.0);
        let solid = Solid { now, before };
        let body = Rect::new(10.0, 260.0, 30.0, 40.0);
        let vel = Vec2::new(0.0, 0.6);

        let res = resolve_landing(&body, body.pos + vel, vel, &[solid]);
        assert!(res.grounded);
        assert_eq!(res.pos.y, 261.5);
        assert_eq!(res.vel.y, 0.0);

        let res = resolve_axes(&body, body.pos + vel, vel, &[solid]);
        assert!(res.grounded);
        assert_eq!(res.pos.y, 261.5);

        // Walking off the edge still falls
        let body = Rect::new(101.0, 260.0, 30.0, 40.0);
        let res = resolve_landing(&body, body.pos + vel, vel, &[solid]);
        assert!(!res.grounded);
    }

    #[test]
    fn test_fast_fall_does_not_tunnel() {
        let thin = Solid::fixed(Rect::new(0.0, 300.0, 100.0, 5.0));
        let body = Rect::new(10.0, 250.0, 30.0, 40.0);
        let vel = Vec2::new(0.0, 20.0);

        let res = resolve_landing(&body, body.pos + vel, vel, &[thin]);
        assert!(res.grounded);
        assert_eq!(res.pos.y, 260.0);
    }

    #[test]
    fn test_axes_wall_stop() {
        let wall = Solid::fixed(Rect::new(100.0, 200.0, 20.0, 200.0));
        let body = Rect::new(68.0, 250.0, 30.0, 40.0);
        let vel = Vec2::new(3.5, 0.0);

        let res = resolve_axes(&body, body.pos + vel, vel, &[wall]);
        assert_eq!(res.pos.x, 70.0);
        assert_eq!(res.vel.x, 0.0);
        assert!(!res.grounded);

        // Moving left into the right face
        let body = Rect::new(122.0, 250.0, 30.0, 40.0);
        let vel = Vec2::new(-3.5, 0.0);
        let res = resolve_axes(&body, body.pos + vel, vel, &[wall]);
        assert_eq!(res.pos.x, 120.0);
        assert_eq!(res.vel.x, 0.0);
    }

    #[test]
    fn test_axes_ceiling_and_floor() {
        let slab = Solid::fixed(Rect::new(0.0, 100.0, 200.0, 20.0));

        // Head bump
        let body = Rect::new(50.0, 125.0, 30.0, 40.0);
        let vel = Vec2::new(0.0, -10.4);
        let res = resolve_axes(&body, body.pos + vel, vel, &[slab]);
        assert_eq!(res.pos.y, 120.0);
        assert_eq!(res.vel.y, 0.0);
        assert!(!res.grounded);

        // Landing on top while walking
        let body = Rect::new(50.0, 58.0, 30.0, 40.0);
        let vel = Vec2::new(3.5, 4.0);
        let res = resolve_axes(&body, body.pos + vel, vel, &[slab]);
        assert_eq!(res.pos, Vec2::new(53.5, 60.0));
        assert!(res.grounded);
        assert_eq!(res.vel, Vec2::new(3.5, 0.0));
    }

    #[test]
    fn test_axes_walk_along_rising_platform() {
        // Standing on a platform that rose this frame must not register as a wall
        let before = Rect::new(0.0, 300.0, 200.0, 20.0);
        let now = Rect::new(0.0, 298.5, 200.0, 20.0);
        let body = Rect::new(50.0, 260.0, 30.0, 40.0);
        let vel = Vec2::new(3.5, 0.6);

        let res = resolve_axes(&body, body.pos + vel, vel, &[Solid { now, before }]);
        assert_eq!(res.pos, Vec2::new(53.5, 258.5));
        assert_eq!(res.vel.x, 3.5);
        assert!(res.grounded);
    }
}
