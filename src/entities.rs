//! All game entity types: plain data plus a few geometric accessors.
//!
//! Coordinates live in a fixed 850×650 world with the origin at the top-left
//! corner; the renderer scales them to whatever terminal it gets.

// ── World ─────────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f32 = 850.0;
pub const WORLD_HEIGHT: f32 = 650.0;

// ── Bow tuning ────────────────────────────────────────────────────────────────

pub const BOW_START: (f32, f32) = (20.0, 0.0);
pub const BOW_SIZE: (f32, f32) = (60.0, 200.0);
/// Vertical distance travelled per frame.
pub const BOW_SPEED: f32 = 8.0;
pub const AMMO_MAX: u32 = 5;
pub const FORCE_MIN: f32 = 10.0;
pub const FORCE_MAX: f32 = 50.0;
/// Number of distinct rope positions drawn while the bow is bent.
pub const ROPE_STEPS: u32 = 10;

// ── Arrow geometry ────────────────────────────────────────────────────────────

/// Only the arrow head collides; offsets are from the sprite's top-left.
pub const ARROW_HITBOX_OFFSET: (f32, f32) = (165.0, 90.0);
pub const ARROW_HITBOX_SIZE: (f32, f32) = (26.0, 17.0);

// ── Target geometry ───────────────────────────────────────────────────────────

pub const TARGET_SIZE: (f32, f32) = (130.0, 400.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..*self }
    }

    /// Overlap test; rectangles that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

// ── Target ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Zone {
    Inner,
    Middle,
    Outer,
}

impl Zone {
    /// Collision test order.
    pub const ALL: [Zone; 3] = [Zone::Inner, Zone::Middle, Zone::Outer];

    pub fn points(self) -> u32 {
        match self {
            Zone::Inner => 3,
            Zone::Middle => 2,
            Zone::Outer => 1,
        }
    }

    /// Rectangle relative to the target's top-left corner. All three share a
    /// left edge: arrows come in from the left, so height alone decides which
    /// ring is struck.
    fn area(self) -> Rect {
        match self {
            Zone::Inner => Rect::new(70.0, 127.0, 34.0, 153.0),
            Zone::Middle => Rect::new(70.0, 59.0, 46.0, 289.0),
            Zone::Outer => Rect::new(70.0, 0.0, 60.0, 400.0),
        }
    }
}

/// Three nested hit rectangles at a fixed spot. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    bounds: Rect,
    zones: [(Zone, Rect); 3],
}

impl Target {
    pub fn new(x: f32, y: f32) -> Self {
        let zones = Zone::ALL.map(|zone| (zone, zone.area().translate(x, y)));
        Target {
            bounds: Rect::new(x, y, TARGET_SIZE.0, TARGET_SIZE.1),
            zones,
        }
    }

    /// The target as the game places it: flush with the bottom-right corner.
    pub fn in_corner() -> Self {
        Target::new(WORLD_WIDTH - TARGET_SIZE.0, WORLD_HEIGHT - TARGET_SIZE.1)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Zones innermost first.
    pub fn zones(&self) -> &[(Zone, Rect); 3] {
        &self.zones
    }

    /// First zone, innermost first, that `hitbox` overlaps.
    pub fn zone_hit(&self, hitbox: &Rect) -> Option<Zone> {
        if !self.bounds().intersects(hitbox) {
            return None;
        }
        self.zones
            .iter()
            .find(|(_, area)| area.intersects(hitbox))
            .map(|(zone, _)| *zone)
    }
}

// ── Bow ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BowState {
    /// Ready; waits for the shoot key.
    Normal,
    /// Shoot key held; `bent_frames` never exceeds the charge threshold.
    Bent { bent_frames: u32 },
    /// Counting down after a shot.
    Reload { cooldown: u32 },
    /// Out of arrows. Terminal for the session.
    Empty,
}

/// What the renderer should draw for the bow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BowPose {
    /// Arrow on the string, pulled back `step` out of `ROPE_STEPS`.
    Nocked(u32),
    /// Straight string, no arrow.
    Relaxed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bow {
    pub x: f32,
    pub y: f32,
    /// Vertical velocity; flips sign at the top and bottom of the world.
    pub vy: f32,
    pub ammo: u32,
    pub state: BowState,
    pub pose: BowPose,
}

// ── Arrow ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowSprite {
    Flying,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrow {
    /// Sprite top-left corner.
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub hitbox: Rect,
    pub sprite: ArrowSprite,
    pub alive: bool,
}

// ── Score ─────────────────────────────────────────────────────────────────────

/// Running total for one session. `report_hit` is the only way to change it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    total: u32,
}

impl Score {
    pub fn report_hit(&mut self, zone: Zone) {
        self.total += zone.points();
    }

    pub fn total(&self) -> u32 {
        self.total
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Everything owned by one game: dropped wholesale when a new game starts.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub bow: Bow,
    pub target: Target,
    /// Arrows still in flight.
    pub arrows: Vec<Arrow>,
    /// Arrows that struck the target; drawn where they stopped, never updated.
    pub stuck: Vec<Arrow>,
    pub score: Score,
    pub frame: u64,
}
