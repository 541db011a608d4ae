//! Pure game-logic functions.
//!
//! Every public function takes immutable references to the current state and
//! returns new values; nothing here touches the terminal. The only fallible
//! step is firing, which refuses to run with an empty quiver.

use tracing::{debug, info};

use crate::config::{GameConfig, Timing};
use crate::entities::{
    Arrow, ArrowSprite, Bow, BowPose, BowState, GameSession, Rect, Score, Target, Zone,
    AMMO_MAX, ARROW_HITBOX_OFFSET, ARROW_HITBOX_SIZE, BOW_SIZE, BOW_SPEED, BOW_START,
    FORCE_MAX, FORCE_MIN, ROPE_STEPS, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::error::GameError;
use crate::input::{InputEvent, Key};

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn new_bow() -> Bow {
    Bow {
        x: BOW_START.0,
        y: BOW_START.1,
        vy: BOW_SPEED,
        ammo: AMMO_MAX,
        state: BowState::Normal,
        pose: BowPose::Nocked(0),
    }
}

/// A fresh session: full quiver, no arrows, score 0.
pub fn new_session() -> GameSession {
    GameSession {
        bow: new_bow(),
        target: Target::in_corner(),
        arrows: Vec::new(),
        stuck: Vec::new(),
        score: Score::default(),
        frame: 0,
    }
}

/// Spawn an arrow whose sprite starts at `(x, y)`, flying right at `force`.
pub fn loose_arrow(x: f32, y: f32, force: f32) -> Arrow {
    Arrow {
        x,
        y,
        vx: force,
        vy: 0.0,
        hitbox: Rect::new(
            x + ARROW_HITBOX_OFFSET.0,
            y + ARROW_HITBOX_OFFSET.1,
            ARROW_HITBOX_SIZE.0,
            ARROW_HITBOX_SIZE.1,
        ),
        sprite: ArrowSprite::Flying,
        alive: true,
    }
}

// ── Charging ─────────────────────────────────────────────────────────────────

/// Linear map of `bent_frames` in `[0, charge_frames]` onto
/// `[FORCE_MIN, FORCE_MAX]`. Values past the threshold are clamped.
pub fn force(bent_frames: u32, timing: &Timing) -> f32 {
    let held = bent_frames.min(timing.charge_frames()) as f32;
    FORCE_MIN + (FORCE_MAX - FORCE_MIN) * held / timing.charge_frames() as f32
}

/// Rope position to redraw at `bent_frames`, if this frame is a redraw point.
///
/// Redraws happen every `charge_frames / ROPE_STEPS` frames (floor division,
/// at least one frame). When the division is not exact the last redraw lands
/// before the threshold and later frames keep that pose; the step is capped at
/// `ROPE_STEPS` for thresholds shorter than `ROPE_STEPS` frames.
pub fn rope_step(bent_frames: u32, timing: &Timing) -> Option<u32> {
    let interval = (timing.charge_frames() / ROPE_STEPS).max(1);
    if bent_frames == 0 || bent_frames % interval != 0 {
        return None;
    }
    Some((bent_frames / interval).min(ROPE_STEPS))
}

// ── Bow ──────────────────────────────────────────────────────────────────────

/// Advance the bow by its velocity, bouncing off the top and bottom edges.
pub fn move_bow(bow: &Bow) -> Bow {
    let lowest = WORLD_HEIGHT - BOW_SIZE.1;
    let y = bow.y + bow.vy;
    let (y, vy) = if y <= 0.0 {
        (0.0, bow.vy.abs())
    } else if y >= lowest {
        (lowest, -bow.vy.abs())
    } else {
        (y, bow.vy)
    };
    Bow { y, vy, ..bow.clone() }
}

fn ready(bow: Bow) -> Bow {
    Bow { state: BowState::Normal, pose: BowPose::Nocked(0), ..bow }
}

/// Release the string: spend one arrow and leave the Bent state.
///
/// Only reachable from Bent. Fails if the quiver is already empty, which the
/// Empty state is there to rule out.
pub fn fire(bow: &Bow, bent_frames: u32, timing: &Timing) -> Result<(Bow, Arrow), GameError> {
    if bow.ammo == 0 {
        return Err(GameError::EmptyQuiver);
    }
    let force = force(bent_frames, timing);
    let arrow = loose_arrow(bow.x, bow.y, force);
    let ammo = bow.ammo - 1;
    debug!(force, ammo, "arrow fired");

    let fired = if ammo > 0 {
        Bow {
            ammo,
            state: BowState::Reload { cooldown: timing.cooldown_frames() },
            pose: BowPose::Relaxed,
            ..bow.clone()
        }
    } else {
        info!("quiver empty");
        Bow {
            ammo,
            vy: 0.0,
            state: BowState::Empty,
            pose: BowPose::Relaxed,
            ..bow.clone()
        }
    };
    Ok((fired, arrow))
}

/// One frame of the bow: move, then let the current state handle this
/// frame's input batch. A state change takes effect from the next frame, so
/// a batch is never split across two states.
pub fn update_bow(
    bow: &Bow,
    inputs: &[InputEvent],
    timing: &Timing,
) -> Result<(Bow, Option<Arrow>), GameError> {
    let bow = move_bow(bow);

    match bow.state {
        BowState::Normal => {
            if inputs.contains(&InputEvent::Pressed(Key::Charge)) {
                return Ok((Bow { state: BowState::Bent { bent_frames: 0 }, ..bow }, None));
            }
            Ok((bow, None))
        }
        BowState::Bent { bent_frames } => {
            let mut bow = bow;
            let mut bent_frames = bent_frames;
            if bent_frames < timing.charge_frames() {
                bent_frames += 1;
                if let Some(step) = rope_step(bent_frames, timing) {
                    bow.pose = BowPose::Nocked(step);
                }
            }
            bow.state = BowState::Bent { bent_frames };

            if inputs.contains(&InputEvent::Released(Key::Charge)) {
                let (bow, arrow) = fire(&bow, bent_frames, timing)?;
                return Ok((bow, Some(arrow)));
            }
            Ok((bow, None))
        }
        BowState::Reload { cooldown } => {
            let cooldown = cooldown.saturating_sub(1);
            if cooldown == 0 {
                return Ok((ready(bow), None));
            }
            Ok((Bow { state: BowState::Reload { cooldown }, ..bow }, None))
        }
        BowState::Empty => Ok((Bow { vy: 0.0, ..bow }, None)),
    }
}

// ── Arrows ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowOutcome {
    /// Still in the air.
    Flying,
    /// Struck the target; the arrow is now dead.
    Hit(Zone),
    /// Left the world past the right or bottom edge.
    Despawned,
    /// Was already dead; nothing happened.
    Inert,
}

/// Move an arrow one frame and resolve it against the target.
pub fn advance_arrow(arrow: &Arrow, target: &Target, gravity: f32) -> (Arrow, ArrowOutcome) {
    if !arrow.alive {
        return (*arrow, ArrowOutcome::Inert);
    }

    let vy = arrow.vy + gravity;
    let moved = Arrow {
        x: arrow.x + arrow.vx,
        y: arrow.y + vy,
        vy,
        hitbox: arrow.hitbox.translate(arrow.vx, vy),
        ..*arrow
    };

    if moved.x > WORLD_WIDTH || moved.y > WORLD_HEIGHT {
        return (Arrow { alive: false, ..moved }, ArrowOutcome::Despawned);
    }

    match target.zone_hit(&moved.hitbox) {
        Some(zone) => {
            let stopped = Arrow {
                vx: 0.0,
                vy: 0.0,
                sprite: ArrowSprite::Stopped,
                alive: false,
                ..moved
            };
            (stopped, ArrowOutcome::Hit(zone))
        }
        None => (moved, ArrowOutcome::Flying),
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance a whole game session by one frame.
///
/// The bow goes first so an arrow fired this frame already moves this frame.
pub fn tick(
    session: &GameSession,
    inputs: &[InputEvent],
    config: &GameConfig,
) -> Result<GameSession, GameError> {
    let (bow, shot) = update_bow(&session.bow, inputs, &config.timing)?;

    let mut in_flight = session.arrows.clone();
    in_flight.extend(shot);

    let mut score = session.score;
    let mut stuck = session.stuck.clone();
    let mut arrows = Vec::with_capacity(in_flight.len());

    for arrow in &in_flight {
        let (arrow, outcome) = advance_arrow(arrow, &session.target, config.gravity);
        match outcome {
            ArrowOutcome::Flying => arrows.push(arrow),
            ArrowOutcome::Hit(zone) => {
                score.report_hit(zone);
                info!(?zone, points = zone.points(), total = score.total(), "target hit");
                stuck.push(arrow);
            }
            ArrowOutcome::Despawned => debug!(x = arrow.x, y = arrow.y, "arrow left the field"),
            ArrowOutcome::Inert => {}
        }
    }

    Ok(GameSession {
        bow,
        arrows,
        stuck,
        score,
        frame: session.frame + 1,
        ..session.clone()
    })
}

/// True once the quiver is spent and no arrow is still flying.
pub fn is_over(session: &GameSession) -> bool {
    session.bow.state == BowState::Empty && session.arrows.is_empty()
}
