//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game. No game logic is performed; this module only translates world
//! coordinates into terminal cells and state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use archery::compute::is_over;
use archery::context::{ContextSwitcher, Mode};
use archery::entities::{
    Arrow, ArrowSprite, BowPose, GameSession, Rect, Zone, BOW_SIZE, ROPE_STEPS, WORLD_HEIGHT,
    WORLD_WIDTH,
};
use archery::menu::Menu;
use archery::scenery::Backdrop;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_FONT: Color = Color::Rgb { r: 200, g: 20, b: 20 };
const C_ROPE: Color = Color::Rgb { r: 180, g: 180, b: 180 };
const C_BOW: Color = Color::Rgb { r: 140, g: 90, b: 40 };
const C_ARROW: Color = Color::White;
const C_ARROW_STUCK: Color = Color::DarkGrey;
const C_RING_OUTER: Color = Color::Rgb { r: 60, g: 90, b: 220 };
const C_RING_MIDDLE: Color = Color::Rgb { r: 220, g: 40, b: 40 };
const C_RING_INNER: Color = Color::Rgb { r: 240, g: 210, b: 40 };
const C_PANEL: Color = Color::Rgb { r: 30, g: 30, b: 30 };
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whatever mode is active.
pub fn render<W: Write>(
    out: &mut W,
    switcher: &ContextSwitcher,
    backdrop: &Backdrop,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let view = View { cols: backdrop.width, rows: backdrop.height };

    match switcher.active_mode() {
        Some(Mode::Game(session)) => draw_game(out, &view, backdrop, session)?,
        Some(Mode::Menu(menu)) if menu.is_overlay() => {
            if let Some(session) = switcher.session() {
                draw_game(out, &view, backdrop, session)?;
            } else {
                draw_backdrop(out, backdrop)?;
            }
            draw_menu(out, &view, menu)?;
        }
        Some(Mode::Menu(menu)) => {
            draw_backdrop(out, backdrop)?;
            draw_menu(out, &view, menu)?;
        }
        Some(Mode::Quit) | None => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── World → terminal mapping ──────────────────────────────────────────────────

struct View {
    cols: u16,
    rows: u16,
}

impl View {
    fn col(&self, x: f32) -> u16 {
        let c = (x / WORLD_WIDTH * self.cols as f32).floor();
        c.clamp(0.0, self.cols.saturating_sub(1) as f32) as u16
    }

    fn row(&self, y: f32) -> u16 {
        let r = (y / WORLD_HEIGHT * self.rows as f32).floor();
        r.clamp(0.0, self.rows.saturating_sub(1) as f32) as u16
    }

    /// Inclusive cell range covered by `rect`.
    fn cells(&self, rect: &Rect) -> (u16, u16, u16, u16) {
        (
            self.col(rect.x),
            self.row(rect.y),
            self.col(rect.right() - 0.01),
            self.row(rect.bottom() - 0.01),
        )
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}

// ── Backdrop ──────────────────────────────────────────────────────────────────

fn draw_backdrop<W: Write>(out: &mut W, backdrop: &Backdrop) -> std::io::Result<()> {
    for row in 0..backdrop.height {
        out.queue(cursor::MoveTo(0, row))?;
        let mut current = None;
        for shade in backdrop.row(row) {
            let color = rgb(shade.rgb());
            if current != Some(color) {
                out.queue(style::SetBackgroundColor(color))?;
                current = Some(color);
            }
            out.queue(Print(' '))?;
        }
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

fn fill<W: Write>(out: &mut W, view: &View, rect: &Rect, color: Color) -> std::io::Result<()> {
    let (c0, r0, c1, r1) = view.cells(rect);
    out.queue(style::SetBackgroundColor(color))?;
    let width = (c1 - c0 + 1) as usize;
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(" ".repeat(width)))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Game ──────────────────────────────────────────────────────────────────────

fn draw_game<W: Write>(
    out: &mut W,
    view: &View,
    backdrop: &Backdrop,
    session: &GameSession,
) -> std::io::Result<()> {
    draw_backdrop(out, backdrop)?;
    draw_target(out, view, session)?;
    for arrow in &session.stuck {
        draw_arrow(out, view, arrow)?;
    }
    draw_bow(out, view, session)?;
    for arrow in &session.arrows {
        draw_arrow(out, view, arrow)?;
    }
    draw_hud(out, view, session)?;
    Ok(())
}

fn draw_target<W: Write>(out: &mut W, view: &View, session: &GameSession) -> std::io::Result<()> {
    // Outermost first so inner rings paint over it
    for (zone, area) in session.target.zones().iter().rev() {
        let color = match zone {
            Zone::Outer => C_RING_OUTER,
            Zone::Middle => C_RING_MIDDLE,
            Zone::Inner => C_RING_INNER,
        };
        fill(out, view, area, color)?;
    }
    Ok(())
}

fn draw_bow<W: Write>(out: &mut W, view: &View, session: &GameSession) -> std::io::Result<()> {
    let bow = &session.bow;
    let frame = Rect::new(bow.x, bow.y, BOW_SIZE.0, BOW_SIZE.1);
    let (left, top, right, bottom) = view.cells(&frame);
    let middle = top + (bottom - top) / 2;

    // Limb: a ")" arc along the right edge, tips bent back
    out.queue(style::SetForegroundColor(C_BOW))?;
    for row in top..=bottom {
        let glyph = if row == top { "╮" } else if row == bottom { "╯" } else { ")" };
        out.queue(cursor::MoveTo(right, row))?;
        out.queue(Print(glyph))?;
    }

    // String: straight when relaxed, pulled left towards `left` when nocked
    let span = right.saturating_sub(left).saturating_sub(1);
    let pull = match bow.pose {
        BowPose::Nocked(step) => (span as u32 * step / ROPE_STEPS) as u16,
        BowPose::Relaxed => 0,
    };
    let rest = right.saturating_sub(1);
    let nock = rest.saturating_sub(pull);
    out.queue(style::SetForegroundColor(C_ROPE))?;
    for row in top + 1..bottom {
        let col = if row == middle { nock } else { rest };
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("│"))?;
    }

    if let BowPose::Nocked(_) = bow.pose {
        out.queue(cursor::MoveTo(nock, middle))?;
        out.queue(style::SetForegroundColor(C_ARROW))?;
        let shaft = (right - nock + 1) as usize;
        out.queue(Print(format!("{}►", "─".repeat(shaft))))?;
    }
    Ok(())
}

fn draw_arrow<W: Write>(out: &mut W, view: &View, arrow: &Arrow) -> std::io::Result<()> {
    let (_, _, head, _) = view.cells(&arrow.hitbox);
    let row = view.row(arrow.hitbox.y + arrow.hitbox.h / 2.0);
    // Shaft trails three head-lengths behind the hitbox
    let tail = view.col(arrow.hitbox.x - arrow.hitbox.w * 3.0);
    let color = match arrow.sprite {
        ArrowSprite::Flying => C_ARROW,
        ArrowSprite::Stopped => C_ARROW_STUCK,
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(tail, row))?;
    let shaft = head.saturating_sub(tail) as usize;
    out.queue(Print(format!(">{}►", "─".repeat(shaft.saturating_sub(1)))))?;
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, view: &View, session: &GameSession) -> std::io::Result<()> {
    let score = format!(" {} ", session.score.total());
    out.queue(cursor::MoveTo((view.cols / 2).saturating_sub(score.len() as u16 / 2), 0))?;
    out.queue(style::SetForegroundColor(C_FONT))?;
    out.queue(style::SetBackgroundColor(C_PANEL))?;
    out.queue(Print(&score))?;

    let quiver = format!(" Arrows: {} ", "↑".repeat(session.bow.ammo as usize));
    let qx = view.cols.saturating_sub(quiver.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(qx, 0))?;
    out.queue(Print(&quiver))?;
    out.queue(style::ResetColor)?;

    let hint = if is_over(session) {
        "Out of arrows!   ESC : Pause / Menu"
    } else {
        "SPACE hold + release : Shoot   ESC : Pause"
    };
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Menus ─────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, view: &View, menu: &Menu) -> std::io::Result<()> {
    let x = view.cols * 2 / 3;
    let width = menu
        .options()
        .iter()
        .map(|o| o.label.len())
        .chain(std::iter::once(menu.title().len()))
        .max()
        .unwrap_or(0) as u16
        + 6;
    let x = x.min(view.cols.saturating_sub(width));
    let title_row = view.rows / 5;
    let first_row = view.rows / 2;

    if menu.is_overlay() {
        let top = title_row.saturating_sub(1);
        let bottom = first_row + menu.options().len() as u16;
        out.queue(style::SetBackgroundColor(C_PANEL))?;
        for row in top..=bottom {
            out.queue(cursor::MoveTo(x.saturating_sub(3), row))?;
            out.queue(Print(" ".repeat(width as usize + 3)))?;
        }
    }

    out.queue(style::SetForegroundColor(C_FONT))?;
    out.queue(cursor::MoveTo(x, title_row))?;
    out.queue(style::SetAttribute(style::Attribute::Bold))?;
    out.queue(Print(menu.title().to_uppercase()))?;
    out.queue(style::SetAttribute(style::Attribute::Reset))?;
    if menu.is_overlay() {
        out.queue(style::SetBackgroundColor(C_PANEL))?;
    }

    for (i, option) in menu.options().iter().enumerate() {
        let row = first_row + i as u16;
        let marker = if i == menu.cursor() { "> " } else { "  " };
        out.queue(cursor::MoveTo(x.saturating_sub(2), row))?;
        out.queue(style::SetForegroundColor(C_FONT))?;
        out.queue(Print(format!("{marker}[{}]", option.label)))?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ : Move   ENTER : Select"))?;
    Ok(())
}
