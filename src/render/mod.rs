//! Canvas 2D rendering collaborator
//!
//! Consumes read-only state snapshots once per tick and produces no feedback
//! into the simulation. The only state it owns is decorative (backdrop
//! offsets, frame counter, menu button placement).

mod backdrop;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use web_sys::CanvasRenderingContext2d;

use crate::sim::{Difficulty, GamePhase, GameState, Obstacle, Player, Viewport};
use backdrop::Backdrop;

/// A clickable menu region
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ButtonRect {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px > self.x && px < self.x + self.w && py > self.y && py < self.y + self.h
    }
}

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    backdrop: Backdrop,
    /// Frame counter driving the run cycle and button pulse
    frame: u64,
    easy_btn: ButtonRect,
    hard_btn: ButtonRect,
}

impl Renderer {
    pub fn new(ctx: CanvasRenderingContext2d, viewport: Viewport, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        Self {
            ctx,
            backdrop: Backdrop::new(viewport, &mut rng),
            frame: 0,
            easy_btn: ButtonRect {
                w: 160.0,
                h: 50.0,
                ..Default::default()
            },
            hard_btn: ButtonRect {
                w: 160.0,
                h: 50.0,
                ..Default::default()
            },
        }
    }

    /// Which difficulty button, if any, sits under a click position
    pub fn button_at(&self, px: f32, py: f32) -> Option<Difficulty> {
        if self.easy_btn.contains(px, py) {
            Some(Difficulty::Easy)
        } else if self.hard_btn.contains(px, py) {
            Some(Difficulty::Hard)
        } else {
            None
        }
    }

    /// Draw one frame from the current snapshot
    pub fn render(&mut self, state: &GameState, viewport: Viewport, high_score: u64) {
        self.frame += 1;
        let scrolling = state.phase == GamePhase::Playing;
        let speed = state.speed();

        self.backdrop.draw_sky(&self.ctx, viewport, scrolling);
        self.backdrop.draw_city(&self.ctx, viewport, speed, scrolling);

        match state.phase {
            GamePhase::Start => self.draw_menu(viewport, high_score),
            GamePhase::Playing | GamePhase::Paused => {
                self.draw_runner(&state.player, state.score);
                self.draw_obstacles(&state.obstacles);
                self.backdrop.draw_road(&self.ctx, viewport, speed, scrolling);
                self.draw_hud(state, high_score);
                if state.phase == GamePhase::Paused {
                    self.draw_pause_overlay(viewport);
                }
            }
            GamePhase::GameOver => {
                self.draw_runner(&state.player, state.score);
                self.draw_obstacles(&state.obstacles);
                self.backdrop.draw_road(&self.ctx, viewport, speed, false);
                self.draw_game_over(viewport, state.score, high_score);
            }
        }
    }

    /// Stick-figure runner, hue cycling with score, limbs swinging with the
    /// frame counter
    fn draw_runner(&self, player: &Player, score: u32) {
        let ctx = &self.ctx;
        let color = format!("hsl({},100%,60%)", (score * 20) % 360);
        let x = player.pos.x as f64;
        let y = player.pos.y as f64;
        let body_y = y - 26.0;
        let cycle = (self.frame as f64 * 0.25).sin();

        // Head
        ctx.set_fill_style_str(&color);
        ctx.begin_path();
        let _ = ctx.arc(x, body_y - 14.0, 10.0, 0.0, std::f64::consts::TAU);
        ctx.fill();

        // Eyes
        ctx.set_fill_style_str("#fff");
        ctx.fill_rect(x + 3.0, body_y - 18.0, 2.0, 2.0);
        ctx.fill_rect(x + 7.0, body_y - 18.0, 2.0, 2.0);

        // Torso
        ctx.set_fill_style_str(&color);
        ctx.fill_rect(x - 2.0, body_y, 4.0, 26.0);

        ctx.set_stroke_style_str(&color);
        ctx.set_line_width(3.0);

        // Arms
        ctx.begin_path();
        ctx.move_to(x, body_y + 6.0);
        ctx.line_to(x - 12.0 - cycle * 10.0, body_y + 14.0);
        ctx.move_to(x, body_y + 6.0);
        ctx.line_to(x + 12.0 + cycle * 10.0, body_y + 14.0);
        ctx.stroke();

        // Legs
        ctx.begin_path();
        ctx.move_to(x, y);
        ctx.line_to(x - 10.0 + cycle * 12.0, y + 20.0);
        ctx.move_to(x, y);
        ctx.line_to(x + 10.0 - cycle * 12.0, y + 20.0);
        ctx.stroke();
    }

    fn draw_obstacles(&self, obstacles: &[Obstacle]) {
        self.ctx.set_fill_style_str("#ff00ff");
        for o in obstacles {
            self.ctx
                .fill_rect(o.pos.x as f64, o.pos.y as f64, o.w as f64, o.h as f64);
        }
    }

    fn draw_hud(&self, state: &GameState, high_score: u64) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("#0ff");
        ctx.set_font("20px Segoe UI");
        let _ = ctx.fill_text(&format!("Score: {}", state.score), 30.0, 40.0);
        let mode = state.difficulty.map(|d| d.as_str()).unwrap_or("-");
        let _ = ctx.fill_text(&format!("Mode: {}", mode), 30.0, 65.0);
        let _ = ctx.fill_text(&format!("High: {}", high_score), 30.0, 90.0);
    }

    fn draw_menu(&mut self, viewport: Viewport, high_score: u64) {
        let ctx = &self.ctx;
        let cx = (viewport.width / 2.0) as f64;
        let cy = (viewport.height / 2.0) as f64;

        ctx.set_fill_style_str("#0ff");
        ctx.set_font("42px Segoe UI");
        ctx.set_text_align("center");
        let _ = ctx.fill_text("NEON RUNNER", cx, cy - 100.0);

        self.easy_btn.x = viewport.width / 2.0 - 180.0;
        self.easy_btn.y = viewport.height / 2.0;
        self.hard_btn.x = viewport.width / 2.0 + 20.0;
        self.hard_btn.y = viewport.height / 2.0;

        let easy = self.easy_btn;
        let hard = self.hard_btn;
        self.draw_button(easy, "EASY", "#00ff88");
        self.draw_button(hard, "HARD", "#ff4466");

        ctx.set_font("16px Segoe UI");
        ctx.set_text_align("center");
        let _ = ctx.fill_text(&format!("High Score: {}", high_score), cx, cy + 80.0);
        ctx.set_text_align("left");
    }

    fn draw_button(&self, b: ButtonRect, label: &str, color: &str) {
        let ctx = &self.ctx;
        let pulse = (self.frame as f64 * 0.1).sin() * 6.0;

        ctx.set_fill_style_str(color);
        ctx.set_shadow_color(color);
        ctx.set_shadow_blur(20.0 + pulse);
        ctx.fill_rect(b.x as f64, b.y as f64, b.w as f64, b.h as f64);
        ctx.set_shadow_blur(0.0);

        ctx.set_fill_style_str("#000");
        ctx.set_font("20px Segoe UI");
        ctx.set_text_align("center");
        let _ = ctx.fill_text(label, (b.x + b.w / 2.0) as f64, (b.y + 32.0) as f64);
        ctx.set_text_align("left");
    }

    fn draw_pause_overlay(&self, viewport: Viewport) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("rgba(0,0,0,0.5)");
        ctx.fill_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
        ctx.set_fill_style_str("#0ff");
        ctx.set_font("32px Segoe UI");
        ctx.set_text_align("center");
        let _ = ctx.fill_text(
            "PAUSED",
            (viewport.width / 2.0) as f64,
            (viewport.height / 2.0) as f64,
        );
        ctx.set_text_align("left");
    }

    fn draw_game_over(&self, viewport: Viewport, score: u32, high_score: u64) {
        let ctx = &self.ctx;
        let cx = (viewport.width / 2.0) as f64;
        let cy = (viewport.height / 2.0) as f64;

        ctx.set_fill_style_str("rgba(0,0,0,0.7)");
        ctx.fill_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);

        ctx.set_fill_style_str("#f44");
        ctx.set_font("40px Segoe UI");
        ctx.set_text_align("center");
        let _ = ctx.fill_text("GAME OVER", cx, cy);

        ctx.set_font("18px Segoe UI");
        let _ = ctx.fill_text(&format!("Score: {}", score), cx, cy + 40.0);
        let _ = ctx.fill_text(&format!("High Score: {}", high_score), cx, cy + 65.0);
        let _ = ctx.fill_text("Tap / Space to Restart", cx, cy + 95.0);
        ctx.set_text_align("left");
    }
}
