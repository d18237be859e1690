//! Parallax cityscape decoration
//!
//! Stars, moon, two building strips and the road. Pure decoration: the
//! backdrop reads speed from the snapshot but feeds nothing back.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use web_sys::CanvasRenderingContext2d;

use crate::consts::GROUND_MARGIN;
use crate::sim::Viewport;

const STAR_COUNT: usize = 120;
/// Building strips tile over the viewport plus this much slack
const STRIP_SLACK: f32 = 400.0;

struct Star {
    pos: Vec2,
    radius: f32,
    drift: f32,
}

struct Building {
    x: f32,
    width: f32,
    height: f32,
    billboard: bool,
}

pub struct Backdrop {
    stars: Vec<Star>,
    far: Vec<Building>,
    near: Vec<Building>,
    far_offset: f32,
    near_offset: f32,
    road_offset: f32,
}

impl Backdrop {
    pub fn new(viewport: Viewport, rng: &mut Pcg32) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..viewport.width),
                    rng.random_range(0.0..viewport.height * 0.6),
                ),
                radius: rng.random_range(0.5..2.0),
                drift: rng.random_range(0.1..0.4),
            })
            .collect();

        Self {
            stars,
            far: Self::building_strip(viewport, rng, 80.0, 180.0..260.0),
            near: Self::building_strip(viewport, rng, 60.0, 140.0..220.0),
            far_offset: 0.0,
            near_offset: 0.0,
            road_offset: 0.0,
        }
    }

    fn building_strip(
        viewport: Viewport,
        rng: &mut Pcg32,
        width: f32,
        heights: std::ops::Range<f32>,
    ) -> Vec<Building> {
        let mut strip = Vec::new();
        let mut x = 0.0;
        while x < viewport.width + STRIP_SLACK {
            strip.push(Building {
                x,
                width,
                height: rng.random_range(heights.clone()),
                billboard: rng.random_range(0.0..1.0f32) < 0.3,
            });
            x += width + 40.0;
        }
        strip
    }

    /// Draw sky, stars and moon. Stars only drift while scrolling.
    pub fn draw_sky(&mut self, ctx: &CanvasRenderingContext2d, viewport: Viewport, scrolling: bool) {
        ctx.set_fill_style_str("#000");
        ctx.fill_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);

        ctx.set_fill_style_str("#fff");
        for star in &mut self.stars {
            ctx.begin_path();
            let _ = ctx.arc(
                star.pos.x as f64,
                star.pos.y as f64,
                star.radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.fill();
            if scrolling {
                star.pos.x -= star.drift;
                if star.pos.x < 0.0 {
                    star.pos.x = viewport.width;
                }
            }
        }

        // Moon with a soft glow
        ctx.set_fill_style_str("#ddd");
        ctx.set_shadow_color("#fff");
        ctx.set_shadow_blur(30.0);
        ctx.begin_path();
        let _ = ctx.arc(
            (viewport.width - 120.0) as f64,
            100.0,
            40.0,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.fill();
        ctx.set_shadow_blur(0.0);
    }

    /// Draw both parallax building strips, advancing offsets while scrolling
    pub fn draw_city(
        &mut self,
        ctx: &CanvasRenderingContext2d,
        viewport: Viewport,
        speed: f32,
        scrolling: bool,
    ) {
        if scrolling {
            self.far_offset -= speed * 0.15;
            self.near_offset -= speed * 0.35;
        }
        Self::draw_strip(&self.far, self.far_offset, ctx, viewport, "#0a132a");
        Self::draw_strip(&self.near, self.near_offset, ctx, viewport, "#121f44");
    }

    fn draw_strip(
        strip: &[Building],
        offset: f32,
        ctx: &CanvasRenderingContext2d,
        viewport: Viewport,
        color: &str,
    ) {
        let wrap = viewport.width + STRIP_SLACK;
        for b in strip {
            let bx = (b.x + offset.rem_euclid(wrap)) % wrap - b.width;
            let top = viewport.height - b.height;
            ctx.set_fill_style_str(color);
            ctx.fill_rect(bx as f64, top as f64, b.width as f64, b.height as f64);

            // Lit window grid
            ctx.set_fill_style_str("#ffe066");
            let mut y = top + 20.0;
            while y < viewport.height - 20.0 {
                let mut x = bx + 10.0;
                while x < bx + b.width - 10.0 {
                    ctx.fill_rect(x as f64, y as f64, 6.0, 8.0);
                    x += 18.0;
                }
                y += 18.0;
            }

            if b.billboard {
                ctx.set_fill_style_str("#0ff");
                ctx.set_shadow_color("#0ff");
                ctx.set_shadow_blur(15.0);
                ctx.fill_rect((bx + 10.0) as f64, (top + 30.0) as f64, (b.width - 20.0) as f64, 18.0);
                ctx.set_shadow_blur(0.0);
            }
        }
    }

    /// Draw the road surface with scrolling lane dashes
    pub fn draw_road(
        &mut self,
        ctx: &CanvasRenderingContext2d,
        viewport: Viewport,
        speed: f32,
        scrolling: bool,
    ) {
        let y = viewport.height - GROUND_MARGIN + 40.0;
        ctx.set_fill_style_str("#111");
        ctx.fill_rect(
            0.0,
            y as f64,
            viewport.width as f64,
            (viewport.height - y) as f64,
        );

        if scrolling {
            self.road_offset -= speed;
        }
        ctx.set_stroke_style_str("#333");
        ctx.set_line_width(4.0);
        ctx.begin_path();
        let dash_shift = (self.road_offset % 40.0) as f64;
        let mut x = 0.0f64;
        while x < viewport.width as f64 {
            ctx.move_to(x + dash_shift, (y + 30.0) as f64);
            ctx.line_to(x + 20.0 + dash_shift, (y + 30.0) as f64);
            x += 40.0;
        }
        ctx.stroke();
    }
}
