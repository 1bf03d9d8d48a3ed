//! Scene drawing
//!
//! Turns a [`Scene`] snapshot into a [`DrawList`]: terrain first, then each
//! duck in list order, then confetti, then the legend overlay.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::draw::{ArcMode, DrawList, Style, rgb, rgba};
use super::vertex::colors;
use crate::platform::LEGEND_LINES;
use crate::sim::{Confetti, Duck, HatStyle, Scene, Terrain};

/// Salt mixed into the scene seed so terrain does not mirror the duck stream
const TERRAIN_SALT: u64 = 0x6772_6173_73;

/// Gap between grass blades
const BLADE_SPACING: f32 = 15.0;

/// Legend box layout
const LEGEND_SIZE: Vec2 = Vec2::new(220.0, 240.0);
const LEGEND_PADDING: f32 = 15.0;
const LEGEND_LINE_HEIGHT: f32 = 25.0;
const LEGEND_TEXT_SIZE: f32 = 11.0;

/// Per-frame drawing switches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOptions {
    pub show_legend: bool,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self { show_legend: true }
    }
}

/// Record one frame into `list` (cleared first)
pub fn compose_frame(scene: &Scene, options: &FrameOptions, list: &mut DrawList) {
    list.clear();

    draw_terrain(scene, list);
    for duck in &scene.ducks {
        draw_duck(duck, list);
    }
    for piece in &scene.confetti {
        draw_confetti(piece, list);
    }
    if options.show_legend {
        draw_legend(scene.canvas, list);
    }
}

/// Top-left corner of the legend box
pub fn legend_origin(canvas: Vec2) -> Vec2 {
    let margin = canvas.x / 40.0;
    Vec2::new(canvas.x - margin - LEGEND_SIZE.x, margin)
}

fn draw_terrain(scene: &Scene, list: &mut DrawList) {
    if !scene.terrain.has_grass() {
        return;
    }

    // Same seed every frame keeps blades and flowers from jittering
    let mut rng = Pcg32::seed_from_u64(scene.seed ^ TERRAIN_SALT);
    let canvas = scene.canvas;

    draw_grass(&mut rng, canvas, list);
    match scene.terrain {
        Terrain::Flowers => draw_flowers(&mut rng, canvas, list),
        Terrain::MuddyPuddle => draw_puddle(canvas, list),
        Terrain::Pond => draw_pond(canvas, list),
        Terrain::Bare | Terrain::Plain => {}
    }
}

fn draw_grass(rng: &mut Pcg32, canvas: Vec2, list: &mut DrawList) {
    let style = Style::fill(colors::GRASS).stroked(colors::GRASS_EDGE, 1.0);
    let base = canvas.y;

    let mut x = 0.0;
    while x < canvas.x {
        let width: f32 = rng.random_range(3.0..6.0);
        let tip = base - rng.random_range(30.0..50.0);
        let curve: f32 = rng.random_range(-5.0..5.0);

        let blade = cubic_bezier(
            Vec2::new(x - width / 2.0, base),
            Vec2::new(x - width + curve, tip - 10.0),
            Vec2::new(x + curve - 2.0, tip - 5.0),
            Vec2::new(x + width / 2.0, base),
            10,
        );
        list.polygon(blade, style);
        x += BLADE_SPACING;
    }
}

fn draw_flowers(rng: &mut Pcg32, canvas: Vec2, list: &mut DrawList) {
    for _ in 0..8 {
        let center = Vec2::new(
            rng.random_range(0.0..canvas.x.max(1.0)),
            canvas.y - rng.random_range(20.0..60.0),
        );
        for i in 0..5 {
            let angle = TAU / 5.0 * i as f32;
            let petal = center + Vec2::new(angle.cos(), angle.sin()) * 12.0;
            list.circle(petal, 8.0, Style::fill(colors::FLOWER));
        }
        list.circle(center, 6.0, Style::fill(colors::FLOWER_CENTER));
    }
}

fn draw_puddle(canvas: Vec2, list: &mut DrawList) {
    let mid = canvas.x / 2.0;
    list.ellipse(
        Vec2::new(mid, canvas.y - 50.0),
        Vec2::new(300.0, 80.0),
        Style::fill(colors::MUD),
    );
    list.ellipse(
        Vec2::new(mid - 40.0, canvas.y - 50.0),
        Vec2::new(60.0, 40.0),
        Style::fill(colors::MUD_LIGHT),
    );
    list.ellipse(
        Vec2::new(mid + 60.0, canvas.y - 55.0),
        Vec2::new(50.0, 35.0),
        Style::fill(colors::MUD_LIGHT),
    );
}

fn draw_pond(canvas: Vec2, list: &mut DrawList) {
    let center = Vec2::new(canvas.x / 2.0, canvas.y - 80.0);
    list.ellipse(center, Vec2::new(400.0, 120.0), Style::fill(colors::POND));

    let ripple = Style::outline(colors::RIPPLE, 1.0);
    list.ellipse(center, Vec2::new(120.0, 40.0), ripple);
    list.ellipse(center, Vec2::new(180.0, 60.0), ripple);
}

fn draw_duck(duck: &Duck, list: &mut DrawList) {
    let s = duck.size;
    let palette = duck.color.palette();
    let body = rgb(palette.body[0], palette.body[1], palette.body[2]);
    let head = rgb(palette.head[0], palette.head[1], palette.head[2]);
    let beak = rgb(palette.beak[0], palette.beak[1], palette.beak[2]);

    list.save();
    list.translate(duck.pos);
    list.rotate(duck.rotation);

    let heavy = |fill| Style::fill(fill).stroked(colors::OUTLINE, 2.0);
    let light = |fill| Style::fill(fill).stroked(colors::OUTLINE, 1.5);

    // Body and head
    list.circle(Vec2::ZERO, s, heavy(body));
    list.circle(Vec2::new(0.0, -s * 0.6), s * 0.65, heavy(head));

    // Eyes
    let eye_size = Vec2::splat(s * 0.08);
    list.ellipse(Vec2::new(-s * 0.15, -s * 0.67), eye_size, heavy(colors::OUTLINE));
    list.ellipse(Vec2::new(s * 0.15, -s * 0.67), eye_size, heavy(colors::OUTLINE));

    // Beak
    list.arc(
        Vec2::new(0.0, -s * 0.6),
        Vec2::new(s * 0.25, s * 0.15),
        0.0,
        PI,
        ArcMode::Chord,
        light(beak),
    );

    // Wings, flat side against the body
    let wing = Vec2::new(s * 0.35, s * 0.3);
    list.arc(
        Vec2::new(-s * 0.35, 0.0),
        wing,
        FRAC_PI_2,
        3.0 * FRAC_PI_2,
        ArcMode::Chord,
        light(body),
    );
    list.arc(
        Vec2::new(s * 0.35, 0.0),
        wing,
        -FRAC_PI_2,
        FRAC_PI_2,
        ArcMode::Chord,
        light(body),
    );

    // Feet
    let foot = Vec2::new(s * 0.25, s * 0.15);
    for x in [-s * 0.18, s * 0.18] {
        list.arc(Vec2::new(x, s * 0.42), foot, 0.0, PI, ArcMode::Open, light(beak));
    }

    draw_hat(duck.hat, s, list);
    list.restore();
}

fn draw_hat(hat: HatStyle, s: f32, list: &mut DrawList) {
    let hat_y = -s * 0.85;
    let thin = |fill| Style::fill(fill).stroked(colors::OUTLINE, 1.0);

    match hat {
        HatStyle::Party => {
            list.triangle(
                Vec2::new(-s * 0.2, hat_y),
                Vec2::new(s * 0.2, hat_y),
                Vec2::new(0.0, hat_y - s * 0.35),
                thin(colors::PARTY_HAT),
            );
            list.circle(Vec2::new(0.0, hat_y - s * 0.38), s * 0.15, thin(colors::POM_POM));
        }
        HatStyle::TopHat => {
            // Brim, crown, band
            list.ellipse(Vec2::new(0.0, hat_y), Vec2::new(s * 0.5, s * 0.08), thin(colors::TOP_HAT));
            list.arc(
                Vec2::new(0.0, hat_y - s * 0.1),
                Vec2::new(s * 0.4, s * 0.2),
                PI,
                TAU,
                ArcMode::Open,
                thin(colors::TOP_HAT),
            );
            list.rect(
                Vec2::new(-s * 0.2, hat_y - s * 0.1),
                Vec2::new(s * 0.4, s * 0.1),
                thin(colors::HAT_BAND),
            );
        }
        HatStyle::Baseball => {
            list.rect(
                Vec2::new(-s * 0.2, hat_y - s * 0.11),
                Vec2::new(s * 0.4, s * 0.05),
                thin(colors::CAP),
            );
            list.arc(
                Vec2::new(0.0, hat_y - s * 0.05),
                Vec2::new(s * 0.4, s * 0.2),
                PI,
                TAU,
                ArcMode::Open,
                thin(colors::CAP),
            );
            // Visor
            list.arc(
                Vec2::new(0.0, hat_y - s * 0.01),
                Vec2::new(s * 0.4, s * 0.15),
                0.0,
                PI,
                ArcMode::Open,
                thin(colors::CAP),
            );
        }
        HatStyle::Winter => {
            list.arc(
                Vec2::new(0.0, hat_y),
                Vec2::new(s * 0.35, s * 0.25),
                PI,
                TAU,
                ArcMode::Open,
                thin(colors::BEANIE),
            );
            list.circle(Vec2::new(0.0, hat_y - s * 0.15), s * 0.12, Style::fill(colors::WHITE));
        }
    }
}

fn draw_confetti(piece: &Confetti, list: &mut DrawList) {
    list.save();
    list.translate(piece.pos);
    list.rotate(piece.rotation);
    list.rect(
        Vec2::new(-piece.width / 2.0, -piece.height / 2.0),
        Vec2::new(piece.width, piece.height),
        Style::fill(rgba(piece.rgb(), piece.alpha())),
    );
    list.restore();
}

fn draw_legend(canvas: Vec2, list: &mut DrawList) {
    let origin = legend_origin(canvas);
    list.rect(
        origin,
        LEGEND_SIZE,
        Style::fill(colors::WHITE).stroked(colors::OUTLINE, 2.0),
    );

    let mut pos = origin + Vec2::splat(LEGEND_PADDING);
    for line in LEGEND_LINES {
        list.text(pos, line, LEGEND_TEXT_SIZE, colors::OUTLINE);
        pos.y += LEGEND_LINE_HEIGHT;
    }
}

/// Sample a cubic bezier into `steps + 1` points
fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, steps: u32) -> Vec<Vec2> {
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let u = 1.0 - t;
            p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
        })
        .collect()
}
