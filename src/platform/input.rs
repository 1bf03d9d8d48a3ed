//! Keyboard and pointer mapping

use glam::Vec2;

use crate::sim::Command;

/// Legend lines, in display order
pub const LEGEND_LINES: [&str; 8] = [
    "[enter] - stop / start",
    "[space] - reset # of ducks",
    "(1,2,3...) - add __ ducks",
    "d - duck change",
    "g - grass",
    "h - hat change",
    "p - party!",
    "click the duck - ???",
];

/// Map a `KeyboardEvent.key` value to a command
///
/// Unmapped keys return `None` and should keep their default browser action.
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "Enter" => Some(Command::ToggleMotion),
        " " => Some(Command::Reset),
        "h" | "H" => Some(Command::CycleHat),
        "d" | "D" => Some(Command::CycleColor),
        "g" | "G" => Some(Command::CycleTerrain),
        "p" | "P" => Some(Command::Party),
        _ => digit(key).map(Command::AddDucks),
    }
}

/// Pointer press in element pixels, scaled to canvas pixels
pub fn click_command(offset: Vec2, element_size: Vec2, canvas: Vec2) -> Command {
    let scale = if element_size.x > 0.0 && element_size.y > 0.0 {
        canvas / element_size
    } else {
        Vec2::ONE
    };
    Command::Click(offset * scale)
}

/// Backing-store size in device pixels for a canvas laid out at `css_size`
pub fn backing_size(css_size: Vec2, device_pixel_ratio: f32) -> (u32, u32) {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    let backing = (css_size * dpr).floor().max(Vec2::ONE);
    (backing.x as u32, backing.y as u32)
}

/// Single digit 1-9
fn digit(key: &str) -> Option<u8> {
    let mut chars = key.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match c.to_digit(10)? {
        0 => None,
        n => Some(n as u8),
    }
}
