//! Recorded 2D draw commands
//!
//! A [`DrawList`] is what the scene renderer produces each frame: an ordered
//! list of primitives in canvas pixels (y down) with a save/restore
//! transform stack. Sizes follow canvas conventions: circles and ellipses
//! take a diameter / width-height, not radii.

use glam::Vec2;

/// Linear RGBA, 0-1 per channel
pub type Color = [f32; 4];

/// Opaque color from 8-bit channels
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Color from 8-bit channels with a 0-1 alpha
pub fn rgba(c: [u8; 3], alpha: f32) -> Color {
    let [r, g, b, _] = rgb(c[0], c[1], c[2]);
    [r, g, b, alpha.clamp(0.0, 1.0)]
}

/// Fill and outline of a shape
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f32,
}

impl Style {
    /// Filled, no outline
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            stroke_width: 0.0,
        }
    }

    /// Outline only
    pub fn outline(color: Color, width: f32) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            stroke_width: width,
        }
    }

    /// Add an outline
    pub fn stroked(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }
}

/// How an arc is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcMode {
    /// Filled as a wedge from the center, outline along the curve only
    Open,
    /// Closed by a straight line between the ends
    Chord,
}

/// Drawable geometry, in the current local space
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Ellipse {
        center: Vec2,
        size: Vec2,
    },
    Arc {
        center: Vec2,
        size: Vec2,
        start: f32,
        end: f32,
        mode: ArcMode,
    },
    Rect {
        min: Vec2,
        size: Vec2,
    },
    Polygon {
        points: Vec<Vec2>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Push the current transform
    Save,
    /// Pop back to the last saved transform
    Restore,
    Translate(Vec2),
    Rotate(f32),
    Shape {
        shape: Shape,
        style: Style,
    },
    /// Left/top aligned text; rasterized by the platform layer
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: Color,
    },
}

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every command, keeping the allocation
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn save(&mut self) {
        self.push(DrawCommand::Save);
    }

    pub fn restore(&mut self) {
        self.push(DrawCommand::Restore);
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.push(DrawCommand::Translate(offset));
    }

    pub fn rotate(&mut self, angle: f32) {
        self.push(DrawCommand::Rotate(angle));
    }

    pub fn shape(&mut self, shape: Shape, style: Style) {
        self.push(DrawCommand::Shape { shape, style });
    }

    /// Circle by center and diameter
    pub fn circle(&mut self, center: Vec2, diameter: f32, style: Style) {
        self.ellipse(center, Vec2::splat(diameter), style);
    }

    /// Ellipse by center and width/height
    pub fn ellipse(&mut self, center: Vec2, size: Vec2, style: Style) {
        self.shape(Shape::Ellipse { center, size }, style);
    }

    /// Elliptical arc from `start` to `end` (radians, clockwise on screen)
    pub fn arc(&mut self, center: Vec2, size: Vec2, start: f32, end: f32, mode: ArcMode, style: Style) {
        self.shape(
            Shape::Arc {
                center,
                size,
                start,
                end,
                mode,
            },
            style,
        );
    }

    /// Axis-aligned rectangle by top-left corner and size
    pub fn rect(&mut self, min: Vec2, size: Vec2, style: Style) {
        self.shape(Shape::Rect { min, size }, style);
    }

    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, style: Style) {
        self.polygon(vec![a, b, c], style);
    }

    pub fn polygon(&mut self, points: Vec<Vec2>, style: Style) {
        self.shape(Shape::Polygon { points }, style);
    }

    pub fn text(&mut self, pos: Vec2, text: impl Into<String>, size: f32, color: Color) {
        self.push(DrawCommand::Text {
            pos,
            text: text.into(),
            size,
            color,
        });
    }

    /// Every text command, in draw order
    pub fn texts(&self) -> impl Iterator<Item = (Vec2, &str)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { pos, text, .. } => Some((*pos, text.as_str())),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_scales_channels() {
        assert_eq!(rgb(255, 0, 255), [1.0, 0.0, 1.0, 1.0]);
        assert_eq!(rgba([0, 0, 0], 2.0)[3], 1.0);
    }

    #[test]
    fn test_circle_records_ellipse() {
        let mut list = DrawList::new();
        list.circle(Vec2::new(1.0, 2.0), 10.0, Style::fill(rgb(0, 0, 0)));
        assert_eq!(
            list.commands()[0],
            DrawCommand::Shape {
                shape: Shape::Ellipse {
                    center: Vec2::new(1.0, 2.0),
                    size: Vec2::splat(10.0)
                },
                style: Style::fill(rgb(0, 0, 0)),
            }
        );
    }

    #[test]
    fn test_texts_skip_shapes() {
        let mut list = DrawList::new();
        list.rect(Vec2::ZERO, Vec2::ONE, Style::default());
        list.text(Vec2::new(5.0, 6.0), "hello", 11.0, rgb(0, 0, 0));
        let texts: Vec<_> = list.texts().collect();
        assert_eq!(texts, vec![(Vec2::new(5.0, 6.0), "hello")]);

        list.clear();
        assert!(list.is_empty());
    }
}
