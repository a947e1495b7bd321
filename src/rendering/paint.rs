//! Paint commands: the small drawing vocabulary the rasterizer executes.

use crate::rendering::layout::{ItemKind, LayoutItem, Rect};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Drop shadow under the result box: rgba(0,0,0,0.3).
const SHADOW_COLOR: Rgba = Rgba::new(0, 0, 0, 77);
const SHADOW_OFFSET: i32 = 4;

/// Parse `#rgb`, `#rrggbb`, or `#rrggbbaa`. Unparseable input paints
/// opaque white rather than failing the render.
pub fn parse_color(s: &str) -> Rgba {
    let hex = s.trim_start_matches('#');
    let nibble = |i: usize| -> Option<u8> {
        hex.as_bytes().get(i).and_then(|b| (*b as char).to_digit(16)).map(|d| d as u8)
    };
    let byte = |i: usize| -> Option<u8> { Some(nibble(i)? << 4 | nibble(i + 1)?) };
    match hex.len() {
        3 => {
            let c = |i| nibble(i).map(|d| d << 4 | d);
            match (c(0), c(1), c(2)) {
                (Some(r), Some(g), Some(b)) => Rgba::new(r, g, b, 255),
                _ => Rgba::new(255, 255, 255, 255),
            }
        }
        6 => match (byte(0), byte(2), byte(4)) {
            (Some(r), Some(g), Some(b)) => Rgba::new(r, g, b, 255),
            _ => Rgba::new(255, 255, 255, 255),
        },
        8 => match (byte(0), byte(2), byte(4), byte(6)) {
            (Some(r), Some(g), Some(b), Some(a)) => Rgba::new(r, g, b, a),
            _ => Rgba::new(255, 255, 255, 255),
        },
        _ => Rgba::new(255, 255, 255, 255),
    }
}

/// One drawing operation in logical canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SolidRect {
        rect: Rect,
        rgba: Rgba,
        radius: u32,
    },
    /// 135-degree linear gradient; stop positions are percentages.
    GradientRect {
        rect: Rect,
        stops: Vec<(Rgba, u8)>,
        radius: u32,
    },
    Text {
        rect: Rect,
        content: String,
        size: u32,
        rgba: Rgba,
        bold: bool,
        letter_spacing: u32,
    },
}

/// Lower layout items to paint commands in painter's order.
pub fn paint_items(items: &[LayoutItem]) -> Vec<PaintCommand> {
    let mut commands = Vec::new();
    for item in items {
        match &item.kind {
            ItemKind::Box {
                gradient,
                background,
                radius,
                shadow,
                separator_top,
            } => {
                if *shadow {
                    commands.push(PaintCommand::SolidRect {
                        rect: Rect {
                            x: item.rect.x,
                            y: item.rect.y + SHADOW_OFFSET,
                            width: item.rect.width,
                            height: item.rect.height,
                        },
                        rgba: SHADOW_COLOR,
                        radius: *radius,
                    });
                }
                if let Some(gradient) = gradient {
                    commands.push(PaintCommand::GradientRect {
                        rect: item.rect.clone(),
                        stops: gradient
                            .stops
                            .iter()
                            .map(|(color, pos)| (parse_color(color), *pos))
                            .collect(),
                        radius: *radius,
                    });
                }
                if let Some(background) = background {
                    commands.push(PaintCommand::SolidRect {
                        rect: item.rect.clone(),
                        rgba: parse_color(background),
                        radius: *radius,
                    });
                }
                if let Some(rule) = separator_top {
                    commands.push(PaintCommand::SolidRect {
                        rect: Rect {
                            x: item.rect.x,
                            y: item.rect.y,
                            width: item.rect.width,
                            height: 1,
                        },
                        rgba: parse_color(rule),
                        radius: 0,
                    });
                }
            }
            ItemKind::Text {
                content,
                size,
                color,
                bold,
                letter_spacing,
            } => {
                commands.push(PaintCommand::Text {
                    rect: item.rect.clone(),
                    content: content.clone(),
                    size: *size,
                    rgba: parse_color(color),
                    bold: *bold,
                    letter_spacing: *letter_spacing,
                });
            }
        }
    }
    commands
}
