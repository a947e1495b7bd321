//! Layout: positions the composed node tree on the fixed card canvas.
//!
//! Simple block layout: columns stack children vertically and center them
//! horizontally; rows place children side by side. The card root is laid
//! out specially: header at the top, footer pinned to the bottom edge, and
//! the main region vertically centered in the space between.

use crate::compose::{Flow, Node, RenderedCard, Role, Sizing};
use crate::rendering::CARD_SIZE;
use crate::theme::Gradient;

/// Distance from the canvas bottom to the footer's bottom edge.
const FOOTER_BOTTOM: u32 = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// A positioned primitive ready for painting.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutItem {
    pub rect: Rect,
    pub kind: ItemKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Box {
        gradient: Option<Gradient>,
        background: Option<String>,
        radius: u32,
        shadow: bool,
        separator_top: Option<String>,
    },
    Text {
        content: String,
        size: u32,
        color: String,
        bold: bool,
        letter_spacing: u32,
    },
}

/// Advance width of one glyph cell at the given font size.
pub fn char_width(size: u32) -> u32 {
    (size * 3).div_ceil(5)
}

/// Measured width of a run of text.
pub fn text_width(content: &str, size: u32, letter_spacing: u32) -> u32 {
    let n = content.chars().count() as u32;
    if n == 0 {
        return 0;
    }
    n * char_width(size) + (n - 1) * letter_spacing
}

/// Lay out a composed card on the 540x540 canvas.
pub fn layout_card(card: &RenderedCard) -> Vec<LayoutItem> {
    let mut items = Vec::new();

    let Node::Container {
        style, children, ..
    } = &card.root
    else {
        // compose_card always produces a container root
        return items;
    };

    // Card background covers the full canvas.
    items.push(LayoutItem {
        rect: Rect {
            x: 0,
            y: 0,
            width: CARD_SIZE,
            height: CARD_SIZE,
        },
        kind: ItemKind::Box {
            gradient: style.gradient,
            background: style.background.clone(),
            radius: style.corner_radius,
            shadow: false,
            separator_top: None,
        },
    });

    let content_x = style.padding_h as i32;
    let content_w = CARD_SIZE.saturating_sub(style.padding_h * 2);

    let header = children.iter().find(|c| c.role() == Role::Header);
    let main = children.iter().find(|c| c.role() == Role::Main);
    let footer = children.iter().find(|c| c.role() == Role::Footer);

    let mut top = style.padding_v as i32;
    if let Some(node) = header {
        let h = place(node, content_x, top, content_w, &mut items);
        top += (node.margin_top() + h + node.margin_bottom()) as i32;
    }

    let mut region_bottom = (CARD_SIZE - style.padding_v) as i32;
    if let Some(node) = footer {
        let (_, h) = measure(node, content_w);
        let y = (CARD_SIZE - FOOTER_BOTTOM).saturating_sub(h) as i32;
        place(node, content_x, y, content_w, &mut items);
        region_bottom = y;
    }

    if let Some(node) = main {
        let (_, h) = measure(node, content_w);
        let space = region_bottom.saturating_sub(top).max(0) as u32;
        let y = top + (space.saturating_sub(h) / 2) as i32;
        place(node, content_x, y, content_w, &mut items);
    }

    items
}

/// Content size of a node within the available width, excluding its own
/// margins.
fn measure(node: &Node, avail: u32) -> (u32, u32) {
    match node {
        Node::Text { content, style, .. } => (
            text_width(content, style.size, style.letter_spacing).min(avail),
            style.line_height,
        ),
        Node::Container {
            flow,
            sizing,
            style,
            children,
            ..
        } => {
            let inner_avail = avail.saturating_sub(style.padding_h * 2);
            match flow {
                Flow::Column => {
                    let mut height = 0;
                    let mut max_w = 0;
                    for child in children {
                        let (w, h) = measure(child, inner_avail);
                        height += child.margin_top() + h + child.margin_bottom();
                        max_w = max_w.max(w);
                    }
                    let width = match sizing {
                        Sizing::Fill => avail,
                        Sizing::Shrink => (max_w + style.padding_h * 2).min(avail),
                    };
                    (width, height + style.padding_v * 2)
                }
                Flow::Row => {
                    let mut width = 0;
                    let mut max_h = 0;
                    for child in children {
                        let (w, h) = measure(child, inner_avail);
                        width += w;
                        max_h = max_h.max(child.margin_top() + h + child.margin_bottom());
                    }
                    ((width + style.padding_h * 2).min(avail), max_h + style.padding_v * 2)
                }
            }
        }
    }
}

/// Place a node at (x, y) within `avail` width, centering it horizontally.
/// Returns the height consumed, excluding the node's own margins.
fn place(node: &Node, x: i32, y: i32, avail: u32, items: &mut Vec<LayoutItem>) -> u32 {
    match node {
        Node::Text { content, style, .. } => {
            let w = text_width(content, style.size, style.letter_spacing).min(avail);
            let tx = x + (avail.saturating_sub(w) / 2) as i32;
            items.push(LayoutItem {
                rect: Rect {
                    x: tx,
                    y,
                    width: w,
                    height: style.line_height,
                },
                kind: ItemKind::Text {
                    content: content.clone(),
                    size: style.size,
                    color: style.color.clone(),
                    bold: style.bold,
                    letter_spacing: style.letter_spacing,
                },
            });
            style.line_height
        }
        Node::Container {
            flow,
            style,
            children,
            ..
        } => {
            let (w, h) = measure(node, avail);
            let bx = x + (avail.saturating_sub(w) / 2) as i32;

            let styled = style.gradient.is_some()
                || style.background.is_some()
                || style.separator_top.is_some();
            if styled {
                items.push(LayoutItem {
                    rect: Rect {
                        x: bx,
                        y,
                        width: w,
                        height: h,
                    },
                    kind: ItemKind::Box {
                        gradient: style.gradient,
                        background: style.background.clone(),
                        radius: style.corner_radius,
                        shadow: style.shadow,
                        separator_top: style.separator_top.clone(),
                    },
                });
            }

            let inner_x = bx + style.padding_h as i32;
            let inner_avail = w.saturating_sub(style.padding_h * 2);
            match flow {
                Flow::Column => {
                    let mut cy = y + style.padding_v as i32;
                    for child in children {
                        cy += child.margin_top() as i32;
                        let ch = place(child, inner_x, cy, inner_avail, items);
                        cy += (ch + child.margin_bottom()) as i32;
                    }
                }
                Flow::Row => {
                    let mut cx = inner_x;
                    for child in children {
                        let (cw, ch) = measure(child, inner_avail);
                        let cy = y + (h.saturating_sub(ch) / 2) as i32;
                        place(child, cx, cy, cw, items);
                        cx += cw as i32;
                    }
                }
            }
            h
        }
    }
}
