//! Card composer: builds a pure tagged node tree from a `CardConfig`.
//!
//! Composition is a pure function of the configuration and the theme
//! registry. The returned tree carries role tags and style data but is not
//! bound to any renderer; `crate::rendering` turns it into pixels.

use crate::theme::{resolve_theme, Gradient, ThemeTokens};
use crate::CardConfig;

/// Fixed attribution text rendered in every card footer.
pub const FOOTER_TEXT: &str = "Marco's Decision Tools";

// Fixed text colors shared by all themes.
const TEXT_SOFT: &str = "#94a3b8";
const TEXT_LIGHT: &str = "#e2e8f0";
const TEXT_FOOTER: &str = "#64748b";
const MAIN_LABEL_COLOR: &str = "#ffffffcc";
const MAIN_VALUE_COLOR: &str = "#ffffff";
const MAIN_SUBLABEL_COLOR: &str = "#ffffffb3";
const STATS_BACKGROUND: &str = "#00000066";
const FOOTER_RULE: &str = "#ffffff26";

/// Identifies the card region a node renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Card,
    Header,
    Main,
    Icon,
    MainResult,
    MainLabel,
    MainValue,
    MainSublabel,
    SubResult,
    SubLabel,
    SubValue,
    StatsRow,
    StatItem,
    StatValue,
    StatLabel,
    /// Free-form caller-supplied content
    Extra,
    Footer,
    FooterText,
}

/// Stacking direction of a container's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Column,
    Row,
}

/// Whether a container spans its parent or shrinks to its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    Fill,
    Shrink,
}

/// Styling carried by text nodes. Sizes are logical pixels on the 540x540
/// canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    pub size: u32,
    pub line_height: u32,
    pub color: String,
    pub bold: bool,
    pub letter_spacing: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
}

impl TextStyle {
    pub fn plain(size: u32, color: &str) -> Self {
        Self {
            size,
            line_height: size + size / 4,
            color: color.to_string(),
            bold: false,
            letter_spacing: 0,
            margin_top: 0,
            margin_bottom: 0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn line_height(mut self, line_height: u32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn letter_spacing(mut self, spacing: u32) -> Self {
        self.letter_spacing = spacing;
        self
    }

    pub fn margin_top(mut self, margin: u32) -> Self {
        self.margin_top = margin;
        self
    }

    pub fn margin_bottom(mut self, margin: u32) -> Self {
        self.margin_bottom = margin;
        self
    }
}

/// Styling carried by container nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoxStyle {
    pub gradient: Option<Gradient>,
    /// Solid background color (hex, may carry alpha)
    pub background: Option<String>,
    pub corner_radius: u32,
    pub padding_v: u32,
    pub padding_h: u32,
    pub margin_bottom: u32,
    pub shadow: bool,
    /// Hairline rule painted along the container's top edge
    pub separator_top: Option<String>,
}

/// A node of the composed visual tree: either a run of text or a container
/// stacking children vertically or horizontally.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text {
        role: Role,
        content: String,
        style: TextStyle,
    },
    Container {
        role: Role,
        flow: Flow,
        sizing: Sizing,
        style: BoxStyle,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn text(role: Role, content: impl Into<String>, style: TextStyle) -> Self {
        Node::Text {
            role,
            content: content.into(),
            style,
        }
    }

    /// A full-width vertical container.
    pub fn column(role: Role, style: BoxStyle, children: Vec<Node>) -> Self {
        Node::Container {
            role,
            flow: Flow::Column,
            sizing: Sizing::Fill,
            style,
            children,
        }
    }

    /// A content-sized vertical container.
    pub fn group(role: Role, style: BoxStyle, children: Vec<Node>) -> Self {
        Node::Container {
            role,
            flow: Flow::Column,
            sizing: Sizing::Shrink,
            style,
            children,
        }
    }

    /// A content-sized horizontal container.
    pub fn row(role: Role, style: BoxStyle, children: Vec<Node>) -> Self {
        Node::Container {
            role,
            flow: Flow::Row,
            sizing: Sizing::Shrink,
            style,
            children,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Node::Text { role, .. } => *role,
            Node::Container { role, .. } => *role,
        }
    }

    pub fn margin_top(&self) -> u32 {
        match self {
            Node::Text { style, .. } => style.margin_top,
            Node::Container { .. } => 0,
        }
    }

    pub fn margin_bottom(&self) -> u32 {
        match self {
            Node::Text { style, .. } => style.margin_bottom,
            Node::Container { style, .. } => style.margin_bottom,
        }
    }

    /// Depth-first visit of this node and all descendants.
    pub fn visit<'a, F: FnMut(&'a Node)>(&'a self, f: &mut F) {
        f(self);
        if let Node::Container { children, .. } = self {
            for child in children {
                child.visit(f);
            }
        }
    }
}

/// The product of one composition pass: an opaque visual tree plus the
/// resolved theme. Recomposition produces a new instance.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCard {
    pub root: Node,
    pub theme: &'static ThemeTokens,
}

impl RenderedCard {
    /// All nodes carrying the given role, in document order.
    pub fn nodes_with_role(&self, role: Role) -> Vec<&Node> {
        let mut found = Vec::new();
        self.root.visit(&mut |n| {
            if n.role() == role {
                found.push(n);
            }
        });
        found
    }

    pub fn has_role(&self, role: Role) -> bool {
        !self.nodes_with_role(role).is_empty()
    }
}

/// Compose a share card tree from a configuration.
///
/// Pure with respect to the configuration and the theme registry; never
/// fails. Missing optional fields suppress their regions entirely.
pub fn compose_card(config: &CardConfig) -> RenderedCard {
    let theme = resolve_theme(&config.theme);

    let header = Node::text(
        Role::Header,
        &config.tool_name,
        TextStyle::plain(14, theme.header_color)
            .letter_spacing(2)
            .margin_bottom(12),
    );

    let main = Node::column(Role::Main, BoxStyle::default(), main_children(config, theme));

    let footer = Node::column(
        Role::Footer,
        BoxStyle {
            separator_top: Some(FOOTER_RULE.to_string()),
            padding_v: 10,
            ..Default::default()
        },
        vec![Node::text(
            Role::FooterText,
            FOOTER_TEXT,
            TextStyle::plain(12, TEXT_FOOTER).line_height(16),
        )],
    );

    let root = Node::column(
        Role::Card,
        BoxStyle {
            gradient: Some(theme.gradient),
            padding_v: 32,
            padding_h: 32,
            ..Default::default()
        },
        vec![header, main, footer],
    );

    RenderedCard { root, theme }
}

fn main_children(config: &CardConfig, theme: &ThemeTokens) -> Vec<Node> {
    // A full override replaces the default main content; no merge.
    if let Some(custom) = &config.custom_main {
        return vec![custom.clone()];
    }

    let mut children = Vec::new();

    if let Some(icon) = config.icon.as_deref().filter(|s| !s.is_empty()) {
        children.push(Node::text(
            Role::Icon,
            icon,
            TextStyle::plain(48, MAIN_VALUE_COLOR).margin_bottom(12),
        ));
    }

    if let Some(main) = &config.main_result {
        let mut inner = Vec::new();
        if !main.label.is_empty() {
            inner.push(Node::text(
                Role::MainLabel,
                &main.label,
                TextStyle::plain(14, MAIN_LABEL_COLOR).margin_bottom(6),
            ));
        }
        inner.push(Node::text(
            Role::MainValue,
            &main.value,
            TextStyle::plain(26, MAIN_VALUE_COLOR).bold().line_height(32),
        ));
        if let Some(sublabel) = main.sublabel.as_deref().filter(|s| !s.is_empty()) {
            inner.push(Node::text(
                Role::MainSublabel,
                sublabel,
                TextStyle::plain(12, MAIN_SUBLABEL_COLOR).margin_top(4),
            ));
        }
        children.push(Node::column(
            Role::MainResult,
            BoxStyle {
                gradient: Some(theme.main_gradient),
                corner_radius: 16,
                padding_v: 20,
                padding_h: 24,
                margin_bottom: 16,
                shadow: true,
                ..Default::default()
            },
            inner,
        ));
    }

    if let Some(sub) = &config.sub_result {
        children.push(Node::row(
            Role::SubResult,
            BoxStyle {
                margin_bottom: 16,
                ..Default::default()
            },
            vec![
                Node::text(
                    Role::SubLabel,
                    format!("{} ", sub.label),
                    TextStyle::plain(14, TEXT_SOFT),
                ),
                Node::text(Role::SubValue, &sub.value, TextStyle::plain(14, TEXT_LIGHT).bold()),
            ],
        ));
    }

    if !config.stats.is_empty() {
        let items = config
            .stats
            .iter()
            .map(|stat| {
                Node::group(
                    Role::StatItem,
                    BoxStyle {
                        padding_v: 4,
                        padding_h: 16,
                        ..Default::default()
                    },
                    vec![
                        Node::text(
                            Role::StatValue,
                            &stat.value,
                            TextStyle::plain(22, theme.accent).bold().line_height(26),
                        ),
                        Node::text(
                            Role::StatLabel,
                            &stat.label,
                            TextStyle::plain(11, TEXT_SOFT).line_height(14),
                        ),
                    ],
                )
            })
            .collect();
        children.push(Node::row(
            Role::StatsRow,
            BoxStyle {
                background: Some(STATS_BACKGROUND.to_string()),
                corner_radius: 12,
                padding_v: 8,
                padding_h: 12,
                margin_bottom: 16,
                ..Default::default()
            },
            items,
        ));
    }

    if let Some(extra) = &config.extra_content {
        children.push(extra.clone());
    }

    children
}
