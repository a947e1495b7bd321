//! Theme registry: a fixed mapping from theme names to visual tokens.
//!
//! The set of themes is closed. Lookup never fails: unknown or empty names
//! resolve to the `violet` default so a card is never rejected over a theme
//! misconfiguration.

/// A 135-degree linear gradient described as hex color stops.
///
/// Positions are percentages along the gradient axis (top-left to
/// bottom-right).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub stops: &'static [(&'static str, u8)],
}

/// The resolved visual tokens for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeTokens {
    /// Theme name as accepted in a `CardConfig`
    pub name: &'static str,
    /// Card background gradient
    pub gradient: Gradient,
    /// Accent color used for stat values
    pub accent: &'static str,
    /// Header text color
    pub header_color: &'static str,
    /// Result-box background gradient
    pub main_gradient: Gradient,
}

/// All theme names accepted without falling back to the default.
pub const THEME_NAMES: [&str; 6] = ["red", "orange", "cyan", "violet", "purple", "green"];

/// Name of the theme unknown names resolve to.
pub const DEFAULT_THEME: &str = "violet";

const RED: ThemeTokens = ThemeTokens {
    name: "red",
    gradient: Gradient {
        stops: &[("#1e293b", 0), ("#450a0a", 50), ("#1e293b", 100)],
    },
    accent: "#fbbf24",
    header_color: "#94a3b8",
    main_gradient: Gradient {
        stops: &[("#ef4444", 0), ("#dc2626", 100)],
    },
};

const ORANGE: ThemeTokens = ThemeTokens {
    name: "orange",
    gradient: Gradient {
        stops: &[("#1e293b", 0), ("#7c2d12", 50), ("#1e293b", 100)],
    },
    accent: "#fbbf24",
    header_color: "#94a3b8",
    main_gradient: Gradient {
        stops: &[("#ea580c", 0), ("#c2410c", 100)],
    },
};

const CYAN: ThemeTokens = ThemeTokens {
    name: "cyan",
    gradient: Gradient {
        stops: &[("#0f172a", 0), ("#164e63", 50), ("#0f172a", 100)],
    },
    accent: "#22d3ee",
    header_color: "#94a3b8",
    main_gradient: Gradient {
        stops: &[("#06b6d4", 0), ("#0891b2", 100)],
    },
};

const VIOLET: ThemeTokens = ThemeTokens {
    name: "violet",
    gradient: Gradient {
        stops: &[("#0f172a", 0), ("#4c1d95", 50), ("#0f172a", 100)],
    },
    accent: "#a78bfa",
    header_color: "#c4b5fd",
    main_gradient: Gradient {
        stops: &[("#7c3aed", 0), ("#6366f1", 100)],
    },
};

const PURPLE: ThemeTokens = ThemeTokens {
    name: "purple",
    gradient: Gradient {
        stops: &[("#1e1b4b", 0), ("#4c1d95", 50), ("#1e1b4b", 100)],
    },
    accent: "#e879f9",
    header_color: "#c4b5fd",
    main_gradient: Gradient {
        stops: &[("#9333ea", 0), ("#db2777", 100)],
    },
};

const GREEN: ThemeTokens = ThemeTokens {
    name: "green",
    gradient: Gradient {
        stops: &[("#0f172a", 0), ("#14532d", 50), ("#0f172a", 100)],
    },
    accent: "#4ade80",
    header_color: "#94a3b8",
    main_gradient: Gradient {
        stops: &[("#22c55e", 0), ("#16a34a", 100)],
    },
};

/// Look up the tokens for a theme name.
///
/// Exact-match against the closed six-entry set; anything else returns the
/// `violet` tokens.
pub fn resolve_theme(name: &str) -> &'static ThemeTokens {
    match name {
        "red" => &RED,
        "orange" => &ORANGE,
        "cyan" => &CYAN,
        "violet" => &VIOLET,
        "purple" => &PURPLE,
        "green" => &GREEN,
        _ => &VIOLET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_resolve_to_themselves() {
        for name in THEME_NAMES {
            assert_eq!(resolve_theme(name).name, name);
        }
    }

    #[test]
    fn unknown_names_fall_back_to_violet() {
        let violet = resolve_theme(DEFAULT_THEME);
        assert_eq!(resolve_theme("banana"), violet);
        assert_eq!(resolve_theme(""), violet);
        assert_eq!(resolve_theme("Violet"), violet);
    }

    #[test]
    fn themes_are_distinct() {
        for a in THEME_NAMES {
            for b in THEME_NAMES {
                if a != b {
                    assert_ne!(resolve_theme(a), resolve_theme(b));
                }
            }
        }
    }
}
