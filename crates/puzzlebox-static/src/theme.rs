//! Design tokens of the site theme.

/// A color with light and dark mode values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeColor {
    pub light: &'static str,
    pub dark: &'static str,
}

/// Brand accent color and its variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accent {
    pub base: &'static str,
    pub hover: &'static str,
    pub light: &'static str,
    pub foreground: &'static str,
}

/// The complete set of theme tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Accent,
    pub background: ModeColor,
    pub foreground: ModeColor,
    pub border: ModeColor,
    pub card: ModeColor,
    pub muted: ModeColor,
    pub font_sizes: &'static [(&'static str, &'static str)],
    pub radii: &'static [(&'static str, &'static str)],
    pub shadows: &'static [(&'static str, &'static str)],
    pub transitions: &'static [(&'static str, &'static str)],
}

pub const THEME: Theme = Theme {
    accent: Accent {
        base: "rgb(124, 29, 24)",
        hover: "rgb(100, 23, 19)",
        light: "rgba(124, 29, 24, 0.1)",
        foreground: "white",
    },
    background: ModeColor {
        light: "#ffffff",
        dark: "#0a0a0a",
    },
    foreground: ModeColor {
        light: "#111111",
        dark: "#ededed",
    },
    border: ModeColor {
        light: "#EBEBEB",
        dark: "#1F1F1F",
    },
    card: ModeColor {
        light: "#ffffff",
        dark: "#101010",
    },
    muted: ModeColor {
        light: "#666666",
        dark: "#A1A1A1",
    },
    font_sizes: &[
        ("xs", "12px"),
        ("sm", "14px"),
        ("base", "15px"),
        ("md", "16px"),
        ("lg", "18px"),
        ("xl", "24px"),
        ("2xl", "32px"),
        ("3xl", "42px"),
    ],
    radii: &[
        ("sm", "4px"),
        ("md", "6px"),
        ("lg", "8px"),
        ("xl", "12px"),
        ("full", "9999px"),
    ],
    shadows: &[
        ("sm", "0 1px 2px rgba(0, 0, 0, 0.05)"),
        (
            "md",
            "0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06)",
        ),
        (
            "lg",
            "0 10px 15px -3px rgba(0, 0, 0, 0.1), 0 4px 6px -2px rgba(0, 0, 0, 0.05)",
        ),
        (
            "xl",
            "0 20px 25px -5px rgba(0, 0, 0, 0.1), 0 10px 10px -5px rgba(0, 0, 0, 0.04)",
        ),
    ],
    transitions: &[
        ("default", "all 0.15s ease"),
        ("fast", "all 0.1s ease"),
        ("slow", "all 0.3s ease"),
    ],
};

impl Theme {
    /// Emit the tokens as CSS custom properties on `:root` and `.dark`.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");

        push_var(&mut css, "accent", self.accent.base);
        push_var(&mut css, "accent-hover", self.accent.hover);
        push_var(&mut css, "accent-light", self.accent.light);
        push_var(&mut css, "accent-foreground", self.accent.foreground);

        for (name, color) in self.mode_colors() {
            push_var(&mut css, name, color.light);
        }
        for (prefix, scale) in [
            ("font-size", self.font_sizes),
            ("radius", self.radii),
            ("shadow", self.shadows),
            ("transition", self.transitions),
        ] {
            for (step, value) in scale {
                push_var(&mut css, &format!("{}-{}", prefix, step), value);
            }
        }
        css.push_str("}\n\n.dark {\n");

        for (name, color) in self.mode_colors() {
            push_var(&mut css, name, color.dark);
        }
        css.push_str("}\n");

        css
    }

    fn mode_colors(&self) -> [(&'static str, ModeColor); 5] {
        [
            ("background", self.background),
            ("foreground", self.foreground),
            ("border", self.border),
            ("card", self.card),
            ("muted", self.muted),
        ]
    }
}

fn push_var(css: &mut String, name: &str, value: &str) {
    css.push_str("  --");
    css.push_str(name);
    css.push_str(": ");
    css.push_str(value);
    css.push_str(";\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_light_and_dark_blocks() {
        let css = THEME.to_css();

        let (light, dark) = css.split_once(".dark").unwrap();
        assert!(light.contains("--accent: rgb(124, 29, 24);"));
        assert!(light.contains("--background: #ffffff;"));
        assert!(light.contains("--font-size-3xl: 42px;"));
        assert!(light.contains("--radius-full: 9999px;"));
        assert!(dark.contains("--background: #0a0a0a;"));
        assert!(dark.contains("--muted: #A1A1A1;"));
        assert!(!dark.contains("--accent"));
    }
}
