//! Built-in site themes.
//!
//! A theme drives two things: the palette interpolated into the generated
//! `style.css`, and which highlighter stylesheet is copied as `prism.css`.

use serde::Serialize;
use std::fmt;

/// Color tokens for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub code_bg: &'static str,
    pub shadow: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Default,
    Dark,
    Funky,
    Okaidia,
    Twilight,
    Coy,
    SolarizedLight,
    Tomorrow,
}

/// Outcome of resolving a user supplied theme name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub theme: Theme,
    /// Set when the requested name was unknown and `default` was used instead.
    pub warning: Option<String>,
}

impl Theme {
    pub const ALL: [Theme; 8] = [
        Theme::Default,
        Theme::Dark,
        Theme::Funky,
        Theme::Okaidia,
        Theme::Twilight,
        Theme::Coy,
        Theme::SolarizedLight,
        Theme::Tomorrow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Dark => "dark",
            Theme::Funky => "funky",
            Theme::Okaidia => "okaidia",
            Theme::Twilight => "twilight",
            Theme::Coy => "coy",
            Theme::SolarizedLight => "solarizedlight",
            Theme::Tomorrow => "tomorrow",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn from_name(name: &str) -> Option<Theme> {
        Theme::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Resolves `name`, falling back to [`Theme::Default`] with a single
    /// logged warning when it is not one of the built-in themes.
    pub fn select(name: &str) -> Selection {
        match Theme::from_name(name) {
            Some(theme) => Selection {
                theme,
                warning: None,
            },
            None => {
                let warning = format!("Theme \"{name}\" not available. Using \"default\" theme.");
                log::warn!("{warning}");
                Selection {
                    theme: Theme::Default,
                    warning: Some(warning),
                }
            }
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Theme::Dark | Theme::Okaidia | Theme::Twilight | Theme::Funky => Tone::Dark,
            _ => Tone::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self.tone() == Tone::Dark
    }

    /// Location of the highlighter stylesheet among the embedded resources.
    pub fn highlight_css_path(self) -> String {
        match self {
            Theme::Default => "themes/prism.css".to_string(),
            other => format!("themes/prism-{}.css", other.name()),
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Default => Palette {
                primary: "#2c3e50",
                secondary: "#34495e",
                accent: "#3498db",
                background: "#ffffff",
                text: "#2c3e50",
                text_secondary: "#7f8c8d",
                border: "#ecf0f1",
                code_bg: "#f8f9fa",
                shadow: "rgba(0, 0, 0, 0.1)",
            },
            Theme::Dark => Palette {
                primary: "#e74c3c",
                secondary: "#c0392b",
                accent: "#e67e22",
                background: "#2c3e50",
                text: "#ecf0f1",
                text_secondary: "#bdc3c7",
                border: "#34495e",
                code_bg: "#34495e",
                shadow: "rgba(0, 0, 0, 0.3)",
            },
            Theme::Funky => Palette {
                primary: "#d80800",
                secondary: "#952bb9",
                accent: "#00a8c6",
                background: "#000000",
                text: "#ffffff",
                text_secondary: "#cccccc",
                border: "#333333",
                code_bg: "#2d2d2d",
                shadow: "rgba(0, 0, 0, 0.7)",
            },
            Theme::Okaidia => Palette {
                primary: "#f92672",
                secondary: "#a6e22e",
                accent: "#66d9ef",
                background: "#272822",
                text: "#f8f8f2",
                text_secondary: "#75715e",
                border: "#3e3d32",
                code_bg: "#3e3d32",
                shadow: "rgba(0, 0, 0, 0.5)",
            },
            Theme::Twilight => Palette {
                primary: "#cf6a4c",
                secondary: "#9b703f",
                accent: "#7587a6",
                background: "#141414",
                text: "#f8f8f8",
                text_secondary: "#5f5a60",
                border: "#323232",
                code_bg: "#1e1e1e",
                shadow: "rgba(0, 0, 0, 0.6)",
            },
            Theme::Coy => Palette {
                primary: "#5e6687",
                secondary: "#6679cc",
                accent: "#c94922",
                background: "#fdfdfd",
                text: "#5e6687",
                text_secondary: "#9a9fb8",
                border: "#e0e5e6",
                code_bg: "#f5f2f0",
                shadow: "rgba(0, 0, 0, 0.08)",
            },
            Theme::SolarizedLight => Palette {
                primary: "#586e75",
                secondary: "#657b83",
                accent: "#268bd2",
                background: "#fdf6e3",
                text: "#657b83",
                text_secondary: "#93a1a1",
                border: "#eee8d5",
                code_bg: "#eee8d5",
                shadow: "rgba(0, 0, 0, 0.1)",
            },
            Theme::Tomorrow => Palette {
                primary: "#4271ae",
                secondary: "#8959a8",
                accent: "#718c00",
                background: "#ffffff",
                text: "#4d4d4c",
                text_secondary: "#8e908c",
                border: "#e0e0e0",
                code_bg: "#f5f5f5",
                shadow: "rgba(0, 0, 0, 0.1)",
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_log;

    #[test]
    fn every_name_round_trips() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_name(theme.name()), Some(theme));
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(Theme::from_name("Okaidia"), None);
    }

    #[test]
    fn unknown_theme_falls_back_with_one_warning() {
        let selection = Theme::select("invalid-theme");
        assert_eq!(selection.theme, Theme::Default);
        assert_eq!(
            selection.warning.as_deref(),
            Some("Theme \"invalid-theme\" not available. Using \"default\" theme.")
        );
    }

    #[test]
    fn fallback_is_logged_once() {
        test_log::start();
        Theme::select("neon");
        let warnings = test_log::messages(log::Level::Warn);
        assert_eq!(
            warnings,
            vec!["Theme \"neon\" not available. Using \"default\" theme.".to_string()]
        );
    }

    #[test]
    fn known_theme_selects_without_warning() {
        test_log::start();
        let selection = Theme::select("twilight");
        assert!(test_log::messages(log::Level::Warn).is_empty());
        assert_eq!(selection.theme, Theme::Twilight);
        assert!(selection.warning.is_none());
    }

    #[test]
    fn highlight_css_paths() {
        assert_eq!(Theme::Default.highlight_css_path(), "themes/prism.css");
        assert_eq!(Theme::Okaidia.highlight_css_path(), "themes/prism-okaidia.css");
        assert_eq!(Theme::Tomorrow.highlight_css_path(), "themes/prism-tomorrow.css");
    }

    #[test]
    fn dark_classification() {
        let dark: Vec<_> = Theme::ALL.into_iter().filter(|t| t.is_dark()).collect();
        assert_eq!(dark, vec![Theme::Dark, Theme::Funky, Theme::Okaidia, Theme::Twilight]);
    }
}
