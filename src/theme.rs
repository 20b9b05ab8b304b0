//! Colour themes for the terminal UI, selectable with `--theme`.

use ratatui::style::Color;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Muted modern palette
    #[default]
    Nord,
    /// Orange text on black
    AmberCrt,
    /// Green screen
    GreenPhosphor,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nord" => Ok(Theme::Nord),
            "amber" | "ambercrt" | "amber-crt" => Ok(Theme::AmberCrt),
            "green" | "greenphosphor" | "green-phosphor" => Ok(Theme::GreenPhosphor),
            _ => Err(format!(
                "Unknown theme '{s}'. Available: nord, amber-crt, green-phosphor"
            )),
        }
    }
}

impl Theme {
    pub fn colors(&self) -> ColorScheme {
        match self {
            Theme::Nord => ColorScheme::nord(),
            Theme::AmberCrt => ColorScheme::amber_crt(),
            Theme::GreenPhosphor => ColorScheme::green_phosphor(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Nord => write!(f, "nord"),
            Theme::AmberCrt => write!(f, "amber-crt"),
            Theme::GreenPhosphor => write!(f, "green-phosphor"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub background: Color,
    pub text: Color,
    /// Secondary text (footer, hints)
    pub text_dim: Color,
    /// Title and overlay border
    pub accent: Color,
    /// Row borders and unfocused chrome
    pub border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub error: Color,
    pub spinner: Color,
}

impl ColorScheme {
    pub fn nord() -> Self {
        Self {
            background: Color::Black,
            text: Color::White,
            text_dim: Color::Gray,
            accent: Color::Yellow,
            border: Color::DarkGray,
            selection_bg: Color::Yellow,
            selection_fg: Color::Black,
            error: Color::Red,
            spinner: Color::White,
        }
    }

    pub fn amber_crt() -> Self {
        let amber = Color::Rgb(255, 176, 0);
        let amber_bright = Color::Rgb(255, 200, 100);
        let amber_dim = Color::Rgb(180, 120, 0);

        Self {
            background: Color::Black,
            text: amber,
            text_dim: amber_dim,
            accent: amber_bright,
            border: amber_dim,
            selection_bg: amber,
            selection_fg: Color::Black,
            error: Color::Red,
            spinner: amber_bright,
        }
    }

    pub fn green_phosphor() -> Self {
        let green = Color::Rgb(0, 255, 0);
        let green_dim = Color::Rgb(0, 180, 0);
        let green_bright = Color::Rgb(100, 255, 100);

        Self {
            background: Color::Black,
            text: green,
            text_dim: green_dim,
            accent: green_bright,
            border: green_dim,
            selection_bg: green,
            selection_fg: Color::Black,
            error: Color::Red, // stands out against green
            spinner: green_bright,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::nord()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parsing() {
        assert_eq!("nord".parse::<Theme>().unwrap(), Theme::Nord);
        assert_eq!("NORD".parse::<Theme>().unwrap(), Theme::Nord);
        assert_eq!("amber".parse::<Theme>().unwrap(), Theme::AmberCrt);
        assert_eq!("green-phosphor".parse::<Theme>().unwrap(), Theme::GreenPhosphor);
        assert!("dos-blue".parse::<Theme>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for theme in [Theme::Nord, Theme::AmberCrt, Theme::GreenPhosphor] {
            assert_eq!(theme.to_string().parse::<Theme>().unwrap(), theme);
        }
    }

    #[test]
    fn selection_is_readable_in_every_theme() {
        for theme in [Theme::Nord, Theme::AmberCrt, Theme::GreenPhosphor] {
            let c = theme.colors();
            assert_ne!(c.selection_bg, c.selection_fg);
            assert_ne!(c.text, c.background);
        }
    }
}
