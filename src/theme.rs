use std::fmt;
use std::fs;
use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result};
use log::warn;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "theme.toml";

/// The persisted theme selection. This is the app's second durable key,
/// next to the reminder snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

impl ThemeName {
    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        })
    }
}

/// The styles every view draws with.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,
    pub header: Style,
    pub accent: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub selected: Style,
    pub today: Style,
    pub done: Style,
    pub high: Style,
    pub medium: Style,
    pub low: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::preset(ThemeName::Light)
    }
}

impl Theme {
    pub fn preset(name: ThemeName) -> Self {
        match name {
            ThemeName::Light => Self::light(),
            ThemeName::Dark => Self::dark(),
        }
    }

    fn light() -> Self {
        Self {
            name: ThemeName::Light,
            header: Style::new().fg(Color::Black).add_modifier(Modifier::BOLD),
            accent: Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
            dim: Style::new().fg(Color::Gray),
            border: Style::new().fg(Color::Gray),
            status: Style::new().fg(Color::Black).bg(Color::Gray),
            selected: Style::new().fg(Color::Black).bg(Color::Cyan),
            today: Style::new().fg(Color::Black).bg(Color::Yellow),
            done: Style::new()
                .fg(Color::Gray)
                .add_modifier(Modifier::CROSSED_OUT),
            high: Style::new().fg(Color::Red),
            medium: Style::new().fg(Color::Yellow),
            low: Style::new().fg(Color::Green),
        }
    }

    fn dark() -> Self {
        Self {
            name: ThemeName::Dark,
            header: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            accent: Style::new()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
            dim: Style::new().fg(Color::DarkGray),
            border: Style::new().fg(Color::DarkGray),
            status: Style::new().fg(Color::White).bg(Color::DarkGray),
            selected: Style::new().fg(Color::Black).bg(Color::Cyan),
            today: Style::new().fg(Color::Black).bg(Color::Yellow),
            done: Style::new()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
            high: Style::new().fg(Color::LightRed),
            medium: Style::new().fg(Color::LightYellow),
            low: Style::new().fg(Color::LightGreen),
        }
    }

    /// The theme the config file selects, falling back to light.
    pub fn load() -> Self {
        let config = read_config().unwrap_or_default();
        config.into_theme()
    }

    /// A specific selection, still honoring per-color overrides on disk.
    pub fn with_name(name: ThemeName) -> Self {
        let mut config = read_config().unwrap_or_default();
        config.name = Some(name);
        config.into_theme()
    }

    /// Writes the selection back, keeping any overrides intact.
    pub fn persist_name(name: ThemeName) -> Result<()> {
        let path = config_path().ok_or_else(|| eyre!("no config directory"))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut config = read_config().unwrap_or_default();
        config.name = Some(name);
        fs::write(&path, toml::to_string(&config)?)?;
        Ok(())
    }
}

fn read_config() -> Option<ThemeConfig> {
    let path = config_path()?;
    let content = fs::read_to_string(&path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            warn!("ignoring malformed {}: {err}", path.display());
            None
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("remind-tui").join(CONFIG_FILE))
}

// ── TOML config ──

#[derive(Debug, Default, Serialize, Deserialize)]
struct ThemeConfig {
    name: Option<ThemeName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accent_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    header_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dim_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    border_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    today_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_bg: Option<String>,
}

impl ThemeConfig {
    fn into_theme(self) -> Theme {
        let mut theme = Theme::preset(self.name.unwrap_or_default());

        if let Some(c) = self.accent_fg.as_deref().and_then(parse_color) {
            theme.accent = theme.accent.fg(c);
        }
        if let Some(c) = self.header_fg.as_deref().and_then(parse_color) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = self.dim_fg.as_deref().and_then(parse_color) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = self.border_fg.as_deref().and_then(parse_color) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = self.selected_bg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = self.today_bg.as_deref().and_then(parse_color) {
            theme.today = theme.today.bg(c);
        }
        if let Some(c) = self.status_fg.as_deref().and_then(parse_color) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = self.status_bg.as_deref().and_then(parse_color) {
            theme.status = theme.status.bg(c);
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') && s.len() == 7 {
        let r = u8::from_str_radix(&s[1..3], 16).ok()?;
        let g = u8::from_str_radix(&s[3..5], 16).ok()?;
        let b = u8::from_str_radix(&s[5..7], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_the_two_presets() {
        assert_eq!(ThemeName::Light.toggled(), ThemeName::Dark);
        assert_eq!(ThemeName::Dark.toggled(), ThemeName::Light);
    }

    #[test]
    fn config_overrides_apply_over_the_preset() {
        let config: ThemeConfig =
            toml::from_str("name = \"dark\"\naccent_fg = \"#8b9a7a\"\ndim_fg = \"gray\"\n")
                .unwrap();
        let theme = config.into_theme();
        assert_eq!(theme.name, ThemeName::Dark);
        assert_eq!(theme.accent.fg, Some(Color::Rgb(0x8b, 0x9a, 0x7a)));
        assert_eq!(theme.dim.fg, Some(Color::Gray));
    }

    #[test]
    fn name_round_trips_through_toml() {
        let config = ThemeConfig {
            name: Some(ThemeName::Dark),
            ..ThemeConfig::default()
        };
        let raw = toml::to_string(&config).unwrap();
        let back: ThemeConfig = toml::from_str(&raw).unwrap();
        assert_eq!(back.name, Some(ThemeName::Dark));
    }

    #[test]
    fn unknown_colors_are_ignored() {
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("chartreuse-ish"), None);
        assert_eq!(parse_color("  cyan "), Some(Color::Cyan));
    }
}
