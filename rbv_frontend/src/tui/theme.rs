use crossterm::style::Color;
use rbv_config::{Color as ConfigColor, ThemeSettings};

/// Terminal theme for TUI rendering
#[derive(Debug, Clone, Default)]
pub struct TerminalTheme {
    pub colors: ThemeSettings,
}

impl TerminalTheme {
    /// Create theme from configuration
    pub fn from_config(theme: &ThemeSettings) -> Self {
        Self {
            colors: theme.clone(),
        }
    }

    /// Convert hex color to crossterm Color
    pub fn hex_to_color(hex: ConfigColor) -> Color {
        Color::Rgb {
            r: hex.r,
            g: hex.g,
            b: hex.b,
        }
    }

    pub fn edge(&self) -> Color {
        Self::hex_to_color(self.colors.edge)
    }

    pub fn text(&self) -> Color {
        Self::hex_to_color(self.colors.text)
    }

    pub fn error(&self) -> Color {
        Self::hex_to_color(self.colors.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_color() {
        assert_eq!(
            TerminalTheme::hex_to_color(ConfigColor::new(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn test_from_config() {
        let settings = ThemeSettings {
            edge: ConfigColor::new(9, 9, 9),
            ..ThemeSettings::default()
        };
        let theme = TerminalTheme::from_config(&settings);
        assert_eq!(theme.edge(), Color::Rgb { r: 9, g: 9, b: 9 });
    }
}
