use ratatui::style::Color;

use super::{colors::hex_to_color, Theme};

/// Default dark theme, built around the PulseAI magenta accent.
pub struct PulseDark;

impl Theme for PulseDark {
    fn name(&self) -> &'static str {
        "pulse-dark"
    }

    fn background(&self) -> Color {
        hex_to_color(0x12121a)
    }

    fn foreground(&self) -> Color {
        hex_to_color(0xe4e4ef)
    }

    fn foreground_dim(&self) -> Color {
        hex_to_color(0x6b6b80)
    }

    fn surface(&self) -> Color {
        hex_to_color(0x1c1c28)
    }

    fn border(&self) -> Color {
        hex_to_color(0x33334a)
    }

    fn selection(&self) -> Color {
        hex_to_color(0x3a2a47)
    }

    fn accent(&self) -> Color {
        hex_to_color(0xe013cc)
    }

    fn accent_secondary(&self) -> Color {
        hex_to_color(0x9a5cf5)
    }

    fn success(&self) -> Color {
        hex_to_color(0x6fd18b)
    }

    fn warning(&self) -> Color {
        hex_to_color(0xe5c07b)
    }

    fn error(&self) -> Color {
        hex_to_color(0xe06c75)
    }

    fn info(&self) -> Color {
        hex_to_color(0x61afef)
    }
}
