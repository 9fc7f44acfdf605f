use ratatui::style::Color;

use super::{colors::hex_to_color, Theme};

pub struct PulseLight;

impl Theme for PulseLight {
    fn name(&self) -> &'static str {
        "pulse-light"
    }

    fn background(&self) -> Color {
        hex_to_color(0xfafafc)
    }

    fn foreground(&self) -> Color {
        hex_to_color(0x2a2a35)
    }

    fn foreground_dim(&self) -> Color {
        hex_to_color(0x8a8a9a)
    }

    fn surface(&self) -> Color {
        hex_to_color(0xf0f0f5)
    }

    fn border(&self) -> Color {
        hex_to_color(0xd5d5e0)
    }

    fn selection(&self) -> Color {
        hex_to_color(0xf2d6ee)
    }

    fn accent(&self) -> Color {
        hex_to_color(0xc011b0)
    }

    fn accent_secondary(&self) -> Color {
        hex_to_color(0x7a3ce0)
    }

    fn success(&self) -> Color {
        hex_to_color(0x3a9d5a)
    }

    fn warning(&self) -> Color {
        hex_to_color(0xb58a2a)
    }

    fn error(&self) -> Color {
        hex_to_color(0xc94a55)
    }

    fn info(&self) -> Color {
        hex_to_color(0x2a7ac9)
    }
}
