/// Braille spinner driven by the animation tick.
pub struct Spinner;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

impl Spinner {
    pub fn frame(tick: u64) -> &'static str {
        FRAMES[(tick as usize) % FRAMES.len()]
    }
}
