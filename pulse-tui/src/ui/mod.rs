pub mod layout;
pub mod views;
pub mod widgets;

pub use layout::render;
