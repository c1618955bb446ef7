pub mod render;
pub mod theme;

pub use render::render_wizard;
pub use theme::Theme;
