pub mod main_menu;
pub mod options_menu;
pub mod renderer;
pub mod title;

pub use renderer::MenuRenderer;
