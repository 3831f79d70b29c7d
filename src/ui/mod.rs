pub mod help;
pub mod icons;

pub use help::render_help;
