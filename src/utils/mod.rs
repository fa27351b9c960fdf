pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod html;

pub use constants::*;
pub use coordinates::parse_coordinate;
pub use filename::{default_render_filename, static_image_filename};
pub use html::{escape_html, escape_script_json};
