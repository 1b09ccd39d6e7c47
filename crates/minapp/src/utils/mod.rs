pub mod normalize_options;
pub mod render_filename;
