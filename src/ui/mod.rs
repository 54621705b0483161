//! Terminal rendering for the match.

pub mod canvas;
pub mod layout;
pub mod match_scene;

pub use match_scene::render_match;
