mod dropdown_render;
mod events;
mod render;
mod state;

pub use events::map_key;
pub use state::App;
