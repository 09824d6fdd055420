pub mod constants;
pub mod hit_window;
pub mod note;
pub mod playfield;

pub use constants::*;
pub use hit_window::HitWindow;
pub use note::{Note, NotePlacement, secs_to_us};
pub use playfield::PlayfieldConfig;
