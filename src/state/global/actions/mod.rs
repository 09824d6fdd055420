pub mod game;
pub mod menu;
pub mod mode_input;
pub mod settings;
