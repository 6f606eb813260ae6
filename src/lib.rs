// Library surface for headless/integration tests and reuse.
// Rendering and terminal setup live in the binary.
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod game_mode;
pub mod highscores;
pub mod input;
pub mod layout;
pub mod runtime;
pub mod target;
pub mod util;

pub use error::{Error, Result};
