pub mod answer;
pub mod blanks;
pub mod cli;
pub mod engine;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod pool;
pub mod runner;
pub mod score;
pub mod slots;
pub mod state;
pub mod timer;
pub mod tui;
pub mod ui;
