//! Classic grid Snake.
//!
//! [`game::Engine`] holds the whole rule set as pure state transitions. The
//! remaining modules are the terminal host around it: key mapping, tick
//! scheduling, high score persistence and ratatui rendering.

pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
