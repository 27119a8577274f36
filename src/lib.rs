pub mod config;
pub mod error;
pub mod game;
pub mod math_utils;
pub mod rendering;
pub mod window;
