//! Reading assistant for academic texts: summaries and English/Italian
//! translation through a hosted model, plus a triangulated land globe
//! that exports as a Plotly figure or renders in the terminal.

pub mod app;
pub mod assistant;
pub mod braille;
pub mod config;
pub mod data;
pub mod document;
pub mod geo;
pub mod map;
pub mod mesh;
pub mod scene;
pub mod session;
pub mod ui;
