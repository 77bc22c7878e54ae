//! Lectio - a terminal Bible-study quiz for the Gospel of St. Luke
//!
//! Lectio asks Gemini for a ten-question quiz on a chapter of Luke, pitched
//! at a chosen grade level and difficulty, then walks the student through
//! it with immediate or end-of-quiz feedback and a printable review.

pub mod app;
pub mod config;
pub mod gemini;
pub mod quiz;
pub mod report;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
