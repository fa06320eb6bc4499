//! Terminal front end: a thin presentation layer that drives the engine and
//! renders from its notifications and read-only queries.

mod app;
mod game_view;

pub use app::App;
