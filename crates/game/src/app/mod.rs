pub(crate) mod bootstrap;
mod config;
mod effects;
mod hud;
mod layout;
pub(crate) mod loop_runner;
mod race;
mod race_scene;
