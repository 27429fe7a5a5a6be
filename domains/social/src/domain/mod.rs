//! Domain layer for the Social domain

pub mod entities;
pub mod state;
