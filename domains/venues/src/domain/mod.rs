//! Domain layer for the Venues domain

pub mod entities;
