//! API handlers for the Teams domain

pub mod activities;
pub mod bookings;
pub mod memberships;
pub mod teams;
