//! Outbound adapters implementing domain ports.
//!
//! Only persistence exists today: PostgreSQL repositories built on Diesel.

pub mod persistence;
