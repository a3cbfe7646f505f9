//! Live vehicle server.
//!
//! Merges three incompatible transit feeds (buses and trolleys, regional
//! rail, subway) into one list of vehicle positions for the routes a
//! client asks about.

pub mod aggregate;
pub mod config;
pub mod domain;
pub mod feeds;
pub mod lines;
pub mod normalize;
pub mod textfeed;
pub mod web;
