//! Metro route planner.
//!
//! Loads a metro network description, models it as a graph of
//! (station, line) nodes, and answers: "what are the sensible ways to get
//! from here to there, and what do they cost?"

pub mod graph;
pub mod network;
pub mod planner;
pub mod web;
