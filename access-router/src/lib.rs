//! Accessibility-constrained transit routing.
//!
//! Answers: "what is the fastest way from this stop to that one, using only
//! stops and vehicles I can actually use, given the elevators that are
//! working right now?"
//!
//! The routing core (`graph`, `accessibility`, `planner`, `updates`) does no
//! I/O. `network`, `web` and `config` are the collaborators the server binary
//! wires around it.

pub mod accessibility;
pub mod config;
pub mod domain;
pub mod graph;
pub mod network;
pub mod planner;
pub mod updates;
pub mod web;
