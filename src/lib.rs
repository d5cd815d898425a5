//! Entity relationship diagrams from MySQL `CREATE TABLE` statements.
//!
//! The pipeline is parse ([`parser`]) → extract ([`extract`]) → markup
//! ([`erd`]) → optional SVG rendering ([`render`]). [`session::Session`]
//! wraps it with the state an interactive front end needs.

pub mod config;
pub mod erd;
pub mod error;
pub mod extract;
pub mod input;
pub mod model;
pub mod parser;
pub mod render;
pub mod session;
