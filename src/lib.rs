//! Road weather observations from the Digitraffic weather station API.
//!
//! Raw station bodies are decoded by [`parser`] into generic records, then
//! [`observation::build`] maps the sparse sensor list onto a typed
//! [`Observation`](observation::Observation) with canonical units and a
//! derived apparent temperature.

pub mod config;
pub mod error;
pub mod feels_like;
pub mod fetch;
pub mod observation;
pub mod output;
pub mod parser;
pub mod sensors;
pub mod station;
