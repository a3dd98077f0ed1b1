//! Search-as-you-type suggestions for CKAN portals
//!
//! [`controller::Controller`] is the core: it debounces keystrokes, keeps at
//! most one suggestion request in flight, renders grouped results into a
//! [`view::DropdownView`] and runs the keyboard cursor over them. The
//! terminal host in [`app`] wires a text input and a dropdown to it.

pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod label;
pub mod logging;
pub mod suggestion;
pub mod timer;
pub mod view;
pub mod widgets;

#[cfg(test)]
mod test_utils;
