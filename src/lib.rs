//! openmate — open a file in the editor window that already owns it.
//!
//! The [`resolver`] module holds the window-selection rule and the
//! [`resolver::WindowHost`] seam an editor integration implements.
//! [`ipc`] carries `Open` requests from the command-line tool to the
//! running editor.

pub mod config;
pub mod ipc;
pub mod logging;
pub mod resolver;
