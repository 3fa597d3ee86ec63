//! Argument definitions for the `mojo_auth` command line tool.

#![forbid(unsafe_code)]

pub mod args;
