//! Main module for idress library functionality

pub mod config;
pub mod error;
pub mod formats;
pub mod grammar;
pub mod lexing;
pub mod numerals;
pub mod parsing;
pub mod record;
pub mod rendering;
pub mod validation;
