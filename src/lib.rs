#![doc = include_str!("../README.md")]

pub mod observer;
pub mod singleton;
pub mod factory;
pub mod abstract_factory;
pub mod builder;
pub mod adapter;
pub mod config;
pub mod catalog;
pub mod prelude;

mod types;
mod instruments;

pub use types::*;
