//! Core data models for the area API.

pub mod area;

pub use area::Area;
