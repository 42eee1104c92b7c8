//! Core primitives shared by the generation pipeline

pub mod time;
