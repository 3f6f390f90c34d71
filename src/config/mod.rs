//! Action input decoding

pub mod inputs;
