//! Terminal and CI runner helpers

pub mod actions;
pub mod terminal;

#[cfg(test)]
pub(crate) mod http_stub;
