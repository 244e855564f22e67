//! Wire-level types shared by the dashboard core and its front ends.

pub mod domain;
pub mod error;
pub mod protocol;
