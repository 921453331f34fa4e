pub mod core;

pub use core::{Net, NetlistDB};
