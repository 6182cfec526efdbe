#![no_std]

mod error;

pub mod config;
pub mod device;
pub mod fifo;
pub mod info;
pub mod interface;
mod log;
pub mod params;
pub mod registers;

pub use crate::device::L3gd20h;
pub use crate::error::{Error, Result};
pub use crate::info::{info, DriverInfo};
