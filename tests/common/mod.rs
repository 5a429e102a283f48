#![allow(dead_code)]

pub mod ports;
pub mod utils;
