//! Supporting utilities

pub mod dataset;
