//! Ordia Queue - Bounded fee-priority queue
//!
//! This crate provides the fixed-capacity max-heap that orders pending
//! transactions by fee for block selection.

pub mod heap;

pub use heap::{FeeHeap, QueueError};
