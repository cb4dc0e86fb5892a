//! Background tasks module
//!
//! This module contains the background task that drives a running countdown.

pub mod countdown_ticker;

pub(crate) use countdown_ticker::countdown_ticker;
