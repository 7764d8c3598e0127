//! # Equipment Interface
//!
//! This module defines the data exchanged with the rover's equipment.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod drive;
pub mod prox;
