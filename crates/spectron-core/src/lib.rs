//! LTE synthetic-spectrum core: catalog and spectrum parsing, unit
//! conversions, Gaussian line synthesis, and the session data model that
//! feeds a plotting front end.

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;
