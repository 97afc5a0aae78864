#![allow(dead_code)]

pub mod snapshot;
pub mod topologies;
