// Domain layer: wire models and the per-peer ports. No transport code here.

pub mod model;
pub mod peers;
pub mod ports;
