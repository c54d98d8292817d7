// Domain layer: core models and ports (interfaces) shared by the scansion engine and its adapters.

pub mod model;
pub mod ports;
