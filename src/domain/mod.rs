// Domain layer: entities, the allocator and the storage ports. No I/O here.

pub mod events;
pub mod fleet;
pub mod group;
pub mod model;
pub mod ports;
pub mod vehicle;
