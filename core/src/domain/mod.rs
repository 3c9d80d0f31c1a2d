//! Domain layer: entities and value types owned by the auth service

pub mod entities;
