//! Entity models: one module per table group, `FromRow` structs plus
//! request DTOs.

pub mod application;
pub mod category;
pub mod chat;
pub mod event;
pub mod job;
pub mod notification;
pub mod report;
pub mod session;
pub mod user;
