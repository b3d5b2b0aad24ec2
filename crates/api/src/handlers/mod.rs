//! HTTP request handlers, one module per resource.

pub mod admin;
pub mod application;
pub mod auth;
pub mod category;
pub mod chat;
pub mod job;
pub mod notification;
pub mod report;
pub mod upload;
pub mod user;
