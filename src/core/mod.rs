// src/core/mod.rs

pub mod contact;
pub mod html;
pub mod links;
pub mod net;
pub mod sanitize;

pub use net::Fetcher;
