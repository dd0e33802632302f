// src/models/mod.rs

pub mod account;
pub mod class;
pub mod question;
pub mod result;
