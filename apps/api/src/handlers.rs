pub mod access;
pub mod health;
pub mod pages;
pub mod security;
