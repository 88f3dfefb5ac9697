pub mod auth;
pub mod labubu;
