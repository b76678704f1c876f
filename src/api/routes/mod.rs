// API Routes Module

pub mod check;
pub mod health;
pub mod hosts;
