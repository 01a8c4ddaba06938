//! SafeRent SF front end: guarded Supabase access, an AI proxy client, and
//! the server-rendered pages built on top of them.

pub mod ai;
pub mod auth;
pub mod config;
pub mod database;
pub mod pages;
pub mod prerender;
pub mod routes;
pub mod state;
pub mod supabase;
