//! Client for a hosted Supabase project: GoTrue for auth, PostgREST for
//! the `tasks` and `profiles` tables.

mod auth;
mod client;
mod tables;

pub use client::SupabaseClient;
