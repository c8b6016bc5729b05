//! Outbound adapters over the Supabase backend.

pub mod supabase;
