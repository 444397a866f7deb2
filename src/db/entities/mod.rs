//! sea-orm entities
pub mod art;
