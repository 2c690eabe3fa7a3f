//! Site builder backend: slug allocation and the draft/publish lifecycle for
//! template-driven nonprofit websites.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
