//! One module per block category, grouped the way the source
//! groups its `@command`-decorated functions under `## Motion`,
//! `## Looks`, etc. comment banners.

pub mod control;
pub mod lists;
pub mod looks;
pub mod motion;
pub mod operators;
pub mod pen;
pub mod sensing;
pub mod sound;
pub mod variables;
