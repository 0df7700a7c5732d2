// Layout primitives: page geometry, the cursor, static font metrics and the
// wrapped-text writer. Everything here is synchronous; renderers call it in a
// tight loop.

pub mod cursor;
pub mod font_metrics;
pub mod wrap;
