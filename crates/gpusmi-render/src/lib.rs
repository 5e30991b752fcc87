// NOTE: Pipeline Shape Rationale
//
// Why an owned session object (not free functions over shared state)?
// - The accumulator's three tracks (current record, multi-device list, watch
//   history) have ordering rules between them; a single owner makes the
//   legal call sequences visible in the type
// - Watch sessions need a final flush that behaves differently from every
//   per-tick write; a session object gives that operation a home
//
// Why closed enums for compatibility/format/destination?
// - Every emitter and the store dispatch match exhaustively; adding a
//   dialect is a compile-checked change, not a silent fallthrough
// - An unrecognized format can only enter at the string-parse boundary,
//   which is where the configuration error is raised

pub mod flatten;
pub mod formatters;
pub mod humanize;
pub mod session;
pub mod sink;

pub use flatten::flatten;
pub use session::ReportSession;
