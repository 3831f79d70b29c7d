//! CLI command layer.
//!
//! | Module  | Responsibility                                        |
//! |---------|-------------------------------------------------------|
//! | `route` | argv → `Invocation` (route + modifiers)               |
//! | `run`   | config, engine construction, Ctrl+C, exit codes       |

pub mod route;
pub mod run;

pub use route::parse_args;
pub use run::run;
