//! CLI command implementations.
//!
//! | Module    | Commands handled |
//! |-----------|------------------|
//! | `run`     | `Run`            |
//! | `form`    | interactive form for `Run --interactive` |
//! | `voices`  | `Voices`         |
//! | `config`  | `Config`         |

pub mod config;
pub mod form;
pub mod run;
pub mod voices;

pub use config::cmd_config;
pub use run::cmd_run;
pub use voices::cmd_voices;
