//! One module per subcommand.

pub mod lint;
pub mod push;
pub mod repo;
