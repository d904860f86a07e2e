pub use nix::unistd::Pid;

pub use crate::process::{registry::Registry, Host, Posix};
