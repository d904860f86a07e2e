use std::{ffi::NulError, path::PathBuf};

use nix::{
    sys::wait::{waitpid, WaitPidFlag, WaitStatus},
    unistd::{ForkResult, Pid},
};
use thiserror::Error;

pub mod child;
pub mod registry;
pub mod status;

/// The process primitives the orchestrator needs from the operating system.
///
/// Everything else (exec, dup2, pipe) only ever happens inside a child, so
/// this is the whole surface that can affect the interpreter itself.
pub trait Host {
    fn fork(&self) -> nix::Result<ForkResult>;
    fn wait(&self, pid: Pid, flags: Option<WaitPidFlag>) -> nix::Result<WaitStatus>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Posix;

impl Host for Posix {
    fn fork(&self) -> nix::Result<ForkResult> {
        // SAFETY: children only run `child::*` and always end in `execvp` or
        // `_exit`. Argument vectors and redirect paths are built before the
        // fork, but the child still allocates (nix's argv pointer array,
        // error messages). The interpreter's only other thread is the
        // tracing-appender writer; glibc resets its malloc locks in the
        // child after fork, so those allocations cannot deadlock.
        unsafe { nix::unistd::fork() }
    }

    fn wait(&self, pid: Pid, flags: Option<WaitPidFlag>) -> nix::Result<WaitStatus> {
        waitpid(pid, flags)
    }
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("creating a process failed: {0}")]
    Fork(#[source] nix::Error),
    #[error("creating a pipe failed: {0}")]
    Pipe(#[source] nix::Error),
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: nix::Error,
    },
    #[error("redirecting {stream} failed: {source}")]
    Redirect {
        stream: &'static str,
        #[source]
        source: nix::Error,
    },
    #[error("command not found: {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: nix::Error,
    },
    #[error("waiting for {pid} failed: {source}")]
    Wait {
        pid: Pid,
        #[source]
        source: nix::Error,
    },
    #[error("argument contains a nul byte: {0}")]
    Nul(#[from] NulError),
}
