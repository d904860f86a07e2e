//! Code that runs only after a fork, in the child.
//!
//! Nothing here logs or returns to the interpreter loop: every path ends in
//! either a successful `execvp` or `_exit(1)` after a message on stderr.
//! Heap use is limited to `execvp`'s pointer array and formatting the error
//! on the way out; nothing touches locks other than the allocator's.

use std::{
    ffi::{CString, NulError},
    os::unix::io::RawFd,
};

use nix::{
    fcntl::{open, OFlag},
    libc::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO},
    sys::stat::Mode,
    unistd::{close, dup2, execvp, pipe, write, ForkResult},
};

use super::{ExecError, Host};
use crate::cmd::execution_plan::{Direction, Redirect};

/// Argument vector converted up front so the child never has to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argv {
    program: CString,
    args: Vec<CString>,
}

impl Argv {
    pub fn new(args: &[String]) -> Result<Self, NulError> {
        let args = args
            .iter()
            .map(|arg| CString::new(arg.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let program = args.first().cloned().unwrap_or_default();

        Ok(Self { program, args })
    }

    pub fn program(&self) -> &str {
        self.program.to_str().unwrap_or_default()
    }
}

pub enum ChildTask<'a> {
    Exec {
        argv: &'a Argv,
        redirects: &'a [Redirect],
    },
    /// The first stage of `left | right`; forks the second stage itself.
    Pipeline { left: &'a Argv, right: &'a Argv },
}

impl ChildTask<'_> {
    pub fn run<H: Host>(self, host: &H) -> ! {
        let err = match self {
            Self::Exec { argv, redirects } => {
                let prepared = redirects.iter().try_for_each(apply_redirect);
                exec_after(prepared, argv)
            }
            Self::Pipeline { left, right } => pipeline(host, left, right),
        };

        fail(err)
    }
}

fn pipeline<H: Host>(host: &H, left: &Argv, right: &Argv) -> ExecError {
    let (reader, writer) = match pipe() {
        Ok(ends) => ends,
        Err(err) => return ExecError::Pipe(err),
    };

    match host.fork() {
        Ok(ForkResult::Child) => {
            let prepared = close_unused(writer).and_then(|()| replace(reader, STDIN_FILENO));
            exec_after(prepared, right)
        }
        Ok(ForkResult::Parent { .. }) => {
            let prepared = close_unused(reader).and_then(|()| replace(writer, STDOUT_FILENO));
            exec_after(prepared, left)
        }
        Err(err) => ExecError::Fork(err),
    }
}

fn apply_redirect(redirect: &Redirect) -> Result<(), ExecError> {
    let (flags, target) = match redirect.direction {
        Direction::Input => (OFlag::O_RDONLY, STDIN_FILENO),
        Direction::Output => (
            OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
            STDOUT_FILENO,
        ),
    };

    let fd = open(
        redirect.path.as_path(),
        flags,
        Mode::from_bits_truncate(0o644),
    )
    .map_err(|source| ExecError::Open {
        path: redirect.path.clone(),
        source,
    })?;

    replace(fd, target)
}

/// Moves `fd` onto the standard stream `target` and closes the original.
fn replace(fd: RawFd, target: RawFd) -> Result<(), ExecError> {
    if fd == target {
        return Ok(());
    }

    let stream = stream_name(target);
    dup2(fd, target).map_err(|source| ExecError::Redirect { stream, source })?;
    close(fd).map_err(|source| ExecError::Redirect { stream, source })
}

fn close_unused(fd: RawFd) -> Result<(), ExecError> {
    close(fd).map_err(ExecError::Pipe)
}

fn stream_name(fd: RawFd) -> &'static str {
    match fd {
        STDIN_FILENO => "stdin",
        STDOUT_FILENO => "stdout",
        _ => "stderr",
    }
}

/// Replaces the process image once `prepared` succeeded. Only returns the
/// error that stopped it.
fn exec_after(prepared: Result<(), ExecError>, argv: &Argv) -> ExecError {
    if let Err(err) = prepared {
        return err;
    }

    match execvp(&argv.program, &argv.args) {
        Ok(never) => match never {},
        Err(source) => ExecError::Exec {
            program: argv.program.to_string_lossy().into_owned(),
            source,
        },
    }
}

fn fail(err: ExecError) -> ! {
    let message = format!("{err}\n");
    let _ = write(STDERR_FILENO, message.as_bytes());

    // SAFETY: `_exit` skips atexit handlers and stdio flushing, which belong
    // to the interpreter this process was forked from.
    unsafe { nix::libc::_exit(1) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argv_keeps_program_as_first_argument() {
        let argv = Argv::new(&["echo".to_owned(), "hi".to_owned()]).unwrap();

        assert_eq!(argv.program(), "echo");
        assert_eq!(
            argv.args,
            vec![CString::new("echo").unwrap(), CString::new("hi").unwrap()]
        );
    }

    #[test]
    fn argv_rejects_interior_nul() {
        assert!(Argv::new(&["ec\0ho".to_owned()]).is_err());
    }

    #[test]
    fn stream_names() {
        assert_eq!(stream_name(STDIN_FILENO), "stdin");
        assert_eq!(stream_name(STDOUT_FILENO), "stdout");
    }
}
