use itertools::Itertools;
use nix::{errno::Errno, unistd::ForkResult};

use super::execution_plan::ExecutionPlan;
use crate::{
    prelude::*,
    process::{
        child::{Argv, ChildTask},
        ExecError,
    },
};

impl ExecutionPlan {
    /// Spawns the plan, then waits for it or hands it to the registry.
    /// Failures are printed and logged; the caller always gets control back.
    pub fn execute<H: Host>(&self, host: &H, background: bool, registry: &mut Registry) {
        let pid = match self.spawn(host) {
            Ok(pid) => pid,
            Err(err) => {
                error!(%err, "failed to spawn");
                eprintln!("{err}");
                return;
            }
        };

        if background {
            let job = registry.register(pid);
            debug!(%pid, job, "registered background job");
            println!("[{job}] {pid}");
        } else {
            wait_foreground(host, pid);
        }
    }

    fn spawn<H: Host>(&self, host: &H) -> Result<Pid, ExecError> {
        match self {
            Self::Simple(args) => {
                let argv = Argv::new(args)?;
                trace!(args = %args.iter().join(" "), "spawning command");
                fork_child(
                    host,
                    ChildTask::Exec {
                        argv: &argv,
                        redirects: &[],
                    },
                )
            }
            Self::Redirected { args, redirects } => {
                let argv = Argv::new(args)?;
                trace!(args = %args.iter().join(" "), ?redirects, "spawning redirected command");
                fork_child(
                    host,
                    ChildTask::Exec {
                        argv: &argv,
                        redirects,
                    },
                )
            }
            Self::Piped { left, right } => {
                let (left, right) = (Argv::new(left)?, Argv::new(right)?);
                trace!(left = left.program(), right = right.program(), "spawning pipeline");
                fork_child(
                    host,
                    ChildTask::Pipeline {
                        left: &left,
                        right: &right,
                    },
                )
            }
        }
    }
}

fn fork_child<H: Host>(host: &H, task: ChildTask<'_>) -> Result<Pid, ExecError> {
    match host.fork().map_err(ExecError::Fork)? {
        ForkResult::Parent { child } => Ok(child),
        ForkResult::Child => task.run(host),
    }
}

/// Blocks until `pid` terminates. The exit status only goes to the log.
fn wait_foreground<H: Host>(host: &H, pid: Pid) {
    loop {
        match host.wait(pid, None) {
            Ok(status) => {
                debug!(?status, "foreground process finished");
                break;
            }
            Err(Errno::EINTR) => continue,
            Err(source) => {
                let err = ExecError::Wait { pid, source };
                warn!(%err, "lost foreground process");
                eprintln!("{err}");
                break;
            }
        }
    }
}
