use crate::prelude::*;

use self::execution_plan::ExecutionPlan;

pub mod execute;
pub mod execution_plan;

/// Runs one already tokenized line. Syntax errors and spawn failures are
/// reported on stderr; nothing here ends the interpreter.
pub fn execute<H: Host>(host: &H, args: &[String], background: bool, registry: &mut Registry) {
    match ExecutionPlan::parse(args) {
        Ok(plan) => {
            trace!(?plan, background, "execution plan");
            plan.execute(host, background, registry);
        }
        Err(err) => {
            debug!(%err, "rejected command line");
            eprintln!("{err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use nix::{
        errno::Errno,
        sys::wait::{WaitPidFlag, WaitStatus},
        unistd::ForkResult,
    };

    use super::*;

    /// Fails the test if anything tries to start a process.
    struct NoSpawn;

    impl Host for NoSpawn {
        fn fork(&self) -> nix::Result<ForkResult> {
            panic!("nothing should be spawned");
        }

        fn wait(&self, _pid: Pid, _flags: Option<WaitPidFlag>) -> nix::Result<WaitStatus> {
            Err(Errno::ECHILD)
        }
    }

    #[test]
    fn blank_and_malformed_lines_spawn_nothing() {
        let mut registry = Registry::default();

        for line in ["", "   ", "cat <", "| wc", "ls | sort | uniq", "> out"] {
            let args = crate::parse::tokenize(line);
            execute(&NoSpawn, &args, true, &mut registry);
        }

        assert!(registry.is_empty());
    }
}
