use std::fmt;

use nix::{sys::wait::WaitPidFlag, unistd::Pid};

use super::{status::JobStatus, Host};

/// Background processes in the order they were launched.
#[derive(Debug, Clone)]
pub struct Registry {
    jobs: Vec<Pid>,
    launched: usize,
    prune_finished: bool,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Registry {
    /// With `prune_finished`, a job is dropped the first time a report sees it
    /// exit or die from a signal.
    pub fn new(prune_finished: bool) -> Self {
        Self {
            jobs: Vec::new(),
            launched: 0,
            prune_finished,
        }
    }

    /// Tracks `pid` and returns its job number. Numbers start at 1 and are
    /// never handed out twice, even after pruning.
    pub fn register(&mut self, pid: Pid) -> usize {
        self.jobs.push(pid);
        self.launched += 1;
        self.launched
    }

    pub fn pids(&self) -> &[Pid] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Probes every job without blocking. Jobs with nothing new to say are
    /// left out of the report but stay tracked.
    pub fn report<H: Host>(&mut self, host: &H) -> JobReport {
        let flags = WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED | WaitPidFlag::WCONTINUED;
        let mut entries = Vec::new();

        for &pid in &self.jobs {
            match host.wait(pid, Some(flags)) {
                Ok(status) => {
                    if let Some(status) = JobStatus::from_wait(status) {
                        entries.push(JobEntry { pid, status });
                    }
                }
                Err(err) => {
                    trace!(%pid, %err, "status probe failed");
                }
            }
        }

        if self.prune_finished {
            let finished = entries
                .iter()
                .filter(|entry| entry.status.is_finished())
                .map(|entry| entry.pid)
                .collect::<Vec<_>>();

            if !finished.is_empty() {
                debug!(?finished, "pruning finished jobs");
                self.jobs.retain(|pid| !finished.contains(pid));
            }
        }

        JobReport { entries }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobEntry {
    pub pid: Pid,
    pub status: JobStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobReport {
    pub entries: Vec<JobEntry>,
}

impl JobReport {
    #[cfg(test)]
    pub fn get(&self, pid: Pid) -> Option<JobStatus> {
        self.entries
            .iter()
            .find(|entry| entry.pid == pid)
            .map(|entry| entry.status)
    }
}

impl fmt::Display for JobReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Background processes:")?;
        writeln!(f, "PID\tExit Status\tStatus")?;

        for JobEntry { pid, status } in &self.entries {
            let value = status.value().map(|v| v.to_string()).unwrap_or_default();
            writeln!(f, "{pid}\t{value}\t\t{status}")?;
        }

        Ok(())
    }
}
