use nix::sys::{signal::Signal, wait::WaitStatus};
use strum::Display;

/// A state change observed for a background process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum JobStatus {
    Exited(i32),
    Terminated(Signal),
    Stopped(Signal),
    #[strum(serialize = "Running")]
    Continued,
}

impl JobStatus {
    /// `None` when the probe saw no state change.
    pub fn from_wait(status: WaitStatus) -> Option<Self> {
        match status {
            WaitStatus::Exited(_, code) => Some(Self::Exited(code)),
            WaitStatus::Signaled(_, signal, _) => Some(Self::Terminated(signal)),
            WaitStatus::Stopped(_, signal) => Some(Self::Stopped(signal)),
            WaitStatus::Continued(_) => Some(Self::Continued),
            #[cfg(any(target_os = "linux", target_os = "android"))]
            WaitStatus::PtraceEvent(_, signal, _) => Some(Self::Stopped(signal)),
            #[cfg(any(target_os = "linux", target_os = "android"))]
            WaitStatus::PtraceSyscall(_) => Some(Self::Stopped(Signal::SIGTRAP)),
            WaitStatus::StillAlive => None,
        }
    }

    /// The process is gone and will not be reported again.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Exited(_) | Self::Terminated(_))
    }

    /// The number shown in the "Exit Status" column, if any.
    pub fn value(&self) -> Option<i32> {
        match self {
            Self::Exited(code) => Some(*code),
            Self::Terminated(signal) | Self::Stopped(signal) => Some(*signal as i32),
            Self::Continued => None,
        }
    }
}
