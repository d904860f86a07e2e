use std::io::{self, Write};

use super::BuiltinCommand;
use crate::state::{Flow, State};

/// Prints whatever the background jobs have to report since the last call.
#[derive(Debug, Default)]
pub struct MyJobs;

impl BuiltinCommand for MyJobs {
    fn name(&self) -> &'static str {
        "myjobs"
    }

    fn execute(&self, state: &mut State) -> Flow {
        let report = state.registry.report(&state.host);
        trace!(entries = report.entries.len(), "job report");

        let mut stdout = io::stdout().lock();
        if let Err(err) = write!(stdout, "{report}").and_then(|()| stdout.flush()) {
            warn!(%err, "failed to print job report");
        }

        Flow::Continue
    }
}
