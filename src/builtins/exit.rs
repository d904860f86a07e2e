use super::BuiltinCommand;
use crate::state::{Flow, State};

#[derive(Debug, Default)]
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn execute(&self, state: &mut State) -> Flow {
        debug!(jobs = ?state.registry.pids(), "exit requested");
        Flow::Exit
    }
}
