use enum_dispatch::enum_dispatch;
use strum::{EnumIter, IntoEnumIterator};

use crate::state::{Flow, State};

pub mod exit;
pub mod myjobs;

/// A command the interpreter handles itself instead of forking.
#[enum_dispatch(BuiltinCommands)]
pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    fn execute(&self, state: &mut State) -> Flow;
}

#[enum_dispatch]
#[derive(Debug, EnumIter)]
pub enum BuiltinCommands {
    Exit(exit::Exit),
    MyJobs(myjobs::MyJobs),
}

impl BuiltinCommands {
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|cmd| cmd.name() == name)
    }
}
