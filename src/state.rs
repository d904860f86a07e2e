use std::io::{self, Write};

use termion::{color, style};

use crate::{
    builtins::{BuiltinCommand, BuiltinCommands},
    cmd,
    config::Config,
    parse::parse_line,
    prelude::*,
};

/// Whether the read loop should keep going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct State {
    pub config: Config,
    pub registry: Registry,
    pub host: Posix,
}

impl State {
    pub fn new(config: Config) -> Self {
        let registry = Registry::new(config.jobs.prune_finished);

        Self {
            config,
            registry,
            host: Posix,
        }
    }

    pub fn render<W: Write>(&self, stdout: &mut W, tty: bool) -> io::Result<()> {
        if tty {
            write!(
                stdout,
                "{}{}{}{}",
                style::Bold,
                color::Fg(color::Green),
                self.config.prompt,
                style::Reset
            )?;
        } else {
            write!(stdout, "{}", self.config.prompt)?;
        }

        stdout.flush()
    }

    pub fn execute(&mut self, input: &str) -> Flow {
        let line = parse_line(input);

        if let [name] = line.args.as_slice() {
            if !line.background {
                if let Some(builtin) = BuiltinCommands::from_name(name) {
                    trace!(builtin = builtin.name(), "running builtin");
                    return builtin.execute(self);
                }
            }
        }

        cmd::execute(&self.host, &line.args, line.background, &mut self.registry);

        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::process::status::JobStatus;

    fn state() -> State {
        State::new(Config::default())
    }

    #[test]
    fn exit_ends_the_loop() {
        assert_eq!(state().execute("exit"), Flow::Exit);
        assert_eq!(state().execute("  exit  "), Flow::Exit);
    }

    #[test]
    fn myjobs_and_blank_lines_continue() {
        let mut state = state();

        assert_eq!(state.execute("myjobs"), Flow::Continue);
        assert_eq!(state.execute(""), Flow::Continue);
        assert_eq!(state.execute("   "), Flow::Continue);
        assert!(state.registry.is_empty());
    }

    #[test]
    fn failing_commands_do_not_end_the_loop() {
        let mut state = state();

        assert_eq!(state.execute("forksh-no-such-program"), Flow::Continue);
        assert_eq!(state.execute("cat < /forksh/missing/file"), Flow::Continue);
        assert_eq!(state.execute("ls |"), Flow::Continue);
    }

    #[test]
    fn background_lines_reach_the_registry() {
        let mut state = state();

        assert_eq!(state.execute("true&"), Flow::Continue);
        assert_eq!(state.registry.len(), 1);
        let pid = state.registry.pids()[0];

        let start = Instant::now();
        loop {
            if let Some(status) = state.registry.report(&state.host).get(pid) {
                assert_eq!(status, JobStatus::Exited(0));
                break;
            }
            assert!(start.elapsed() < Duration::from_secs(5));
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(state.registry.is_empty());
    }

    #[test]
    fn registry_follows_prune_setting() {
        let mut config = Config::default();
        config.jobs.prune_finished = false;

        let mut state = State::new(config);
        state.registry.register(Pid::from_raw(i32::MAX));

        // an unknown pid probes as an error and is kept
        state.execute("myjobs");
        assert_eq!(state.registry.len(), 1);
    }

    #[test]
    fn plain_prompt_without_tty() {
        let mut out = Vec::new();
        state().render(&mut out, false).unwrap();

        assert_eq!(out, b"forksh> ");
    }

    #[test]
    fn styled_prompt_on_tty() {
        let mut out = Vec::new();
        state().render(&mut out, true).unwrap();
        let rendered = String::from_utf8(out).unwrap();

        assert!(rendered.contains("forksh> "));
        assert!(rendered.ends_with(&style::Reset.to_string()));
    }
}
