//! Line-driven task picker: print the numbered menu, read a choice, run it,
//! show the outcome, repeat.

use anyhow::Result;
use container_exec::{ContainerRuntime, ExecError};
use menu_config::{MenuConfig, MenuError};
use std::io::{self, BufRead, Write};
use std::time::Duration;

use super::{load_menu, run_task, TaskOutcome};
use crate::render::{output_box, Palette};
use crate::GlobalArgs;

pub fn run(global: &GlobalArgs) -> Result<i32> {
    let palette = Palette::detect();
    let config = match load_menu(global) {
        Ok(config) => config,
        Err(err) => {
            let message = match err.downcast_ref::<MenuError>() {
                Some(menu_err) => menu_err.to_string(),
                None => format!("Failed to load config: {:#}", err),
            };
            println!("{}", palette.error(&format!("❌ {}", message)));
            return Ok(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = MenuSession {
        config: &config,
        runtime: global.container_runtime(),
        default_timeout: global.timeout,
        palette,
        show_help: false,
    };
    session.run(stdin.lock(), &mut stdout.lock())?;
    Ok(0)
}

struct MenuSession<'a> {
    config: &'a MenuConfig,
    runtime: ContainerRuntime,
    default_timeout: Duration,
    palette: Palette,
    show_help: bool,
}

enum Choice {
    Quit,
    ToggleHelp,
    Task(usize),
    Invalid(String),
}

fn parse_choice(line: &str, task_count: usize) -> Choice {
    let line = line.trim();
    match line {
        "q" | "quit" | "exit" => Choice::Quit,
        "h" | "help" | "?" => Choice::ToggleHelp,
        _ => match line.parse::<usize>() {
            Ok(n) if n >= 1 && n <= task_count => Choice::Task(n - 1),
            Ok(n) => Choice::Invalid(format!("No task number {}", n)),
            Err(_) => Choice::Invalid(format!("Unrecognised input '{}'", line)),
        },
    }
}

impl MenuSession<'_> {
    fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        let task_count = self.config.tasks().count();
        self.render_menu(out)?;

        if task_count == 0 {
            writeln!(
                out,
                "{}",
                self.palette.error("No tasks found in menu. Add some tasks to get started!")
            )?;
            return Ok(());
        }

        writeln!(
            out,
            "{}",
            self.palette
                .success(&format!("Loaded {} tasks successfully!", task_count))
        )?;

        let mut line = String::new();
        loop {
            write!(out, "\n{} ", self.palette.info("Select a task [1-N, h, q]:"))?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(());
            }
            if line.trim().is_empty() {
                continue;
            }

            match parse_choice(&line, task_count) {
                Choice::Quit => return Ok(()),
                Choice::ToggleHelp => {
                    self.show_help = !self.show_help;
                    self.render_menu(out)?;
                }
                Choice::Invalid(message) => {
                    writeln!(out, "{}", self.palette.error(&format!("❌ Error: {}", message)))?;
                }
                Choice::Task(index) => {
                    self.execute(index, out)?;
                }
            }
        }
    }

    fn render_menu<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let p = &self.palette;
        writeln!(out, "{}", p.title("Ronin: container task runner"))?;
        writeln!(out, "{}\n", p.info(&format!("Project: {}", self.config.project)))?;

        let mut number = 1;
        for category in &self.config.menu {
            writeln!(out, "{}", p.info(&category.title))?;
            for task in &category.items {
                let mode = if task.interactive { " [interactive]" } else { "" };
                writeln!(
                    out,
                    "  {:>2}. {}{}",
                    number,
                    task.label,
                    p.item(&format!("  ({}){}", task.container, mode))
                )?;
                number += 1;
            }
        }

        writeln!(out, "\n{}", p.help("Enter a number to execute, h: help, q: quit"))?;
        if self.show_help {
            writeln!(out, "\n{}", p.info("Help:"))?;
            for line in [
                "• Each task runs its command in the named container",
                "• Tasks are defined in the menu file (see `roninctl init`)",
                "• Containers must already be running; `roninctl doctor` checks them",
                "• Interactive tasks attach your terminal until the command exits",
                "• Enter h again to hide this help",
            ] {
                writeln!(out, "{}", p.help(line))?;
            }
        }
        Ok(())
    }

    fn execute<W: Write>(&self, index: usize, out: &mut W) -> Result<()> {
        let p = &self.palette;
        let task = match self.config.tasks().nth(index) {
            Some(task) => task,
            None => return Ok(()),
        };

        writeln!(out, "{}", p.info("⏳ Executing command..."))?;
        out.flush()?;

        match run_task(&self.runtime, task, self.default_timeout) {
            Ok(TaskOutcome::Captured(result)) => {
                if result.success() {
                    writeln!(
                        out,
                        "{}",
                        p.success(&format!(
                            "✅ Command executed successfully in {}",
                            task.container
                        ))
                    )?;
                } else {
                    writeln!(
                        out,
                        "{}",
                        p.warning(&format!(
                            "⚠ Command exited with code {} in {}",
                            result.exit_code, task.container
                        ))
                    )?;
                }
                if !result.stdout.is_empty() {
                    writeln!(out, "{}", output_box(&result.stdout))?;
                }
                if !result.stderr.is_empty() {
                    writeln!(out, "{}", p.help("stderr:"))?;
                    writeln!(out, "{}", output_box(&result.stderr))?;
                }
            }
            Ok(TaskOutcome::Interactive { exit_code }) => {
                writeln!(
                    out,
                    "{}",
                    p.success(&format!(
                        "✅ Session in {} ended (exit code {})",
                        task.container, exit_code
                    ))
                )?;
            }
            Err(err) => {
                let message = match err.downcast_ref::<ExecError>() {
                    Some(exec) => exec.to_string(),
                    None => format!("{:#}", err),
                };
                writeln!(out, "{}", p.error(&format!("❌ Error: {}", message)))?;
            }
        }
        Ok(())
    }
}
