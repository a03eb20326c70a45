use anyhow::{anyhow, bail, Context, Result};
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tracing::{debug, info};
use wait_timeout::ChildExt;

use crate::config::PresentationConfig;

/// Sink for slide navigation commands. Calls are synchronous; the frame loop
/// waits for each one to return.
pub trait Presenter {
    fn name(&self) -> String;
    fn advance(&mut self) -> Result<()>;
    fn retreat(&mut self) -> Result<()>;
}

impl<T: Presenter + ?Sized> Presenter for Box<T> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn advance(&mut self) -> Result<()> {
        (**self).advance()
    }

    fn retreat(&mut self) -> Result<()> {
        (**self).retreat()
    }
}

/// Runs an external program per command, e.g. `xdotool key Right`.
pub struct CommandPresenter {
    advance: Vec<String>,
    retreat: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandPresenter {
    pub fn new(advance: Vec<String>, retreat: Vec<String>, timeout: Option<Duration>) -> Result<Self> {
        if advance.is_empty() || retreat.is_empty() {
            bail!("presentation advance/retreat commands must not be empty");
        }
        Ok(Self {
            advance,
            retreat,
            timeout,
        })
    }

    pub fn from_config(config: &PresentationConfig) -> Result<Self> {
        let timeout = (config.timeout_ms > 0).then(|| Duration::from_millis(config.timeout_ms));
        Self::new(config.advance.clone(), config.retreat.clone(), timeout)
    }

    fn run(&self, argv: &[String]) -> Result<()> {
        debug!("running {:?}", argv);
        let child = spawn(argv, Stdio::null())?;
        wait_with_timeout(child, self.timeout).with_context(|| format!("command {:?}", argv))
    }
}

impl Presenter for CommandPresenter {
    fn name(&self) -> String {
        format!("Command ({})", self.advance.join(" "))
    }

    fn advance(&mut self) -> Result<()> {
        self.run(&self.advance)
    }

    fn retreat(&mut self) -> Result<()> {
        self.run(&self.retreat)
    }
}

/// Dry-run sink: logs and counts commands, never touches the system.
#[derive(Debug, Default)]
pub struct LogPresenter {
    pub advanced: usize,
    pub retreated: usize,
}

impl Presenter for LogPresenter {
    fn name(&self) -> String {
        "Dry run (log only)".to_string()
    }

    fn advance(&mut self) -> Result<()> {
        self.advanced += 1;
        info!("[dry-run] advance slide");
        Ok(())
    }

    fn retreat(&mut self) -> Result<()> {
        self.retreated += 1;
        info!("[dry-run] retreat slide");
        Ok(())
    }
}

/// Start the slideshow application once. The child is left running.
pub fn launch_slideshow(config: &PresentationConfig) -> Result<Option<Child>> {
    if config.launch.is_empty() {
        return Ok(None);
    }
    let argv = expand_launch(&config.launch, config.file.as_deref())?;
    info!("Launching slideshow: {}", argv.join(" "));
    let child = spawn(&argv, Stdio::inherit()).context("Failed to launch slideshow")?;
    Ok(Some(child))
}

/// Substitute `{file}` in every argument.
pub fn expand_launch(launch: &[String], file: Option<&str>) -> Result<Vec<String>> {
    launch
        .iter()
        .map(|arg| {
            if !arg.contains("{file}") {
                return Ok(arg.clone());
            }
            let file = file.ok_or_else(|| anyhow!("launch command uses {{file}} but no presentation file is set"))?;
            Ok(arg.replace("{file}", file))
        })
        .collect()
}

fn spawn(argv: &[String], stdout: Stdio) -> Result<Child> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| anyhow!("empty command line"))?;
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to start {}", program))
}

fn wait_with_timeout(mut child: Child, timeout: Option<Duration>) -> Result<()> {
    let status = match timeout {
        None => child.wait()?,
        Some(limit) => match child.wait_timeout(limit)? {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                bail!("timed out after {} ms", limit.as_millis());
            }
        },
    };
    if !status.success() {
        bail!("exited with {}", status);
    }
    Ok(())
}
