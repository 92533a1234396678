//! Following a log source and forwarding the lines that look like errors.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::discovery::{Service, ServiceKind};
use crate::error::AgentError;
use crate::filter::ErrorFilter;
use crate::forward::Forwarder;
use crate::paths::service_name_for;

/// Something whose output the agent follows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    File(PathBuf),
    Service(Service),
}

impl Target {
    /// Stable identity used to avoid following the same source twice.
    pub fn key(&self) -> String {
        match self {
            Target::File(path) => format!("file:{}", path.display()),
            Target::Service(svc) => format!("{}:{}", svc.kind.as_str(), svc.name),
        }
    }

    pub fn service_name(&self) -> String {
        match self {
            Target::File(path) => service_name_for(path),
            Target::Service(svc) => svc.name.clone(),
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            Target::File(_) => "file",
            Target::Service(svc) => svc.kind.as_str(),
        }
    }

    /// The command whose output is followed.
    pub fn command(&self) -> Command {
        match self {
            Target::File(path) => tail_command(path),
            Target::Service(Service {
                name,
                kind: ServiceKind::Docker,
            }) => {
                let mut cmd = Command::new("docker");
                cmd.args(["logs", "-f", "--tail", "0", name.as_str()]);
                cmd
            }
            Target::Service(Service {
                name,
                kind: ServiceKind::Systemd,
            }) => {
                let mut cmd = Command::new("journalctl");
                cmd.args(["-u", name.as_str(), "-f", "-n", "0", "-o", "cat"]);
                cmd
            }
        }
    }
}

fn tail_command(path: &Path) -> Command {
    let mut cmd = Command::new("tail");
    cmd.args(["-F", "-n", "0"]).arg(path);
    cmd
}

/// Follow `target` until its output ends, forwarding matching lines.
///
/// Forwarding failures are logged and skipped; the follower keeps running.
pub async fn follow(
    target: &Target,
    filter: Arc<ErrorFilter>,
    forwarder: Forwarder,
) -> Result<(), AgentError> {
    let mut cmd = target.command();
    follow_command(&mut cmd, target, &filter, &forwarder).await
}

pub async fn follow_command(
    cmd: &mut Command,
    target: &Target,
    filter: &ErrorFilter,
    forwarder: &Forwarder,
) -> Result<(), AgentError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let program = cmd.as_std().get_program().to_string_lossy().into_owned();
    let mut child = cmd.spawn().map_err(|source| AgentError::Spawn {
        command: program.clone(),
        source,
    })?;
    info!(target = %target.key(), "following log source");

    let mut stdout = child.stdout.take().map(|s| BufReader::new(s).lines());
    let mut stderr = child.stderr.take().map(|s| BufReader::new(s).lines());

    let service_name = target.service_name();
    let source = target.source();

    while stdout.is_some() || stderr.is_some() {
        let line = tokio::select! {
            line = next_line(&mut stdout), if stdout.is_some() => line,
            line = next_line(&mut stderr), if stderr.is_some() => line,
        };
        let Some(line) = line else { continue };

        if !filter.matches(&line) {
            continue;
        }
        match forwarder.send(&line, &service_name, source).await {
            Ok(()) => debug!(service_name = %service_name, "analysis requested"),
            Err(e) => warn!(service_name = %service_name, error = %e, "failed to forward log line"),
        }
    }

    let status = child
        .wait()
        .await
        .map_err(|source| AgentError::Spawn { command: program, source })?;
    info!(target = %target.key(), status = %status, "log source ended");
    Ok(())
}

/// Read one line, closing the stream (setting it to `None`) on EOF or error.
async fn next_line<R>(stream: &mut Option<Lines<BufReader<R>>>) -> Option<String>
where
    R: AsyncRead + Unpin,
{
    let lines = stream.as_mut()?;
    match lines.next_line().await {
        Ok(Some(line)) => Some(line),
        Ok(None) => {
            *stream = None;
            None
        }
        Err(e) => {
            debug!(error = %e, "log stream closed");
            *stream = None;
            None
        }
    }
}
