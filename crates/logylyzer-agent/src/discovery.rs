//! Discovery of running services whose output should be followed.

use tokio::process::Command;
use tracing::{info, warn};

use crate::config::ServicesConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Docker,
    Systemd,
}

impl ServiceKind {
    /// Source tag sent with forwarded logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Docker => "docker",
            ServiceKind::Systemd => "systemd",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Service {
    pub name: String,
    pub kind: ServiceKind,
}

/// Run every enabled discovery backend. A backend whose tool is missing
/// logs a warning and contributes nothing.
pub async fn discover_services(config: &ServicesConfig) -> Vec<Service> {
    if !config.auto_detect {
        return Vec::new();
    }

    let mut services = Vec::new();
    if config.docker
        && let Some(output) = run_listing("docker", &["ps", "--format", "{{.Names}}"]).await
    {
        services.extend(parse_docker_names(&output));
    }
    if config.systemd
        && let Some(output) = run_listing(
            "systemctl",
            &[
                "list-units",
                "--type=service",
                "--state=active",
                "--no-legend",
                "--plain",
                "--no-pager",
            ],
        )
        .await
    {
        services.extend(parse_systemd_units(&output));
    }

    info!(count = services.len(), "discovered services");
    services
}

async fn run_listing(program: &str, args: &[&str]) -> Option<String> {
    match Command::new(program).args(args).output().await {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            warn!(program, status = %output.status, "service listing failed");
            None
        }
        Err(e) => {
            warn!(program, error = %e, "service listing not available");
            None
        }
    }
}

/// Parse `docker ps --format {{.Names}}` output.
pub fn parse_docker_names(output: &str) -> Vec<Service> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|name| Service {
            name: name.to_string(),
            kind: ServiceKind::Docker,
        })
        .collect()
}

/// Parse `systemctl list-units --no-legend` output into unit names without
/// the `.service` suffix.
pub fn parse_systemd_units(output: &str) -> Vec<Service> {
    output
        .lines()
        .filter_map(|line| {
            line.split_whitespace()
                .find(|field| *field != "●" && *field != "*")
        })
        .map(|unit| Service {
            name: unit.strip_suffix(".service").unwrap_or(unit).to_string(),
            kind: ServiceKind::Systemd,
        })
        .collect()
}
