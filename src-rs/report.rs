use std::env;

use crate::api::ISSUE_URL;

const SEPARATOR_WIDTH: usize = 69;
const NO_PACKAGES_NOTICE: &str = "package metadata not available !";

/// Environment introspection behind a seam so reports can be exercised
/// without querying the real host.
pub trait EnvProbe {
    fn runtime_version(&self) -> String;
    fn installed_packages(&self) -> Option<Vec<(String, String)>>;
    fn runtime_args(&self) -> Vec<String>;
}

/// Probe for the running process.
pub struct HostProbe;

impl EnvProbe for HostProbe {
    fn runtime_version(&self) -> String {
        version_tuple(env!("CARGO_PKG_VERSION"))
    }

    fn installed_packages(&self) -> Option<Vec<(String, String)>> {
        // A compiled binary carries no package registry to enumerate.
        None
    }

    fn runtime_args(&self) -> Vec<String> {
        env::args().skip(1).collect()
    }
}

/// Builds the fenced bug report: header with the issue tracker link,
/// runtime version, packages, arguments, then the error message.
pub fn render_bug_report(probe: &dyn EnvProbe, message: &str) -> String {
    let separator = format!("\n{}\n", "-".repeat(SEPARATOR_WIDTH));

    let packages = match probe.installed_packages() {
        Some(list) => list
            .iter()
            .map(|(name, version)| format!("{} - {}", name, version))
            .collect::<Vec<_>>()
            .join("\n"),
        None => NO_PACKAGES_NOTICE.to_string(),
    };
    let arguments = probe.runtime_args().join("\n");

    format!(
        "```{sep}Bug Report :\n`readlater` has encountered an error ! \
         Please submit this bug report at \n` {url} `.{sep}\
         Runtime Version : {version}{sep}\
         Installed Packages :\n{packages}{sep}\
         Runtime Arguments :\n{arguments}{sep}\
         Error Message :\n{message}{sep}```",
        sep = separator,
        url = ISSUE_URL,
        version = probe.runtime_version(),
        packages = packages,
        arguments = arguments,
        message = message,
    )
}

pub fn print_bug_report(probe: &dyn EnvProbe, message: &str) {
    println!("{}", render_bug_report(probe, message));
}

fn version_tuple(semver: &str) -> String {
    let parts: Vec<&str> = semver.split('.').collect();
    format!("({})", parts.join(", "))
}
