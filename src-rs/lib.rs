pub mod api;
pub mod browser;
pub mod network;
pub mod report;

pub use browser::{Browser, LaunchMechanism, OpenMode, StdoutGate, SystemBrowser};
pub use network::{ApiResponse, Network, PostError};
pub use report::{print_bug_report, render_bug_report, EnvProbe, HostProbe};
