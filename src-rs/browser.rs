use std::io;

use tracing::debug;

/// Same-window / new-window / new-tab, numbered the way the platform
/// launch facility expects them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenMode {
    Default,
    NewWindow,
    NewTab,
}

impl OpenMode {
    pub fn as_flag(self) -> u8 {
        match self {
            OpenMode::Default => 0,
            OpenMode::NewWindow => 1,
            OpenMode::NewTab => 2,
        }
    }
}

/// Seam over the host's default-browser facility.
pub trait LaunchMechanism {
    fn launch(&self, url: &str, new: u8, autoraise: bool) -> io::Result<()>;
}

/// Launches through the system default browser. `new` and `autoraise` are
/// hints; the platform launcher decides what to honor.
pub struct SystemBrowser;

impl LaunchMechanism for SystemBrowser {
    fn launch(&self, url: &str, _new: u8, _autoraise: bool) -> io::Result<()> {
        webbrowser::open(url)
    }
}

pub struct Browser {
    mechanism: Box<dyn LaunchMechanism>,
}

impl Browser {
    pub fn system() -> Self {
        Self {
            mechanism: Box::new(SystemBrowser),
        }
    }

    pub fn with_mechanism(mechanism: Box<dyn LaunchMechanism>) -> Self {
        Self { mechanism }
    }

    pub fn open(&self, link: &str) -> io::Result<()> {
        self.open_with(link, OpenMode::Default, true)
    }

    pub fn open_new_window(&self, link: &str) -> io::Result<()> {
        self.open_with(link, OpenMode::NewWindow, true)
    }

    pub fn open_new_tab(&self, link: &str) -> io::Result<()> {
        self.open_with(link, OpenMode::NewTab, true)
    }

    /// Stdout is muted while the mechanism runs; stderr is untouched. The
    /// gate restores the descriptor on every exit path, including a launch
    /// error.
    pub fn open_with(&self, link: &str, mode: OpenMode, autoraise: bool) -> io::Result<()> {
        debug!(target: "readlater::browser", url = %link, mode = mode.as_flag(), "opening browser");
        let _gate = StdoutGate::acquire()?;
        self.mechanism.launch(link, mode.as_flag(), autoraise)
    }
}

/// Scoped stdout silencer: duplicates the stdout descriptor, points fd 1 at
/// the null sink, and puts the original back when dropped.
#[cfg(unix)]
pub struct StdoutGate {
    saved: libc::c_int,
}

#[cfg(unix)]
impl StdoutGate {
    pub fn acquire() -> io::Result<Self> {
        use std::fs::OpenOptions;
        use std::io::Write;
        use std::os::unix::io::AsRawFd;

        // Buffered output written before the gate belongs to the real stdout.
        let _ = io::stdout().flush();

        let devnull = OpenOptions::new().write(true).open("/dev/null")?;
        let saved = unsafe { libc::dup(libc::STDOUT_FILENO) };
        if saved < 0 {
            return Err(io::Error::last_os_error());
        }
        if unsafe { libc::dup2(devnull.as_raw_fd(), libc::STDOUT_FILENO) } < 0 {
            let err = io::Error::last_os_error();
            unsafe { libc::close(saved) };
            return Err(err);
        }
        Ok(Self { saved })
    }
}

#[cfg(unix)]
impl Drop for StdoutGate {
    fn drop(&mut self) {
        use std::io::Write;

        // Anything still buffered was written while muted; flush it into the
        // null sink before the descriptor comes back.
        let _ = io::stdout().flush();
        unsafe {
            libc::dup2(self.saved, libc::STDOUT_FILENO);
            libc::close(self.saved);
        }
    }
}

// The descriptor-level null sink is unix-specific; elsewhere launches run
// unmuted.
#[cfg(not(unix))]
pub struct StdoutGate;

#[cfg(not(unix))]
impl StdoutGate {
    pub fn acquire() -> io::Result<Self> {
        Ok(Self)
    }
}
