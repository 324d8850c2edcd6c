use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOS,
    Unsupported,
}

impl Platform {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier (`std::env::consts::OS` style) to an install strategy.
    /// Unix flavours without a known package layout get the manual Linux flow.
    pub fn from_os(os: &str) -> Self {
        let os = os.to_ascii_lowercase();
        if os.contains("win") {
            Platform::Windows
        } else if os.contains("mac") {
            Platform::MacOS
        } else if os.contains("nix") || os.contains("nux") || os.contains("aix") {
            Platform::Linux
        } else {
            Platform::Unsupported
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::MacOS => "macos",
            Platform::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}
