use std::path::PathBuf;

pub const SERVER_TCP_PORT: u16 = 9877;
const SERVER_TCP_HOST: &str = "127.0.0.1";

pub fn server_address() -> String {
    format!("{}:{}", SERVER_TCP_HOST, SERVER_TCP_PORT)
}

pub fn data_dir() -> PathBuf {
    // On macOS and Linux, use ~/.local/share/tonearm/ (XDG standard)
    // instead of macOS Application Support for consistency
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join("tonearm")
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tonearm")
    }
}

pub fn config_dir() -> PathBuf {
    // On macOS and Linux, always use ~/.config/tonearm/
    // (avoid macOS Application Support folder for consistency)
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("tonearm")
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tonearm")
    }
}

pub fn temp_dir() -> PathBuf {
    std::env::temp_dir()
}
