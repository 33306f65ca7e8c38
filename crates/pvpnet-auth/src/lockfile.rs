//! The local session descriptor ("lockfile") written by the game client.
//!
//! While the client runs it keeps a small colon-delimited file with the
//! loopback connection credentials. The format has no versioning: it is
//! exactly five fields in fixed order, and anything else is a parse
//! error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::AuthError;

/// The parsed lockfile: name, PID, loopback port, password, protocol.
///
/// Parsed once at activation; immutable after parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lockfile {
    pub name: String,
    pub pid: u32,
    pub port: u16,
    pub password: String,
    pub protocol: String,
}

impl Lockfile {
    /// The platform-specific path the game client writes the lockfile
    /// to. `None` when the platform directory variable is not set
    /// (i.e. not running where a game client could be).
    pub fn default_path() -> Option<PathBuf> {
        let local_app_data = std::env::var_os("LOCALAPPDATA")?;
        Some(
            PathBuf::from(local_app_data)
                .join("Riot Games")
                .join("Riot Client")
                .join("Config")
                .join("lockfile"),
        )
    }

    /// Reads and parses the lockfile at `path`.
    pub fn load(path: &Path) -> Result<Self, AuthError> {
        let contents =
            fs::read_to_string(path).map_err(|source| AuthError::LockfileUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&contents)
    }

    /// Parses the colon-delimited record: name, PID, port, password,
    /// protocol. Exactly five fields, in that order.
    pub fn parse(contents: &str) -> Result<Self, AuthError> {
        let fields: Vec<&str> = contents.trim().split(':').collect();
        if fields.len() != 5 {
            return Err(AuthError::LockfileMalformed(format!(
                "expected 5 colon-delimited fields, got {}",
                fields.len()
            )));
        }
        let pid: u32 = fields[1]
            .parse()
            .map_err(|_| AuthError::LockfileMalformed(format!("PID {:?} is not a number", fields[1])))?;
        let port: u16 = fields[2]
            .parse()
            .map_err(|_| AuthError::LockfileMalformed(format!("port {:?} is not a port number", fields[2])))?;
        Ok(Self {
            name: fields[0].to_string(),
            pid,
            port,
            password: fields[3].to_string(),
            protocol: fields[4].to_string(),
        })
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_five_fields_in_fixed_order() {
        let lockfile = Lockfile::parse("Riot Client:3344:52463:secretpw:https").unwrap();
        assert_eq!(lockfile.name, "Riot Client");
        assert_eq!(lockfile.pid, 3344);
        assert_eq!(lockfile.port, 52463);
        assert_eq!(lockfile.password, "secretpw");
        assert_eq!(lockfile.protocol, "https");
    }

    #[test]
    fn test_parse_trims_trailing_newline() {
        let lockfile = Lockfile::parse("Riot Client:1:2:pw:https\n").unwrap();
        assert_eq!(lockfile.protocol, "https");
    }

    #[test]
    fn test_parse_four_fields_is_malformed() {
        let result = Lockfile::parse("Riot Client:3344:52463:secretpw");
        assert!(matches!(result, Err(AuthError::LockfileMalformed(msg)) if msg.contains("got 4")));
    }

    #[test]
    fn test_parse_six_fields_is_malformed() {
        // A password containing a colon breaks the record; there is no
        // escaping in this format.
        let result = Lockfile::parse("Riot Client:3344:52463:se:cret:https");
        assert!(matches!(result, Err(AuthError::LockfileMalformed(msg)) if msg.contains("got 6")));
    }

    #[test]
    fn test_parse_non_numeric_pid_is_malformed() {
        let result = Lockfile::parse("Riot Client:abc:52463:pw:https");
        assert!(matches!(result, Err(AuthError::LockfileMalformed(msg)) if msg.contains("PID")));
    }

    #[test]
    fn test_parse_out_of_range_port_is_malformed() {
        let result = Lockfile::parse("Riot Client:3344:70000:pw:https");
        assert!(matches!(result, Err(AuthError::LockfileMalformed(msg)) if msg.contains("port")));
    }

    #[test]
    fn test_load_missing_file_is_unreadable_not_malformed() {
        let result = Lockfile::load(Path::new("/nonexistent/riot/lockfile"));
        assert!(matches!(result, Err(AuthError::LockfileUnreadable { .. })));
    }
}
