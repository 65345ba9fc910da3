use std::fmt;
use std::path::Path;
use std::str::FromStr;

use url::Url;

use crate::LcuError;

/// Connection details the client writes to its lockfile:
/// `process:pid:port:password:protocol`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub process: String,
    pub pid: u32,
    pub port: u16,
    pub password: String,
    pub protocol: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("process", &self.process)
            .field("pid", &self.pid)
            .field("port", &self.port)
            .field("password", &"<redacted>")
            .field("protocol", &self.protocol)
            .finish()
    }
}

impl Credentials {
    pub async fn read(path: &Path) -> Result<Self, LcuError> {
        let raw = tokio::fs::read_to_string(path).await?;
        raw.parse()
    }

    pub fn base_url(&self) -> Result<Url, LcuError> {
        Url::parse(&format!("{}://127.0.0.1:{}/", self.protocol, self.port))
            .map_err(|err| LcuError::Url(err.to_string()))
    }
}

impl FromStr for Credentials {
    type Err = LcuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let parts: Vec<&str> = line.split(':').collect();
        let [process, pid, port, password, protocol] = parts.as_slice() else {
            return Err(LcuError::Lockfile(format!(
                "expected 5 fields, got {}",
                parts.len()
            )));
        };

        let pid = pid
            .parse()
            .map_err(|_| LcuError::Lockfile(format!("bad pid '{pid}'")))?;
        let port = port
            .parse()
            .map_err(|_| LcuError::Lockfile(format!("bad port '{port}'")))?;
        if password.is_empty() {
            return Err(LcuError::Lockfile("empty password".into()));
        }
        let protocol = protocol.to_ascii_lowercase();
        if protocol != "https" && protocol != "http" {
            return Err(LcuError::Lockfile(format!("unsupported protocol '{protocol}'")));
        }

        Ok(Self {
            process: process.to_string(),
            pid,
            port,
            password: password.to_string(),
            protocol,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lockfile_line() {
        let creds: Credentials = "LeagueClient:19204:60713:abcDEF_123:https\n"
            .parse()
            .unwrap();
        assert_eq!(creds.process, "LeagueClient");
        assert_eq!(creds.pid, 19204);
        assert_eq!(creds.port, 60713);
        assert_eq!(creds.password, "abcDEF_123");
        assert_eq!(creds.protocol, "https");
        assert_eq!(
            creds.base_url().unwrap().as_str(),
            "https://127.0.0.1:60713/"
        );
    }

    #[test]
    fn rejects_truncated_lockfile() {
        let err = "LeagueClient:19204:60713".parse::<Credentials>().unwrap_err();
        assert!(matches!(err, LcuError::Lockfile(_)));
    }

    #[test]
    fn rejects_bad_port_and_protocol() {
        assert!("LeagueClient:1:notaport:pw:https"
            .parse::<Credentials>()
            .is_err());
        assert!("LeagueClient:1:2999:pw:ftp".parse::<Credentials>().is_err());
        assert!("LeagueClient:1:2999::https".parse::<Credentials>().is_err());
    }

    #[test]
    fn debug_redacts_password() {
        let creds: Credentials = "LeagueClient:1:2999:hunter2:https".parse().unwrap();
        let printed = format!("{creds:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("2999"));
    }
}
