//! Initial admin credential hashing through an external executable.

use std::path::PathBuf;
use std::process::Command;

/// Turns an email and password into a credential line for the document.
pub trait CredentialHasher {
    /// The credential line, or `None` when none could be produced.
    fn hash(&self, email: &str, password: &str) -> Option<String>;
}

impl<H: CredentialHasher + ?Sized> CredentialHasher for &H {
    fn hash(&self, email: &str, password: &str) -> Option<String> {
        (**self).hash(email, password)
    }
}

/// Runs `<script> <email> <password>` and picks the output line for the email.
#[derive(Debug, Clone)]
pub struct ScriptHasher {
    script: PathBuf,
}

impl ScriptHasher {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
        }
    }

    pub fn script(&self) -> &std::path::Path {
        &self.script
    }
}

impl CredentialHasher for ScriptHasher {
    fn hash(&self, email: &str, password: &str) -> Option<String> {
        let output = match Command::new(&self.script).arg(email).arg(password).output() {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(script = %self.script.display(), error = %e, "hash script failed to start");
                return None;
            }
        };

        if !output.status.success() {
            tracing::warn!(
                script = %self.script.display(),
                status = %output.status,
                "hash script exited unsuccessfully"
            );
        }

        credential_line(&String::from_utf8_lossy(&output.stdout), email)
    }
}

/// The first line of `stdout` that starts with `email`.
pub fn credential_line(stdout: &str, email: &str) -> Option<String> {
    stdout
        .lines()
        .find(|line| line.starts_with(email))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_line_found() {
        let stdout = "generating hash...\nadmin@example.com:$2y$10$abc\n";
        assert_eq!(
            credential_line(stdout, "admin@example.com"),
            Some("admin@example.com:$2y$10$abc".to_string())
        );
    }

    #[test]
    fn test_credential_line_absent() {
        assert_eq!(credential_line("error: bcrypt missing\n", "admin@example.com"), None);
    }

    #[test]
    fn test_missing_script_yields_none() {
        let hasher = ScriptHasher::new("/nonexistent/generate-hash.sh");
        assert_eq!(hasher.hash("admin@example.com", "pw"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_script_output_line() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let script = temp.path().join("generate-hash.sh");
        std::fs::write(
            &script,
            "#!/bin/sh\necho \"hashing for $1\" >&2\necho banner\necho \"$1:hashed-$2\"\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let hasher = ScriptHasher::new(&script);
        assert_eq!(
            hasher.hash("admin@example.com", "secret"),
            Some("admin@example.com:hashed-secret".to_string())
        );
    }
}
