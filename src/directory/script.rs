//! Script Bridge Module
//!
//! [`ContactDirectory`] implementation that shells out to an external
//! bridge command for every operation. The bridge speaks two formats:
//! JSON on the primary enumeration path and the delimited record format
//! on the fallback path.

use std::process::Output;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::warn;

use crate::cache::ContactsSnapshot;
use crate::directory::{parse_records, phone, ContactDirectory};
use crate::error::{BrokerError, Result};

/// Message returned when the directory refuses access.
const ACCESS_HINT: &str =
    "contact directory access has not been granted; allow the bridge to read \
     contacts in the system privacy settings and retry";

// == Script Directory ==
/// Contact directory reached through a bridge executable.
#[derive(Debug, Clone)]
pub struct ScriptDirectory {
    /// Bridge command invoked with per-operation subcommands
    command: String,
}

impl ScriptDirectory {
    // == Constructor ==
    /// Creates a directory backed by the given bridge command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Runs the bridge with the given arguments, capturing its output.
    ///
    /// Failure to spawn at all is a bridge error; a non-zero exit is left
    /// for callers to interpret per operation.
    async fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new(&self.command)
            .args(args)
            .output()
            .await
            .map_err(|err| {
                BrokerError::Bridge(format!("failed to run {}: {err}", self.command))
            })
    }

    /// Full record dump used by the fallback and scan paths.
    async fn dump_records(&self) -> Result<ContactsSnapshot> {
        let output = self.run(&["list", "--records"]).await?;
        if !output.status.success() {
            warn!(status = %output.status, "record enumeration failed, treating as empty");
            return Ok(ContactsSnapshot::new());
        }
        Ok(parse_records(&String::from_utf8_lossy(&output.stdout)))
    }
}

#[async_trait]
impl ContactDirectory for ScriptDirectory {
    async fn check_access(&self) -> Result<()> {
        let output = self.run(&["access"]).await?;
        let granted =
            output.status.success() && String::from_utf8_lossy(&output.stdout).trim() == "granted";
        if granted {
            Ok(())
        } else {
            Err(BrokerError::AccessDenied(ACCESS_HINT.to_string()))
        }
    }

    async fn list_all(&self) -> Result<ContactsSnapshot> {
        let output = self.run(&["list", "--json"]).await?;
        if !output.status.success() {
            warn!(status = %output.status, "bulk enumeration failed, treating as empty");
            return Ok(ContactsSnapshot::new());
        }

        match serde_json::from_slice::<ContactsSnapshot>(&output.stdout) {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                warn!(%err, "unparseable bulk enumeration output, treating as empty");
                Ok(ContactsSnapshot::new())
            }
        }
    }

    async fn list_all_fallback(&self) -> Result<ContactsSnapshot> {
        self.dump_records().await
    }

    async fn lookup_name(&self, name: &str) -> Result<Vec<String>> {
        let output = self.run(&["lookup", name]).await?;
        if !output.status.success() {
            warn!(status = %output.status, name, "name lookup failed, treating as no matches");
            return Ok(Vec::new());
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    async fn scan_for_phone(
        &self,
        forms: &[String],
    ) -> Result<Option<(String, Vec<String>)>> {
        let contacts = self.dump_records().await?;
        Ok(phone::match_in_snapshot(&contacts, forms)
            .map(|(name, phones)| (name.to_string(), phones.clone())))
    }
}
