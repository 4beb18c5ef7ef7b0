//! Contact Directory Module
//!
//! The seam between the broker and the native contact directory. The
//! directory itself is an external, slow, fallible collaborator; this
//! module defines the trait the query layer programs against plus the
//! bridge-command implementation used in production.

pub mod phone;
mod records;
mod script;

use async_trait::async_trait;

use crate::cache::ContactsSnapshot;
use crate::error::Result;

pub use records::parse_records;
pub use script::ScriptDirectory;

// == Contact Directory Trait ==
/// Access to the underlying contact directory.
///
/// Bulk enumeration is expensive; callers are expected to cache its
/// results. Individual unreadable records are skipped by implementations,
/// never surfaced as errors.
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    /// Verifies the directory can be reached at all.
    ///
    /// Returns an access-denied error with an actionable message when the
    /// host permission has not been granted; this is never folded into an
    /// empty result.
    async fn check_access(&self) -> Result<()>;

    /// Fast bulk enumeration of every contact.
    ///
    /// May return an empty snapshot on failure-to-read rather than erroring.
    async fn list_all(&self) -> Result<ContactsSnapshot>;

    /// Slower, more resilient bulk enumeration, used when the primary path
    /// yields nothing.
    async fn list_all_fallback(&self) -> Result<ContactsSnapshot>;

    /// Direct single-name lookup, bypassing bulk enumeration.
    async fn lookup_name(&self, name: &str) -> Result<Vec<String>>;

    /// Scans every contact's every number against the given normalized
    /// forms. Returns the first matching (name, numbers) pair.
    async fn scan_for_phone(&self, forms: &[String])
        -> Result<Option<(String, Vec<String>)>>;
}
