//! Version selection
//!
//! Pure decision logic: given versions in registry order (oldest first),
//! a retention rule and a protected set, decide which versions to delete.
//!
//! No sorting happens here. The order the registry returned is trusted as
//! the chronological order.
//!
//! ## Truncated listings
//!
//! The "all versions" listing is capped at the registry page size. When a
//! package has more versions than the cap, the list handed to
//! [`select_not_kept`] is only the oldest slice of the real history and its
//! length is a lower bound on the true total. Selection works on what was
//! observed, which means keep-N can delete fewer versions than asked but
//! never one that belongs to the kept, newest N.

use crate::version::{ProtectedSet, VersionInfo};

/// Drop protected versions and return the rest newest-first
///
/// `oldest_first` must be in registry order. The output is the exact reverse
/// of the surviving input entries.
pub fn select_oldest(oldest_first: &[VersionInfo], protected: &ProtectedSet) -> Vec<VersionInfo> {
    oldest_first
        .iter()
        .rev()
        .filter(|version| {
            let keep = protected.protects(version);
            if keep {
                tracing::debug!(
                    id = %version.id,
                    label = %version.label,
                    "Skipping protected version"
                );
            }
            !keep
        })
        .cloned()
        .collect()
}

/// Select everything except the newest `number_to_keep` versions
///
/// Returns an empty list when there are no more versions than `number_to_keep`.
/// Otherwise takes the oldest `total - number_to_keep` entries and applies
/// the same filtering and ordering as [`select_oldest`].
pub fn select_not_kept(
    all_oldest_first: &[VersionInfo],
    number_to_keep: usize,
    protected: &ProtectedSet,
) -> Vec<VersionInfo> {
    let total = all_oldest_first.len();
    if total <= number_to_keep {
        tracing::info!(total, number_to_keep, "Nothing to delete, all versions are kept");
        return Vec::new();
    }

    let number_to_delete = total - number_to_keep;
    select_oldest(&all_oldest_first[..number_to_delete], protected)
}
