// Sum one byte-count category across all block devices in a snapshot.
// Only io_service_bytes is considered; io_serviced (operation counts) is not reported.

use crate::error::RollupError;
use crate::models::{DiskCategory, DiskIo};

pub fn sum_category(record: &DiskIo, category: DiskCategory) -> Result<u64, RollupError> {
    let entries = record
        .io_service_bytes
        .as_ref()
        .ok_or(RollupError::MalformedRecord)?;

    entries.iter().try_fold(0u64, |total, entry| {
        let bytes = entry.stats.get(category.as_str()).copied().ok_or(
            RollupError::MissingCategory {
                category,
                major: entry.major,
                minor: entry.minor,
            },
        )?;
        Ok(total + bytes)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiskDeviceEntry;
    use std::collections::HashMap;

    fn entry(minor: u64, stats: &[(&str, u64)]) -> DiskDeviceEntry {
        DiskDeviceEntry {
            major: 8,
            minor,
            stats: stats
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn empty_device_list_sums_to_zero() {
        let record = DiskIo {
            io_service_bytes: Some(vec![]),
        };
        assert_eq!(sum_category(&record, DiskCategory::Write), Ok(0));
    }

    #[test]
    fn single_device() {
        let record = DiskIo {
            io_service_bytes: Some(vec![entry(0, &[("Read", 10), ("Write", 20)])]),
        };
        assert_eq!(sum_category(&record, DiskCategory::Read), Ok(10));
        assert_eq!(sum_category(&record, DiskCategory::Write), Ok(20));
    }

    #[test]
    fn sums_across_devices() {
        let all = [("Async", 1), ("Sync", 2), ("Read", 3), ("Write", 4)];
        let record = DiskIo {
            io_service_bytes: Some(vec![entry(0, &all), entry(16, &all), entry(32, &all)]),
        };
        assert_eq!(sum_category(&record, DiskCategory::Async), Ok(3));
        assert_eq!(sum_category(&record, DiskCategory::Sync), Ok(6));
        assert_eq!(sum_category(&record, DiskCategory::Read), Ok(9));
        assert_eq!(sum_category(&record, DiskCategory::Write), Ok(12));
    }

    #[test]
    fn missing_list_is_malformed() {
        let record = DiskIo::default();
        assert_eq!(
            sum_category(&record, DiskCategory::Read),
            Err(RollupError::MalformedRecord)
        );
    }

    #[test]
    fn missing_category_names_the_device() {
        let record = DiskIo {
            io_service_bytes: Some(vec![entry(0, &[("Read", 1)]), entry(16, &[("Write", 1)])]),
        };
        assert_eq!(
            sum_category(&record, DiskCategory::Read),
            Err(RollupError::MissingCategory {
                category: DiskCategory::Read,
                major: 8,
                minor: 16,
            })
        );
    }
}
