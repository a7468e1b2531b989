//! Disk usage collector.
//!
//! Enumerates mounted partitions from /proc/mounts and queries each with
//! statvfs. Pseudo filesystems are skipped, as is any partition that cannot
//! be stat-ed (e.g. unmounted mid-scan); neither case fails the collection.

use std::collections::BTreeMap;
use std::fs;

use crate::report::DiskUsage;

/// Reads usage figures for every stat-able mounted partition, keyed by
/// device identifier.
pub fn read_disk_usage() -> Result<BTreeMap<String, DiskUsage>, String> {
    let mounts = fs::read_to_string("/proc/mounts")
        .map_err(|e| format!("Failed to read /proc/mounts: {}", e))?;
    Ok(usage_for_mounts(&mounts))
}

fn usage_for_mounts(mounts: &str) -> BTreeMap<String, DiskUsage> {
    let mut disks = BTreeMap::new();

    for line in mounts.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            continue;
        }

        let device = parts[0];
        let mount_point = parts[1];
        let fstype = parts[2];

        if should_skip_filesystem(fstype, mount_point) {
            continue;
        }

        match statvfs_usage(mount_point, fstype) {
            Ok(usage) => {
                disks.insert(device.to_string(), usage);
            }
            Err(_) => continue, // partition vanished or is not stat-able
        }
    }

    disks
}

/// Checks if a filesystem should be skipped based on type and mount point.
fn should_skip_filesystem(fstype: &str, mount_point: &str) -> bool {
    // Pseudo/virtual filesystems carry no audit-relevant capacity
    let skip_types = [
        "proc",
        "sysfs",
        "devpts",
        "devtmpfs",
        "tmpfs",
        "cgroup",
        "cgroup2",
        "pstore",
        "bpf",
        "debugfs",
        "tracefs",
        "fusectl",
        "configfs",
        "securityfs",
        "hugetlbfs",
        "mqueue",
        "autofs",
        "binfmt_misc",
        "overlay",
        "squashfs",
    ];

    if skip_types.contains(&fstype) {
        return true;
    }

    mount_point.starts_with("/proc")
        || mount_point.starts_with("/sys")
        || mount_point.starts_with("/dev")
        || mount_point.starts_with("/run")
}

/// Queries one mount point with libc statvfs.
fn statvfs_usage(mount_point: &str, fstype: &str) -> Result<DiskUsage, String> {
    use std::ffi::CString;
    use std::mem;

    let c_path = CString::new(mount_point).map_err(|e| format!("Invalid path: {}", e))?;

    let stat = unsafe {
        let mut stat: libc::statvfs = mem::zeroed();
        if libc::statvfs(c_path.as_ptr(), &mut stat) != 0 {
            return Err(format!("statvfs failed for {}", mount_point));
        }
        stat
    };

    let block_size = stat.f_frsize as u64;
    let total_bytes = block_size * stat.f_blocks;
    let free_bytes = block_size * stat.f_bfree;
    let available_bytes = block_size * stat.f_bavail;
    let used_bytes = total_bytes.saturating_sub(free_bytes);

    Ok(DiskUsage {
        mount_point: mount_point.to_string(),
        fstype: fstype.to_string(),
        total_bytes,
        used_bytes,
        free_bytes,
        percent_used: usage_percent(used_bytes, available_bytes),
    })
}

/// Utilization as the OS reports it: used space over the space visible to an
/// unprivileged user (used + available, which excludes reserved blocks).
fn usage_percent(used_bytes: u64, available_bytes: u64) -> f64 {
    let visible = used_bytes + available_bytes;
    if visible == 0 {
        return 0.0;
    }
    (used_bytes as f64 / visible as f64 * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_disk_usage() {
        let result = read_disk_usage();
        assert!(result.is_ok(), "Failed to read disk usage: {:?}", result);

        for usage in result.unwrap().values() {
            assert!(usage.percent_used >= 0.0 && usage.percent_used <= 100.0);
            assert!(usage.used_bytes <= usage.total_bytes);
        }
    }

    #[test]
    fn test_should_skip_filesystem() {
        assert!(should_skip_filesystem("proc", "/proc"));
        assert!(should_skip_filesystem("tmpfs", "/dev/shm"));
        assert!(should_skip_filesystem("ext4", "/run/mount"));
        assert!(!should_skip_filesystem("ext4", "/"));
        assert!(!should_skip_filesystem("xfs", "/data"));
    }

    #[test]
    fn test_usage_percent_bounds() {
        assert_eq!(usage_percent(0, 0), 0.0);
        assert_eq!(usage_percent(0, 100), 0.0);
        assert_eq!(usage_percent(100, 0), 100.0);
        let half = usage_percent(50, 50);
        assert!((half - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_broken_partition_is_skipped() {
        let mounts = "/dev/sda1 / ext4 rw 0 0\n/dev/sdb1 /mnt/broken ext4 rw 0 0\n";
        let disks = usage_for_mounts(mounts);
        // The root mount must survive even though /mnt/broken cannot be stat-ed
        assert!(disks.contains_key("/dev/sda1"));
        assert!(!disks.contains_key("/dev/sdb1"));
    }
}
