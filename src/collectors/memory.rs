//! Memory usage collector.
//!
//! Reads virtual-memory statistics from /proc/meminfo. "Used" is computed as
//! total minus available, which matches how the kernel reports memory
//! actually unavailable for new allocations (reclaimable caches excluded).

use std::fs;

use crate::report::MemoryUsage;

/// Reads current virtual-memory usage.
pub fn read_memory_usage() -> Result<MemoryUsage, String> {
    let content = fs::read_to_string("/proc/meminfo")
        .map_err(|e| format!("Failed to read /proc/meminfo: {}", e))?;
    parse_meminfo(&content)
}

pub(crate) fn parse_meminfo(content: &str) -> Result<MemoryUsage, String> {
    let mut total_bytes = None;
    let mut available_bytes = None;

    for line in content.lines() {
        if let Some(rest) = line.strip_prefix("MemTotal:") {
            total_bytes = parse_kb_value(rest);
        } else if let Some(rest) = line.strip_prefix("MemAvailable:") {
            available_bytes = parse_kb_value(rest);
        }
        if total_bytes.is_some() && available_bytes.is_some() {
            break;
        }
    }

    let total_bytes = total_bytes.ok_or("MemTotal not found in /proc/meminfo")?;
    let available_bytes = available_bytes.ok_or("MemAvailable not found in /proc/meminfo")?;
    let used_bytes = total_bytes.saturating_sub(available_bytes);

    let percent_used = if total_bytes > 0 {
        (used_bytes as f64 / total_bytes as f64 * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    Ok(MemoryUsage {
        total_bytes,
        used_bytes,
        available_bytes,
        percent_used,
    })
}

/// Parses the value of a meminfo line like `   16384 kB` into bytes.
fn parse_kb_value(rest: &str) -> Option<u64> {
    rest.trim()
        .split_whitespace()
        .next()
        .and_then(|v| v.parse::<u64>().ok())
        .map(|kb| kb * 1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "MemTotal:       16384000 kB\n\
                          MemFree:         1024000 kB\n\
                          MemAvailable:    8192000 kB\n\
                          Buffers:          512000 kB\n";

    #[test]
    fn test_parse_meminfo() {
        let mem = parse_meminfo(SAMPLE).unwrap();
        assert_eq!(mem.total_bytes, 16_384_000 * 1024);
        assert_eq!(mem.available_bytes, 8_192_000 * 1024);
        assert_eq!(mem.used_bytes, mem.total_bytes - mem.available_bytes);
        assert!((mem.percent_used - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_parse_meminfo_missing_fields() {
        assert!(parse_meminfo("MemTotal: 1024 kB\n").is_err());
        assert!(parse_meminfo("").is_err());
    }

    #[test]
    fn test_mb_conversions_floor() {
        let mem = parse_meminfo(SAMPLE).unwrap();
        assert_eq!(mem.total_mb(), mem.total_bytes / (1024 * 1024));
    }

    #[test]
    fn test_read_memory_usage() {
        let mem = read_memory_usage().expect("reading /proc/meminfo should work");
        assert!(mem.total_bytes > 0);
        assert!(mem.percent_used >= 0.0 && mem.percent_used <= 100.0);
    }
}
