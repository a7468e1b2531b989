//! Plain-text report renderer.

use std::fmt::Write;

use crate::report::{Collected, ReportRecord};

/// Renders the snapshot as a labeled plain-text document, sections in
/// collection order.
pub fn render_text(record: &ReportRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Hostname: {}", record.hostname);

    let interfaces: Vec<String> = record
        .interfaces
        .iter()
        .map(|(iface, addr)| format!("{}: {}", iface, addr))
        .collect();
    let _ = writeln!(out, "IP Addresses: {{{}}}", interfaces.join(", "));

    let _ = writeln!(out, "\nDisk Usage:");
    for (device, usage) in &record.disks {
        let _ = writeln!(
            out,
            "  {}: {{Mountpoint: {}, Type: {}, Total: {} GB, Used: {} GB, Free: {} GB, Percent: {:.1}%}}",
            device,
            usage.mount_point,
            usage.fstype,
            usage.total_gb(),
            usage.used_gb(),
            usage.free_gb(),
            usage.percent_used
        );
    }

    let _ = writeln!(
        out,
        "\nLogged-in Users ({}): [{}]",
        record.user_count(),
        record.logged_in_users.join(", ")
    );

    let _ = writeln!(out, "\nCommand History:");
    for (user, lines) in &record.shell_history {
        let _ = writeln!(out, "  {}:", user);
        for line in lines {
            let _ = writeln!(out, "    {}", line);
        }
    }

    let _ = writeln!(out, "\nOpen Ports:");
    let _ = writeln!(out, "{}", record.open_ports.trim_end());

    let _ = writeln!(out, "\nRAM Usage:");
    match &record.memory {
        Collected::Value(mem) => {
            let _ = writeln!(
                out,
                "  {{Total: {} MB, Used: {} MB, Available: {} MB, Percent: {:.1}%}}",
                mem.total_mb(),
                mem.used_mb(),
                mem.available_mb(),
                mem.percent_used
            );
        }
        Collected::Unavailable(reason) => {
            let _ = writeln!(out, "  unavailable ({})", reason);
        }
    }

    let _ = writeln!(out, "\nRunning Services:");
    for service in &record.running_services {
        let _ = writeln!(out, "  {}: {}", service.name, service.uptime_display());
    }

    out
}
