//! HTML report renderer.
//!
//! Emits a single self-contained document: a title carrying the render-time
//! date, then one section per snapshot field. Host-derived strings (unit
//! names, usernames, history lines, the raw port listing) are HTML-escaped
//! before embedding.

use std::fmt::Write;

use chrono::Local;

use crate::report::{Collected, ReportRecord};

/// Escapes text for embedding in HTML element content or attribute values.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the snapshot as a self-contained HTML document.
pub fn render_html(record: &ReportRecord) -> String {
    let mut html = String::new();
    let date = Local::now().format("%Y-%m-%d");

    let _ = write!(
        html,
        "<html>\n<body style=\"font-family:Arial,sans-serif;\">\n\
         <h2>Server Audit Report - {date}</h2>\n"
    );

    let _ = writeln!(html, "<h3>Hostname: {}</h3>", escape(&record.hostname));

    let _ = writeln!(html, "<h4>IP Addresses:</h4>\n<ul>");
    for (iface, addr) in &record.interfaces {
        let _ = writeln!(html, "<li><b>{}:</b> {}</li>", escape(iface), addr);
    }
    let _ = writeln!(html, "</ul>");

    let _ = writeln!(
        html,
        "<h4>Disk Usage:</h4>\n<table border='1' cellpadding='5' cellspacing='0'>\
         <tr><th>Device</th><th>Mountpoint</th><th>Type</th><th>Total</th>\
         <th>Used</th><th>Free</th><th>Usage</th></tr>"
    );
    for (device, usage) in &record.disks {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{} GB</td><td>{} GB</td><td>{} GB</td><td>{:.1}%</td></tr>",
            escape(device),
            escape(&usage.mount_point),
            escape(&usage.fstype),
            usage.total_gb(),
            usage.used_gb(),
            usage.free_gb(),
            usage.percent_used
        );
    }
    let _ = writeln!(html, "</table>");

    let _ = writeln!(
        html,
        "<h4>Logged-in Users ({}):</h4>\n<ul>",
        record.user_count()
    );
    for user in &record.logged_in_users {
        let _ = writeln!(html, "<li>{}</li>", escape(user));
    }
    let _ = writeln!(html, "</ul>");

    let _ = writeln!(html, "<h4>Command History:</h4>");
    for (user, lines) in &record.shell_history {
        let _ = writeln!(html, "<b>{}</b><pre>", escape(user));
        for line in lines {
            let _ = writeln!(html, "{}", escape(line));
        }
        let _ = writeln!(html, "</pre>");
    }

    let _ = writeln!(
        html,
        "<h4>Open Ports:</h4>\n<pre>{}</pre>",
        escape(record.open_ports.trim_end())
    );

    let _ = writeln!(html, "<h4>RAM Usage:</h4>");
    match &record.memory {
        Collected::Value(mem) => {
            let _ = writeln!(
                html,
                "<ul>\n<li>Total: {} MB</li>\n<li>Used: {} MB</li>\n\
                 <li>Available: {} MB</li>\n<li>Percent: {:.1}%</li>\n</ul>",
                mem.total_mb(),
                mem.used_mb(),
                mem.available_mb(),
                mem.percent_used
            );
        }
        Collected::Unavailable(reason) => {
            let _ = writeln!(html, "<p>unavailable ({})</p>", escape(reason));
        }
    }

    let _ = writeln!(
        html,
        "<h4>Running Services:</h4>\n<table border='1' cellpadding='5' cellspacing='0'>\
         <tr><th>Service</th><th>Uptime</th></tr>"
    );
    for service in &record.running_services {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape(&service.name),
            escape(service.uptime_display())
        );
    }
    let _ = writeln!(html, "</table>");

    let _ = writeln!(html, "</body>\n</html>");

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("plain"), "plain");
    }
}
