//! host-audit - version 0.1.0
//!
//! Point-in-time audit snapshot tool with tracing logging.
//! This is the main entry point that initializes logging, resolves
//! configuration, and runs the collect/render/deliver pipeline.

use clap::Parser;
use tracing::error;

use host_audit::aggregator::{collect_report, CollectorDeps};
use host_audit::cli::{Args, ReportFormat};
use host_audit::collectors::ports::SsPortLister;
use host_audit::collectors::services::SystemdServices;
use host_audit::command::SystemCommandRunner;
use host_audit::config::{
    effective_log_level, resolve_config, show_config, validate_effective_config, Config,
};
use host_audit::mailer::{deliver_report, SmtpSender};
use host_audit::render::{render_html, render_text};

/// Initializes tracing logging subsystem with the effective log level
/// (CLI flag over config file over the info default).
fn setup_logging(args: &Args, config: &Config) {
    let log_level = effective_log_level(args.log_level.as_ref(), config);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Runs the collect/render/deliver pipeline. Delivery errors never
/// propagate past deliver_report: once the report exists, the run succeeds.
fn run(args: &Args, config: &Config) -> anyhow::Result<()> {
    let runner = SystemCommandRunner;
    let ports = SsPortLister::new(&runner, config.tools.ss_path.clone());
    let services = SystemdServices::new(
        &runner,
        config.tools.systemctl_path.clone(),
        config.tools.ps_path.clone(),
    );
    let deps = CollectorDeps {
        runner: &runner,
        ports: &ports,
        services: &services,
        inspector: &services,
    };

    let record = collect_report(config, &deps)?;

    let rendered = match args.format {
        ReportFormat::Text => render_text(&record),
        ReportFormat::Html => render_html(&record),
    };
    if !args.quiet {
        println!("{}", rendered);
    }

    if args.send_email {
        // The mail body is always HTML, independent of the printed format.
        // Delivery failures are reported inside deliver_report and never
        // propagate: the report already exists, so the run still succeeds.
        let html = match args.format {
            ReportFormat::Html => rendered,
            ReportFormat::Text => render_html(&record),
        };
        deliver_report(config, &SmtpSender, html);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    // Config must be resolved first: it may carry the log level
    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration invalid: {}", e);
            std::process::exit(1);
        }
    };
    setup_logging(&args, &config);

    if args.show_config {
        if let Err(e) = show_config(&config, args.config_format.clone()) {
            eprintln!("Failed to render config: {}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = validate_effective_config(&config) {
        eprintln!("❌ Configuration invalid: {}", e);
        std::process::exit(1);
    }

    if args.check_config {
        println!("✅ Configuration OK");
        return;
    }

    if let Err(e) = run(&args, &config) {
        error!("Audit run failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
