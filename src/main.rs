use anyhow::{Context, Result};
use clap::Parser;
use hostsniff::presentation::ClassListSink;
use hostsniff::{DeviceDescriptor, Grade, PlatformDetector, StaticHost};
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

/// hostsniff - host platform detection
///
/// Work out the platform tags and capability grade a page would see for a
/// given user agent, bridge globals and device descriptor.
///
/// Examples:
///   hostsniff detect --user-agent "Mozilla/5.0 (Linux; Android 4.2.2)"
///   hostsniff is ios --bridge cordova --device-platform iOS --device-version 7.1
#[derive(Parser, Debug)]
#[command(author, version = env!("HOSTSNIFF_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    host: HostArgs,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print detected platform, version, grade and tags
    Detect(DetectArgs),

    /// Check whether the host matches a platform name (exit code 1 if not)
    Is(IsArgs),
}

#[derive(clap::Args, Debug)]
struct HostArgs {
    /// Device signature to inspect (also via HOSTSNIFF_USER_AGENT)
    #[arg(
        long = "user-agent",
        short = 'u',
        env = "HOSTSNIFF_USER_AGENT",
        value_name = "UA",
        default_value = "",
        global = true
    )]
    user_agent: String,

    /// Global defined by the host bridge (repeatable, e.g. "cordova")
    #[arg(long = "bridge", value_name = "NAME", global = true)]
    bridges: Vec<String>,

    /// Platform name reported by the device descriptor
    #[arg(long = "device-platform", value_name = "NAME", global = true)]
    device_platform: Option<String>,

    /// Version string reported by the device descriptor
    #[arg(long = "device-version", value_name = "VERSION", global = true)]
    device_version: Option<String>,

    /// JSON file holding a device descriptor ({"platform": ..., "version": ...})
    #[arg(long = "device-file", value_name = "PATH", global = true)]
    device_file: Option<PathBuf>,

    /// Do not deliver deviceready to a bridged host
    #[arg(long = "no-device-ready", global = true)]
    no_device_ready: bool,
}

#[derive(clap::Args, Debug)]
struct DetectArgs {
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct IsArgs {
    /// Platform name or tag to check (case-insensitive)
    #[arg(value_name = "NAME")]
    name: String,
}

#[derive(Debug, Serialize)]
struct Report {
    ready: bool,
    webview: bool,
    platform: String,
    version: f64,
    grade: Option<Grade>,
    platforms: Vec<String>,
    classes: Vec<String>,
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let host = build_host(&cli.host)?;
    let sink = Rc::new(ClassListSink::new());
    let detector = PlatformDetector::with_sink(host, sink.clone());

    detector.window_loaded();
    if detector.is_webview() && !cli.host.no_device_ready {
        detector.device_ready();
    }
    debug!("Platform ready: {}", detector.is_ready());

    match cli.command {
        Commands::Detect(args) => {
            let report = Report {
                ready: detector.is_ready(),
                webview: detector.is_webview(),
                platform: detector.platform().to_string(),
                version: detector.version(),
                grade: detector.grade(),
                platforms: detector.platforms().unwrap_or_default(),
                classes: sink.classes(),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Is(args) => {
            let matched = detector.is(&args.name);
            println!("{}", matched);
            Ok(if matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn build_host(args: &HostArgs) -> Result<StaticHost> {
    let mut descriptor = match &args.device_file {
        Some(path) => Some(read_descriptor(path)?),
        None => None,
    };
    if args.device_platform.is_some() || args.device_version.is_some() {
        let d = descriptor.get_or_insert_with(DeviceDescriptor::default);
        if args.device_platform.is_some() {
            d.platform = args.device_platform.clone();
        }
        if args.device_version.is_some() {
            d.version = args.device_version.clone();
        }
    }

    let mut host = StaticHost::new(args.user_agent.as_str());
    for name in &args.bridges {
        host = host.with_global(name.as_str());
    }
    if let Some(descriptor) = descriptor {
        host = host.with_descriptor(descriptor);
    }
    Ok(host)
}

fn read_descriptor(path: &Path) -> Result<DeviceDescriptor> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read device descriptor {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid device descriptor in {}", path.display()))
}

fn print_report(report: &Report) {
    let name = if report.platform.is_empty() {
        "unknown"
    } else {
        report.platform.as_str()
    };
    println!("ready: {}", report.ready);
    println!("webview: {}", report.webview);
    println!("platform: {}", name);
    println!("version: {}", report.version);
    match report.grade {
        Some(grade) => println!("grade: {}", grade),
        None => println!("grade: pending"),
    }
    println!("tags: {}", report.platforms.join(" "));
    println!("classes: {}", report.classes.join(" "));
}
