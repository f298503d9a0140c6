//! Assessment Report CLI
//!
//! The main entry point for ar-core, handling:
//! - Schema table discovery and validation
//! - Session lookup in a JSON record store
//! - Report assembly (JSON/Markdown) and standalone HTML rendering

use ar_config::{ConfigSource, LoadedRegistry, SchemaRegistry, CONFIG_SCHEMA_VERSION};
use ar_core::exit_codes::ExitCode;
use ar_core::logging::{generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};
use ar_core::output::{report_markdown, OutputFormat, ReportEnvelope};
use ar_report::{HtmlRenderer, JsonRecordStore, RenderConfig, ReportService, ReportTheme};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Assessment Report - configuration-driven reports from assessment records
#[derive(Parser)]
#[command(name = "ar-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Schema table file (defaults to discovery, then built-in schemas)
    #[arg(long, global = true, env = "AR_SCHEMAS")]
    schemas: Option<PathBuf>,

    /// Record store: JSON file keyed by session id, or directory of <session_id>.json
    #[arg(long, global = true, env = "AR_RECORDS")]
    records: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the raw session record together with its schema
    Data(SessionArgs),

    /// Assemble the report for a session
    Assemble(SessionArgs),

    /// Render a standalone HTML report for a session
    Render(RenderArgs),

    /// Inspect the schema table
    Schemas(SchemasArgs),

    /// Validate the schema table strictly
    Check,

    /// Print version information
    Version,
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct SessionArgs {
    /// Session id to look up in the record store
    session_id: String,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Session id to look up in the record store
    session_id: String,

    /// Output file, or directory to write report_<session>_<timestamp>.html into
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,

    /// Render configuration file (JSON)
    #[arg(long)]
    render_config: Option<PathBuf>,

    /// Report title
    #[arg(long)]
    title: Option<String>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
    Auto,
}

impl From<ThemeArg> for ReportTheme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Light => ReportTheme::Light,
            ThemeArg::Dark => ReportTheme::Dark,
            ThemeArg::Auto => ReportTheme::Auto,
        }
    }
}

#[derive(Args, Debug)]
struct SchemasArgs {
    #[command(subcommand)]
    command: SchemasCommands,
}

#[derive(Subcommand, Debug)]
enum SchemasCommands {
    /// List configured assessment types
    List,
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env(
        LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet),
        cli.global.log_format,
    );
    init_logging(&log_config);

    let run_id = generate_run_id();
    let span = tracing::info_span!("ar_core", run_id = %run_id);
    let _guard = span.enter();

    let exit_code = match &cli.command {
        Commands::Data(args) => run_data(&cli.global, args),
        Commands::Assemble(args) => run_assemble(&cli.global, args),
        Commands::Render(args) => run_render(&cli.global, args),
        Commands::Schemas(args) => match args.command {
            SchemasCommands::List => run_schemas_list(&cli.global),
        },
        Commands::Check => run_check(&cli.global),
        Commands::Version => print_version(&cli.global),
    };

    debug!(exit_code = %exit_code, "Command finished");
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Shared loading
// ============================================================================

fn load_schemas(global: &GlobalOpts) -> Result<LoadedRegistry, ExitCode> {
    if let Some(path) = &global.schemas {
        if !path.exists() {
            return Err(output_error(
                global,
                ExitCode::ConfigError,
                &format!("schema file not found: {}", path.display()),
            ));
        }
    }

    LoadedRegistry::load(global.schemas.as_deref())
        .map_err(|e| output_error(global, ExitCode::from(&e), &e.to_string()))
}

fn open_records(global: &GlobalOpts) -> Result<JsonRecordStore, ExitCode> {
    let Some(path) = &global.records else {
        return Err(output_error(
            global,
            ExitCode::ArgsError,
            "no record store: pass --records or set AR_RECORDS",
        ));
    };

    JsonRecordStore::open(path).map_err(|e| output_error(global, ExitCode::from(&e), &e.to_string()))
}

/// Load schemas and records, then run `f` against a report service.
fn with_service<F>(global: &GlobalOpts, f: F) -> ExitCode
where
    F: FnOnce(&ReportService<'_, JsonRecordStore>) -> ExitCode,
{
    let loaded = match load_schemas(global) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let store = match open_records(global) {
        Ok(store) => store,
        Err(code) => return code,
    };

    f(&ReportService::new(&store, &loaded.registry))
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_data(global: &GlobalOpts, args: &SessionArgs) -> ExitCode {
    with_service(global, |service| match service.session_payload(&args.session_id) {
        Ok(payload) => print_json(&payload),
        Err(e) => output_error(global, ExitCode::from(&e), &e.to_string()),
    })
}

fn run_assemble(global: &GlobalOpts, args: &SessionArgs) -> ExitCode {
    with_service(global, |service| {
        let prepared = match service.prepare(&args.session_id) {
            Ok(prepared) => prepared,
            Err(e) => return output_error(global, ExitCode::from(&e), &e.to_string()),
        };

        match global.format {
            OutputFormat::Json => print_json(&ReportEnvelope::new(&prepared.meta, &prepared.report)),
            OutputFormat::Md => {
                print!("{}", report_markdown(&prepared.meta, &prepared.report));
                ExitCode::Clean
            }
        }
    })
}

fn run_render(global: &GlobalOpts, args: &RenderArgs) -> ExitCode {
    let config = match render_config(args) {
        Ok(config) => config,
        Err(e) => return output_error(global, ExitCode::from(&e), &e.to_string()),
    };
    let renderer = HtmlRenderer::new(config);

    with_service(global, |service| {
        let (meta, html) = match service.render(&args.session_id, &renderer) {
            Ok(rendered) => rendered,
            Err(e) => return output_error(global, ExitCode::from(&e), &e.to_string()),
        };

        let Some(out) = &args.out else {
            print!("{}", html);
            return ExitCode::Clean;
        };

        let target = if out.is_dir() {
            out.join(meta.file_name("html"))
        } else {
            out.clone()
        };

        if let Err(e) = fs::write(&target, &html) {
            return output_error(
                global,
                ExitCode::IoError,
                &format!("failed to write {}: {}", target.display(), e),
            );
        }
        info!(path = %target.display(), bytes = html.len(), "Report written");

        let written = serde_json::json!({
            "session_id": meta.session_id,
            "assessment_type": meta.assessment_type,
            "path": target.display().to_string(),
            "bytes": html.len(),
        });
        match global.format {
            OutputFormat::Json => print_json(&written),
            OutputFormat::Md => {
                println!("Report written to {}", target.display());
                ExitCode::Clean
            }
        }
    })
}

fn render_config(args: &RenderArgs) -> ar_report::Result<RenderConfig> {
    let mut config = match &args.render_config {
        Some(path) => RenderConfig::from_file(path)?,
        None => RenderConfig::default(),
    };

    if let Some(title) = &args.title {
        config = config.with_title(title.clone());
    }
    if let Some(theme) = args.theme {
        config = config.with_theme(theme.into());
    }
    Ok(config)
}

fn run_schemas_list(global: &GlobalOpts) -> ExitCode {
    let loaded = match load_schemas(global) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let registry = &loaded.registry;

    match global.format {
        OutputFormat::Json => {
            let assessments: Vec<_> = registry
                .iter()
                .map(|(assessment_type, schema)| {
                    serde_json::json!({
                        "assessment_type": assessment_type,
                        "sections": schema.sections.len(),
                        "fields": schema.field_count(),
                    })
                })
                .collect();
            print_json(&serde_json::json!({
                "schema_version": registry.schema_version,
                "source": loaded.source.to_string(),
                "path": display_path(loaded.path.as_deref()),
                "assessments": assessments,
            }))
        }
        OutputFormat::Md => {
            println!("# Assessment types");
            println!();
            println!("Source: {}", describe_source(loaded.source, loaded.path.as_deref()));
            println!();
            for (assessment_type, schema) in registry.iter() {
                println!(
                    "- {} ({} sections, {} fields)",
                    assessment_type,
                    schema.sections.len(),
                    schema.field_count()
                );
            }
            ExitCode::Clean
        }
    }
}

fn run_check(global: &GlobalOpts) -> ExitCode {
    let loaded = match load_schemas(global) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let problems = check_registry(&loaded.registry);
    let all_ok = problems.is_empty();

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "schema_version": CONFIG_SCHEMA_VERSION,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "status": if all_ok { "ok" } else { "error" },
                "source": loaded.source.to_string(),
                "path": display_path(loaded.path.as_deref()),
                "assessments": loaded.registry.len(),
                "problems": problems,
            });
            let code = print_json(&response);
            if code != ExitCode::Clean {
                return code;
            }
        }
        OutputFormat::Md => {
            println!("# ar-core check");
            println!();
            println!("Source: {}", describe_source(loaded.source, loaded.path.as_deref()));
            for problem in &problems {
                println!("✗ {}: {} (code {})", problem.assessment_type, problem.message, problem.code);
            }
            if all_ok {
                println!("✓ {} assessment types valid", loaded.registry.len());
            }
        }
    }

    if all_ok {
        ExitCode::Clean
    } else {
        ExitCode::ConfigError
    }
}

#[derive(Debug, Serialize)]
struct Problem {
    assessment_type: String,
    code: u32,
    message: String,
}

fn check_registry(registry: &SchemaRegistry) -> Vec<Problem> {
    registry
        .problems()
        .into_iter()
        .map(|(assessment_type, e)| Problem {
            assessment_type: assessment_type.to_string(),
            code: e.code(),
            message: e.to_string(),
        })
        .collect()
}

fn print_version(global: &GlobalOpts) -> ExitCode {
    match global.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "schema_version": CONFIG_SCHEMA_VERSION,
            "ar_core_version": env!("CARGO_PKG_VERSION"),
            "rust_version": env!("CARGO_PKG_RUST_VERSION"),
        })),
        OutputFormat::Md => {
            println!("ar-core {}", env!("CARGO_PKG_VERSION"));
            println!("schema version: {}", CONFIG_SCHEMA_VERSION);
            ExitCode::Clean
        }
    }
}

// ============================================================================
// Output helpers
// ============================================================================

fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::Clean
        }
        Err(e) => {
            eprintln!("failed to serialize output: {}", e);
            ExitCode::InternalError
        }
    }
}

/// Report an error on stderr in the requested format.
fn output_error(global: &GlobalOpts, exit_code: ExitCode, message: &str) -> ExitCode {
    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "status": "error",
                "error": {
                    "code": exit_code.code_name(),
                    "exit_code": exit_code.as_i32(),
                    "message": message,
                }
            });
            match serde_json::to_string_pretty(&response) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("Error: {}", message),
            }
        }
        OutputFormat::Md => {
            eprintln!("Error: {}", message);
        }
    }

    exit_code
}

fn display_path(path: Option<&Path>) -> Option<String> {
    path.map(|p| p.display().to_string())
}

fn describe_source(source: ConfigSource, path: Option<&Path>) -> String {
    match path {
        Some(p) => format!("{} ({})", source, p.display()),
        None => source.to_string(),
    }
}
