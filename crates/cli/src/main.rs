// TabForge CLI - headless data-table operations
// parse/create drive the hosted model flows; normalize/export/edit work
// offline on saved tables and raw replies.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use tabforge_cli::exit_codes::{
    normalize_exit_code, parse_error_exit_code, EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE,
};
use tabforge_cli::export::{display_table, schema_from, write_table, Format};
use tabforge_cli::pipeline;
use tabforge_cli::util::parse_set_spec;
use tabforge_client::ModelClient;
use tabforge_config::{get_api_key, set_api_key, Diagnostics, Settings};
use tabforge_core::HeaderSchema;
use tabforge_normalize::{normalize, rows_from_value};
use tabforge_session::ParseSession;

#[derive(Parser)]
#[command(name = "tabforge")]
#[command(about = "Turn messy files into editable, exportable tables")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file to the parsing flow and print or export the table
    #[command(after_help = "\
Examples:
  tabforge parse plan.pdf
  tabforge parse plan.csv --delimiter ';' -t xlsx -o plan.xlsx
  tabforge parse plan.xls --serials -t csv
  tabforge parse plan.csv --fixed-headers SN,Activity,Status")]
    Parse {
        /// File to parse (CSV/TXT/JSON/PDF/XLS)
        file: PathBuf,

        /// Override the file-type hint sent to the flow
        #[arg(long)]
        file_type: Option<String>,

        /// Field delimiter hint
        #[arg(long)]
        delimiter: Option<String>,

        /// Flow server base URL (overrides settings)
        #[arg(long, env = "TABFORGE_ENDPOINT")]
        endpoint: Option<String>,

        /// Output format (default: json to stdout)
        #[arg(long, short = 't')]
        to: Option<Format>,

        /// Output file (required for xlsx)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Fixed header list; rows are blank-filled to exactly these
        #[arg(long, value_delimiter = ',')]
        fixed_headers: Vec<String>,

        /// Apply section-local serial numbers
        #[arg(long)]
        serials: bool,
    },

    /// Create a table from a description or pasted raw data
    Create {
        /// Table description, or raw data to tabulate
        prompt: String,

        #[arg(long, env = "TABFORGE_ENDPOINT")]
        endpoint: Option<String>,

        #[arg(long, short = 't')]
        to: Option<Format>,

        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        #[arg(long, value_delimiter = ',')]
        fixed_headers: Vec<String>,

        #[arg(long)]
        serials: bool,
    },

    /// Recover row JSON from a raw model reply (file or stdin)
    #[command(after_help = "\
Exit codes distinguish the failure taxonomy:
  10  no structured data located
  11  structured data malformed
  13  parsed data is not a table")]
    Normalize {
        /// Raw reply text (omit to read from stdin)
        input: Option<PathBuf>,
    },

    /// Re-export a saved table (JSON array of row objects)
    Export {
        /// Saved table file
        input: PathBuf,

        #[arg(long, short = 't')]
        to: Format,

        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        #[arg(long, value_delimiter = ',')]
        fixed_headers: Vec<String>,

        #[arg(long)]
        serials: bool,
    },

    /// Apply one edit to a saved table and rewrite it in place
    #[command(after_help = "\
Examples:
  tabforge edit table.json --set '2:Activity=Pour concrete'
  tabforge edit table.json --insert-after 0
  tabforge edit table.json --remove 3")]
    Edit {
        /// Saved table file
        input: PathBuf,

        /// Set one cell: ROW:HEADER=VALUE (zone rows take VALUE as label)
        #[arg(long)]
        set: Option<String>,

        /// Splice a blank row after this index
        #[arg(long)]
        insert_after: Option<usize>,

        /// Remove the row at this index
        #[arg(long)]
        remove: Option<usize>,
    },

    /// Update settings.toml
    #[command(after_help = "\
Examples:
  tabforge config --endpoint https://flows.example.com
  tabforge config --fixed-headers SN,Activity,Status --export-title 'Site Plan'")]
    Config {
        /// Flow server base URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Provider name, used for key lookup
        #[arg(long)]
        provider: Option<String>,

        /// Field delimiter hint forwarded with uploads
        #[arg(long)]
        delimiter: Option<String>,

        /// Fixed header list applied to every parse
        #[arg(long, value_delimiter = ',')]
        fixed_headers: Option<Vec<String>>,

        /// Title band written above XLSX exports
        #[arg(long)]
        export_title: Option<String>,
    },

    /// Manage API keys
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Show the resolved configuration
    Doctor,
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store a provider's key in the system keychain (key read from stdin,
    /// so it stays out of shell history)
    Set { provider: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Parse {
            file,
            file_type,
            delimiter,
            endpoint,
            to,
            output,
            fixed_headers,
            serials,
        } => cmd_parse(file, file_type, delimiter, endpoint, to, output, fixed_headers, serials),
        Commands::Create { prompt, endpoint, to, output, fixed_headers, serials } => {
            cmd_create(prompt, endpoint, to, output, fixed_headers, serials)
        }
        Commands::Normalize { input } => cmd_normalize(input),
        Commands::Export { input, to, output, fixed_headers, serials } => {
            cmd_export(input, to, output, fixed_headers, serials)
        }
        Commands::Edit { input, set, insert_after, remove } => {
            cmd_edit(input, set, insert_after, remove)
        }
        Commands::Config { endpoint, provider, delimiter, fixed_headers, export_title } => {
            cmd_config(endpoint, provider, delimiter, fixed_headers, export_title)
        }
        Commands::Key { action } => match action {
            KeyAction::Set { provider } => cmd_key_set(&provider),
        },
        Commands::Doctor => cmd_doctor(),
    };

    ExitCode::from(code)
}

fn make_client(settings: &Settings, endpoint: Option<String>) -> ModelClient {
    let base = endpoint.unwrap_or_else(|| settings.model.endpoint.clone());
    let key = get_api_key(&settings.model.provider).key;
    ModelClient::new(base, key)
}

#[allow(clippy::too_many_arguments)]
fn cmd_parse(
    file: PathBuf,
    file_type: Option<String>,
    delimiter: Option<String>,
    endpoint: Option<String>,
    to: Option<Format>,
    output: Option<PathBuf>,
    fixed_headers: Vec<String>,
    serials: bool,
) -> u8 {
    let settings = Settings::load();
    let client = make_client(&settings, endpoint);
    let delimiter = delimiter.or_else(|| settings.model.delimiter.clone());

    let mut session = ParseSession::with_schema(schema_from(&fixed_headers, settings.fixed_headers()));

    match pipeline::run_parse(&client, &mut session, &file, file_type.as_deref(), delimiter) {
        Ok(outcome) => {
            if !outcome.notes.is_empty() {
                eprintln!("note: {}", outcome.notes);
            }
            emit(&outcome.table, to, output, serials, &settings.table.export_title)
        }
        Err(err) => {
            eprintln!("error ({}): {}", err.stage(), err);
            parse_error_exit_code(&err)
        }
    }
}

fn cmd_create(
    prompt: String,
    endpoint: Option<String>,
    to: Option<Format>,
    output: Option<PathBuf>,
    fixed_headers: Vec<String>,
    serials: bool,
) -> u8 {
    let settings = Settings::load();
    let client = make_client(&settings, endpoint);

    let mut session = ParseSession::with_schema(schema_from(&fixed_headers, settings.fixed_headers()));

    match pipeline::run_create(&client, &mut session, &prompt) {
        Ok(outcome) => emit(&outcome.table, to, output, serials, &settings.table.export_title),
        Err(err) => {
            eprintln!("error ({}): {}", err.stage(), err);
            parse_error_exit_code(&err)
        }
    }
}

fn cmd_normalize(input: Option<PathBuf>) -> u8 {
    let text = match read_input(input) {
        Ok(text) => text,
        Err(msg) => {
            eprintln!("error: {msg}");
            return EXIT_IO;
        }
    };

    let rows = match normalize(&text).and_then(|value| rows_from_value(&value)) {
        Ok(rows) => rows,
        Err(err) => {
            eprintln!("error: {err}");
            return normalize_exit_code(&err);
        }
    };

    match serde_json::to_string_pretty(&rows) {
        Ok(json) => {
            println!("{json}");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            EXIT_ERROR
        }
    }
}

fn cmd_export(
    input: PathBuf,
    to: Format,
    output: Option<PathBuf>,
    fixed_headers: Vec<String>,
    serials: bool,
) -> u8 {
    let settings = Settings::load();
    let schema = schema_from(&fixed_headers, settings.fixed_headers());

    let table = match tabforge_io::json::import(&input, schema) {
        Ok(table) => table,
        Err(msg) => {
            eprintln!("error: {msg}");
            return EXIT_IO;
        }
    };

    emit(&table, Some(to), output, serials, &settings.table.export_title)
}

fn cmd_edit(
    input: PathBuf,
    set: Option<String>,
    insert_after: Option<usize>,
    remove: Option<usize>,
) -> u8 {
    let ops_given = [set.is_some(), insert_after.is_some(), remove.is_some()]
        .iter()
        .filter(|&&given| given)
        .count();
    if ops_given != 1 {
        eprintln!("error: pass exactly one of --set, --insert-after, --remove");
        return EXIT_USAGE;
    }

    // Edits preserve the file's rows as-is; no schema rewrite on load.
    let table = match tabforge_io::json::import(&input, HeaderSchema::Observed) {
        Ok(table) => table,
        Err(msg) => {
            eprintln!("error: {msg}");
            return EXIT_IO;
        }
    };

    let edited = if let Some(spec) = set {
        let (row, header, value) = match parse_set_spec(&spec) {
            Ok(parsed) => parsed,
            Err(msg) => {
                eprintln!("error: {msg}");
                return EXIT_USAGE;
            }
        };
        match table.set_cell(row, &header, serde_json::Value::String(value)) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("error: {e}");
                return EXIT_ERROR;
            }
        }
    } else if let Some(after) = insert_after {
        table.insert_row(after)
    } else if let Some(index) = remove {
        match table.remove_row(index) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("error: {e}");
                return EXIT_ERROR;
            }
        }
    } else {
        unreachable!("ops_given == 1")
    };

    match tabforge_io::json::export(&edited, &input) {
        Ok(()) => EXIT_SUCCESS,
        Err(msg) => {
            eprintln!("error: {msg}");
            EXIT_IO
        }
    }
}

fn cmd_config(
    endpoint: Option<String>,
    provider: Option<String>,
    delimiter: Option<String>,
    fixed_headers: Option<Vec<String>>,
    export_title: Option<String>,
) -> u8 {
    if endpoint.is_none()
        && provider.is_none()
        && delimiter.is_none()
        && fixed_headers.is_none()
        && export_title.is_none()
    {
        eprintln!("error: pass at least one setting to change (see tabforge config --help)");
        return EXIT_USAGE;
    }

    let mut settings = Settings::load();
    if let Some(endpoint) = endpoint {
        settings.model.endpoint = endpoint;
    }
    if let Some(provider) = provider {
        settings.model.provider = provider;
    }
    if let Some(delimiter) = delimiter {
        settings.model.delimiter = Some(delimiter);
    }
    if let Some(fixed_headers) = fixed_headers {
        settings.table.fixed_headers = fixed_headers;
    }
    if let Some(export_title) = export_title {
        settings.table.export_title = export_title;
    }

    match settings.save() {
        Ok(()) => {
            println!("Wrote {}", Settings::config_path().display());
            EXIT_SUCCESS
        }
        Err(msg) => {
            eprintln!("error: {msg}");
            EXIT_IO
        }
    }
}

fn cmd_key_set(provider: &str) -> u8 {
    let key = match read_input(None) {
        Ok(text) => text.trim().to_string(),
        Err(msg) => {
            eprintln!("error: {msg}");
            return EXIT_IO;
        }
    };
    if key.is_empty() {
        eprintln!("error: no key on stdin");
        return EXIT_USAGE;
    }

    match set_api_key(provider, &key) {
        Ok(()) => {
            println!("Stored key for {provider}");
            EXIT_SUCCESS
        }
        Err(msg) => {
            eprintln!("error: {msg}");
            EXIT_ERROR
        }
    }
}

fn cmd_doctor() -> u8 {
    let settings = Settings::load();
    print!("{}", Diagnostics::from_settings(&settings));
    EXIT_SUCCESS
}

fn emit(
    table: &tabforge_core::Table,
    to: Option<Format>,
    output: Option<PathBuf>,
    serials: bool,
    title: &str,
) -> u8 {
    let display = display_table(table, serials);
    let format = to.unwrap_or(Format::Json);

    match write_table(&display, format, output.as_deref(), Some(title)) {
        Ok(()) => EXIT_SUCCESS,
        Err(msg) => {
            eprintln!("error: {msg}");
            EXIT_IO
        }
    }
}

fn read_input(input: Option<PathBuf>) -> Result<String, String> {
    match input {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read {}: {e}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("cannot read stdin: {e}"))?;
            Ok(text)
        }
    }
}
