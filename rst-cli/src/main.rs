// Command-line interface for rst
//
// This binary converts HTML documentation fragments (as extracted from doc comments) into the
// reStructuredText document model, and lets you inspect every stage of that conversion.
//
// The conversion itself lives in the rst-babel crate; this binary only reads files, loads
// configuration, and prints.
//
// Usage:
//  rst <input> [--to json|treeviz] [--output <file>]          - Convert a fragment (default)
//  rst convert <input> [--to json|treeviz] [--output <file>]  - Same as above (explicit)
//  rst inspect <input> [<transform>]                          - Show an intermediate stage
//  rst --list-transforms                                      - List available transforms
//
// Extra Parameters:
//
// Configuration keys can be overridden per invocation with --extra-<name> <value>.
// The CLI layer strips these before clap sees the arguments.
// Example:
//  rst doc.html --extra-symbolic-role java:ref --extra-strict

mod transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use rst_babel::formats::{to_treeviz_str_with_options, TreevizOptions};
use rst_babel::{convert_html, ConvertOptions};
use rst_config::{Loader, RstConfig};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use thiserror::Error;

/// Everything that can stop the CLI.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value '{value}' for --extra-{flag}")]
    InvalidExtra { flag: String, value: String },
    #[error("unknown transform '{0}'")]
    UnknownTransform(String),
    #[error("{0} diagnostic(s) recorded and diagnostics.strict is set")]
    Strict(usize),
}

const OUTPUT_FORMATS: &[&str] = &["json", "treeviz"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("rst")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert HTML documentation fragments to a reStructuredText document model")
        .long_about(
            "rst converts the HTML found in documentation comments into a reStructuredText\n\
            document tree and prints it as JSON or as a tree view.\n\n\
            Commands:\n  \
            - convert: Convert a fragment (default command)\n  \
            - inspect: View intermediate stages (markup tree, events, sections)\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override configuration keys:\n  \
            symbolic-role, strict, bug-compatible-spans, max-label-width.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            rst doc.html                             # Document as JSON\n  \
            rst doc.html --to treeviz                # Document as a tree\n  \
            rst inspect doc.html events              # Walker event stream\n  \
            rst doc.html --extra-strict -o out.json  # Fail on any diagnostic",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an rst.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log conversion details to stderr")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an HTML fragment (default command)")
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Output format")
                        .default_value("json")
                        .value_parser(clap::builder::PossibleValuesParser::new(OUTPUT_FORMATS))
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect intermediate representations of a conversion")
                .long_about(
                    "View the conversion at different stages.\n\n\
                    Transforms:\n  \
                    - markup-treeviz:   Parsed HTML as a tree\n  \
                    - events:           Walker event stream\n  \
                    - doc-treeviz:      Converted document as a tree (default)\n  \
                    - doc-json:         Converted document as JSON\n  \
                    - sections-treeviz: Document grouped into sections",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the HTML fragment")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'doc-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare path as first argument means "convert"
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && cleaned_args[1] != "inspect"
                && cleaned_args[1] != "convert"
                && cleaned_args[1] != "help"
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let level = match matches.get_count("verbose") {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    if let Err(err) = run(&matches, extra_params) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches, mut extra_params: HashMap<String, String>) -> Result<(), Error> {
    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return Ok(());
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()))?;
    apply_config_overrides(&mut config, &mut extra_params)?;
    for key in extra_params.keys() {
        log::warn!("ignoring unknown parameter --extra-{key}");
    }

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = required(sub_matches, "path");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("doc-treeviz");
            handle_inspect_command(path, transform, &config)
        }
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let to = sub_matches
                .get_one::<String>("to")
                .map(|s| s.as_str())
                .unwrap_or("json");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, to, output, &config)
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Clap enforces `required(true)` arguments before we get here.
fn required<'a>(matches: &'a clap::ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .unwrap_or_default()
}

fn read_input(path: &str) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_string(),
        source,
    })
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, transform: &str, config: &RstConfig) -> Result<(), Error> {
    let source = read_input(path)?;
    let options = ConvertOptions::from(&config.convert);
    let treeviz = TreevizOptions::from(&config.inspect.treeviz);

    let output = transforms::execute_transform(&source, transform, &options, &treeviz)?;
    std::io::stdout().write_all(output.as_bytes())?;
    Ok(())
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    to: &str,
    output: Option<&str>,
    config: &RstConfig,
) -> Result<(), Error> {
    let source = read_input(input)?;
    let options = ConvertOptions::from(&config.convert);

    let conversion = convert_html(&source, &options);
    log::debug!(
        "converted '{input}': {} blocks, {} diagnostics",
        conversion.document.blocks.len(),
        conversion.diagnostics.len()
    );

    let rendered = match to {
        "treeviz" => to_treeviz_str_with_options(
            &conversion.document,
            &TreevizOptions::from(&config.inspect.treeviz),
        ),
        _ => {
            let mut json = serde_json::to_string_pretty(&conversion.document)?;
            json.push('\n');
            json
        }
    };

    match output {
        Some(path) => fs::write(path, rendered).map_err(|source| Error::Write {
            path: path.to_string(),
            source,
        })?,
        None => std::io::stdout().write_all(rendered.as_bytes())?,
    }

    if config.diagnostics.strict && !conversion.is_clean() {
        return Err(Error::Strict(conversion.diagnostics.len()));
    }
    Ok(())
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("Stages:");
    println!("  markup    - Parsed HTML fragment");
    println!("  events    - Walker event stream");
    println!("  doc       - Converted document");
    println!("  sections  - Converted document grouped by titles\n");

    println!("Available transform combinations:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }

    println!("\nConversion formats:");
    for format_name in OUTPUT_FORMATS {
        println!("  {format_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> Result<RstConfig, Error> {
    let loader = Loader::new().with_optional_file("rst.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    Ok(loader.build()?)
}

fn apply_config_overrides(
    config: &mut RstConfig,
    extra_params: &mut HashMap<String, String>,
) -> Result<(), Error> {
    if let Some(role) = take_override(extra_params, &["symbolic-role", "role"]) {
        config.convert.symbolic_role = role;
    }
    if let Some(raw) = extra_params.remove("bug-compatible-spans") {
        config.convert.bug_compatible_spans = parse_bool_arg("bug-compatible-spans", &raw)?;
    }
    if let Some(raw) = extra_params.remove("strict") {
        config.diagnostics.strict = parse_bool_arg("strict", &raw)?;
    }
    if let Some(raw) = extra_params.remove("max-label-width") {
        config.inspect.treeviz.max_label_width =
            raw.parse().map_err(|_| Error::InvalidExtra {
                flag: "max-label-width".to_string(),
                value: raw.clone(),
            })?;
    }
    Ok(())
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> Result<bool, Error> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(Error::InvalidExtra {
            flag: flag.to_string(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_extra_args_empty() {
        let input = args(&["rst", "inspect", "doc.html"]);
        let (cleaned, extra) = parse_extra_args(&input);

        assert_eq!(cleaned, input);
        assert!(extra.is_empty());
    }

    #[test]
    fn test_parse_extra_args_mixed_with_regular_args() {
        let input = args(&[
            "rst",
            "convert",
            "doc.html",
            "--extra-symbolic-role",
            "java:ref",
            "--to",
            "treeviz",
        ]);
        let (cleaned, extra) = parse_extra_args(&input);

        assert_eq!(cleaned, args(&["rst", "convert", "doc.html", "--to", "treeviz"]));
        assert_eq!(extra.len(), 1);
        assert_eq!(extra.get("symbolic-role"), Some(&"java:ref".to_string()));
    }

    #[test]
    fn test_parse_extra_args_boolean_flag() {
        let input = args(&["rst", "doc.html", "--extra-strict", "--extras-max-label-width", "12"]);
        let (cleaned, extra) = parse_extra_args(&input);

        assert_eq!(cleaned, args(&["rst", "doc.html"]));
        assert_eq!(extra.get("strict"), Some(&"true".to_string()));
        assert_eq!(extra.get("max-label-width"), Some(&"12".to_string()));
    }

    #[test]
    fn apply_config_overrides_updates_known_flags() {
        let mut config = rst_config::load_defaults().expect("defaults");
        let mut extras = HashMap::new();
        extras.insert("role".to_string(), "py:obj".to_string());
        extras.insert("strict".to_string(), "yes".to_string());
        extras.insert("bug-compatible-spans".to_string(), "1".to_string());
        extras.insert("max-label-width".to_string(), "0".to_string());
        extras.insert("unknown".to_string(), "x".to_string());

        apply_config_overrides(&mut config, &mut extras).expect("overrides");

        assert_eq!(config.convert.symbolic_role, "py:obj");
        assert!(config.diagnostics.strict);
        assert!(config.convert.bug_compatible_spans);
        assert_eq!(config.inspect.treeviz.max_label_width, 0);
        assert_eq!(extras.len(), 1);
    }

    #[test]
    fn apply_config_overrides_rejects_bad_values() {
        let mut config = rst_config::load_defaults().expect("defaults");
        let mut extras = HashMap::new();
        extras.insert("strict".to_string(), "maybe".to_string());

        let err = apply_config_overrides(&mut config, &mut extras).unwrap_err();
        assert!(matches!(err, Error::InvalidExtra { .. }));
    }

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }
}
