// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use fieldops_app::{AppCommand, ViewKind};
use fieldops_client::Client;
use fieldops_view::SortKey;
use runtime::{ApiSource, DataSource, DemoSource, Runtime, format_view};
use std::env;
use std::path::PathBuf;
use std::thread;
use tracing_subscriber::EnvFilter;

const DEMO_SEED: u64 = 42;
const DEMO_ROWS: usize = 48;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `fieldops --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    init_tracing(config.log_filter())?;

    let view = match &options.view {
        Some(raw) => config::parse_view(raw)?,
        None => config.default_view()?,
    };
    let limit = options.limit.unwrap_or_else(|| config.max_rows());

    if options.demo {
        let source = DemoSource::new(DEMO_SEED, DEMO_ROWS);
        if options.check_only {
            return Ok(());
        }
        return show(Runtime::new(source, view), &options, &config, limit);
    }

    let base_url = config.api_base_url();
    let client = Client::new(&base_url, config.api_timeout()?).with_context(|| {
        format!(
            "invalid [api] config in {}; fix base_url/timeout values",
            options.config_path.display()
        )
    })?;
    if options.check_only {
        return Ok(());
    }
    show(
        Runtime::new(ApiSource::new(client), view),
        &options,
        &config,
        limit,
    )
}

fn init_tracing(config_filter: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config_filter)
            .with_context(|| format!("invalid log filter {config_filter:?}"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow!("initialize logging: {error}"))
}

fn show<S: DataSource>(
    mut runtime: Runtime<S>,
    options: &CliOptions,
    config: &Config,
    limit: usize,
) -> Result<()> {
    tracing::info!(source = %runtime.source().describe(), "starting");
    for command in criteria_commands(options)? {
        runtime.apply(command)?;
    }
    if let Some(raw) = &options.submit {
        let kind = runtime.state().active_view;
        runtime.submit(kind, &submit_body(raw)?)?;
        if let Some(status) = &runtime.state().status_line {
            eprintln!("{status}");
        }
    }

    let view = runtime.render(Some(limit))?;
    print!("{}", format_view(&view));
    if !options.watch {
        return Ok(());
    }

    let interval = config.refetch_interval()?;
    let kind = runtime.state().active_view;
    loop {
        thread::sleep(interval);
        match runtime.refresh(kind) {
            Ok(_) => {
                let view = runtime.render(Some(limit))?;
                println!();
                print!("{}", format_view(&view));
            }
            Err(error) => tracing::warn!(error = %format!("{error:#}"), "refresh failed"),
        }
    }
}

/// Turns command-line criteria into the same commands the dashboard sends.
fn criteria_commands(options: &CliOptions) -> Result<Vec<AppCommand>> {
    let mut commands = Vec::new();
    for raw in &options.filters {
        let (field, value) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("--filter expects field=value, got {raw:?}"))?;
        commands.push(AppCommand::SetFilter {
            field: field.trim().to_owned(),
            raw: value.to_owned(),
        });
    }
    if let Some(search) = &options.search {
        commands.push(AppCommand::SetSearch(search.clone()));
    }
    if let Some(sort) = &options.sort {
        commands.push(AppCommand::SetSort(SortKey::parse(sort)?));
    }
    Ok(commands)
}

fn submit_body(raw: &str) -> Result<serde_json::Value> {
    let body: serde_json::Value = serde_json::from_str(raw)
        .with_context(|| format!("--submit expects a JSON object, got {raw:?}"))?;
    if !body.is_object() {
        return Err(anyhow!("--submit expects a JSON object, got {raw:?}"));
    }
    Ok(body)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    demo: bool,
    check_only: bool,
    show_help: bool,
    view: Option<String>,
    filters: Vec<String>,
    search: Option<String>,
    sort: Option<String>,
    limit: Option<usize>,
    submit: Option<String>,
    watch: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        demo: false,
        check_only: false,
        show_help: false,
        view: None,
        filters: Vec::new(),
        search: None,
        sort: None,
        limit: None,
        submit: None,
        watch: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str, what: &str| {
            iter.next()
                .map(|value| value.as_ref().to_owned())
                .ok_or_else(|| anyhow!("{flag} requires {what}"))
        };
        match arg.as_ref() {
            "--config" => {
                options.config_path = PathBuf::from(value_for("--config", "a file path")?);
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--view" => {
                options.view = Some(value_for("--view", "a view name")?);
            }
            "--filter" => {
                options.filters.push(value_for("--filter", "field=value")?);
            }
            "--search" => {
                options.search = Some(value_for("--search", "search text")?);
            }
            "--sort" => {
                options.sort = Some(value_for("--sort", "field[:asc|:desc]")?);
            }
            "--limit" => {
                let raw = value_for("--limit", "a row count")?;
                let limit = raw
                    .parse::<usize>()
                    .ok()
                    .filter(|limit| *limit > 0)
                    .ok_or_else(|| anyhow!("--limit must be a positive integer, got {raw:?}"))?;
                options.limit = Some(limit);
            }
            "--submit" => {
                options.submit = Some(value_for("--submit", "a JSON record")?);
            }
            "--watch" => {
                options.watch = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    let views = ViewKind::ALL
        .iter()
        .map(|kind| kind.label())
        .collect::<Vec<_>>()
        .join(", ");
    println!("fieldops: field operations dashboard views");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Use generated demo data instead of the API");
    println!("  --check                  Validate config + API settings and exit");
    println!("  --view <name>            One of: {views}");
    println!("  --filter <field=value>   Filter a field (repeatable; `any`, a null label, =literal)");
    println!("  --search <text>          Match text across the view's searchable fields");
    println!("  --sort <field[:dir]>     Sort by a field, asc (default) or desc");
    println!("  --limit <n>              Show at most n rows (default [ui].max_rows)");
    println!("  --submit <json>          Create a record in the view, then refetch it");
    println!("  --watch                  Refetch every [api].refetch_interval");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, criteria_commands, parse_cli_args, submit_body};
    use anyhow::Result;
    use fieldops_app::AppCommand;
    use fieldops_view::SortKey;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/fieldops-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                print_config_path: false,
                print_example: false,
                demo: false,
                check_only: false,
                show_help: false,
                view: None,
                filters: Vec::new(),
                search: None,
                sort: None,
                limit: None,
                submit: None,
                watch: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        for flag in [
            "--config", "--view", "--filter", "--search", "--sort", "--limit", "--submit",
        ] {
            let error = parse_cli_args(vec![flag], default_options_path())
                .expect_err("missing value should fail");
            assert!(
                error.to_string().starts_with(&format!("{flag} requires")),
                "{flag}: {error}"
            );
        }
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(!options.demo);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_collects_view_criteria() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--demo",
                "--view",
                "parts",
                "--filter",
                "status=backordered",
                "--filter",
                "expectedOn=unscheduled",
                "--search",
                "compressor",
                "--sort",
                "unitCost:desc",
                "--limit",
                "10",
                "--watch",
            ],
            default_options_path(),
        )?;
        assert!(options.demo);
        assert!(options.watch);
        assert_eq!(options.view.as_deref(), Some("parts"));
        assert_eq!(options.filters, vec!["status=backordered", "expectedOn=unscheduled"]);
        assert_eq!(options.search.as_deref(), Some("compressor"));
        assert_eq!(options.sort.as_deref(), Some("unitCost:desc"));
        assert_eq!(options.limit, Some(10));
        Ok(())
    }

    #[test]
    fn parse_cli_args_rejects_non_positive_limit() {
        for raw in ["0", "-3", "many"] {
            let error = parse_cli_args(vec!["--limit", raw], default_options_path())
                .expect_err("bad limit should fail");
            assert!(error.to_string().contains("positive integer"));
        }
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }

    #[test]
    fn criteria_flags_become_app_commands() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--filter",
                "riskLevel = high",
                "--search",
                "Houston",
                "--sort",
                "tenureMonths",
            ],
            default_options_path(),
        )?;
        let commands = criteria_commands(&options)?;
        assert_eq!(
            commands,
            vec![
                AppCommand::SetFilter {
                    field: "riskLevel".to_owned(),
                    raw: " high".to_owned(),
                },
                AppCommand::SetSearch("Houston".to_owned()),
                AppCommand::SetSort(SortKey::asc("tenureMonths")),
            ]
        );
        Ok(())
    }

    #[test]
    fn malformed_filter_is_rejected() -> Result<()> {
        let options = parse_cli_args(vec!["--filter", "riskLevel"], default_options_path())?;
        let error = criteria_commands(&options).expect_err("filter without = should fail");
        assert!(error.to_string().contains("field=value"));
        Ok(())
    }

    #[test]
    fn submit_flag_takes_a_json_object() -> Result<()> {
        let options = parse_cli_args(
            vec!["--view", "contractors", "--submit", r#"{"companyName":"Bayou Service"}"#],
            default_options_path(),
        )?;
        let raw = options.submit.expect("submit body should be kept");
        assert_eq!(submit_body(&raw)?["companyName"], "Bayou Service");

        for bad in ["not json", "[1, 2]"] {
            let error = submit_body(bad).expect_err("non-object body should fail");
            assert!(format!("{error:#}").contains("--submit expects a JSON object"));
        }
        Ok(())
    }
}
