// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use runtime::CountryRuntime;
use std::env;
use std::path::PathBuf;
use userinfo_app::{AppCommand, AppState};
use userinfo_countries::Client;

const DEMO_SEED: u64 = 2026;
const DEMO_RECORDS: usize = 5;

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
            "load config {}; run `userinfo --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let client = country_client(&config, &options)?;
    let log_file = config.log_file()?;
    if options.check_only {
        return Ok(());
    }

    let _log_guard = logging::init(&config).with_context(|| {
        format!(
            "set up logging at {} -- set [log].file to a writable path",
            log_file.display()
        )
    })?;
    tracing::info!(
        config = %options.config_path.display(),
        countries = client.as_ref().map_or("offline", Client::endpoint),
        demo = options.demo,
        "starting userinfo"
    );

    let mut state = AppState::default();
    if client.is_none() {
        state.dispatch(AppCommand::CountriesLoaded(
            userinfo_testkit::sample_countries(),
        ));
    }
    if options.demo {
        let added = userinfo_testkit::seed_demo_records(&mut state, DEMO_SEED, DEMO_RECORDS);
        tracing::info!(records = added, "seeded demo records");
    }

    let mut runtime = CountryRuntime::new(client);
    let result = userinfo_tui::run_app(&mut state, &mut runtime);
    tracing::info!(records = state.records.len(), "userinfo exiting");
    result
}

fn country_client(config: &Config, options: &CliOptions) -> Result<Option<Client>> {
    if options.offline || !config.countries_enabled() {
        return Ok(None);
    }
    let client = Client::new(config.countries_endpoint(), config.countries_timeout()?)
        .with_context(|| {
            format!(
                "invalid [countries] config in {}; fix endpoint/timeout values or pass --offline",
                options.config_path.display()
            )
        })?;
    Ok(Some(client))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    demo: bool,
    offline: bool,
    check_only: bool,
    show_help: bool,
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
        offline: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
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
            "--offline" => {
                options.offline = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("userinfo: collect and edit user information records");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Start with seeded demo records");
    println!("  --offline                Skip the country lookup and use the built-in list");
    println!("  --check                  Validate config and country client setup, then exit");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, country_client, parse_cli_args};
    use crate::config::Config;
    use anyhow::Result;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/userinfo-config.toml")
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
                offline: false,
                check_only: false,
                show_help: false,
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
    fn parse_cli_args_errors_for_missing_config_value() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));
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
    fn parse_cli_args_sets_mode_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--demo", "--offline", "--check", "-h"],
            default_options_path(),
        )?;
        assert!(options.demo);
        assert!(options.offline);
        assert!(options.check_only);
        assert!(options.show_help);
        assert!(!options.print_config_path);
        assert!(!options.print_example);
        Ok(())
    }

    #[test]
    fn offline_flag_or_disabled_config_skips_client() -> Result<()> {
        let offline = parse_cli_args(vec!["--offline"], default_options_path())?;
        assert!(country_client(&Config::default(), &offline)?.is_none());

        let mut config = Config::default();
        config.countries.enabled = Some(false);
        let online = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert!(country_client(&config, &online)?.is_none());
        Ok(())
    }

    #[test]
    fn bad_endpoint_error_points_at_config() -> Result<()> {
        let mut config = Config::default();
        config.countries.endpoint = Some("restcountries.com/all".to_owned());
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;

        let error = country_client(&config, &options).expect_err("relative endpoint should fail");
        let message = error.to_string();
        assert!(message.contains("[countries]"));
        assert!(message.contains("--offline"));
        Ok(())
    }

    #[test]
    fn default_config_builds_client() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        let client = country_client(&Config::default(), &options)?.expect("client enabled");
        assert_eq!(
            client.endpoint(),
            "https://restcountries.com/v3.1/all?fields=name"
        );
        Ok(())
    }
}
