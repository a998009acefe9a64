use std::fs;
use std::path::Path;

use clap::Parser;
use log::LevelFilter;

use qc_results::cli::{
    Cli, ColorChoice, Commands, MergeConfigArgs, PoolArgs, SummaryArgs, ToConfigArgs,
};
use qc_results::config::Configuration;
use qc_results::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter, print_error,
};
use qc_results::pooling::ResultPooler;
use qc_results::result::ResultContainer;
use qc_results::{EXIT_ERROR, EXIT_SUCCESS, QcError};

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

const fn log_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose, cli.quiet))
        .parse_default_env()
        .init();

    let result = match &cli.command {
        Commands::Pool(args) => run_pool(args, &cli),
        Commands::ToConfig(args) => run_to_config(args, &cli),
        Commands::MergeConfig(args) => run_merge_config(args, &cli),
        Commands::Summary(args) => run_summary(args, &cli),
    };

    let exit_code = match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            print_error(e.error_type(), &e.message());
            EXIT_ERROR
        }
    };
    std::process::exit(exit_code);
}

fn run_pool(args: &PoolArgs, cli: &Cli) -> qc_results::Result<()> {
    if !args.dir.is_dir() {
        return Err(QcError::Pooling(format!(
            "Directory '{}' does not exist",
            args.dir.display()
        )));
    }

    let mut pooler = ResultPooler::new();
    if let Some(config_path) = &args.config {
        let configuration = Configuration::try_from_xml_file(config_path)?;
        pooler.collect_configured(&args.dir, &configuration);
        pooler.apply_configuration(&configuration);
        pooler.deduplicate_bundle_names();
    } else {
        let output_name = args
            .output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        pooler.collect_directory(&args.dir, output_name.as_deref())?;
    }

    let container = pooler.finish(&args.output)?;
    print_status(
        cli.quiet,
        &format!(
            "Pooled {} bundle(s) with {} issue(s) into {}",
            container.checker_bundle_count(),
            container.issue_count(),
            args.output.display()
        ),
    );
    Ok(())
}

fn run_to_config(args: &ToConfigArgs, cli: &Cli) -> qc_results::Result<()> {
    let mut container = ResultContainer::new();
    container.try_add_results_from_xml(&args.result)?;

    let mut configuration = Configuration::new();
    container.convert_report_to_configuration(&mut configuration);
    configuration.write_to_file(&args.output)?;

    print_status(
        cli.quiet,
        &format!(
            "Wrote configuration for {} bundle(s) to {}",
            configuration.checker_bundles().len(),
            args.output.display()
        ),
    );
    Ok(())
}

fn run_merge_config(args: &MergeConfigArgs, cli: &Cli) -> qc_results::Result<()> {
    let mut merged = Configuration::try_from_xml_file(&args.base)?;
    for path in &args.others {
        merged.add_configuration(&Configuration::try_from_xml_file(path)?);
    }
    merged.write_to_file(&args.output)?;

    print_status(
        cli.quiet,
        &format!(
            "Merged {} configuration(s) into {}",
            args.others.len() + 1,
            args.output.display()
        ),
    );
    Ok(())
}

fn run_summary(args: &SummaryArgs, cli: &Cli) -> qc_results::Result<()> {
    let container = load_results(&args.results)?;
    let color_mode = color_choice_to_mode(cli.color);
    let output = format_output(args.format, &container, color_mode, cli.verbose)?;
    write_output(args.output.as_deref(), &output, cli.quiet)
}

fn load_results(paths: &[impl AsRef<Path>]) -> qc_results::Result<ResultContainer> {
    let mut container = ResultContainer::new();
    for path in paths {
        container.try_add_results_from_xml(path.as_ref())?;
    }
    Ok(container)
}

fn format_output(
    format: OutputFormat,
    results: &ResultContainer,
    color_mode: ColorMode,
    verbose: u8,
) -> qc_results::Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::with_verbose(color_mode, verbose).format(results),
        OutputFormat::Json => JsonFormatter.format(results),
    }
}

fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> qc_results::Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

fn print_status(quiet: bool, message: &str) {
    if !quiet {
        println!("{message}");
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
