#![deny(missing_docs)]

//! Headless driver: fetch one listing through the filter-sync controller.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use filtersync::FilterSyncController;
use filtersync::config::{self, FilterSyncConfig};
use filtersync::filter::{FilterField, FilterForm, FilterState, TextParam};
use filtersync::host::ConsolePage;
use filtersync::logging;
use filtersync::portal::HttpTransport;

const USAGE: &str = "Usage: filtersync [--search TEXT | --query TEXT] [--type TYPE] [--year YEAR] \
[--indicator ID] [--page N] [--base-url URL] [--config PATH]";

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    fields: Vec<(FilterField, String)>,
    text_param: Option<TextParam>,
    page: u32,
    base_url: Option<String>,
    config_path: Option<PathBuf>,
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let config = resolve_config(&options)?;
    let transport = HttpTransport::new(&config).map_err(|err| err.to_string())?;
    let page = ConsolePage::new(std::io::stdout());
    let mut controller = FilterSyncController::new(page, Arc::new(transport), &config);

    let mut form = FilterForm::default();
    for (field, value) in &options.fields {
        form.set(*field, value.clone());
    }
    let state = FilterState::from_form(&form, config.text_param);
    controller.load_from_url(&state.request_url(&config.page_path));
    if options.page > 1 {
        controller.go_to_page(options.page);
    } else {
        controller.submit_filters(Instant::now());
    }

    if !controller.wait_for_idle(filtersync::REQUEST_DEADLINE) {
        return Err("Timed out waiting for the portal".to_string());
    }
    let page = controller.into_page();
    if let Some(url) = page.fallback() {
        return Err(format!(
            "Listing could not be refreshed in place; open {}{url} instead",
            config.base_url
        ));
    }
    if let Some(url) = page.url() {
        println!("Source: {}{url}", config.base_url);
    }
    Ok(())
}

fn resolve_config(options: &Options) -> Result<FilterSyncConfig, String> {
    let mut config = match &options.config_path {
        Some(path) => config::load_from(path),
        None => config::load_or_default(),
    }
    .map_err(|err| err.to_string())?;
    if let Some(base_url) = &options.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(text_param) = options.text_param {
        config.text_param = text_param;
    }
    let config = config.normalized();
    config.parsed_base_url().map_err(|err| err.to_string())?;
    Ok(config)
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut options = Options {
        page: 1,
        ..Options::default()
    };
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str| {
            iter.next()
                .ok_or_else(|| format!("{flag} requires a value\n{USAGE}"))
        };
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(None);
            }
            "--search" => {
                options.text_param = Some(TextParam::Search);
                options.fields.push((FilterField::Text, value_for("--search")?));
            }
            "--query" => {
                options.text_param = Some(TextParam::Query);
                options.fields.push((FilterField::Text, value_for("--query")?));
            }
            "--type" => options
                .fields
                .push((FilterField::DocumentType, value_for("--type")?)),
            "--year" => options.fields.push((FilterField::Year, value_for("--year")?)),
            "--indicator" => options
                .fields
                .push((FilterField::Indicator, value_for("--indicator")?)),
            "--page" => {
                let raw = value_for("--page")?;
                options.page = raw
                    .parse::<u32>()
                    .ok()
                    .filter(|page| *page >= 1)
                    .ok_or_else(|| format!("Invalid page number: {raw}"))?;
            }
            "--base-url" => options.base_url = Some(value_for("--base-url")?),
            "--config" => options.config_path = Some(PathBuf::from(value_for("--config")?)),
            other => return Err(format!("Unknown argument: {other}\n{USAGE}")),
        }
    }
    Ok(Some(options))
}
