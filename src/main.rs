//! Native viewer: `gridmorph <records.csv> [options.toml]`.

use std::path::Path;

use gridmorph::{data::load_csv, options::Options, GridmorphError, Viewer};

fn run(
    records_path: &str,
    options_path: Option<&str>,
) -> Result<(), GridmorphError> {
    let records = load_csv(Path::new(records_path))?;
    log::info!("loaded {} records from {records_path}", records.len());

    let options = match options_path {
        Some(path) => Options::load(Path::new(path))?,
        None => Options::default(),
    };

    Viewer::builder()
        .with_records(records)
        .with_options(options)
        .with_title(format!("Gridmorph - {records_path}"))
        .build()
        .run()
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(records_path) = args.first() else {
        log::error!("Usage: gridmorph <records.csv> [options.toml]");
        std::process::exit(1);
    };

    if let Err(e) = run(records_path, args.get(1).map(String::as_str)) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
