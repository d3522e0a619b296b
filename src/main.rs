use {
    anyhow::Context,
    markergen::{config::SearchConfig, search, serialization},
    tracing::info,
};

fn main() -> anyhow::Result<()> {
    markergen::init_tracing();

    let mut args = pico_args::Arguments::from_env();
    let num_threads: Option<usize> = args
        .opt_value_from_str("--threads")
        .context("Error parsing number of threads")?;

    if let Some(num_threads) = num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()?;
    }

    let config = SearchConfig::from_cli(&mut args)?;
    let rest = args.finish();
    if !rest.is_empty() {
        anyhow::bail!("unexpected arguments: {rest:?}");
    }

    info!(
        "searching for {} groups per half at distance >= {}, flip depth {}",
        config.required_count, config.threshold, config.flip_depth
    );

    let now = std::time::Instant::now();
    let report = search::run(&config)?;
    info!("search time: {:?}", now.elapsed());

    let markers = report.solution_markers(&config)?;
    serialization::solution::write(&config.output, &markers)
        .with_context(|| format!("writing {}", config.output.display()))?;

    info!("wrote {} markers to {}", markers.len(), config.output.display());
    Ok(())
}
