use {
    anyhow::Context,
    markergen::serialization::lut::{self, Format},
    std::path::PathBuf,
    tracing::info,
};

fn main() -> anyhow::Result<()> {
    markergen::init_tracing();

    let mut args = pico_args::Arguments::from_env();
    let output: PathBuf = args
        .opt_value_from_str("--output")?
        .unwrap_or_else(|| PathBuf::from("triads.txt"));
    let format: Format = args.opt_value_from_str("--format")?.unwrap_or_default();

    lut::write(&output, format).with_context(|| format!("writing {}", output.display()))?;

    info!("wrote triad table ({format:?}) to {}", output.display());
    Ok(())
}
