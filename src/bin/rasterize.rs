use {
    anyhow::Context,
    markergen::raster,
    std::path::PathBuf,
    tracing::info,
};

fn main() -> anyhow::Result<()> {
    markergen::init_tracing();

    let mut args = pico_args::Arguments::from_env();
    let output: PathBuf = args
        .opt_value_from_str("--output")?
        .unwrap_or_else(|| PathBuf::from("pixel_art.png"));
    let scale: usize = args.opt_value_from_str("--scale")?.unwrap_or(1);
    let input: Option<PathBuf> = args.opt_free_from_str()?;

    let art = match &input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => raster::FRAME.to_owned(),
    };

    let pixels = raster::upscale(&raster::parse_art(&art)?, scale)?;
    raster::save_png(&pixels, &output)
        .with_context(|| format!("writing {}", output.display()))?;

    let (h, w) = pixels.dim();
    info!("wrote {w}x{h} image to {}", output.display());
    Ok(())
}
