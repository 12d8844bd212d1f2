use std::path::Path;

use crate::{
    color::{Color, RemovalSet},
    debug,
    error::Result,
    filter::{ColorKey, Filter, Stats},
    io,
};

/// Remove every pixel of `input` within `tolerance` of any of `colors` and
/// write the result to `output` as PNG. Runs on the calling thread.
pub fn apply(input: &Path, output: &Path, colors: Vec<Color>, tolerance: f64) -> Result<Stats> {
    let filter = ColorKey::new(RemovalSet::new(colors, tolerance)?);
    apply_with(input, output, &filter)
}

/// Like [`apply`], with a prepared filter; a parallel filter uses the
/// current rayon pool. `output` is written only after decoding and the
/// whole pass have succeeded.
pub fn apply_with(input: &Path, output: &Path, filter: &ColorKey) -> Result<Stats> {
    let mut buffer = io::load(input)?;
    debug!(
        "io";
        "decoded {} ({}x{})",
        input.display(),
        buffer.width(),
        buffer.height()
    );

    let removal = filter.removal();
    let colors: Vec<String> = removal.colors().iter().map(Color::to_string).collect();
    debug!(
        "filter";
        "keying {} at tolerance {}",
        colors.join(", "),
        removal.tolerance()
    );
    let stats = filter.transform_buffer(&mut buffer);

    io::save_png(&buffer, output)?;
    Ok(stats)
}
