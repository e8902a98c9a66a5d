use anyhow::Context;
use rgb_png::Image;
use std::{fs, path::Path};

fn main() -> anyhow::Result<()> {
    let mut args: Vec<_> = std::env::args().skip(1).collect();
    let verbosity = if args.first().map(String::as_str) == Some("-v") {
        args.remove(0);
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Error
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .init();
    let [input, output_dir] = args.as_slice() else {
        anyhow::bail!("usage: channel-report [-v] <input.png> <output-dir>");
    };
    let input_path = Path::new(input);
    let output_dir = Path::new(output_dir);
    fs::create_dir_all(output_dir)
        .context(format!("Failed to create {}", output_dir.display()))?;

    let image = Image::load(input_path)?
        .decode()
        .context(format!("Failed to decode {input}."))?;
    let stem = input_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("image");

    let mut written = Vec::with_capacity(3);
    for option in 0..3 {
        let file_name = format!("{stem}-c{option}.png");
        image
            .save(output_dir.join(&file_name), option)
            .context(format!("Failed to write {file_name}."))?;
        written.push(file_name);
    }

    let now = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)?;
    let header = image.header();
    let results = serde_json::json!({
        "date": now,
        "source": image.info(),
        "width": header.width,
        "height": header.height,
        "written_images": written,
    });
    fs::write(output_dir.join("report.json"), results.to_string())?;
    Ok(())
}
