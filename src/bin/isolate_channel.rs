use anyhow::Context;
use rgb_png::Image;

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
    let [input, output, rest @ ..] = args.as_slice() else {
        anyhow::bail!("usage: isolate-channel [-v] <input.png> <output.png> [channel]");
    };
    let option = match rest.first() {
        Some(channel) => channel
            .parse::<usize>()
            .context(format!("{channel} is not a channel number"))?,
        None => 0,
    };
    let image = Image::load(input)?;
    if !image.is_valid() {
        anyhow::bail!("{input} is not a PNG file");
    }
    image
        .decode()
        .context(format!("Failed to decode {input}."))?
        .save(output, option)
        .context(format!("Failed to write {output}."))?;
    Ok(())
}
