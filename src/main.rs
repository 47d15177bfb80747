use clap::Parser;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use titlecard::compose::{self, TtfFont};
use titlecard::{encode, source};

/// Font looked up next to the executable when --font is not given.
const DEFAULT_FONT_FILE: &str = "SmileySans-Oblique.ttf";

#[derive(Parser)]
#[command(name = "titlecard")]
#[command(about = "Render a captioned poster image on a blurred photo backdrop")]
#[command(long_about = "\
Render a captioned poster image on a blurred photo backdrop

The background is a random stock photo (picsum.photos), or the largest image
file in --image-dir when given. It is cropped to a 1:0.35 aspect ratio,
resized to 1000x350, blurred and darkened, and the caption is drawn centered
on top with word-wrapping, dynamic font sizing, and a drop shadow.

Output format follows the --output extension: .png, .jpg, or .jpeg.")]
#[command(version)]
struct Cli {
    /// Caption text to render (must be non-empty)
    #[arg(long)]
    text: String,

    /// Output file (.png, .jpg, or .jpeg)
    #[arg(long, default_value = "output.png")]
    output: PathBuf,

    /// Directory of candidate background images; the largest file by byte
    /// size wins. Falls back to the remote fetch when nothing is usable.
    #[arg(long)]
    image_dir: Option<PathBuf>,

    /// TTF font file. Defaults to SmileySans-Oblique.ttf next to the binary.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.text.trim().is_empty() {
        return Err("caption text must not be empty".into());
    }

    let font_path = match cli.font {
        Some(path) => path,
        None => default_font_path()?,
    };
    let font = TtfFont::from_file(&font_path)?;

    let background = acquire_background(cli.image_dir.as_deref())?;
    println!(
        "Background: {}x{}",
        background.width(),
        background.height()
    );

    let poster = compose::make_poster(&background, &cli.text, &font)?;
    encode::save_poster(&poster, &cli.output)?;
    println!("Poster saved to {}", cli.output.display());

    Ok(())
}

/// Local directory first when given, remote fetch otherwise. A directory
/// with nothing usable falls back to the remote fetch instead of failing.
fn acquire_background(image_dir: Option<&Path>) -> Result<DynamicImage, source::SourceError> {
    if let Some(dir) = image_dir {
        match source::largest_in_dir(dir) {
            Ok(img) => return Ok(img),
            Err(e) => println!(
                "No usable image in {}: {e}; falling back to remote fetch",
                dir.display()
            ),
        }
    }
    source::fetch_remote()
}

/// Resolve the stock font path: next to the executable, like the binary's
/// other runtime assets.
fn default_font_path() -> Result<PathBuf, std::io::Error> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().unwrap_or(Path::new("."));
    Ok(dir.join(DEFAULT_FONT_FILE))
}
