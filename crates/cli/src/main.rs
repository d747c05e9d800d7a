//! CLI tool for laying out presentation documents.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use deck_core::{
    LayoutEngine, MarkupWriter, OutlineFormatter, Presentation, RenderMode, SizingPolicy,
    SlideLayout, TexDelimiters,
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Lay out presentation documents (JSON) into sized, segmented slides.
#[derive(Parser, Debug)]
#[command(name = "deck-layout")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input presentation file(s) (.json)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Lay out at thumbnail size instead of full size
    #[arg(short, long)]
    thumbnail: bool,

    /// Sizing policy file (.json) replacing the default shrink curve
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Include speaker notes in outline output
    #[arg(short, long)]
    notes: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Slide layouts as JSON
    Json,
    /// Slides as HTML sections
    Html,
    /// Plain-text outline
    Outline,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "layout.json",
            OutputFormat::Html => "html",
            OutputFormat::Outline => "txt",
        }
    }
}

/// JSON output for one deck.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeckLayout<'a> {
    id: &'a str,
    title: &'a str,
    mode: RenderMode,
    slides: Vec<SlideLayout>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let mut engine = LayoutEngine::new();
    if let Some(path) = &args.policy {
        engine = engine.with_sizing_policy(load_policy(path)?);
    }

    let mode = if args.thumbnail {
        RenderMode::Thumbnail
    } else {
        RenderMode::Full
    };

    for input_path in &args.input {
        log::info!("Processing: {}", input_path.display());

        match process_file(input_path, &args, &engine, mode) {
            Ok(output) => {
                if args.print {
                    print!("{}", output);
                } else {
                    let output_path = get_output_path(input_path, args.output.as_ref(), args.format)?;
                    write_output(&output_path, &output)?;
                    log::info!("Written to: {}", output_path.display());
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

/// Read and validate a sizing policy file.
fn load_policy(path: &Path) -> Result<SizingPolicy> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open policy {}", path.display()))?;
    let policy: SizingPolicy = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse policy {}", path.display()))?;
    policy.validate()?;
    Ok(policy)
}

/// Lay out a single presentation file.
fn process_file(
    input_path: &Path,
    args: &Args,
    engine: &LayoutEngine,
    mode: RenderMode,
) -> Result<String> {
    let file = File::open(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;
    let presentation: Presentation = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", input_path.display()))?;

    log::debug!("  Found {} slides", presentation.slides.len());

    render(&presentation, engine, mode, args.format, args.notes)
}

/// Render a presentation in the requested format.
fn render(
    presentation: &Presentation,
    engine: &LayoutEngine,
    mode: RenderMode,
    format: OutputFormat,
    notes: bool,
) -> Result<String> {
    let output = match format {
        OutputFormat::Json => {
            let deck = DeckLayout {
                id: &presentation.id,
                title: &presentation.title,
                mode,
                slides: engine.layout_presentation(presentation, mode),
            };
            let mut json = serde_json::to_string_pretty(&deck)?;
            json.push('\n');
            json
        }
        OutputFormat::Html => {
            let writer = MarkupWriter::new(TexDelimiters);
            engine
                .layout_presentation(presentation, mode)
                .iter()
                .map(|layout| format!("{}\n", writer.slide(layout)))
                .collect()
        }
        OutputFormat::Outline => OutlineFormatter::new()
            .with_notes(notes)
            .format_with_newline(presentation),
    };

    Ok(output)
}

/// Determine the output path for a processed file.
fn get_output_path(
    input_path: &Path,
    output_dir: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.{}", stem, format.extension());

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(output_filename)
            } else {
                PathBuf::from(output_filename)
            }
        }
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{LayoutKind, Slide};

    fn deck() -> Presentation {
        let mut p = Presentation::new("p1", "Launch");
        p.add_slide(Slide::new("t", "Launch Day").with_layout(LayoutKind::Title))
            .unwrap();
        p.add_slide(Slide::new("c", "Plan").with_content(["Ship $v1$", "Celebrate"]))
            .unwrap();
        p
    }

    #[test]
    fn test_render_json() {
        let out = render(&deck(), &LayoutEngine::new(), RenderMode::Full, OutputFormat::Json, false)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["id"], "p1");
        assert_eq!(value["mode"], "full");
        assert_eq!(value["slides"].as_array().unwrap().len(), 2);
        assert_eq!(value["slides"][0]["body"]["template"], "title-card");
        assert_eq!(value["slides"][1]["body"]["bullets"]["fontSize"], 26);
    }

    #[test]
    fn test_render_html() {
        let out = render(&deck(), &LayoutEngine::new(), RenderMode::Thumbnail, OutputFormat::Html, false)
            .unwrap();
        assert_eq!(out.matches("<section").count(), 2);
        assert!(out.contains(r#"<span class="math-inline">\(v1\)</span>"#));
    }

    #[test]
    fn test_render_outline() {
        let out = render(&deck(), &LayoutEngine::new(), RenderMode::Full, OutputFormat::Outline, false)
            .unwrap();
        assert_eq!(out, "Launch\n\n1. Launch Day\n\n2. Plan\n   - Ship $v1$\n   - Celebrate\n");
    }

    #[test]
    fn test_sample_deck() {
        let deck: Presentation =
            serde_json::from_str(include_str!("../../../demos/sample-deck.json")).unwrap();
        assert!(deck.validate().is_ok());

        let layouts = LayoutEngine::new().layout_presentation(&deck, RenderMode::Full);
        assert_eq!(layouts.len(), 5);
        assert_eq!(
            layouts.iter().map(|l| l.kind).collect::<Vec<_>>(),
            vec![
                LayoutKind::Title,
                LayoutKind::Content,
                LayoutKind::ImageRight,
                LayoutKind::Split,
                LayoutKind::Quote
            ]
        );
    }

    #[test]
    fn test_get_output_path() {
        let path = get_output_path(Path::new("decks/launch.json"), None, OutputFormat::Json).unwrap();
        assert_eq!(path, PathBuf::from("decks/launch.layout.json"));

        let path = get_output_path(Path::new("launch.json"), None, OutputFormat::Outline).unwrap();
        assert_eq!(path, PathBuf::from("launch.txt"));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["deck-layout", "a.json", "--format", "html", "-t"]).unwrap();
        assert_eq!(args.format, OutputFormat::Html);
        assert!(args.thumbnail);
        assert!(!args.print);
    }
}
