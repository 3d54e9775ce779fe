//! slidebox CLI
//!
//! Lays out one slide from a JSON array of section nodes and prints the
//! resulting boxes, for debugging layouts without a renderer.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use slidebox_common::units::font_size_px_to_pt;
use slidebox_common::warning::{clear_warnings, set_quiet};
use slidebox_layout::{
    CachedTextMeasurer, ContentNode, LayoutConfig, RatioTextMeasurer, SlideLayout, check_slide,
    layout_slide,
};

/// Inspect box layouts of slide content
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "slidebox")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the layout tree
    slidebox sections.json

    # Use a 1280x720 canvas
    slidebox --config small-canvas.json sections.json

    # Machine-readable output
    slidebox --json sections.json

    # Fail if any layout invariant is broken
    slidebox --check sections.json
"#)]
struct Cli {
    /// JSON file holding an array of section nodes
    #[arg(value_name = "SECTIONS.json")]
    input: PathBuf,

    /// Layout configuration JSON (default: 1920x1080 canvas, 80px margins)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the layout as JSON instead of a tree
    #[arg(long)]
    json: bool,

    /// Also print box geometry in EMU
    #[arg(long)]
    emu: bool,

    /// Check layout invariants and exit non-zero on violation
    #[arg(long)]
    check: bool,

    /// Do not print engine warnings to the terminal
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    set_quiet(cli.quiet || cli.json);
    clear_warnings();

    let config = load_config(cli.config.as_deref())?;
    let sections = load_sections(&cli.input)?;
    let measurer = CachedTextMeasurer::new(RatioTextMeasurer::from_config(&config));

    let slide = layout_slide(&sections, &config, &measurer)
        .with_context(|| format!("failed to lay out {}", cli.input.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&slide)?);
    } else {
        print_slide(&sections, &slide, &config, cli.emu);
    }

    if cli.check {
        let violations = check_slide(&sections, &config, &measurer)?;
        if !violations.is_empty() {
            for violation in &violations {
                eprintln!("{} {violation}", "violation:".red().bold());
            }
            return Ok(ExitCode::FAILURE);
        }
        if !cli.json {
            println!("{}", "all layout checks passed".green());
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Load the configuration file, or the defaults when none is given.
fn load_config(path: Option<&Path>) -> Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    LayoutConfig::from_json_str(&json).with_context(|| format!("invalid config {}", path.display()))
}

fn load_sections(path: &Path) -> Result<Vec<ContentNode>> {
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("{} is not a JSON array of section nodes", path.display()))
}

fn print_slide(sections: &[ContentNode], slide: &SlideLayout, config: &LayoutConfig, emu: bool) {
    let canvas = &config.canvas;
    println!(
        "=== Slide layout (canvas: {}x{}, content width {}) ===\n",
        canvas.width,
        canvas.height,
        canvas.content_width()
    );

    for section in sections {
        print_node(section, slide, config, 0, emu);
    }

    println!(
        "\ncontent bottom: {:.1}px of {:.1}px usable",
        slide.content_bottom(),
        canvas.usable_height()
    );

    if slide.warnings.is_empty() {
        println!("{}", "no warnings".green());
    } else {
        println!("\n=== Warnings ({}) ===", slide.warnings.len());
        for warning in &slide.warnings {
            println!("{} {warning}", "warning:".yellow().bold());
        }
    }
}

/// Recursively print a node's box. Nodes without a box (hidden) are skipped
/// together with their subtree.
fn print_node(node: &ContentNode, slide: &SlideLayout, config: &LayoutConfig, depth: usize, emu: bool) {
    let Some(layout_box) = slide.box_for(&node.id) else {
        return;
    };
    let indent = "  ".repeat(depth);

    let name = format!("[{}] <{}>", node.id, node.tag);
    let kind = if node.is_leaf() && node.text_content().is_empty() {
        "spacer".to_string()
    } else if node.is_leaf() {
        let font_px = node
            .style
            .font_size_px
            .unwrap_or(config.default_font_size_px);
        let preview: String = node.text_content().chars().take(30).collect();
        let suffix = if node.text_content().chars().count() > 30 { "..." } else { "" };
        format!(
            "text {}pt \"{}{}\"",
            font_size_px_to_pt(font_px),
            preview.replace('\n', "\\n"),
            suffix
        )
    } else {
        node.style.display.to_string()
    };

    if slide.is_overflowing(&node.id) {
        println!("{indent}{} {kind} {}", name.red(), "OVERFLOW".red().bold());
    } else {
        println!("{indent}{} {kind}", name.cyan());
    }
    println!(
        "{indent}  box: x={:.1} y={:.1} w={:.1} h={:.1}",
        layout_box.x, layout_box.y, layout_box.width, layout_box.height
    );
    if emu {
        let rect = layout_box.to_emu();
        println!(
            "{indent}  emu: x={} y={} w={} h={}",
            rect.x, rect.y, rect.width, rect.height
        );
    }

    for child in &node.children {
        print_node(child, slide, config, depth + 1, emu);
    }
}
