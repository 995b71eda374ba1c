//! The `generate` command: schedule in, calendar PDF out.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use owo_colors::OwoColorize;
use vercal_core::{
    build_year_grid, expand_all, render_document, DateEventIndex, Font, Geometry, PageSize,
    PdfCanvas, RenderOptions, MM,
};

use crate::config::{self, Config};
use crate::schedule;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Calendar year
    #[arg(long)]
    pub year: i32,

    /// Schedule CSV with one recurrence rule per row
    #[arg(short, long)]
    pub schedule: Option<PathBuf>,

    /// Span January through December instead of April through March
    #[arg(long)]
    pub calendar_year: bool,

    /// Put Sunday in the first lane instead of Monday
    #[arg(long)]
    pub start_sunday: bool,

    /// Leave a leading gap lane at the start of each week instead of packing left
    #[arg(long)]
    pub no_adjust_left: bool,

    /// First hour shown in the daily time range
    #[arg(long)]
    pub hour_start: Option<u32>,

    /// Last hour shown in the daily time range
    #[arg(long)]
    pub hour_end: Option<u32>,

    /// Paper size: a5, a4 or letter
    #[arg(long)]
    pub page_size: Option<String>,

    /// Page margin in millimeters
    #[arg(long)]
    pub margin: Option<f64>,

    /// Font: a standard PDF font name or a path to a .ttf file
    #[arg(long)]
    pub font: Option<String>,

    /// Font size in points
    #[arg(long)]
    pub font_size: Option<f64>,

    /// Output path (defaults to <year>_calendar.pdf)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Outline every day block (debug aid)
    #[arg(long)]
    pub draw_day_box: bool,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let cfg = config::load_config()?;

    let year = args.year;
    let start_in_april = if args.calendar_year {
        false
    } else {
        cfg.start_in_april.unwrap_or(true)
    };
    let starts_with_monday = if args.start_sunday {
        false
    } else {
        cfg.starts_with_monday.unwrap_or(true)
    };
    let adjust_left = if args.no_adjust_left {
        false
    } else {
        cfg.adjust_left.unwrap_or(true)
    };

    let hour_start = args.hour_start.or(cfg.hour_start).unwrap_or(6);
    let hour_end = args.hour_end.or(cfg.hour_end).unwrap_or(24);
    if hour_start >= hour_end || hour_end > 24 {
        bail!(
            "Invalid time range {}-{}: need 0 <= start < end <= 24",
            hour_start,
            hour_end
        );
    }

    // Every schedule row is validated and expanded here, before any drawing
    // starts; a bad row means no document at all.
    let events = match &args.schedule {
        Some(path) => {
            let rules = schedule::read_rules(path)?;
            DateEventIndex::from_occurrences(&expand_all(&rules))
        }
        None => DateEventIndex::new(),
    };

    let page_size = parse_page_size(
        args.page_size
            .as_deref()
            .or(cfg.page_size.as_deref())
            .unwrap_or("a5"),
    )?;
    let margin_mm = args.margin.or(cfg.margin_mm).unwrap_or(5.0);
    let geometry = Geometry::new(page_size, margin_mm * MM);

    // Font problems surface before any page is drawn.
    let font_reference = font_reference(&args.font, &cfg);
    let font = Font::load(&font_reference)?;

    let grid = build_year_grid(year, start_in_april, starts_with_monday, adjust_left)?;

    let options = RenderOptions {
        hour_start,
        hour_end,
        font_size: args.font_size.or(cfg.font_size).unwrap_or(12.0),
        draw_day_box: args.draw_day_box,
    };

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}_calendar.pdf", year)));

    let mut canvas = PdfCanvas::new(geometry.page_width, geometry.page_height, &font);
    render_document(&grid, &events, &geometry, &options, &mut canvas)?;
    canvas.save(&output)?;

    let pages = grid.last().map(|day| day.page).unwrap_or(0);
    println!(
        "{} {} ({} days on {} pages, {} dates with events)",
        "Wrote".green(),
        output.display(),
        grid.len(),
        pages,
        events.date_count()
    );
    Ok(())
}

fn font_reference(flag: &Option<String>, cfg: &Config) -> String {
    flag.clone()
        .or_else(|| cfg.font.clone())
        .unwrap_or_else(|| "Helvetica".to_string())
}

fn parse_page_size(value: &str) -> Result<PageSize> {
    match value.to_ascii_lowercase().as_str() {
        "a5" => Ok(PageSize::A5),
        "a4" => Ok(PageSize::A4),
        "letter" => Ok(PageSize::Letter),
        other => bail!("Unknown page size '{}': expected a5, a4 or letter", other),
    }
}
