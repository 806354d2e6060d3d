use crate::chart::chart::ChartArtifact;
use crate::chart::format::OutputFormat;
use crate::chart::layout::{Axis, Layout};
use crate::chart::series::SeriesMode;

use log::info;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};

use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
pub const DEFAULT_SVG_WIDTH: u32 = 1000;
pub const DEFAULT_FONT_SIZE: f64 = 12.;
pub const DEFAULT_COLORWAY: [RGBColor; 2] = [RGBColor(99, 110, 250), RGBColor(239, 85, 59)];

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("could not serialize chart: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("drawing failed: {0}")]
    Draw(String),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

pub fn render(chart: &ChartArtifact, format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Html => to_html(chart),
        OutputFormat::Json => Ok(chart.to_json_pretty()?),
        OutputFormat::Svg => to_svg(chart),
    }
}

pub fn write_chart<P: AsRef<Path>>(
    chart: &ChartArtifact,
    path: P,
    format: OutputFormat,
) -> Result<(), RenderError> {
    let content = render(chart, format)?;
    let mut file = File::create(&path)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;

    info!("{} chart written to {}", format, path.as_ref().display());
    Ok(())
}

/// Standalone page that draws the figure with plotly.js.
pub fn to_html(chart: &ChartArtifact) -> Result<String, RenderError> {
    // keep the embedded JSON from closing the script tag
    let figure = chart.to_json()?.replace("</", "<\\/");

    let mut html = String::from(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>"#,
    );
    html.push_str(&escape_html(chart.title()));
    html.push_str("</title>\n  <script src=\"");
    html.push_str(PLOTLY_CDN);
    html.push_str(
        r#""></script>
</head>
<body>
  <div id="chart"></div>
  <script>
    const figure = "#,
    );
    html.push_str(&figure);
    html.push_str(
        r#";
    Plotly.newPlot("chart", figure.data, figure.layout, {responsive: true});
  </script>
</body>
</html>
"#,
    );
    Ok(html)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

/// Static rendering of the chart. Uses the merged layout for size, title,
/// font, background colours and the series colorway.
pub fn to_svg(chart: &ChartArtifact) -> Result<String, RenderError> {
    let layout = &chart.layout;
    let width = layout.width.unwrap_or(DEFAULT_SVG_WIDTH);
    let height = layout.height;

    let palette = palette(layout);
    let paper = layout.paper_bgcolor.as_deref().and_then(parse_color).unwrap_or(WHITE);
    let plot_bg = layout.plot_bgcolor.as_deref().and_then(parse_color).unwrap_or(paper);
    let font = layout.font.clone().unwrap_or_default();
    let family = font.family.unwrap_or_else(|| "sans-serif".to_owned());
    let font_size = font.size.unwrap_or(DEFAULT_FONT_SIZE);
    let font_color = font.color.as_deref().and_then(parse_color).unwrap_or(BLACK);
    let x_desc = axis_title(layout.xaxis.as_ref()).unwrap_or("x");
    let y_desc = axis_title(layout.yaxis.as_ref()).unwrap_or("y");

    let (x_min, x_max) = padded_range(chart.data.iter().flat_map(|s| s.x.iter().copied()));
    let (y_min, y_max) = padded_range(chart.data.iter().flat_map(|s| s.y.iter().copied()));

    let caption_style =
        FontDesc::new(FontFamily::Name(family.as_str()), font_size * 1.5, FontStyle::Normal)
            .color(&font_color);
    let label_style = FontDesc::new(FontFamily::Name(family.as_str()), font_size, FontStyle::Normal)
        .color(&font_color);

    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (width, height)).into_drawing_area();
        root.fill(&paper).map_err(draw_err)?;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&layout.title.text, caption_style)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(draw_err)?;

        ctx.plotting_area().fill(&plot_bg).map_err(draw_err)?;
        ctx.configure_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .label_style(label_style.clone())
            .draw()
            .map_err(draw_err)?;

        for (i, series) in chart.data.iter().enumerate() {
            let color = palette[i % palette.len()];
            match series.mode {
                SeriesMode::Markers => ctx
                    .draw_series(
                        series.points().map(|p| Circle::new(p, 2, color.mix(0.6).filled())),
                    )
                    .map_err(draw_err)?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| Circle::new((x, y), 3, color.filled())),
                SeriesMode::Lines => ctx
                    .draw_series(LineSeries::new(series.points(), color.stroke_width(2)))
                    .map_err(draw_err)?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    }),
            };
        }

        if layout.showlegend.unwrap_or(true) {
            ctx.configure_series_labels()
                .background_style(paper.mix(0.8))
                .border_style(font_color)
                .label_font(label_style)
                .draw()
                .map_err(draw_err)?;
        }
        root.present().map_err(draw_err)?;
    }
    Ok(buf)
}

fn palette(layout: &Layout) -> Vec<RGBColor> {
    let colors: Vec<RGBColor> = layout
        .colorway
        .iter()
        .flatten()
        .filter_map(|c| parse_color(c))
        .collect();
    if colors.is_empty() {
        DEFAULT_COLORWAY.to_vec()
    } else {
        colors
    }
}

fn axis_title(axis: Option<&Axis>) -> Option<&str> {
    axis.and_then(|a| a.title.as_ref()).map(|t| t.text.as_str()).filter(|t| !t.is_empty())
}

/// Data range with a 5% buffer on both sides.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !min.is_finite() {
        return (0., 1.);
    }
    let span = max - min;
    if span <= f64::EPSILON {
        return (min - 1., max + 1.);
    }
    (min - span * 0.05, max + span * 0.05)
}

/// Parses `#rgb`, `#rrggbb` and `rgb(r, g, b)` colours.
pub fn parse_color(s: &str) -> Option<RGBColor> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).ok();
        return match hex.len() {
            6 => Some(RGBColor(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some(RGBColor(short(0)?, short(1)?, short(2)?))
            },
            _ => None,
        };
    }
    let inner = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>().ok());
    let color = RGBColor(parts.next()??, parts.next()??, parts.next()??);
    if parts.next().is_some() {
        return None;
    }
    Some(color)
}
