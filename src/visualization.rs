//! Visualization utilities for city tours.
//!
//! Generates SVG drawings of a cycle and exports for external plotting.

use crate::tour::ScoredTour;
use std::fs::File;
use std::io::Write;
use std::path::Path;
#[cfg(not(feature = "resvg"))]
use std::process::Command;
#[cfg(feature = "resvg")]
use resvg::usvg;
#[cfg(feature = "resvg")]
use resvg::FitTo;
#[cfg(feature = "resvg")]
use resvg::tiny_skia::{Pixmap, Transform};
#[cfg(feature = "resvg")]
use resvg::usvg::TreeParsing;

/// SVG visualization generator
pub struct Visualizer {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Margin
    pub margin: f64,
    /// City marker radius
    pub node_radius: f64,
}

impl Default for Visualizer {
    fn default() -> Self {
        Visualizer {
            width: 1000.0,
            height: 700.0,
            margin: 60.0,
            node_radius: 5.0,
        }
    }
}

impl Visualizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the cycle. Longitude runs along the horizontal axis, latitude
    /// along the vertical one.
    pub fn generate_svg(&self, scored: &ScoredTour, title: &str) -> String {
        let mut svg = String::new();

        let (min_x, max_x, min_y, max_y) = self.get_bounds(scored);

        let scale_x = (self.width - 2.0 * self.margin) / (max_x - min_x).max(1e-9);
        let scale_y = (self.height - 2.0 * self.margin) / (max_y - min_y).max(1e-9);
        let scale = scale_x.min(scale_y);

        svg.push_str(&format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
<style>
    .city {{ fill: #3498db; stroke: #2c3e50; stroke-width: 1.5; }}
    .start {{ fill: #e74c3c; stroke: #c0392b; stroke-width: 1.5; }}
    .edge {{ stroke: #34495e; stroke-width: 1.5; fill: none; }}
    .label {{ font-family: Arial; font-size: 10px; fill: #2c3e50; }}
    .title {{ font-family: Arial; font-size: 14px; fill: #2c3e50; font-weight: bold; }}
</style>
<defs>
<marker id="arrow" markerWidth="10" markerHeight="10" refX="9" refY="3" orient="auto" markerUnits="strokeWidth">
<path d="M0,0 L0,6 L9,3 z" fill="#34495e"/>
</marker>
</defs>
<rect width="100%" height="100%" fill="#ecf0f1"/>
"##,
            self.width, self.height, self.width, self.height
        ));

        svg.push_str(&format!(
            r##"<text x="{}" y="25" class="title">{} | Cities: {} | Cost: {:.2}</text>
"##,
            self.margin, escape_xml(title), scored.len(), scored.cost
        ));

        let transform = |lon: f64, lat: f64| -> (f64, f64) {
            let tx = self.margin + (lon - min_x) * scale;
            let ty = self.height - self.margin - (lat - min_y) * scale;
            (tx, ty)
        };

        let n = scored.tour.len();
        if n > 1 {
            for i in 0..n {
                let from = &scored.tour[i];
                let to = &scored.tour[(i + 1) % n];

                let (x1, y1) = transform(from.longitude(), from.latitude());
                let (x2, y2) = transform(to.longitude(), to.latitude());

                svg.push_str(&format!(
                    r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" class="edge" marker-end="url(#arrow)"/>
"#,
                    x1, y1, x2, y2
                ));
            }
        }

        for (i, city) in scored.tour.iter().enumerate() {
            let (x, y) = transform(city.longitude(), city.latitude());
            let class = if i == 0 { "start" } else { "city" };

            svg.push_str(&format!(
                r##"<circle cx="{:.2}" cy="{:.2}" r="{}" class="{}"/>
"##,
                x, y, self.node_radius, class
            ));

            svg.push_str(&format!(
                r##"<text x="{:.2}" y="{:.2}" class="label" text-anchor="middle">{}</text>
"##,
                x, y - self.node_radius - 3.0, escape_xml(city.name())
            ));
        }

        svg.push_str("</svg>");

        svg
    }

    /// Save SVG to file
    pub fn save_svg<P: AsRef<Path>>(&self, svg: &str, path: P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(svg.as_bytes())?;
        Ok(())
    }

    /// Save SVG as PNG. Uses resvg when the feature is enabled, otherwise
    /// tries `rsvg-convert`, then `magick convert`, then `inkscape`.
    pub fn save_png<P: AsRef<Path>>(&self, svg: &str, path: P) -> std::io::Result<()> {
        let path = path.as_ref();

        #[cfg(feature = "resvg")]
        {
            return self.render_native(svg, path);
        }

        #[cfg(not(feature = "resvg"))]
        {
            let tmp_svg = path.with_extension("svg.tmp");
            self.save_svg(svg, &tmp_svg)?;

            let out = path.to_string_lossy().to_string();
            let tmp = tmp_svg.to_string_lossy().to_string();
            let (out, tmp) = (out.as_str(), tmp.as_str());
            let converters: [(&str, Vec<&str>); 3] = [
                ("rsvg-convert", vec!["-o", out, tmp]),
                ("magick", vec!["convert", tmp, out]),
                ("inkscape", vec![tmp, "--export-type=png", "--export-filename", out]),
            ];

            for (program, args) in &converters {
                if let Ok(status) = Command::new(program).args(args).status() {
                    if status.success() {
                        let _ = std::fs::remove_file(&tmp_svg);
                        return Ok(());
                    }
                }
                log::debug!("{} could not convert {:?}", program, tmp_svg);
            }

            let _ = std::fs::remove_file(&tmp_svg);
            Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "No SVG->PNG converter succeeded (tried rsvg-convert, magick, inkscape)",
            ))
        }
    }

    #[cfg(feature = "resvg")]
    fn render_native(&self, svg: &str, path: &Path) -> std::io::Result<()> {
        let to_io = |msg: String| std::io::Error::new(std::io::ErrorKind::Other, msg);

        let opt = usvg::Options::default();
        let rtree = usvg::Tree::from_str(svg, &opt)
            .map_err(|e| to_io(format!("usvg parse error: {}", e)))?;
        let mut pixmap = Pixmap::new(self.width as u32, self.height as u32)
            .ok_or_else(|| to_io("Failed to create pixmap".to_string()))?;
        resvg::render(&rtree, FitTo::Original, Transform::default(), pixmap.as_mut())
            .ok_or_else(|| to_io("resvg render failed".to_string()))?;
        pixmap
            .save_png(path)
            .map_err(|e| to_io(format!("save_png failed: {}", e)))
    }

    /// Get coordinate bounds as (min lon, max lon, min lat, max lat)
    fn get_bounds(&self, scored: &ScoredTour) -> (f64, f64, f64, f64) {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for city in &scored.tour {
            min_x = min_x.min(city.longitude());
            max_x = max_x.max(city.longitude());
            min_y = min_y.min(city.latitude());
            max_y = max_y.max(city.latitude());
        }

        (min_x, max_x, min_y, max_y)
    }

    /// Export data for external plotting (e.g., matplotlib)
    pub fn export_plot_data(&self, scored: &ScoredTour) -> String {
        let mut data = String::new();

        data.push_str("# City tour data\n");
        data.push_str(&format!("# Cost: {:.2}\n\n", scored.cost));

        data.push_str("# order, region, name, latitude, longitude\n");
        for (i, city) in scored.tour.iter().enumerate() {
            data.push_str(&format!(
                "{},{},{},{},{}\n",
                i, city.region(), city.name(), city.latitude(), city.longitude()
            ));
        }

        data
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
