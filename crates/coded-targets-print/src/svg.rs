//! SVG sheet rendering.

use std::fmt::Write as _;

use coded_targets_ring::RingCatalog;

use crate::{page_slots, PrintError, SectorArc, SheetLayout, TargetGeometry};

#[cfg(feature = "tracing")]
use tracing::instrument;

const LABEL_FONT: &str = "Source Sans Pro, sans-serif";

/// Render one page of targets as a standalone SVG document.
///
/// Coordinates are in layout units (the SVG `viewBox` matches the page size).
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(catalog, layout), fields(codes = catalog.len()))
)]
pub fn render_sheet_svg(
    catalog: &RingCatalog,
    layout: &SheetLayout,
    page: usize,
) -> Result<String, PrintError> {
    layout.validate()?;
    let slots = page_slots(catalog, layout, page)?;

    let mut svg = String::new();
    let unit = layout.unit.as_svg();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}{unit}" height="{h}{unit}" version="1.1" viewBox="0 0 {w} {h}">"#,
        w = layout.width,
        h = layout.height,
    );
    let [bx, by, bw, bh] = layout.background_rect();
    let _ = writeln!(
        svg,
        r##"<rect x="{bx}" y="{by}" width="{bw}" height="{bh}" fill="#000"/>"##
    );

    let r = layout.dot_radius();
    for (slot, codeword) in slots {
        let center = layout.target_center(slot);
        let geometry = TargetGeometry::new(codeword.pattern, catalog.ring_length(), center, r);
        let _ = writeln!(svg, r##"<g id="target-{}" fill="#fff">"##, codeword.label());
        write_target(&mut svg, &geometry);
        if layout.labels {
            let _ = writeln!(
                svg,
                r#"<text x="{:.4}" y="{:.4}" font-size="{:.4}" font-family="{LABEL_FONT}">{}</text>"#,
                center.x - 3.0 * r,
                center.y + 3.0 * r,
                r * 0.5,
                codeword.label(),
            );
        }
        svg.push_str("</g>\n");
    }
    svg.push_str("</svg>\n");
    Ok(svg)
}

fn write_target(svg: &mut String, g: &TargetGeometry) {
    let _ = writeln!(
        svg,
        r#"<circle cx="{:.4}" cy="{:.4}" r="{:.4}"/>"#,
        g.center.x, g.center.y, g.dot_radius
    );
    for arc in &g.arcs {
        if arc.sector_count >= g.ring_length {
            write_full_ring(svg, g);
        } else {
            write_arc(svg, g, arc);
        }
    }
}

/// Closed annular sector: outer arc clockwise, inner arc back.
fn write_arc(svg: &mut String, g: &TargetGeometry, arc: &SectorArc) {
    let large = u8::from(arc.is_large());
    let o0 = g.point_at(arc.start_angle, g.ring_outer);
    let o1 = g.point_at(arc.end_angle, g.ring_outer);
    let i1 = g.point_at(arc.end_angle, g.ring_inner);
    let i0 = g.point_at(arc.start_angle, g.ring_inner);
    let (ro, ri) = (g.ring_outer, g.ring_inner);
    let _ = writeln!(
        svg,
        r#"<path d="M{:.4} {:.4}A{ro:.4} {ro:.4} 0 {large} 1 {:.4} {:.4}L{:.4} {:.4}A{ri:.4} {ri:.4} 0 {large} 0 {:.4} {:.4}Z"/>"#,
        o0.x, o0.y, o1.x, o1.y, i1.x, i1.y, i0.x, i0.y,
    );
}

/// A ring with every sector set cannot be drawn as a single arc.
fn write_full_ring(svg: &mut String, g: &TargetGeometry) {
    let mid = 0.5 * (g.ring_inner + g.ring_outer);
    let _ = writeln!(
        svg,
        r##"<circle cx="{:.4}" cy="{:.4}" r="{:.4}" fill="none" stroke="#fff" stroke-width="{:.4}"/>"##,
        g.center.x,
        g.center.y,
        mid,
        g.ring_outer - g.ring_inner
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use coded_targets_ring::{generate_de19733466, Codeword, RingCodeParams};

    #[test]
    fn first_page_has_twenty_labelled_targets() {
        let catalog = generate_de19733466().expect("valid params");
        let svg = render_sheet_svg(&catalog, &SheetLayout::default(), 0).expect("render");

        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"width="8.5in""#));
        assert!(svg.contains(r#"viewBox="0 0 8.5 11""#));
        assert_eq!(svg.matches("<circle ").count(), 20);
        assert_eq!(svg.matches("<text ").count(), 20);
        assert!(svg.contains(">1</text>"));
        assert!(svg.contains(">20</text>"));
        assert!(!svg.contains(">21</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn one_path_per_sector_run() {
        let catalog = generate_de19733466().expect("valid params");
        let svg = render_sheet_svg(&catalog, &SheetLayout::default(), 0).expect("render");
        let first = svg
            .split("<g ")
            .nth(1)
            .expect("first target group");
        // 129 sets two separate sectors.
        assert_eq!(first.matches("<path ").count(), 2);
    }

    #[test]
    fn labels_can_be_disabled() {
        let catalog = generate_de19733466().expect("valid params");
        let layout = SheetLayout {
            labels: false,
            ..SheetLayout::default()
        };
        let svg = render_sheet_svg(&catalog, &layout, 3).expect("render");
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn full_ring_is_drawn_as_stroked_circle() {
        let params = RingCodeParams::with_ring_length(8);
        let catalog = RingCatalog::from_codewords(params, vec![Codeword { id: 0, pattern: 0xff }])
            .expect("valid catalog");
        let svg = render_sheet_svg(&catalog, &SheetLayout::default(), 0).expect("render");
        assert!(svg.contains(r##"fill="none" stroke="#fff""##));
        assert!(!svg.contains("<path "));
    }

    #[test]
    fn out_of_range_page_is_an_error() {
        let catalog = generate_de19733466().expect("valid params");
        let err = render_sheet_svg(&catalog, &SheetLayout::default(), 99).unwrap_err();
        assert!(matches!(err, PrintError::PageOutOfRange { page: 99, pages: 26 }));
    }
}
