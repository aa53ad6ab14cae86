use std::f64::consts::TAU;
use abora_core::{Geometry, Lineseg};
use web_sys::CanvasRenderingContext2d;

/// Draw every lineseg in order: segments first, then a marker on each point.
pub fn draw_linesegs(ctx: &CanvasRenderingContext2d, linesegs: &[Lineseg], geometry: &Geometry) {
    ctx.set_line_width(geometry.stroke_width);
    ctx.set_line_cap("butt");

    for seg in linesegs {
        let colour = seg.colour().css();

        ctx.set_stroke_style_str(colour);
        for s in seg.segments() {
            ctx.begin_path();
            ctx.move_to(s.from.x, s.from.y);
            ctx.line_to(s.to.x, s.to.y);
            ctx.stroke();
        }

        ctx.set_fill_style_str(colour);
        for p in seg.markers() {
            ctx.begin_path();
            let _ = ctx.arc(p.x, p.y, geometry.marker_radius, 0.0, TAU);
            ctx.fill();
        }
    }
}
