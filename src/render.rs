use crate::constants::*;
use crate::core::{Medallion, Particle, Rocket};
use web_sys as web;

/// Thin Canvas2D wrapper. All draw calls are best-effort: a failed path op
/// loses at most one shape for one frame.
pub struct Painter {
    ctx: web::CanvasRenderingContext2d,
}

impl Painter {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Low-alpha dark fill over the previous frame. Deliberately not a
    /// clear; the residue is what produces the motion trails.
    pub fn fill_trail(&self, width: f64, height: f64) {
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(TRAIL_FILL);
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    pub fn draw_particle(&self, p: &Particle) {
        self.ctx.set_global_alpha(p.alpha as f64);
        self.ctx
            .set_fill_style_str(&hsl(p.hue, 100.0, p.lightness));
        self.ctx.begin_path();
        _ = self.ctx.arc(
            p.pos.x as f64,
            p.pos.y as f64,
            p.radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    pub fn draw_rocket(&self, r: &Rocket) {
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(&hsl(r.hue, 100.0, 60.0));
        self.ctx.begin_path();
        _ = self.ctx.arc(
            r.pos.x as f64,
            r.pos.y as f64,
            ROCKET_RADIUS,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();

        // Exhaust trail below the shell
        self.ctx.set_fill_style_str(ROCKET_TRAIL_FILL);
        self.ctx
            .fill_rect(r.pos.x as f64 - 1.0, r.pos.y as f64, 2.0, 10.0);
    }

    /// Rotated, circularly clipped image draw with a white ring. Skipped
    /// while the image has not finished loading.
    pub fn draw_medallion(&self, m: &Medallion, image: &web::HtmlImageElement) {
        if !image.complete() || image.natural_width() == 0 {
            return;
        }
        let size = m.size as f64;
        let half = size / 2.0;
        self.ctx.save();
        self.ctx.set_global_alpha(1.0);
        _ = self
            .ctx
            .translate(m.pos.x as f64 + half, m.pos.y as f64 + half);
        _ = self.ctx.rotate(m.rotation as f64);

        self.ctx.begin_path();
        _ = self.ctx.arc(0.0, 0.0, half, 0.0, std::f64::consts::TAU);
        self.ctx.close_path();

        self.ctx.set_line_width(MEDALLION_RING_WIDTH);
        self.ctx.set_stroke_style_str(MEDALLION_RING_STROKE);
        self.ctx.stroke();

        self.ctx.clip();
        _ = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, -half, -half, size, size);
        self.ctx.restore();
    }
}

fn hsl(hue: f32, saturation: f32, lightness: f32) -> String {
    format!("hsl({hue:.0}, {saturation:.0}%, {lightness:.0}%)")
}
