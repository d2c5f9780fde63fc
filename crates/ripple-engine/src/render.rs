//! Cairo compositing for one ripple frame.
//!
//! Paint order, back to front: a soft shadow around the inset rounded rect,
//! then an offscreen group holding the base fill with the ripple circle
//! composited `Atop` it, flattened onto the target. Blending against the
//! already antialiased base fill confines the circle to the rounded corners
//! without the jagged edges a path clip leaves behind.
//!
//! GTK4 composites widget content on the GPU through GSK, so the group needs
//! no extra layer promotion on the host side.

use crate::color::Color;
use crate::geometry::{FrameGeometry, Rect};
use crate::selection::VisualParams;
use crate::style::RippleStyle;
use cairo::{Context, Operator};
use std::f64::consts::{FRAC_PI_2, PI};

const MAX_SHADOW_LAYERS: usize = 16;

pub fn draw(
    cr: &Context,
    frame: &FrameGeometry,
    style: &RippleStyle,
    visuals: VisualParams,
) -> Result<(), cairo::Error> {
    if frame.shadow_rect.is_empty() {
        return Ok(());
    }
    draw_shadow(cr, frame, style, visuals.opacity())?;
    draw_ripple_layer(cr, frame, style, visuals)
}

/// Approximates a blur with stacked translucent rounded rects, widest first.
fn draw_shadow(
    cr: &Context,
    frame: &FrameGeometry,
    style: &RippleStyle,
    opacity: f64,
) -> Result<(), cairo::Error> {
    let blur = style.shadow_blur();
    if opacity <= 0.0 || blur <= 0.0 {
        return Ok(());
    }

    let layers = (blur.ceil() as usize).clamp(1, MAX_SHADOW_LAYERS);
    let (r, g, b, a) = style.shadow_color.components_with_opacity(opacity);
    let layer_alpha = a / layers as f64;

    cr.save()?;
    for i in (1..=layers).rev() {
        let spread = blur * i as f64 / layers as f64;
        rounded_rect(
            cr,
            frame.shadow_rect.outset(spread),
            frame.corner_radius + spread,
        );
        cr.set_source_rgba(r, g, b, layer_alpha);
        cr.fill()?;
    }
    cr.restore()
}

fn draw_ripple_layer(
    cr: &Context,
    frame: &FrameGeometry,
    style: &RippleStyle,
    visuals: VisualParams,
) -> Result<(), cairo::Error> {
    let rect = frame.shadow_rect;

    cr.save()?;
    cr.rectangle(rect.x, rect.y, rect.width, rect.height);
    cr.clip();
    cr.push_group();

    rounded_rect(cr, rect, frame.corner_radius);
    set_source(cr, style.base_color, 1.0);
    cr.fill()?;

    if visuals.radius > 0.0 && visuals.alpha > 0 {
        cr.set_operator(Operator::Atop);
        set_source(cr, style.ripple_color, visuals.opacity());
        cr.arc(
            visuals.center.x,
            visuals.center.y,
            visuals.radius,
            0.0,
            2.0 * PI,
        );
        cr.fill()?;
        cr.set_operator(Operator::Over);
    }

    cr.pop_group_to_source()?;
    cr.paint()?;
    cr.restore()
}

fn set_source(cr: &Context, color: Color, opacity: f64) {
    let (r, g, b, a) = color.components_with_opacity(opacity);
    cr.set_source_rgba(r, g, b, a);
}

fn rounded_rect(cr: &Context, rect: Rect, radius: f64) {
    let r = radius.clamp(0.0, rect.width.min(rect.height) / 2.0);
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);

    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -FRAC_PI_2, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, FRAC_PI_2);
    cr.arc(x + r, y + h - r, r, FRAC_PI_2, PI);
    cr.arc(x + r, y + r, r, PI, 3.0 * FRAC_PI_2);
    cr.close_path();
}
