//! Raw ADC to screen coordinate mapping.
//!
//! The affine transform is
//!
//! ```text
//! x' = a*x + b*y + c
//! y' = d*x + e*y + f
//! ```
//!
//! with coefficients in 16.16 fixed point, which is enough for 12-bit raw
//! input and screens up to 32767 pixels without floating point on the ARM9.

use fixed::types::I16F16;

use super::TouchSample;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Calibration {
    pub a: I16F16,
    pub b: I16F16,
    pub c: I16F16,
    pub d: I16F16,
    pub e: I16F16,
    pub f: I16F16,
    pub width: u16,
    pub height: u16,
}

impl Calibration {
    pub fn identity(width: u16, height: u16) -> Self {
        Self {
            a: I16F16::ONE,
            b: I16F16::ZERO,
            c: I16F16::ZERO,
            d: I16F16::ZERO,
            e: I16F16::ONE,
            f: I16F16::ZERO,
            width,
            height,
        }
    }

    /// Independent linear mapping per axis from the raw extremes to the screen edges.
    pub fn from_range(
        x_raw: (u16, u16),
        y_raw: (u16, u16),
        width: u16,
        height: u16,
    ) -> Option<Self> {
        let (a, c) = axis_scale(x_raw, width)?;
        let (e, f) = axis_scale(y_raw, height)?;
        Some(Self {
            a,
            b: I16F16::ZERO,
            c,
            d: I16F16::ZERO,
            e,
            f,
            width,
            height,
        })
    }

    /// Three-point calibration: raw touches at three known screen targets.
    ///
    /// Returns `None` when the raw points are collinear.
    pub fn from_points(
        raw: [TouchSample; 3],
        screen: [TouchSample; 3],
        width: u16,
        height: u16,
    ) -> Option<Self> {
        let [x0, x1, x2] = raw.map(|p| p.x as i64);
        let [y0, y1, y2] = raw.map(|p| p.y as i64);
        let [sx0, sx1, sx2] = screen.map(|p| p.x as i64);
        let [sy0, sy1, sy2] = screen.map(|p| p.y as i64);

        let det = (x0 - x2) * (y1 - y2) - (x1 - x2) * (y0 - y2);
        if det == 0 {
            return None;
        }

        let solve = |s0: i64, s1: i64, s2: i64| -> Option<(I16F16, I16F16, I16F16)> {
            let a = (s0 - s2) * (y1 - y2) - (s1 - s2) * (y0 - y2);
            let b = (x0 - x2) * (s1 - s2) - (s0 - s2) * (x1 - x2);
            let c = s0 * (x1 * y2 - x2 * y1) + s1 * (x2 * y0 - x0 * y2) + s2 * (x0 * y1 - x1 * y0);
            Some((ratio(a, det)?, ratio(b, det)?, ratio(c, det)?))
        };

        let (a, b, c) = solve(sx0, sx1, sx2)?;
        let (d, e, f) = solve(sy0, sy1, sy2)?;
        Some(Self {
            a,
            b,
            c,
            d,
            e,
            f,
            width,
            height,
        })
    }

    /// Maps a raw sample to screen pixels, clamped to the screen.
    pub fn apply(&self, raw: TouchSample) -> TouchSample {
        let x = I16F16::saturating_from_num(raw.x);
        let y = I16F16::saturating_from_num(raw.y);
        let sx = self
            .a
            .saturating_mul(x)
            .saturating_add(self.b.saturating_mul(y))
            .saturating_add(self.c);
        let sy = self
            .d
            .saturating_mul(x)
            .saturating_add(self.e.saturating_mul(y))
            .saturating_add(self.f);
        TouchSample {
            x: clamp_axis(sx, self.width),
            y: clamp_axis(sy, self.height),
        }
    }
}

fn axis_scale((min, max): (u16, u16), size: u16) -> Option<(I16F16, I16F16)> {
    if max <= min || size == 0 {
        return None;
    }
    let span = (max - min) as i64;
    let scale = ratio(size as i64 - 1, span)?;
    let offset = ratio(-(min as i64) * (size as i64 - 1), span)?;
    Some((scale, offset))
}

/// `num / den` as 16.16, `None` if it does not fit.
fn ratio(num: i64, den: i64) -> Option<I16F16> {
    let bits = (num << 16).checked_div(den)?;
    i32::try_from(bits).ok().map(I16F16::from_bits)
}

fn clamp_axis(value: I16F16, size: u16) -> u16 {
    let max = size.saturating_sub(1) as i32;
    value.saturating_round().to_num::<i32>().clamp(0, max) as u16
}

#[cfg(test)]
mod tests;
