//! Grid snapping shared by design-mode moves and resizes.

/// Amount to subtract from `value` to land on the nearest grid line. Values
/// past the half-grid point round up, giving a negative remainder.
pub fn snap_remainder(value: f64, grid: f64) -> f64 {
    if grid <= 0.0 {
        return 0.0;
    }
    let rem = value % grid;
    if rem > grid / 2.0 {
        -(grid - rem)
    } else {
        rem
    }
}

pub fn snap(value: f64, grid: f64) -> f64 {
    value - snap_remainder(value, grid)
}

/// Remainders for a resize to `(width, height)`. A container may instead
/// snap its client area, which is `client` when given. The pair is picked by
/// comparing the width and height remainder differences; a zero comparison
/// keeps the client candidate.
pub fn resize_remainders(width: f64, height: f64, client: Option<(f64, f64)>, grid: f64) -> (f64, f64) {
    if grid <= 0.0 {
        return (0.0, 0.0);
    }
    let wd1 = width % grid;
    let hd1 = height % grid;
    let (wd2, hd2) = match client {
        Some((cw, ch)) => (cw % grid, ch % grid),
        None => (wd1, hd1),
    };
    let dx = (wd1 - wd2) - (hd1 - hd2);
    let (wd, hd) = if dx < 0.0 { (wd1, hd1) } else { (wd2, hd2) };
    let round = |d: f64| if d > grid / 2.0 { -(grid - d) } else { d };
    (round(wd), round(hd))
}
