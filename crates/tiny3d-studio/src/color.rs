/// Clear color for frame `tick`: the hue walks one degree per frame.
pub(crate) fn frame_color(tick: u32) -> (f32, f32, f32) {
    hsv_to_rgb((tick % 360) as f32, 0.6, 0.9)
}

/// `hue` in degrees, `saturation` and `value` in [0, 1].
fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> (f32, f32, f32) {
    let c = value * saturation;
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = value - c;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (r + m, g + m, b + m)
}
