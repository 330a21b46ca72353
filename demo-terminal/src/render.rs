//! Temperature-to-color classification and frame drawing
//!
//! Pure, stateless mapping from temperature to a terminal color band plus
//! the cursor-positioning glue that paints one timestep of the field. The
//! numerical core knows nothing about any of this.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use heat_sim_core::TemperatureField;

/// One entry of the ordered color table: `lower < temp <= upper` maps to
/// `color` (the first band includes its lower bound).
pub struct ColorBand {
    pub lower: f64,
    pub upper: f64,
    pub color: Color,
}

/// Temperature bands in Kelvin, coldest to hottest.
///
/// Bands follow the classic steel-plate palette: sub-freezing through
/// melting-hot. Bounds are contiguous, so classification is a linear scan.
pub const COLOR_BANDS: [ColorBand; 8] = [
    ColorBand { lower: 0.0, upper: 273.0, color: Color::Black },
    ColorBand { lower: 273.0, upper: 300.0, color: Color::Blue },
    ColorBand { lower: 300.0, upper: 350.0, color: Color::Cyan },
    ColorBand { lower: 350.0, upper: 400.0, color: Color::White },
    ColorBand { lower: 400.0, upper: 450.0, color: Color::Green },
    ColorBand { lower: 450.0, upper: 500.0, color: Color::Yellow },
    ColorBand { lower: 500.0, upper: 550.0, color: Color::Red },
    ColorBand { lower: 550.0, upper: 13000.0, color: Color::Magenta },
];

/// Map a temperature to its band color.
///
/// Total over all inputs: temperatures below the first band saturate to the
/// first band's color, temperatures above the last band to the last band's.
pub fn color_for(temp: f64) -> Color {
    if temp <= COLOR_BANDS[0].lower {
        return COLOR_BANDS[0].color;
    }
    for band in &COLOR_BANDS {
        if temp > band.lower && temp <= band.upper {
            return band.color;
        }
    }
    COLOR_BANDS[COLOR_BANDS.len() - 1].color
}

/// Paint one timestep of the field, one colored glyph per cell.
///
/// Cell `(i, j)` lands at terminal column `i`, row `j`. Output is queued and
/// flushed once per frame.
pub fn draw_frame<W: Write>(out: &mut W, field: &TemperatureField, t: usize, glyph: &str) -> io::Result<()> {
    for j in 0..field.ny() {
        queue!(out, MoveTo(0, j as u16))?;
        for i in 0..field.nx() {
            let color = color_for(field.get(i, j, t));
            queue!(out, SetForegroundColor(color), Print(glyph))?;
        }
    }
    queue!(out, ResetColor)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges_are_inclusive_above() {
        // Upper bounds belong to the lower band, matching `lower < t <= upper`
        assert_eq!(color_for(273.0), Color::Black);
        assert_eq!(color_for(273.1), Color::Blue);
        assert_eq!(color_for(300.0), Color::Blue);
        assert_eq!(color_for(350.0), Color::Cyan);
        assert_eq!(color_for(400.0), Color::White);
        assert_eq!(color_for(450.0), Color::Green);
        assert_eq!(color_for(500.0), Color::Yellow);
        assert_eq!(color_for(550.0), Color::Red);
        assert_eq!(color_for(551.0), Color::Magenta);
    }

    #[test]
    fn test_out_of_range_saturates() {
        assert_eq!(color_for(-40.0), Color::Black);
        assert_eq!(color_for(20000.0), Color::Magenta);
    }

    #[test]
    fn test_bands_are_contiguous() {
        for pair in COLOR_BANDS.windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
        }
    }
}
