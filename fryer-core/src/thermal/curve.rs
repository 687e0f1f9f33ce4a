//! 100K NTC thermistor curve
//!
//! The thermistor sits on the low side of a divider read by a 10-bit ADC.
//! The table below is the Steinhart-Hart approximation
//! `1/T = A + B ln(R) + C ln(R)^3` with
//! A = 1.129148e-3, B = 2.34125e-4, C = 8.76741e-8 and
//! `R = (100000 / 30) * (1024 / raw - 1)`, sampled at fixed raw values so
//! the conversion stays integer-only.

/// ADC full scale (10-bit)
pub const ADC_MAX: u16 = 1023;

/// Highest temperature the filter can represent (°C)
pub const MAX_CELSIUS: u8 = 255;

/// Curve points: (raw ADC value, temperature × 10)
///
/// Sorted by increasing raw value (increasing temperature). Spacing is
/// denser at the top where the curve steepens.
const CURVE: &[(u16, i16)] = &[
    (32, -211),
    (64, -81),
    (96, 3),
    (128, 67),
    (160, 121),
    (192, 168),
    (224, 211),
    (256, 250),
    (288, 287),
    (320, 322),
    (352, 356),
    (384, 389),
    (416, 422),
    (448, 455),
    (480, 487),
    (512, 520),
    (544, 554),
    (576, 589),
    (608, 624),
    (640, 662),
    (672, 701),
    (704, 743),
    (736, 788),
    (768, 838),
    (800, 894),
    (832, 958),
    (864, 1033),
    (896, 1125),
    (928, 1245),
    (960, 1421),
    (968, 1481),
    (976, 1552),
    (984, 1638),
    (992, 1746),
    (1000, 1893),
    (1004, 1990),
    (1008, 2114),
    (1012, 2283),
    (1014, 2395),
    (1016, 2539),
];

/// Reading reported past the hot end of the table (°C × 10)
const ABOVE_RANGE_X10: i16 = MAX_CELSIUS as i16 * 10;

/// Convert a raw ADC reading to temperature in 0.1 °C units
///
/// Uses linear interpolation between curve points. Readings below the
/// table return the coldest point, readings above it saturate at 255 °C.
pub fn raw_to_celsius_x10(raw: u16) -> i16 {
    let (first_raw, first_temp) = CURVE[0];
    if raw <= first_raw {
        return first_temp;
    }

    for pair in CURVE.windows(2) {
        let (r_low, t_low) = pair[0];
        let (r_high, t_high) = pair[1];

        if raw <= r_high {
            // temp = t_low + (t_high - t_low) * (raw - r_low) / (r_high - r_low)
            let r_range = (r_high - r_low) as i32;
            let t_range = (t_high - t_low) as i32;
            let r_offset = (raw - r_low) as i32;

            return t_low + (t_range * r_offset / r_range) as i16;
        }
    }

    ABOVE_RANGE_X10
}

/// Convert a raw ADC reading to whole °C, clamped to `[0, 255]`
pub fn raw_to_celsius(raw: u16) -> u8 {
    let celsius = raw_to_celsius_x10(raw) / 10;
    celsius.clamp(0, MAX_CELSIUS as i16) as u8
}

/// Smallest raw reading that converts to at least `celsius`
///
/// Inverse of [`raw_to_celsius`], used by simulated hosts to feed a known
/// temperature into the sampler.
pub fn celsius_to_raw(celsius: u8) -> u16 {
    (0..=ADC_MAX)
        .find(|&raw| raw_to_celsius(raw) >= celsius)
        .unwrap_or(ADC_MAX)
}
