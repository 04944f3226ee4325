// core/src/numeric.rs
//! Numeriske hjelpere som alle kalkulatorene deler.

/// Sikker divisjon: 0 når nevneren er 0 eller ikke-endelig.
#[inline]
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return 0.0;
    }
    numerator / denominator
}

/// Klem til [0, 1]. NaN og andre ikke-endelige verdier behandles som 0.
#[inline]
pub fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

/// Erstatter ikke-endelige verdier med 0 (vakt før visning/avrunding).
#[inline]
pub fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

/// Avrunding halv-opp til nærmeste heltall (floor(x + 0.5)).
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Andel (0..=1) → prosent som heltall. Ikke-endelige verdier gir 0.
pub fn to_percent(ratio: f64) -> u32 {
    let pct = round_half_up(finite_or_zero(ratio) * 100.0);
    if pct <= 0.0 { 0 } else { pct as u32 }
}

pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 { return self.round(); }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}
