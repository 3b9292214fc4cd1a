/// A symmetric linear fade envelope.
/// Over the first `fade` fraction of a tone the amplitude rises from zero to one,
/// over the last `fade` fraction it falls back to zero, and it is one in between.
///
/// The envelope is evaluated per sample index for a tone of known length,
/// which is all a tone without a separate key release needs.
///
/// # Example
///
/// ```
/// use emotune::synth::envelope::*;
/// let e = Fade { fade: 0.1 };
/// assert_eq!(e.eval(0, 100), 0.0);
/// assert_eq!(e.eval(5, 100), 0.5);
/// assert_eq!(e.eval(50, 100), 1.0);
/// assert_eq!(e.eval(90, 100), 1.0);
/// assert_eq!(e.eval(95, 100), 0.5);
/// assert_eq!(e.eval(99, 100), 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct Fade {
    /// Fraction of the tone length spent fading in, and again fading out.
    pub fade: f64,
}

impl Fade {
    /// Evaluate the envelope curve at sample `index` of a tone with `count` samples.
    pub fn eval(&self, index: usize, count: usize) -> f64 {
        let i = index as f64;
        let n = count as f64;
        let ramp = self.fade * n;
        if i < ramp {
            i / ramp
        } else if i > (1.0 - self.fade) * n {
            (n - i) / ramp
        } else {
            1.0
        }
    }
}

/// Fade in and out over a tenth of the tone each, enough to avoid clicks at the tone boundaries.
impl Default for Fade {
    fn default() -> Self {
        Fade { fade: 0.1 }
    }
}
