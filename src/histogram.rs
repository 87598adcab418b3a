use crate::error::VisualizeError;

/// Equal-width histogram of hue values over a closed range.
///
/// Binning follows the usual `[lo, hi]` convention: every bin is half-open
/// except the last, which also takes values equal to `hi`. Values outside the
/// range (or NaN) are not counted.
#[derive(Debug, Clone, PartialEq)]
pub struct HueHistogram {
    counts: Vec<u64>,
    range: (f32, f32),
    dropped: u64,
}

impl HueHistogram {
    /// An empty histogram with `bins` bins over `range`.
    pub fn new(bins: usize, range: (f32, f32)) -> Result<Self, VisualizeError> {
        let (lo, hi) = range;
        if bins == 0 {
            return Err(VisualizeError::invalid("bins must be at least 1"));
        }
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(VisualizeError::invalid(format!(
                "histogram range must be finite with lo < hi, got ({lo}, {hi})"
            )));
        }
        Ok(Self {
            counts: vec![0; bins],
            range,
            dropped: 0,
        })
    }

    pub fn from_values(
        values: impl IntoIterator<Item = f32>,
        bins: usize,
        range: (f32, f32),
    ) -> Result<Self, VisualizeError> {
        let mut hist = Self::new(bins, range)?;
        hist.extend(values);
        Ok(hist)
    }

    /// Bin index for `value`, or `None` if it falls outside the range.
    pub fn bin_of(&self, value: f32) -> Option<usize> {
        let (lo, hi) = self.range;
        if !(lo..=hi).contains(&value) {
            return None;
        }
        let bins = self.counts.len();
        let scaled = ((value as f64 - lo as f64) * bins as f64 / (hi as f64 - lo as f64)).floor();
        Some((scaled as usize).min(bins - 1))
    }

    pub fn add(&mut self, value: f32) {
        match self.bin_of(value) {
            Some(bin) => self.counts[bin] += 1,
            None => self.dropped += 1,
        }
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn count(&self, bin: usize) -> u64 {
        self.counts.get(bin).copied().unwrap_or(0)
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    /// Number of values that were counted into a bin.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of values that fell outside the range.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// The first bin holding the highest count, `None` if nothing was counted.
    pub fn dominant_bin(&self) -> Option<usize> {
        let max = self.max_count();
        if max == 0 {
            return None;
        }
        self.counts.iter().position(|&c| c == max)
    }

    /// Center value of `bin`.
    pub fn bin_center(&self, bin: usize) -> f32 {
        let (lo, hi) = self.range;
        let width = (hi - lo) / self.counts.len() as f32;
        lo + width * (bin as f32 + 0.5)
    }
}

impl Extend<f32> for HueHistogram {
    fn extend<I: IntoIterator<Item = f32>>(&mut self, iter: I) {
        for v in iter {
            self.add(v);
        }
    }
}
