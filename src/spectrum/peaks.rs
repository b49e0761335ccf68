use super::broaden::ProfileSample;

/// Indices of interior local maxima: strictly above the left neighbour and
/// not below the right one, so a flat top reports its first sample once.
pub fn local_maxima(samples: &[ProfileSample]) -> Vec<usize> {
    if samples.len() < 3 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut i = 1;
    while i < samples.len() - 1 {
        let y = samples[i].y;
        if y > samples[i - 1].y {
            // walk across a plateau
            let mut j = i;
            while j + 1 < samples.len() && samples[j + 1].y == y {
                j += 1;
            }
            if j + 1 < samples.len() && samples[j + 1].y < y {
                out.push(i);
            }
            i = j + 1;
        } else {
            i += 1;
        }
    }
    out
}

/// Index of the highest sample (first one on ties).
pub fn argmax(samples: &[ProfileSample]) -> Option<usize> {
    samples
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, s)| match best {
            Some((_, y)) if y >= s.y => best,
            _ => Some((i, s.y)),
        })
        .map(|(i, _)| i)
}

/// `(offset, scale)` such that `(y - offset) * scale` maps `ys` onto
/// `[0, 1]`. A flat, empty or non-finite range gives `(0.0, 0.0)`.
pub fn minmax_transform(ys: &[f64]) -> (f64, f64) {
    let min = ys.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if !range.is_finite() || range.abs() < f64::EPSILON {
        (0.0, 0.0)
    } else {
        (min, range.recip())
    }
}

/// Rescale to `[0, 1]`. A flat series maps to all zeros.
pub fn minmax_scale(ys: &[f64]) -> Vec<f64> {
    let (offset, scale) = minmax_transform(ys);
    ys.iter().map(|&y| (y - offset) * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(ys: &[f64]) -> Vec<ProfileSample> {
        ys.iter()
            .enumerate()
            .map(|(i, &y)| ProfileSample { x: i as f64, y })
            .collect()
    }

    #[test]
    fn finds_two_maxima() {
        let s = samples(&[0.0, 1.0, 3.0, 1.0, 0.5, 2.0, 0.1]);
        assert_eq!(local_maxima(&s), vec![2, 5]);
    }

    #[test]
    fn plateau_reported_once() {
        let s = samples(&[0.0, 2.0, 2.0, 2.0, 1.0]);
        assert_eq!(local_maxima(&s), vec![1]);
    }

    #[test]
    fn monotone_has_no_interior_maximum() {
        assert!(local_maxima(&samples(&[0.0, 1.0, 2.0, 3.0])).is_empty());
        assert!(local_maxima(&samples(&[1.0, 1.0])).is_empty());
    }

    #[test]
    fn argmax_picks_first_highest() {
        assert_eq!(argmax(&samples(&[0.0, 4.0, 1.0, 4.0])), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn minmax_transform_offsets_and_scales() {
        assert_eq!(minmax_transform(&[2.0, 4.0, 3.0]), (2.0, 0.5));
        assert_eq!(minmax_transform(&[5.0, 5.0]), (0.0, 0.0));
        assert_eq!(minmax_transform(&[]), (0.0, 0.0));

        // a stick at the curve maximum lands on 1, the zero baseline below 0
        let (offset, scale) = minmax_transform(&[0.5, 2.5, 1.0]);
        assert_eq!((2.5 - offset) * scale, 1.0);
        assert_eq!((0.0 - offset) * scale, -0.25);
    }

    #[test]
    fn minmax_scaling() {
        assert_eq!(minmax_scale(&[2.0, 4.0, 3.0]), vec![0.0, 1.0, 0.5]);
        assert_eq!(minmax_scale(&[5.0, 5.0]), vec![0.0, 0.0]);
        assert!(minmax_scale(&[]).is_empty());
    }
}
