use rand::Rng;

/// Fill `samples` with uniform white noise in `[-amplitude, amplitude]`.
pub fn fill_white<R: Rng>(samples: &mut [f32], rng: &mut R, amplitude: f32) {
    for s in samples.iter_mut() {
        *s = (rng.gen::<f32>() * 2.0 - 1.0) * amplitude;
    }
}

/// Fill `samples` with an approximation of pink noise using Paul Kellet's
/// six-pole running-sum filter. The coefficients are load-bearing: they set
/// the -3 dB/octave tilt that makes the celebration swell read as a crowd
/// rather than as static.
pub fn fill_pink<R: Rng>(samples: &mut [f32], rng: &mut R) {
    let (mut b0, mut b1, mut b2, mut b3, mut b4, mut b5, mut b6) =
        (0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32);
    for s in samples.iter_mut() {
        let white = rng.gen::<f32>() * 2.0 - 1.0;
        b0 = 0.99886 * b0 + white * 0.0555179;
        b1 = 0.99332 * b1 + white * 0.0750759;
        b2 = 0.96900 * b2 + white * 0.1538520;
        b3 = 0.86650 * b3 + white * 0.3104856;
        b4 = 0.55000 * b4 + white * 0.5329522;
        b5 = -0.7616 * b5 - white * 0.0168980;
        *s = (b0 + b1 + b2 + b3 + b4 + b5 + b6 + white * 0.5362) * 0.11;
        b6 = white * 0.115926;
    }
}
