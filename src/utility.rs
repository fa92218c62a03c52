pub(crate) mod dms {
    /// Minutes per degree
    pub const DM: f64 = 60.;
    /// Seconds per minute
    pub const MS: f64 = 60.;
    /// Seconds per degree
    pub const DS: f64 = DM * MS;
}

// Kronrod abscissae on [0, 1]. Odd indices are the 7-point Gauss nodes.
#[allow(clippy::unreadable_literal, clippy::excessive_precision)]
const XGK: [f64; 8] = [
    0.991455371120812639206854697526329,
    0.949107912342758524526189684047851,
    0.864864423359769072789712788640926,
    0.741531185599394439863864773280788,
    0.586087235467691130294144845693013,
    0.405845151377397166906606412076961,
    0.207784955007898467600689403773245,
    0.000000000000000000000000000000000,
];

#[allow(clippy::unreadable_literal, clippy::excessive_precision)]
const WGK: [f64; 8] = [
    0.022935322010529224963732008058970,
    0.063092092629978553290700663189204,
    0.104790010322250183839876322541518,
    0.140653259715525918745189590510238,
    0.169004726639267902826583426598550,
    0.190350578064785409913256402421014,
    0.204432940075298892414161999234649,
    0.209482141084727828012999174891714,
];

#[allow(clippy::unreadable_literal, clippy::excessive_precision)]
const WG: [f64; 4] = [
    0.129484966168869693270611432679082,
    0.279705391489276667901467771423780,
    0.381830050505118944950369775488975,
    0.417959183673469387755102040816327,
];

const MAX_DEPTH: u32 = 16;

/// 15-point Kronrod estimate of the integral over `[lo, hi]` along with the
/// difference to the embedded 7-point Gauss rule.
fn kronrod15<F: Fn(f64) -> f64>(f: &F, lo: f64, hi: f64) -> (f64, f64) {
    let center = 0.5 * (lo + hi);
    let half = 0.5 * (hi - lo);

    let fc = f(center);
    let mut gauss = fc * WG[3];
    let mut kronrod = fc * WGK[7];

    for j in 0..7 {
        let dx = half * XGK[j];
        let pair = f(center - dx) + f(center + dx);
        kronrod += WGK[j] * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    (kronrod * half, ((kronrod - gauss) * half).abs())
}

fn adapt<F: Fn(f64) -> f64>(f: &F, lo: f64, hi: f64, tol: f64, depth: u32) -> f64 {
    let (value, err) = kronrod15(f, lo, hi);
    // Below this the estimate is rounding noise
    let noise = 50. * f64::EPSILON * value.abs();
    if err <= tol.max(noise) || depth >= MAX_DEPTH {
        return value;
    }

    let mid = 0.5 * (lo + hi);
    adapt(f, lo, mid, tol / 2., depth + 1) + adapt(f, mid, hi, tol / 2., depth + 1)
}

/// Integrate `f` from `lo` to `hi` by adaptive Gauss-Kronrod quadrature,
/// bisecting until the Gauss/Kronrod difference of each piece is below its
/// share of `tol` or down to rounding noise. Returns exactly zero for an
/// empty interval.
#[allow(clippy::float_cmp)]
pub(crate) fn integrate<F: Fn(f64) -> f64>(f: F, lo: f64, hi: f64, tol: f64) -> f64 {
    if lo == hi {
        return 0.;
    }
    adapt(&f, lo, hi, tol, 0)
}
