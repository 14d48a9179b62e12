//! In-situ seawater density from the polyTEOS10-bsq polynomial
//!
//! 75-term Boussinesq fit of the TEOS-10 equation of state in absolute
//! salinity, conservative temperature and depth (Roquet et al. 2015,
//! Ocean Modelling, appendix A.2). Inputs are reduced to
//! `ss = sqrt((SA + dS) / SAu)`, `tt = CT / CTu` and `zz = depth / Zu`,
//! and the density is a reference profile `r0(zz)` plus a cubic in `zz`
//! whose coefficients are polynomials in `ss` and `tt`.

const SAU: f64 = 40.0 * 35.16504 / 35.0;
const CTU: f64 = 40.0;
const ZU: f64 = 1e4;
const DELTA_S: f64 = 32.0;

const R00: f64 = 4.6494977072e+01;
const R01: f64 = -5.2099962525e+00;
const R02: f64 = 2.2601900708e-01;
const R03: f64 = 6.4326772569e-02;
const R04: f64 = 1.5616995503e-02;
const R05: f64 = -1.7243708991e-03;

const R000: f64 = 8.0189615746e+02;
const R100: f64 = 8.6672408165e+02;
const R200: f64 = -1.7864682637e+03;
const R300: f64 = 2.0375295546e+03;
const R400: f64 = -1.2849161071e+03;
const R500: f64 = 4.3227585684e+02;
const R600: f64 = -6.0579916612e+01;
const R010: f64 = 2.6010145068e+01;
const R110: f64 = -6.5281885265e+01;
const R210: f64 = 8.1770425108e+01;
const R310: f64 = -5.6888046321e+01;
const R410: f64 = 1.7681814114e+01;
const R510: f64 = -1.9193502195e+00;
const R020: f64 = -3.7074170417e+01;
const R120: f64 = 6.1548258127e+01;
const R220: f64 = -6.0362551501e+01;
const R320: f64 = 2.9130021253e+01;
const R420: f64 = -5.4723692739e+00;
const R030: f64 = 2.1661789529e+01;
const R130: f64 = -3.3449108469e+01;
const R230: f64 = 1.9717078466e+01;
const R330: f64 = -3.1742946532e+00;
const R040: f64 = -8.3627885467e+00;
const R140: f64 = 1.1311538584e+01;
const R240: f64 = -5.3563304045e+00;
const R050: f64 = 5.4048723791e-01;
const R150: f64 = 4.8169980163e-01;
const R060: f64 = -1.9083568888e-01;
const R001: f64 = 1.9681925209e+01;
const R101: f64 = -4.2549998214e+01;
const R201: f64 = 5.0774768218e+01;
const R301: f64 = -3.0938076334e+01;
const R401: f64 = 6.6051753097e+00;
const R011: f64 = -1.3336301113e+01;
const R111: f64 = -4.4870114575e+00;
const R211: f64 = 5.0042598061e+00;
const R311: f64 = -6.5399043664e-01;
const R021: f64 = 6.7080479603e+00;
const R121: f64 = 3.5063081279e+00;
const R221: f64 = -1.8795372996e+00;
const R031: f64 = -2.4649669534e+00;
const R131: f64 = -5.5077101279e-01;
const R041: f64 = 5.5927935970e-01;
const R002: f64 = 2.0660924175e+00;
const R102: f64 = -4.9527603989e+00;
const R202: f64 = 2.5019633244e+00;
const R012: f64 = 2.0564311499e+00;
const R112: f64 = -2.1311365518e-01;
const R022: f64 = -1.2419983026e+00;
const R003: f64 = -2.3342758797e-02;
const R103: f64 = -1.8507636718e-02;
const R013: f64 = 3.7969820455e-01;

/// Seawater density [kg m-3] for absolute salinity `sa` [g kg-1],
/// conservative temperature `ct` [degC] and `depth` [m]. The sign of
/// `depth` is ignored.
pub fn poly_teos10_bsq(sa: f64, ct: f64, depth: f64) -> f64 {
    let ss = ((sa + DELTA_S) / SAU).sqrt();
    let tt = ct / CTU;
    let zz = depth.abs() / ZU;

    let rz3 = R013 * tt + R103 * ss + R003;
    let rz2 = (R022 * tt + R112 * ss + R012) * tt + (R202 * ss + R102) * ss + R002;
    let rz1 = (((R041 * tt + R131 * ss + R031) * tt + (R221 * ss + R121) * ss + R021) * tt
        + ((R311 * ss + R211) * ss + R111) * ss
        + R011)
        * tt
        + (((R401 * ss + R301) * ss + R201) * ss + R101) * ss
        + R001;
    let rz0 = (((((R060 * tt + R150 * ss + R050) * tt + (R240 * ss + R140) * ss + R040) * tt
        + ((R330 * ss + R230) * ss + R130) * ss
        + R030)
        * tt
        + (((R420 * ss + R320) * ss + R220) * ss + R120) * ss
        + R020)
        * tt
        + ((((R510 * ss + R410) * ss + R310) * ss + R210) * ss + R110) * ss
        + R010)
        * tt
        + (((((R600 * ss + R500) * ss + R400) * ss + R300) * ss + R200) * ss + R100) * ss
        + R000;

    let r0 = (((((R05 * zz + R04) * zz + R03) * zz + R02) * zz + R01) * zz + R00) * zz;

    ((rz3 * zz + rz2) * zz + rz1) * zz + rz0 + r0
}
