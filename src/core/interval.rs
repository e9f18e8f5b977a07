//! Reasoning over closed intervals whose bounds may be absent.
//!
//! An absent minimum is negative infinity and an absent maximum is positive
//! infinity, so an unbounded side never prevents an overlap.

/// `lower <= upper`, where either side being unbounded satisfies the test
#[inline]
fn bound_reaches(lower: Option<i64>, upper: Option<i64>) -> bool {
    match (lower, upper) {
        (Some(lower), Some(upper)) => lower <= upper,
        (None, _) | (_, None) => true,
    }
}

/// Check whether `[a_min, a_max]` and `[b_min, b_max]` share at least one point
///
/// Symmetric in its two intervals. Only intervals that are bounded on the
/// facing sides and disjoint fail to overlap.
#[inline]
pub fn ranges_overlap(
    a_min: Option<i64>,
    a_max: Option<i64>,
    b_min: Option<i64>,
    b_max: Option<i64>,
) -> bool {
    bound_reaches(a_min, b_max) && bound_reaches(b_min, a_max)
}

/// Distance from a student's range to a target range, used for fallback ranking
///
/// Lower is better and 0 means no penalty:
/// * unbounded student maximum: 0, nothing is too expensive
/// * target starts above the student's maximum: `target_min - student_max`
/// * target ends below the student's minimum: `student_min - target_max`
/// * otherwise 0
pub fn range_distance(
    student_min: Option<i64>,
    student_max: Option<i64>,
    target_min: Option<i64>,
    target_max: Option<i64>,
) -> f64 {
    let Some(student_max) = student_max else {
        return 0.0;
    };

    match (target_min, target_max, student_min) {
        (Some(t_min), _, _) if t_min > student_max => t_min as f64 - student_max as f64,
        (_, Some(t_max), Some(s_min)) if t_max < s_min => s_min as f64 - t_max as f64,
        _ => 0.0,
    }
}
