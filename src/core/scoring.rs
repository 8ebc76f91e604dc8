use crate::core::vectorizer::TfidfMatrix;

/// Score every resume row against the job description row and rank them
///
/// Row 0 of `matrix` is the description, rows `1..` are resumes. Returns
/// `(resume_index, score)` pairs where `resume_index` counts from 0 over the
/// resumes. Rows are unit length, so cosine similarity is a plain dot product;
/// weights are non-negative so scores lie in [0, 1].
///
/// Ordering is descending by score. The sort is stable, so equal scores keep
/// their input order.
pub fn score(matrix: &TfidfMatrix) -> Vec<(usize, f64)> {
    let Some((description, resumes)) = matrix.rows().split_first() else {
        return Vec::new();
    };

    let mut scored: Vec<(usize, f64)> = resumes
        .iter()
        .enumerate()
        .map(|(index, row)| (index, description.dot(row).clamp(0.0, 1.0)))
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    scored
}
