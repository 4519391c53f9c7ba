use rand::Rng;

pub const SHORT_ID_MIN: u32 = 10_000;
pub const SHORT_ID_MAX: u32 = 99_999;

const RANDOM_ATTEMPTS: usize = 32;

/// Id corto de 5 dígitos, uniforme en ["10000", "99999"]. No garantiza unicidad.
pub fn generate_short_id() -> String {
    rand::thread_rng()
        .gen_range(SHORT_ID_MIN..=SHORT_ID_MAX)
        .to_string()
}

/// Draws short ids until one is not `is_taken`. Falls back to the
/// lowest free id once random draws keep colliding; when the whole range is
/// taken the last random draw is returned.
pub fn generate_unique_id<F>(is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut candidate = generate_short_id();
    for _ in 0..RANDOM_ATTEMPTS {
        if !is_taken(&candidate) {
            return candidate;
        }
        candidate = generate_short_id();
    }

    (SHORT_ID_MIN..=SHORT_ID_MAX)
        .map(|n| n.to_string())
        .find(|id| !is_taken(id))
        .unwrap_or(candidate)
}
