/// Split a request target into pathname, query, and fragment.
/// Returns (`pathname`, `query_without_question_mark`, `fragment_without_hash`).
/// A present-but-empty query or fragment is `Some("")`.
/// Optimization: Uses SIMD-accelerated memchr for fast '#' and '?' search
pub fn split_target(target: &str) -> (&str, Option<&str>, Option<&str>) {
    let (without_fragment, fragment) =
        memchr::memchr(b'#', target.as_bytes()).map_or((target, None), |pos| {
            (&target[..pos], Some(&target[pos + 1..]))
        });
    let (pathname, query) = memchr::memchr(b'?', without_fragment.as_bytes())
        .map_or((without_fragment, None), |pos| {
            (&without_fragment[..pos], Some(&without_fragment[pos + 1..]))
        });
    (pathname, query, fragment)
}
