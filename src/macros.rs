/// Compile a regular expression once and hand out a `&'static Regex`.
///
/// Accepts any `&'static str` expression so long patterns can be assembled
/// with `concat!`.
#[macro_export]
macro_rules! regex {
    ($pat:expr) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
