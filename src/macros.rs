#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`Rule`](crate::Rule) from a name and inclusive bounds.
///
/// ```
/// use ticketfield::rule;
///
/// let class = rule!("class": 1..=3, 5..=7);
/// assert!(class.is_valid(6));
/// assert!(!class.is_valid(4));
/// ```
#[macro_export]
macro_rules! rule {
    ($name:literal : $($low:literal ..= $high:literal),+ $(,)?) => {{
        $crate::Rule::new($name, vec![ $($crate::Range::new($low, $high)),+ ])
    }};
}
