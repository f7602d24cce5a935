//! Shell-style wildcard matching for window titles
//!
//! `*` matches any run of characters (including none), `?` matches exactly
//! one character, everything else matches itself. The pattern is anchored at
//! both ends.

/// Match `text` against `pattern`.
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    // Position after the last `*` seen, and where in `text` to retry from
    let mut resume: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                p += 1;
                if p == pattern.len() {
                    return true;
                }
                resume = Some((p, t + 1));
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match resume {
                Some((star_p, star_t)) => {
                    p = star_p;
                    t = star_t;
                    resume = Some((star_p, star_t + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}
